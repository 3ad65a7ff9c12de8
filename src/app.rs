use crate::input::{parse_line, Command};
use crate::model::Pet;
use crate::render::{status_panel, HELP};
use crate::sim::Action;
use crate::storage::{load_pet, save_pet};
use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Outcome of one command: text to print and whether to leave the loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub quit: bool,
    pub message: String,
}

impl Reply {
    fn say(message: impl Into<String>) -> Self {
        Self {
            quit: false,
            message: message.into(),
        }
    }
}

pub struct App {
    pet: Pet,
    save_path: PathBuf,
    color: bool,
}

impl App {
    pub fn new(pet: Pet, save_path: PathBuf, color: bool) -> Self {
        Self {
            pet,
            save_path,
            color,
        }
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn save_path(&self) -> &PathBuf {
        &self.save_path
    }

    /// Catches the pet up to `now` and runs one parsed command.
    pub fn handle(&mut self, command: Command, now: DateTime<Utc>) -> Reply {
        if !matches!(command, Command::Empty | Command::Unknown(_)) {
            self.pet.tick_realtime(now);
        }
        debug!("command {command:?}");

        let name = self.pet.name().to_string();
        match command {
            Command::Empty => Reply::say(""),
            Command::Status => Reply::say(status_panel(&self.pet, self.color)),
            Command::Help => Reply::say(HELP),
            Command::Quit => Reply {
                quit: true,
                message: "Goodbye!".to_string(),
            },
            Command::Unknown(_) => Reply::say("Unknown command."),
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.save_path.clone());
                match save_pet(&path, &self.pet) {
                    Ok(()) => Reply::say(format!("Saved to {}", path.display())),
                    Err(e) => {
                        warn!("save failed: {e:#}");
                        Reply::say(format!("Failed to save: {e:#}"))
                    }
                }
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.save_path.clone());
                match load_pet(&path, now) {
                    Ok(pet) => {
                        self.pet = pet;
                        Reply::say(format!("Loaded from {}", path.display()))
                    }
                    Err(e) => {
                        warn!("load failed: {e:#}");
                        Reply::say(format!("Failed to load: {e:#}"))
                    }
                }
            }
            _ if !self.pet.is_alive() => Reply::say(format!("{name} is no longer alive.")),
            Command::Rename(new_name) => {
                if self.pet.rename(&new_name) {
                    Reply::say(format!("{name} is now called {}.", self.pet.name()))
                } else {
                    Reply::say("Usage: rename <name>")
                }
            }
            Command::Tick(minutes) => {
                self.pet.tick(minutes);
                Reply::say(format!("{minutes} minutes pass."))
            }
            Command::Feed(amount) => self.act(Action::Feed(amount), now, format!("You fed {name}.")),
            Command::Play(minutes) => {
                self.act(Action::Play(minutes), now, format!("You played with {name}."))
            }
            Command::Sleep(hours) => self.act(
                Action::Sleep(hours),
                now,
                format!("{name} slept for {hours} hours."),
            ),
            Command::Clean => self.act(Action::Clean, now, "You cleaned the litter box.".to_string()),
            Command::Discipline => {
                self.act(Action::Discipline, now, format!("You disciplined {name}."))
            }
            Command::Attention => self.act(Action::Attention, now, format!("You petted {name}.")),
            Command::Medicine => {
                self.act(Action::Medicine, now, format!("You gave {name} some medicine."))
            }
        }
    }

    fn act(&mut self, action: Action, now: DateTime<Utc>, done: String) -> Reply {
        if self.pet.apply(&action, now) {
            return Reply::say(done);
        }
        let name = self.pet.name();
        if self.pet.is_alive() {
            Reply::say(format!("{name} is too tired to play."))
        } else {
            Reply::say(format!("{name} is no longer alive."))
        }
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub fn run(mut app: App, autosave: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Welcome to Tomodachi! Type 'status' to see {}, 'help' for commands, 'quit' to exit.",
        app.pet().name()
    )?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("reading command")?;
        let reply = app.handle(parse_line(&line), Utc::now());
        if !reply.message.is_empty() {
            writeln!(stdout, "{}", reply.message)?;
        }
        if reply.quit {
            break;
        }
    }

    if autosave {
        let path = app.save_path().clone();
        save_pet(&path, app.pet()).with_context(|| format!("autosaving to {}", path.display()))?;
    }
    Ok(())
}

use crate::model::{
    DEFAULT_FEED_AMOUNT, DEFAULT_PLAY_MINUTES, DEFAULT_SLEEP_HOURS, DEFAULT_TICK_MINUTES,
};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Status,
    Feed(i64),
    Play(i64),
    Sleep(i64),
    Clean,
    Discipline,
    Attention,
    Medicine,
    Tick(i64),
    Rename(String),
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Help,
    Quit,
    Unknown(String),
}

fn number_or(arg: Option<&str>, default: i64) -> i64 {
    arg.and_then(|a| a.parse().ok()).unwrap_or(default)
}

/// Maps one line of user input to a command. Verbs are case-insensitive;
/// numeric arguments that do not parse fall back to the verb's default.
pub fn parse_line(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Command::Empty;
    };
    let verb = verb.to_ascii_lowercase();
    let arg = parts.next();

    match verb.as_str() {
        "status" => Command::Status,
        "feed" => Command::Feed(number_or(arg, DEFAULT_FEED_AMOUNT)),
        "play" => Command::Play(number_or(arg, DEFAULT_PLAY_MINUTES)),
        "sleep" => Command::Sleep(number_or(arg, DEFAULT_SLEEP_HOURS)),
        "clean" => Command::Clean,
        "discipline" => Command::Discipline,
        "pet" | "attention" => Command::Attention,
        "medicine" | "medicate" => Command::Medicine,
        "tick" => Command::Tick(number_or(arg, DEFAULT_TICK_MINUTES)),
        "rename" => {
            let rest: Vec<&str> = arg.into_iter().chain(parts).collect();
            Command::Rename(rest.join(" "))
        }
        "save" => Command::Save(arg.map(PathBuf::from)),
        "load" => Command::Load(arg.map(PathBuf::from)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(verb),
    }
}

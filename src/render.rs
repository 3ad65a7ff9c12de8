use crate::model::{Mood, Pet};
use crossterm::style::{Color, Stylize};

fn bar(value: u8, width: usize) -> String {
    let v = (f32::from(value) / 100.0).clamp(0.0, 1.0);
    let fill = (v * width as f32 + 0.5) as usize;
    let mut s = String::new();
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

/// Green when comfortable, yellow when middling, red when urgent.
/// `high_is_bad` flips the scale for hunger and litter.
fn meter_color(value: u8, high_is_bad: bool) -> Color {
    let goodness = if high_is_bad { 100 - value } else { value };
    match goodness {
        0..=24 => Color::Red,
        25..=59 => Color::Yellow,
        _ => Color::Green,
    }
}

fn indicator(pet: &Pet) -> (&'static str, Color) {
    match pet.mood() {
        Mood::Dead => ("dead", Color::DarkGrey),
        Mood::Sick => ("sick", Color::Magenta),
        Mood::Sleepy => ("sleepy", Color::Blue),
        Mood::Hungry => ("hungry", Color::Yellow),
        Mood::Happy => ("happy", Color::Green),
        Mood::Neutral => ("okay", Color::White),
    }
}

/// Multi-line status block: a title, one bar per stat and the care line.
pub fn status_panel(pet: &Pet, color: bool) -> String {
    let (label, label_color) = indicator(pet);
    let label = if color {
        label.with(label_color).bold().to_string()
    } else {
        label.to_string()
    };
    let mut out = format!("{}  [{}]\n", pet.name(), label);

    let lines = [
        ("Hunger", pet.hunger(), true),
        ("Happy ", pet.happiness(), false),
        ("Energy", pet.energy(), false),
        ("Litter", pet.litter_dirt(), true),
    ];
    for (name, val, high_is_bad) in lines {
        let b = bar(val, 14);
        let b = if color {
            b.with(meter_color(val, high_is_bad)).to_string()
        } else {
            b
        };
        out.push_str(&format!("  {name}: {b} {val:>3}\n"));
    }

    out.push_str(&format!(
        "  Care: {}/100 (survives {:.1} days of neglect), played {} min",
        pet.care_score(),
        pet.death_threshold_days(),
        pet.cumulative_play_seconds() / 60
    ));
    out
}

pub const HELP: &str = "\
Commands:
  status              show your pet
  feed [n]            feed (default 20)
  play [minutes]      play (default 10)
  sleep [hours]       sleep (default 2)
  clean               clean the litter box
  discipline          scold (still counts as care)
  pet | attention     give some attention
  medicine            cure sickness
  tick [minutes]      let time pass (default 60)
  rename <name>       rename your pet
  save [path]         save to a file
  load [path]         load from a file
  quit | exit         leave";

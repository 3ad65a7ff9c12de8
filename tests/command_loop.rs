use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use tomodachi::app::App;
use tomodachi::input::parse_line;
use tomodachi::Pet;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 14, 18, 0, 0).unwrap()
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tomodachi-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn status_and_commands() {
    let dir = scratch_dir("cli");
    let save = dir.join("test_pet.json");
    let mut app = App::new(Pet::with_stats("CliTest", 50, 50, 50), save.clone(), false);

    let reply = app.handle(parse_line("status"), t0());
    assert!(reply.message.contains("CliTest"));

    let reply = app.handle(parse_line("feed 10"), t0());
    assert!(!reply.quit);
    assert!(reply.message.to_lowercase().contains("fed"));
    assert_eq!(app.pet().hunger(), 40);

    let reply = app.handle(parse_line("play 5"), t0());
    assert_eq!(reply.message, "You played with CliTest.");

    let reply = app.handle(parse_line("sleep 1"), t0());
    assert_eq!(reply.message, "CliTest slept for 1 hours.");

    let reply = app.handle(parse_line("save"), t0());
    assert_eq!(reply.message, format!("Saved to {}", save.display()));
    assert!(save.exists());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_replaces_the_whole_pet() {
    let dir = scratch_dir("load");
    let other = dir.join("other.json");

    let mut first = App::new(Pet::named("Saved"), other.clone(), false);
    first.handle(parse_line("clean"), t0());
    first.handle(parse_line("tick 600"), t0());
    first.handle(parse_line(&format!("save {}", other.display())), t0());
    let saved = first.pet().clone();

    let mut second = App::new(Pet::named("Current"), dir.join("unused.json"), false);
    let reply = second.handle(parse_line(&format!("load {}", other.display())), t0());
    assert_eq!(reply.message, format!("Loaded from {}", other.display()));
    assert_eq!(second.pet(), &saved);

    let reply = second.handle(parse_line("load nowhere/missing.json"), t0());
    assert!(reply.message.starts_with("Failed to load"));
    assert_eq!(second.pet(), &saved);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn time_passes_between_commands() {
    let dir = scratch_dir("clock");
    let mut app = App::new(Pet::named("Clock"), dir.join("p.json"), false);
    app.handle(parse_line("status"), t0());
    app.handle(parse_line("status"), t0() + Duration::hours(4));
    assert_eq!(app.pet().hunger(), 70);
    assert_eq!(app.pet().litter_dirt(), 16);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn rename_and_help() {
    let dir = scratch_dir("rename");
    let mut app = App::new(Pet::named("Old"), dir.join("p.json"), false);
    let reply = app.handle(parse_line("rename Sir Fluff"), t0());
    assert_eq!(reply.message, "Old is now called Sir Fluff.");
    assert_eq!(app.pet().name(), "Sir Fluff");

    let reply = app.handle(parse_line("rename"), t0());
    assert_eq!(reply.message, "Usage: rename <name>");

    let reply = app.handle(parse_line("help"), t0());
    assert!(reply.message.contains("feed [n]"));

    fs::remove_dir_all(&dir).ok();
}

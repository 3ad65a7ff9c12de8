use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tomodachi::{app, config, logging, storage};

#[derive(Parser, Debug)]
#[command(name = "tomodachi")]
#[command(about = "Look after a virtual pet from the terminal", long_about = None)]
struct Args {
    /// Save file to load on start and write on quit
    #[arg(long)]
    save: Option<PathBuf>,

    /// Name for a newly adopted pet
    #[arg(long)]
    name: Option<String>,

    /// off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Plain output without colours
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Do not save on quit
    #[arg(long, default_value_t = false)]
    no_autosave: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = config::project_paths()?;
    let settings = config::load_settings(&paths.settings_path);
    if !paths.settings_path.exists() {
        config::save_settings_atomic(&paths.settings_path, &settings)?;
    }

    let level = args.log_level.as_deref().unwrap_or(&settings.log_level);
    logging::init(logging::parse_level(level))?;

    let save_path = args
        .save
        .or_else(|| settings.save_file.clone())
        .unwrap_or(paths.save_path);
    let name = args.name.as_deref().unwrap_or(&settings.pet_name);
    let (pet, loaded) = storage::load_or_adopt(&save_path, name, chrono::Utc::now());
    log::info!(
        "{} {} ({})",
        if loaded { "welcomed back" } else { "adopted" },
        pet.name(),
        save_path.display()
    );

    let app = app::App::new(pet, save_path, settings.color && !args.no_color);
    app::run(app, settings.autosave && !args.no_autosave)
}

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use salutis::cli::args::{Cli, Commands};
use salutis::cli::commands;
use salutis::config::{ColorSetting, Config, Paths};
use salutis::error::SalutisError;
use salutis::features::breathing::PatternCatalog;
use salutis::features::courses::CourseStorage;
use salutis::logging;
use salutis::tui::{self, App};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let is_user_error = e
            .downcast_ref::<SalutisError>()
            .is_some_and(SalutisError::is_user_error);
        if !is_user_error {
            if let Ok(paths) = Paths::new() {
                eprintln!("  see {}", paths.log_file().display());
            }
        }
        std::process::exit(1);
    }
}

fn apply_color(setting: ColorSetting) {
    match setting {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;

    apply_color(config.general.color);
    logging::init(&paths.log_file(), &config.logging.level).context("setting up logging")?;

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Breathe(args) => commands::breathe(&config, args.command, format)?,
        Commands::Course(args) => {
            let user = config.resolve_user()?;
            let storage = CourseStorage::new()?;
            commands::course(&storage, &user, args.command, format)?
        }
        Commands::Chat { message } => commands::chat(&config.chat, message, format)?,
        Commands::Config(args) => commands::config(&paths, &config, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        Commands::Tui => {
            let catalog = PatternCatalog::with_custom(&config.breathing.custom_patterns)?;
            let app = App::new(
                catalog,
                &config.breathing.default_pattern,
                config.breathing.tick_period()?,
            )?;
            tui::run(app)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

use std::fs::{self, File};
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, WriteLogger};

use fieldgrid_demo::cli::Cli;
use fieldgrid_demo::data::{load_users, sample_users};
use fieldgrid_demo::settings::{DemoSettings, LogLevel};
use fieldgrid_demo::stories::{Gallery, Story};
use fieldgrid_demo::{app, paths, DemoError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_stories {
        for story in Story::ALL {
            println!("{:<18} {}", story.name(), story.title());
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let mut settings = DemoSettings::load()?;
    settings.apply_cli(cli);
    init_logging(settings.log_level)?;
    log::info!("starting with {:?}", settings);

    let users = match &settings.data {
        Some(path) => load_users(path)?,
        None => sample_users(),
    };

    let mut gallery = Gallery::new(settings.story, users);
    app::run(&mut gallery, settings.tick())
}

/// Log to `<cache>/latest.log`. Without a home directory nothing is logged.
fn init_logging(level: LogLevel) -> Result<(), DemoError> {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(level.to_level_filter(), Config::default(), file)?;
    Ok(())
}

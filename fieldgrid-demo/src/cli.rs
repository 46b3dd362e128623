use std::path::PathBuf;

use clap::Parser;

use crate::settings::LogLevel;
use crate::stories::Story;

/// Interactive gallery for the fieldgrid widgets.
#[derive(Debug, Default, Parser)]
#[command(name = "fieldgrid-demo")]
#[command(about = "Field and table widget gallery", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Story to open at startup
    #[arg(long)]
    pub story: Option<Story>,

    /// Log level, overrides settings.json
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// JSON file with users for the table stories
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Print the story names and exit
    #[arg(long)]
    pub list_stories: bool,
}

use super::commands::AuthCommands;
use super::commands::ExploreCommands;
use super::commands::PublishCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "module-catalogue")]
#[command(about = "Publish study program module catalogues into a Google spreadsheet")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create one sheet per study program and fill in its catalogue
    Publish(PublishCommands),
    /// Print the grouped catalogue of a program for inspection
    Explore(ExploreCommands),
    /// Google account authorization
    Auth(AuthCommands),
}

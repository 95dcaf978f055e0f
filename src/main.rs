use anyhow::Result;
use clap::Parser;
use log::{debug, info};

mod cli;

use cli::Cli;
use cli::app::Commands;
use module_catalogue::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("module-catalogue.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting module-catalogue");

    let config = Config::load(cli.config.as_deref()).await?;
    debug!("Using database {:?}", config.database_path);

    match cli.command {
        Commands::Publish(args) => cli::commands::publish_command(args, &config).await?,
        Commands::Explore(args) => cli::commands::explore_command(args, &config).await?,
        Commands::Auth(args) => cli::commands::auth_command(args, &config).await?,
    }

    Ok(())
}

//! Publish command: one sheet per study program

use anyhow::Result;
use clap::Args;
use colored::*;

use module_catalogue::api::SheetsClient;
use module_catalogue::auth::{Authenticator, FileTokenStore};
use module_catalogue::config::Config;
use module_catalogue::db::ModuleSource;
use module_catalogue::publish::dry_run::DryRunSheets;
use module_catalogue::publish::{PublishReport, Publisher};

use crate::cli::ui;

#[derive(Args)]
pub struct PublishCommands {
    /// Only publish the study program with this id
    #[arg(long)]
    pub program: Option<i64>,

    /// Build every catalogue and log the API calls without sending them
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn publish_command(args: PublishCommands, config: &Config) -> Result<()> {
    let source = ModuleSource::open(&config.database_path, config.module_base_url.clone()).await?;

    let report = if args.dry_run {
        ui::warning("Dry run: nothing is sent to the spreadsheet");
        let api = DryRunSheets::new(config.spreadsheet_id.clone(), config.template_sheet_id);
        run(Publisher::new(api, config), &source, args.program).await?
    } else {
        config.validate_for_publish()?;

        let authenticator = Authenticator::new(
            config.credentials_path.clone(),
            Box::new(FileTokenStore::new(config.token_cache_path.clone())),
        );
        let token = authenticator.token().await?;

        let api = SheetsClient::new(
            config.sheets_base_url.clone(),
            config.spreadsheet_id.clone(),
            token.access_token,
        )?;
        run(Publisher::new(api, config), &source, args.program).await?
    };

    println!();
    ui::success(&format!(
        "Published {} study programs ({} catalogue rows)",
        report.programs_published().to_string().bright_green().bold(),
        report.rows_written
    ));
    Ok(())
}

async fn run<A>(
    publisher: Publisher<A>,
    source: &ModuleSource,
    program: Option<i64>,
) -> Result<PublishReport>
where
    A: module_catalogue::api::SheetsApi,
{
    ui::header("Publishing module catalogues");
    publisher
        .publish_all(source, program, |current, total, name| {
            ui::progress(current, total, name);
        })
        .await
}

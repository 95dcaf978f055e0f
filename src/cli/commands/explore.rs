//! Explore command: print a program's grouped catalogue
//!
//! Diagnostic output only. Labels are plain titles, and the row indices
//! where a new group starts are listed before the catalogue itself.

use anyhow::Result;
use clap::Args;
use colored::*;

use module_catalogue::catalogue::{CatalogueEntry, build_catalogue, group_boundaries};
use module_catalogue::config::Config;
use module_catalogue::db::{LabelStyle, ModuleSource};

use crate::cli::ui;

#[derive(Args)]
pub struct ExploreCommands {
    /// Study program id
    #[arg(long, default_value_t = 31)]
    pub program: i64,

    /// Only list the rows where a new group starts
    #[arg(long)]
    pub boundaries_only: bool,
}

pub async fn explore_command(args: ExploreCommands, config: &Config) -> Result<()> {
    let source = ModuleSource::open(&config.database_path, config.module_base_url.clone()).await?;
    let rows = source.module_rows(args.program, LabelStyle::Plain).await?;

    ui::header(&format!("Study program {}", args.program));
    ui::field("Module rows", rows.len());

    let boundaries = group_boundaries(&rows);
    ui::field(
        "Group starts",
        boundaries
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    );

    if args.boundaries_only {
        return Ok(());
    }

    if rows.is_empty() {
        ui::warning("No modules found for this program");
        return Ok(());
    }

    println!();
    for entry in build_catalogue(&rows) {
        match entry {
            CatalogueEntry::Divider(title) => {
                println!();
                for line in title.lines() {
                    println!("  {}", line.bright_white().bold());
                }
            }
            CatalogueEntry::ModuleLine {
                group,
                label,
                module_id,
                module_version,
                ects,
                exam_type,
                part_types,
            } => {
                println!(
                    "    {} {} {} {} {} {}",
                    format!("{:>3}", group).dimmed(),
                    label.cyan(),
                    format!("#{}v{}", module_id, module_version).dimmed(),
                    format!("{} LP", ects).bright_yellow(),
                    exam_type,
                    part_types.dimmed()
                );
            }
        }
    }

    Ok(())
}

mod cli;
mod config;
mod domain;
mod infra;
mod logging;
mod usecase;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use crate::cli::{Cli, Commands};
use crate::config::{user_config_path, AppConfig};
use crate::domain::services::summary::{format_idr, BudgetSummary};
use crate::infra::export::json::{read_forest, write_forest};
use crate::infra::import::open_source;
use crate::usecase::services::convert_service::ConvertService;
use crate::usecase::services::inspect_service::InspectService;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    match cli.command {
        Commands::Convert {
            input,
            output,
            sheet,
            compact,
        } => {
            let output = output.unwrap_or_else(|| config.output.clone());
            let sheet = sheet.or_else(|| config.sheet.clone());
            let pretty = config.pretty && !compact;
            convert(&input, &output, sheet, config.header_rows, pretty)
        }
        Commands::Inspect { input, rows, sheet } => {
            let sheet = sheet.or_else(|| config.sheet.clone());
            let service = InspectService::new(open_source(&input, sheet), config.header_rows);
            for row in service.inspect(rows)? {
                println!("Row {}: {:?} -> {}", row.index, row.cells, row.verdict);
            }
            Ok(())
        }
        Commands::Summary {
            forest,
            multiplier,
            json,
        } => {
            let roots = read_forest(&forest)?;
            let summary =
                BudgetSummary::from_forest(&roots, multiplier.unwrap_or(config.markup_multiplier));
            if json {
                let body = serde_json::to_string_pretty(&summary)
                    .context("failed to serialize summary")?;
                println!("{body}");
            } else {
                print_summary(&summary);
            }
            Ok(())
        }
        Commands::PrintConfig => {
            println!("{config:#?}");
            if let Some(path) = user_config_path() {
                println!("user config: {}", path.display());
            }
            Ok(())
        }
    }
}

fn convert(
    input: &Path,
    output: &Path,
    sheet: Option<String>,
    header_rows: usize,
    pretty: bool,
) -> Result<()> {
    let service = ConvertService::new(open_source(input, sheet), header_rows);
    let report = service.convert()?;

    if !report.orphans.is_empty() {
        warn!(
            orphans = ?report.orphans,
            "rows placed at root level, check the numbering above them"
        );
    }

    write_forest(output, &report.roots, pretty)?;
    info!(
        roots = report.roots.len(),
        output = %output.display(),
        "converted {} root items",
        report.roots.len()
    );
    Ok(())
}

fn print_summary(summary: &BudgetSummary) {
    for phase in &summary.phases {
        let label = format!("{} {}", phase.numbering, phase.description);
        println!("{:<48} {:>20}", label.trim(), format_idr(phase.total_price));
    }
    println!("{:<48} {:>20}", "Total", format_idr(summary.base_total));
    println!("{:<48} {:>20}", "DPP", format_idr(summary.dpp));
    println!("{:<48} {:>20}", "DPP + Ppn 11%", format_idr(summary.grand_total));
}

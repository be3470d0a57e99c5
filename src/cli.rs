use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rab")]
#[command(about = "Turn a RAB spreadsheet export into an outline for the budget viewer", long_about = None)]
pub struct Cli {
    /// Log at debug level (RAB_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a sheet (csv, xlsx, xls, ods) into the outline JSON
    Convert {
        input: PathBuf,
        /// Output file [default: src/data/rab.json]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Workbook sheet to read instead of the first one
        #[arg(long)]
        sheet: Option<String>,
        /// Write JSON on one line
        #[arg(long)]
        compact: bool,
    },
    /// Print the first rows and how each one is classified
    Inspect {
        input: PathBuf,
        #[arg(short, long, default_value_t = 20)]
        rows: usize,
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Print phase totals, DPP and the grand total of a converted outline
    Summary {
        forest: PathBuf,
        /// Markup applied for DPP and again for VAT
        #[arg(long)]
        multiplier: Option<f64>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    PrintConfig,
}

mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bureau",
    version,
    about = "Credit bureau report extraction and risk analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and normalize a credit report PDF (without analysis)
    Parse {
        /// Path to the report PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run the full pipeline: extract, normalize and derive indicators
    Analyze {
        /// Path to the report PDF, or a pre-parsed JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Anchor date for credit-age indicators (default: today)
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Run the pipeline and write the three-sheet workbook
    Export {
        /// Path to the report PDF
        input_file: PathBuf,

        /// Output workbook file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,

        /// Anchor date for credit-age indicators (default: today)
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Inspect the canonical-field synonym table
    Fields {
        #[command(subcommand)]
        action: FieldsAction,
    },
}

#[derive(Subcommand)]
enum FieldsAction {
    /// List canonical fields with their known label synonyms
    List,
    /// Resolve a raw label against the synonym table
    Match {
        /// Label as it appears in a report
        label: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Analyze {
            input_file,
            output,
            as_of,
        } => commands::analyze::run(input_file, &output, as_of),
        Commands::Export {
            input_file,
            out,
            as_of,
        } => commands::export::run(input_file, out, as_of),
        Commands::Fields { action } => match action {
            FieldsAction::List => commands::fields::list(),
            FieldsAction::Match { label } => commands::fields::match_one(&label),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

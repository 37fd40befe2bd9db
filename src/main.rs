//! termizard CLI
//!
//! Ask a series of questions in the terminal, one at a time, then print
//! every answer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use termizard::logging::Logging;
use termizard::questionnaire::{build_questions, default_questions, load_questionnaire};
use termizard::report::format_summary;
use termizard::tui::run::run;
use termizard::tui::state::{Outcome, Wizard};
use termizard::types::OutputFormat;

/// Exit status for a run the user cancelled (as for SIGINT).
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(name = "termizard")]
#[command(about = "Step-by-step questionnaire wizard for the terminal")]
#[command(version)]
struct Cli {
    /// JSON questionnaire file (default: built-in questions)
    #[arg(long, short)]
    questions: Option<PathBuf>,

    /// Summary output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log every action, not just run milestones
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_ask(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_ask(cli: Cli) -> Result<ExitCode, String> {
    let mut logging = Logging::new().with_verbose(cli.verbose);
    if let Some(path) = cli.log_file {
        logging = logging.with_file(path);
    }
    logging.start().map_err(|e| format!("Cannot start logging: {}", e))?;

    let specs = match &cli.questions {
        Some(path) => load_questionnaire(path).map_err(|e| e.to_string())?,
        None => default_questions(),
    };

    let wizard = Wizard::new(build_questions(&specs)).map_err(|e| e.to_string())?;

    match run(wizard).map_err(|e| format!("Terminal error: {}", e))? {
        Outcome::Completed(wizard) => {
            print!("{}", format_summary(&wizard.answers(), cli.format.into()));
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cancelled { .. } => {
            eprintln!("Cancelled.");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        Outcome::Pending(_) => {
            Err("Input closed before the questionnaire was finished".to_string())
        }
    }
}

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;

mod commands;
mod config;
mod download_report;
mod filename_mapping;
mod homework_config;
mod list_classmates;
mod rename_homeworks;
mod submission_report;
mod types;
mod util;

use commands::SortHomeworks;
use homework_config::{read_config, HomeworkConfig};
use types::{ExportSource, HomeworkError};

/// Rename homework attachments collected by a survey to `ID_Name.ext` and list who has not submitted.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder holding the attachments and the exported .csv [default: working directory]
    #[arg(short = 'p', long)]
    folder: Option<Utf8PathBuf>,
    /// Class list .csv with student ID and name columns [default: ./classmates.csv]
    #[arg(short, long)]
    classmates: Option<Utf8PathBuf>,
    /// Attachments were downloaded directly from the survey backend instead of cloud storage
    #[arg(short, long)]
    directly: bool,
    /// Show names of students who have not submitted
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding the ID prefix, column keywords or extensions
    #[arg(long)]
    config: Option<Utf8PathBuf>,
    /// Also write each classmate's submission status to this .csv
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), HomeworkError> {
    let cwd = config::working_dir()?;

    let homework_config = match &args.config {
        Some(path) => read_config(&config::resolve(&cwd, path))?,
        None => HomeworkConfig::default(),
    };

    let job = SortHomeworks {
        folder: args
            .folder
            .map_or_else(|| cwd.clone(), |folder| config::resolve(&cwd, &folder)),
        classmates: args
            .classmates
            .map_or_else(|| config::default_classmates_file(&cwd), |c| config::resolve(&cwd, &c)),
        source: ExportSource::from_directly(args.directly),
        verbose: args.verbose,
        report: args.report.map(|report| config::resolve(&cwd, &report)),
    };

    commands::sort_homeworks(&job, &homework_config)
}

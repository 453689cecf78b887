use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use habitui::core::config;
use habitui::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "habitui", about = "Track your Habitify journal from the terminal")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Journal day to open (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Command {
    /// Save your Habitify API key to ~/.habitui/config.toml
    Init {
        /// API key from the Habitify app settings
        api_key: String,
    },
}

/// Log file in `~/.habitui`, falling back to the current directory.
fn log_path() -> PathBuf {
    config::config_dir()
        .filter(|dir| fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join("habitui.log"))
        .unwrap_or_else(|| PathBuf::from("habitui.log"))
}

/// Midnight of `date` in local time, or now when no date was given.
fn journal_date(date: Option<NaiveDate>) -> Result<DateTime<Local>, String> {
    let Some(date) = date else {
        return Ok(Local::now());
    };
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| format!("{date} has no valid local midnight"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger only: the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(log_path()) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(Command::Init { api_key }) = args.command {
        return match config::save_api_key(&api_key) {
            Ok(path) => {
                println!("Saved api key to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let resolved = match config::load_config().and_then(|c| config::resolve(&c)) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!("Startup failed: {}", e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let date = match journal_date(args.date) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("habitui starting up for {}", date.format("%Y-%m-%d"));

    match tui::run(&resolved, date) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Exiting with error: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! Demo binary: renders a sample order grid as a text table or JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Render with default options (or config.json from the config dir)
//! gridkit
//!
//! # Use a specific options file and print JSON
//! gridkit --config ./options.json --json
//!
//! # Debug logging to the log file
//! gridkit -v
//! ```

mod error;
mod paths;
mod sample;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use gridkit::FormatOptions;
use gridkit::grid::render_grid;
use gridkit_state::RowCollection;
use log::{debug, error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use error::CliError;
use sample::{Order, OrderStatus};

/// Render a sample order grid
#[derive(Parser)]
#[command(name = "gridkit", version, about, long_about = None)]
struct Cli {
    /// Format options file; defaults to config.json in the config directory
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the rendered grid as JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Log more to the log file (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Write logs to the cache directory. Runs without logging if that fails.
fn init_logging(level: LevelFilter) {
    let Some(dir) = paths::log_dir() else { return };
    let path = match paths::rotate_logs(&dir, paths::KEEP_LOGS) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("warning: cannot prepare log directory {}: {e}", dir.display());
            return;
        }
    };
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("warning: cannot create log file {}: {e}", path.display()),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let options = load_options(cli.config.as_deref())?;
    let columns = sample::order_columns(options)?;

    let rows = RowCollection::new()
        .with_selectable(true)
        .with_empty_grid_message("No orders");
    rows.add_rows(sample::orders());
    for row in rows.rows().get() {
        let (number, status, note) =
            row.data()
                .with(|order| (order.number, order.status, order.internal_note.clone()));
        if status == OrderStatus::Pending {
            row.is_selected().set(true);
        }
        if let Some(note) = note {
            debug!("order {number}: {note}");
        }
    }
    if let Some(first) = rows.rows().with(|rows| rows.first().cloned()) {
        rows.set_current_row(Some(&first));
    }
    info!("{rows:?}");

    let records: Vec<Order> = rows
        .rows()
        .with(|rows| rows.iter().map(|row| row.data().get()).collect());
    if records.is_empty() {
        println!("{}", rows.empty_grid_message().get());
        return Ok(());
    }

    let grid = render_grid(&columns, &records)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", grid.to_text());
        let selected = rows.selected_rows().len();
        if selected > 0 {
            println!("\n{selected} order(s) awaiting payment");
        }
    }
    Ok(())
}

/// Load format options from `path`, or from the default config file when
/// it exists.
fn load_options(path: Option<&Path>) -> Result<FormatOptions, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match paths::config_file() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file, using default format options");
                return Ok(FormatOptions::default());
            }
        },
    };

    debug!("loading format options from {}", path.display());
    let json = fs::read_to_string(&path).map_err(|source| CliError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    FormatOptions::from_json(&json).map_err(|source| CliError::ParseConfig { path, source })
}

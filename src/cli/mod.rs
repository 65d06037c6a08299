//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with one subcommand per operation.

mod check;
mod fix;

use std::path::PathBuf;

use anyhow::{Context, Result};
pub use check::{CheckArgs, run_check};
use chrono::Datelike;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
use copyright_notice::config::{CliOverrides, Config, load_config};
use copyright_notice::info_log;
use copyright_notice::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use copyright_notice::processor::ProcessingRun;
use copyright_notice::report::{ReportFormat, ReportGenerator};
pub use fix::{FixArgs, run_fix};
use tracing::debug;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "copyright",
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check files for copyright notices
  copyright check src/

  # Check and repair in one go (exits 1 if anything changed)
  copyright check --auto-fix --company \"Acme Inc\" src/

  # Show what would change without writing
  copyright fix --dry-run --show-diff src/

  # Use an explicit config file
  copyright check --config .copyright.yaml .
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Check files for copyright notices
  Check(CheckArgs),
  /// Add missing notices and update outdated years
  Fix(FixArgs),
  /// Show version information
  Version,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Arguments shared by `check` and `fix`.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
  /// Files or directories to process. Directories are processed recursively.
  pub files: Vec<PathBuf>,

  /// Path to config file (default: .copyright.yaml in the working directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Company name substituted into the notice
  #[arg(long, value_name = "NAME")]
  pub company: Option<String>,

  /// Notice format with $year and $company_name placeholders
  #[arg(long, value_name = "FORMAT")]
  pub format: Option<String>,

  /// Year to require and insert (default: current year)
  #[arg(long)]
  pub year: Option<i32>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except problems and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,
}

/// Settings resolved from flags and the config file.
pub struct RunContext {
  pub config: Config,
  pub year: i32,
}

impl CommonArgs {
  /// Sets up logging and loads the configuration.
  ///
  /// Returns `None` when no files were given, after printing the usage error.
  pub fn prepare(&self, auto_fix: bool) -> Result<Option<RunContext>> {
    init_tracing(self.quiet, self.verbose);
    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();

    if self.files.is_empty() {
      eprintln!("ERROR: No files specified");
      return Ok(None);
    }

    let overrides = CliOverrides {
      company: self.company.clone(),
      format: self.format.clone(),
      auto_fix: auto_fix.then_some(true),
    };
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(self.config.as_deref(), &working_dir, self.no_config, &overrides)?;

    let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
    debug!("Checking against year {}", year);

    Ok(Some(RunContext { config, year }))
  }

  /// Writes the requested JSON and CSV reports. Failures are printed and do
  /// not change the exit status.
  pub fn write_reports(&self, run: &ProcessingRun) {
    let targets = [
      (ReportFormat::Json, self.report_json.as_ref()),
      (ReportFormat::Csv, self.report_csv.as_ref()),
    ];
    if targets.iter().all(|(_, path)| path.is_none()) {
      return;
    }

    let reports = run.reports();
    for (format, path) in targets {
      let Some(path) = path else {
        continue;
      };
      match ReportGenerator::new(format, path).generate(&reports, &run.summary) {
        Ok(()) => info_log!("Generated {} report at {}", format, path.display()),
        Err(e) => eprintln!("Error generating {} report: {:#}", format, e),
      }
    }
  }
}

/// Prints the version, plus the commit embedded at build time if any.
pub fn print_version() {
  println!("copyright version {}", env!("CARGO_PKG_VERSION"));
  if let Some(hash) = option_env!("COPYRIGHT_GIT_HASH") {
    match option_env!("COPYRIGHT_GIT_DATE") {
      Some(date) => println!("commit {hash} ({date})"),
      None => println!("commit {hash}"),
    }
  }
}

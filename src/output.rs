//! # Output Module
//!
//! This module centralizes all user-facing output of the `copyright` binary.
//!
//! Report lines keep a fixed `LABEL: path` shape so they stay greppable.
//! Labels are colored only when the stream supports it. Quiet mode hides the
//! `OK:` lines, summaries and hints. Problem lines and errors are always
//! printed.

use owo_colors::{OwoColorize, Stream};

use copyright_notice::logging::{is_quiet, is_verbose};
use copyright_notice::report::{FileAction, FileReport, NoticeStatus, ProcessingSummary};

/// Prints the notice status of a file: `OK`, `MISSING` or `OUTDATED`.
pub fn print_status(report: &FileReport) {
  let path = report.path.display();
  match report.status {
    Some(NoticeStatus::Ok) => {
      if !is_quiet() {
        println!("{}: {}", "OK".if_supports_color(Stream::Stdout, |s| s.green()), path);
      }
    }
    Some(NoticeStatus::Missing) => {
      println!("{}: {}", "MISSING".if_supports_color(Stream::Stdout, |s| s.red()), path);
    }
    Some(NoticeStatus::Outdated { year }) => {
      println!(
        "{}: {} (year: {})",
        "OUTDATED".if_supports_color(Stream::Stdout, |s| s.yellow()),
        path,
        year
      );
    }
    None => {}
  }
}

/// Prints the repair applied to a file, or pending under dry-run.
pub fn print_action(report: &FileReport, current_year: i32, dry_run: bool) {
  let path = report.path.display();

  match report.action {
    FileAction::Inserted => {
      let label = if dry_run { "WOULD ADD" } else { "ADDED" };
      println!("{}: {}", label.if_supports_color(Stream::Stdout, |s| s.green()), path);
    }
    FileAction::Updated => {
      let label = if dry_run { "WOULD UPDATE" } else { "UPDATED" };
      let old_year = report
        .status
        .and_then(|status| status.year())
        .map_or_else(|| "?".to_string(), |year| year.to_string());
      println!(
        "{}: {} (year: {} -> {})",
        label.if_supports_color(Stream::Stdout, |s| s.cyan()),
        path,
        old_year,
        current_year
      );
    }
    FileAction::None => {}
  }
}

/// Prints a per-file failure to stderr.
pub fn print_error(report: &FileReport) {
  if let Some(error) = &report.error {
    eprintln!(
      "{}: {}: {}",
      "ERROR".if_supports_color(Stream::Stderr, |s| s.red()),
      report.path.display(),
      error.message
    );
  }
}

/// Prints `Scanned N files: M missing copyright, O outdated`.
pub fn print_scan_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let mut line = format!(
    "Scanned {} files: {} missing copyright, {} outdated",
    summary.scanned, summary.missing, summary.outdated
  );
  if is_verbose() {
    line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }
  println!("{line}");
}

/// Prints `Fixed K files: A added, U updated`, or the dry-run equivalent.
pub fn print_fix_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Would fix" } else { "Fixed" };
  println!(
    "{} {} files: {} added, {} updated",
    verb,
    summary.fixed(),
    summary.inserted,
    summary.updated
  );
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

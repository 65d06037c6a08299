//! # Report Module
//!
//! This module records the outcome of every processed file and writes
//! machine-readable reports (JSON, CSV) of a run.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Notice state of a file as found on disk, before any repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStatus {
  /// Notice present and current
  Ok,
  /// No notice in the scan window
  Missing,
  /// Notice present with an older year
  Outdated { year: i32 },
}

impl NoticeStatus {
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Ok => "ok",
      Self::Missing => "missing",
      Self::Outdated { .. } => "outdated",
    }
  }

  pub const fn year(&self) -> Option<i32> {
    match self {
      Self::Outdated { year } => Some(*year),
      Self::Ok | Self::Missing => None,
    }
  }
}

/// Repair applied to a file. Under dry-run this is the repair that would be
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileAction {
  #[default]
  None,
  Inserted,
  Updated,
}

impl FileAction {
  pub const fn label(&self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Inserted => "inserted",
      Self::Updated => "updated",
    }
  }
}

/// Stage at which a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
  Read,
  Write,
}

/// A per-file failure. It never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
  pub kind: ErrorKind,
  pub message: String,
}

impl FileError {
  pub fn read(error: &anyhow::Error) -> Self {
    Self {
      kind: ErrorKind::Read,
      message: format!("{error:#}"),
    }
  }

  pub fn write(error: &anyhow::Error) -> Self {
    Self {
      kind: ErrorKind::Write,
      message: format!("{error:#}"),
    }
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  /// Path to the file, as given or as found while walking
  pub path: PathBuf,
  /// Notice state before repair, `None` if the file could not be read
  pub status: Option<NoticeStatus>,
  /// Repair applied or pending
  pub action: FileAction,
  /// Failure, if any
  pub error: Option<FileError>,
}

impl FileReport {
  pub const fn new(path: PathBuf) -> Self {
    Self {
      path,
      status: None,
      action: FileAction::None,
      error: None,
    }
  }

  /// Whether the file is missing a notice or carries an outdated year.
  pub const fn is_non_compliant(&self) -> bool {
    matches!(self.status, Some(NoticeStatus::Missing | NoticeStatus::Outdated { .. }))
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Json => write!(f, "JSON"),
      Self::Csv => write!(f, "CSV"),
    }
  }
}

/// Writes a report of a run to a file.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Renders the report and writes it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = self.render(files, summary)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  /// Renders the report without writing it.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => generate_json(files, summary),
      ReportFormat::Csv => Ok(generate_csv(files, summary)),
    }
  }
}

fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  use serde_json::{Value, json, to_string_pretty};

  let files_array: Vec<Value> = files
    .iter()
    .map(|file| {
      json!({
        "path": file.path.to_string_lossy(),
        "status": file.status.map(|s| s.label()),
        "year": file.status.and_then(|s| s.year()),
        "action": file.action.label(),
        "error": file.error,
      })
    })
    .collect();

  let report = json!({
    "generated_at": Local::now().to_rfc3339(),
    "summary": summary,
    "files": files_array,
  });

  Ok(to_string_pretty(&report)?)
}

fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}

fn generate_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
  let mut csv = String::from("path,status,year,action,error\n");

  for file in files {
    let status = file.status.map_or("", |s| s.label());
    let year = file
      .status
      .and_then(|s| s.year())
      .map(|y| y.to_string())
      .unwrap_or_default();
    let error = file.error.as_ref().map(|e| e.message.as_str()).unwrap_or_default();

    let _ = writeln!(
      csv,
      "{},{},{},{},{}",
      csv_field(&file.path.to_string_lossy()),
      status,
      year,
      file.action.label(),
      csv_field(error)
    );
  }

  csv.push_str("\n# Summary\n");
  let _ = writeln!(csv, "Files scanned,{}", summary.scanned);
  let _ = writeln!(csv, "Compliant,{}", summary.ok);
  let _ = writeln!(csv, "Missing copyright,{}", summary.missing);
  let _ = writeln!(csv, "Outdated,{}", summary.outdated);
  let _ = writeln!(csv, "Notices inserted,{}", summary.inserted);
  let _ = writeln!(csv, "Notices updated,{}", summary.updated);
  let _ = writeln!(csv, "Errors,{}", summary.errors);
  let _ = writeln!(
    csv,
    "Processing time (seconds),{:.2}",
    summary.processing_time.as_secs_f64()
  );

  csv
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Files read and scanned
  pub scanned: usize,
  pub ok: usize,
  pub missing: usize,
  pub outdated: usize,
  /// Notices inserted, or that would be under dry-run
  pub inserted: usize,
  /// Years updated, or that would be under dry-run
  pub updated: usize,
  /// Files that failed to read or write
  pub errors: usize,
  #[serde(rename = "processing_time_seconds", serialize_with = "serialize_secs")]
  pub processing_time: Duration,
}

fn serialize_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_f64(duration.as_secs_f64())
}

impl ProcessingSummary {
  /// Builds the summary from per-file reports.
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      processing_time,
      ..Self::default()
    };

    for file in files {
      match file.status {
        Some(NoticeStatus::Ok) => summary.ok += 1,
        Some(NoticeStatus::Missing) => summary.missing += 1,
        Some(NoticeStatus::Outdated { .. }) => summary.outdated += 1,
        None => {}
      }
      if file.status.is_some() {
        summary.scanned += 1;
      }

      match file.action {
        FileAction::Inserted => summary.inserted += 1,
        FileAction::Updated => summary.updated += 1,
        FileAction::None => {}
      }

      if file.error.is_some() {
        summary.errors += 1;
      }
    }

    summary
  }

  /// Files repaired, or that would be under dry-run.
  pub const fn fixed(&self) -> usize {
    self.inserted + self.updated
  }

  pub const fn has_problems(&self) -> bool {
    self.missing > 0 || self.outdated > 0
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn sample_reports() -> Vec<FileReport> {
    vec![
      FileReport {
        status: Some(NoticeStatus::Ok),
        ..FileReport::new(PathBuf::from("ok.go"))
      },
      FileReport {
        status: Some(NoticeStatus::Missing),
        action: FileAction::Inserted,
        ..FileReport::new(PathBuf::from("missing.go"))
      },
      FileReport {
        status: Some(NoticeStatus::Outdated { year: 2022 }),
        action: FileAction::Updated,
        ..FileReport::new(PathBuf::from("old,name.go"))
      },
      FileReport {
        error: Some(FileError {
          kind: ErrorKind::Read,
          message: "stream did not contain valid UTF-8".to_string(),
        }),
        ..FileReport::new(PathBuf::from("binary.go"))
      },
    ]
  }

  #[test]
  fn test_summary_from_reports() {
    let summary = ProcessingSummary::from_reports(&sample_reports(), Duration::from_millis(5));

    assert_eq!(summary.scanned, 3);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.outdated, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.fixed(), 2);
    assert!(summary.has_problems());
  }

  #[test]
  fn test_json_report() {
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::from_secs(1));
    let json = ReportGenerator::new(ReportFormat::Json, Path::new("unused"))
      .render(&reports, &summary)
      .expect("render json");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["missing"], 1);
    assert_eq!(value["summary"]["processing_time_seconds"], 1.0);
    assert_eq!(value["files"][2]["status"], "outdated");
    assert_eq!(value["files"][2]["year"], 2022);
    assert_eq!(value["files"][2]["action"], "updated");
    assert_eq!(value["files"][3]["status"], serde_json::Value::Null);
    assert_eq!(value["files"][3]["error"]["kind"], "read");
  }

  #[test]
  fn test_csv_report_written_to_disk() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let output = temp_dir.path().join("report.csv");
    let reports = sample_reports();
    let summary = ProcessingSummary::from_reports(&reports, Duration::ZERO);

    ReportGenerator::new(ReportFormat::Csv, &output)
      .generate(&reports, &summary)
      .expect("write csv");

    let csv = std::fs::read_to_string(&output).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("path,status,year,action,error"));
    assert_eq!(lines.next(), Some("ok.go,ok,,none,"));
    assert_eq!(lines.next(), Some("missing.go,missing,,inserted,"));
    assert_eq!(lines.next(), Some("\"old,name.go\",outdated,2022,updated,"));
    assert!(csv.contains("Missing copyright,1\n"));
  }
}

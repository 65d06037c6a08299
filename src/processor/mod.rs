//! # Processor Module
//!
//! This module runs the per-file pipeline: read, scan, optionally repair,
//! optionally write. It ties the core modules to the file system.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and atomic writing
//! - [`file_collector`] - Directory traversal and input expansion
//!
//! Files are processed as independent units on tokio's blocking pool with a
//! bounded number in flight. Results come back in input order, so report
//! lines, diffs and counts are aggregated after the join without any shared
//! mutable state.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

pub use file_collector::FileCollector;
pub use file_io::FileIO;
use futures::StreamExt;
use tracing::{debug, trace, warn};

use crate::file_types::{self, FileType};
use crate::notice::NoticeTemplate;
use crate::patterns::{PatternMatch, PatternSet};
use crate::repair::{NoticeRepairer, RepairMode};
use crate::report::{ErrorKind, FileAction, FileError, FileReport, NoticeStatus, ProcessingSummary};
use crate::scanner::{HeaderScanner, NoticeDetector, ScanResult};

/// What the processor does with non-compliant files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
  /// Only report
  Check,
  /// Repair, writing the result unless `dry_run` is set
  Fix { dry_run: bool },
}

/// Configuration for creating a [`Processor`].
pub struct ProcessorConfig {
  pub patterns: PatternSet,
  pub template: NoticeTemplate,
  pub current_year: i32,
  pub mode: RunMode,

  /// Keep original and repaired content of changed files for diffing
  pub capture_changes: bool,

  /// Maximum number of files in flight
  pub concurrency: usize,

  /// Detector override, [`HeaderScanner`] when unset
  pub detector: Option<Box<dyn NoticeDetector>>,
}

impl ProcessorConfig {
  /// Creates a config in check mode with default concurrency.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     mode: RunMode::Fix { dry_run: true },
  ///     ..ProcessorConfig::new(patterns, template, 2025)
  /// }
  /// ```
  pub fn new(patterns: PatternSet, template: NoticeTemplate, current_year: i32) -> Self {
    Self {
      patterns,
      template,
      current_year,
      mode: RunMode::Check,
      capture_changes: false,
      concurrency: num_cpus::get(),
      detector: None,
    }
  }
}

/// Original and repaired content of a changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
  pub original: String,
  pub repaired: String,
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
  pub report: FileReport,
  /// Present when the file changed and change capture is enabled
  pub change: Option<ContentChange>,
}

impl FileOutcome {
  fn failed(path: PathBuf, error: FileError) -> Self {
    Self {
      report: FileReport {
        error: Some(error),
        ..FileReport::new(path)
      },
      change: None,
    }
  }
}

/// Outcomes of a run, in input order, with their summary.
#[derive(Debug, Clone)]
pub struct ProcessingRun {
  pub outcomes: Vec<FileOutcome>,
  pub summary: ProcessingSummary,
}

impl ProcessingRun {
  pub fn reports(&self) -> Vec<FileReport> {
    self.outcomes.iter().map(|outcome| outcome.report.clone()).collect()
  }
}

/// Everything a worker needs to process one file.
struct FileTask {
  detector: Box<dyn NoticeDetector>,
  repairer: NoticeRepairer,
  rendered_notice: String,
  mode: RunMode,
  capture_changes: bool,
}

impl FileTask {
  fn run(&self, path: PathBuf) -> FileOutcome {
    let file_type = match file_types::lookup(&path) {
      Ok(file_type) => file_type,
      Err(e) => {
        trace!("Skipping: {}", e);
        return FileOutcome {
          report: FileReport::new(path),
          change: None,
        };
      }
    };

    let content = match FileIO::read_full_content(&path) {
      Ok(content) => content,
      Err(e) => return FileOutcome::failed(path, FileError::read(&e)),
    };

    let scan = self.detector.scan(&content, file_type.syntax);
    let status = self.status_of(&scan);
    trace!("Scanned {}: {:?}", path.display(), status);

    let mut report = FileReport {
      status: Some(status),
      ..FileReport::new(path)
    };

    let RunMode::Fix { dry_run } = self.mode else {
      return FileOutcome { report, change: None };
    };
    let Some(repair_mode) = RepairMode::for_scan(&scan, self.repairer.current_year()) else {
      return FileOutcome { report, change: None };
    };

    let repair = self
      .repairer
      .apply(&content, &scan, file_type, &self.rendered_notice, repair_mode);
    if !repair.changed {
      return FileOutcome { report, change: None };
    }

    if !dry_run && let Err(e) = FileIO::write_file(&report.path, &repair.content) {
      report.error = Some(FileError::write(&e));
      return FileOutcome { report, change: None };
    }

    report.action = match repair_mode {
      RepairMode::Insert => FileAction::Inserted,
      RepairMode::Update => FileAction::Updated,
    };
    let change = if self.capture_changes {
      let repaired = repair.content.into_owned();
      Some(ContentChange {
        original: content,
        repaired,
      })
    } else {
      None
    };

    FileOutcome { report, change }
  }

  fn status_of(&self, scan: &ScanResult) -> NoticeStatus {
    match scan.notice_year() {
      _ if !scan.has_notice() => NoticeStatus::Missing,
      Some(year) if scan.is_outdated(self.repairer.current_year()) => NoticeStatus::Outdated { year },
      _ => NoticeStatus::Ok,
    }
  }
}

/// Processor for checking and repairing copyright notices in files.
pub struct Processor {
  patterns: PatternSet,
  task: Arc<FileTask>,
  concurrency: usize,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    let rendered_notice = config.template.render(config.current_year);
    let detector = config.detector.unwrap_or_else(|| Box::new(HeaderScanner));

    Self {
      patterns: config.patterns,
      task: Arc::new(FileTask {
        detector,
        repairer: NoticeRepairer::new(config.current_year),
        rendered_notice,
        mode: config.mode,
        capture_changes: config.capture_changes,
      }),
      concurrency: config.concurrency.max(1),
    }
  }

  /// Expands `inputs` and keeps the files that are in scope.
  ///
  /// A file is in scope when it passes the include/exclude patterns and its
  /// extension is registered. Everything else is skipped silently.
  pub fn collect_files(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
    if self.patterns.is_default_deny() {
      warn!("No include patterns configured, nothing to process");
      return Vec::new();
    }

    FileCollector::new(&self.patterns)
      .collect(inputs)
      .into_iter()
      .filter(|path| self.in_scope(path).is_some())
      .collect()
  }

  fn in_scope(&self, path: &Path) -> Option<&'static FileType> {
    match self.patterns.evaluate(path) {
      PatternMatch::Included => {}
      PatternMatch::Excluded(pattern) => {
        trace!("Skipping: {} (excluded by '{}')", path.display(), pattern);
        return None;
      }
      PatternMatch::NotIncluded => {
        trace!("Skipping: {} (matches no include pattern)", path.display());
        return None;
      }
    }

    match file_types::lookup(path) {
      Ok(file_type) => Some(file_type),
      Err(e) => {
        trace!("Skipping: {}", e);
        None
      }
    }
  }

  /// Processes `files` and returns one outcome per file, in the same order.
  ///
  /// A failing file becomes an outcome with an error. It never aborts the
  /// batch. A file with an unregistered extension is skipped: its outcome has
  /// no status and no error, and it is not counted.
  pub async fn process(&self, files: Vec<PathBuf>) -> ProcessingRun {
    let start = Instant::now();
    let file_count = files.len();
    debug!("Processing {} files, {} at a time", file_count, self.concurrency);

    let outcomes: Vec<FileOutcome> = futures::stream::iter(files)
      .map(|path| {
        let task = Arc::clone(&self.task);
        async move {
          let fallback_path = path.clone();
          match tokio::task::spawn_blocking(move || task.run(path)).await {
            Ok(outcome) => outcome,
            Err(e) => FileOutcome::failed(
              fallback_path,
              FileError {
                kind: ErrorKind::Read,
                message: format!("worker failed: {e}"),
              },
            ),
          }
        }
      })
      .buffered(self.concurrency)
      .collect()
      .await;

    let processing_time = start.elapsed();
    debug!("Processed {} files in {}ms", file_count, processing_time.as_millis());

    let reports: Vec<FileReport> = outcomes.iter().map(|o| o.report.clone()).collect();
    let summary = ProcessingSummary::from_reports(&reports, processing_time);

    ProcessingRun { outcomes, summary }
  }

  /// Collects the files under `inputs` and processes them.
  pub async fn run(&self, inputs: &[PathBuf]) -> ProcessingRun {
    let files = self.collect_files(inputs);
    self.process(files).await
  }
}

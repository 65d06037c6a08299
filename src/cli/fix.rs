//! # Fix Command
//!
//! This module implements `copyright fix`: it inserts missing notices and
//! updates outdated years, or only reports what it would do with `--dry-run`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use copyright_notice::diff::DiffManager;
use copyright_notice::processor::{Processor, ProcessorConfig, RunMode};
use copyright_notice::verbose_log;
use tracing::warn;

use super::CommonArgs;
use crate::output::{print_action, print_error, print_fix_summary, print_scan_summary};

/// Arguments for the fix command
#[derive(Args, Debug, Default)]
pub struct FixArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Report what would change without writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save a diff of every change to a file
  #[arg(long, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,
}

/// Runs the fix command and returns the process exit code.
pub async fn run_fix(args: FixArgs) -> Result<i32> {
  let Some(ctx) = args.common.prepare(false)? else {
    return Ok(1);
  };

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    mode: RunMode::Fix { dry_run: args.dry_run },
    capture_changes: diff_manager.is_enabled(),
    ..ProcessorConfig::new(ctx.config.pattern_set()?, ctx.config.notice_template(), ctx.year)
  });

  let run = processor.run(&args.common.files).await;

  for outcome in &run.outcomes {
    let report = &outcome.report;
    if report.error.is_some() {
      print_error(report);
      continue;
    }
    if !report.is_non_compliant() {
      verbose_log!("OK: {}", report.path.display());
    }
    print_action(report, ctx.year, args.dry_run);

    if let Some(change) = &outcome.change
      && let Err(e) = diff_manager.emit(&report.path, &change.original, &change.repaired)
    {
      warn!("Failed to write diff for {}: {:#}", report.path.display(), e);
    }
  }

  let summary = &run.summary;
  print_scan_summary(summary);
  print_fix_summary(summary, args.dry_run);

  args.common.write_reports(&run);

  let failed = summary.errors > 0 || (args.dry_run && summary.fixed() > 0);
  Ok(i32::from(failed))
}

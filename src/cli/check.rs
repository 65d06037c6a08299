//! # Check Command
//!
//! This module implements `copyright check`: it reports files with a missing
//! or outdated notice and fails the run if there are any. With auto-fix it
//! repairs them too, and still fails so a pre-commit hook stops the commit
//! for the changed files to be staged.

use anyhow::Result;
use clap::Args;
use copyright_notice::processor::{Processor, ProcessorConfig, RunMode};
use tracing::debug;

use super::CommonArgs;
use crate::output::{print_action, print_error, print_fix_summary, print_hint, print_scan_summary, print_status};

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Also repair non-compliant files (overrides `auto_fix` in the config)
  #[arg(long)]
  pub auto_fix: bool,
}

/// Runs the check command and returns the process exit code.
pub async fn run_check(args: CheckArgs) -> Result<i32> {
  let Some(ctx) = args.common.prepare(args.auto_fix)? else {
    return Ok(1);
  };

  let auto_fix = ctx.config.auto_fix;
  let mode = if auto_fix {
    RunMode::Fix { dry_run: false }
  } else {
    RunMode::Check
  };
  debug!("Running check with auto-fix {}", auto_fix);

  let processor = Processor::new(ProcessorConfig {
    mode,
    ..ProcessorConfig::new(ctx.config.pattern_set()?, ctx.config.notice_template(), ctx.year)
  });

  let run = processor.run(&args.common.files).await;

  for outcome in &run.outcomes {
    let report = &outcome.report;
    if report.error.is_some() {
      print_error(report);
    }
    print_status(report);
    print_action(report, ctx.year, false);
  }

  let summary = &run.summary;
  print_scan_summary(summary);
  if auto_fix && summary.fixed() > 0 {
    print_fix_summary(summary, false);
  }
  if !auto_fix && summary.has_problems() {
    print_hint("Run 'copyright fix' to add missing notices and update outdated years");
  }

  args.common.write_reports(&run);

  let failed = summary.has_problems() || summary.errors > 0;
  Ok(i32::from(failed))
}

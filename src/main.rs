//! # copyright
//!
//! Checks source files for a copyright notice and inserts or updates it.

mod cli;
mod output;

use anyhow::Result;

use crate::cli::{Cli, Command, print_version, run_check, run_fix};

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();

  let exit_code = match cli.command {
    Command::Check(args) => run_check(args).await?,
    Command::Fix(args) => run_fix(args).await?,
    Command::Version => {
      print_version();
      0
    }
  };

  if exit_code != 0 {
    std::process::exit(exit_code);
  }
  Ok(())
}

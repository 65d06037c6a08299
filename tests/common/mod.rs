#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assert_cmd::Command;

/// Year every test checks against, so results do not depend on the clock.
pub const TEST_YEAR: &str = "2025";

/// Builds a `copyright` command running inside `dir`.
///
/// The config environment variable is cleared so a developer's own setting
/// cannot leak into the run.
pub fn copyright_cmd(dir: &Path) -> Command {
  let mut cmd = Command::cargo_bin("copyright").expect("copyright binary should build");
  cmd.current_dir(dir).env_remove("COPYRIGHT_CONFIG").env_remove("RUST_LOG");
  cmd
}

/// Same as [`copyright_cmd`] with a subcommand and the flags most tests
/// share: a fixed year, no config file, and a known company.
pub fn copyright_run(dir: &Path, subcommand: &str) -> Command {
  let mut cmd = copyright_cmd(dir);
  cmd
    .arg(subcommand)
    .args(["--year", TEST_YEAR, "--no-config", "--company", "Acme Inc", "--colors", "never"]);
  cmd
}

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

pub fn read_file(dir: &Path, relative: &str) -> Result<String> {
  let path = dir.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

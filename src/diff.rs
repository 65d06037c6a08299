//! # Diff Module
//!
//! This module renders line diffs between original and repaired content, so a
//! dry run can show exactly which lines a repair would add or change.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Renders diffs to stderr and/or appends them to a file.
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects all diffs of a run
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so a run starts with an empty diff file.
  pub fn init(&self) -> Result<()> {
    if let Some(path) = &self.save_diff_path {
      File::create(path).with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Emits the diff for one file.
  ///
  /// The diff is printed to stderr when `show_diff` is set and appended to
  /// the save file when one is configured.
  pub fn emit(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let rendered = render_diff(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        let colored = match line.as_bytes().first() {
          Some(b'+') => line.if_supports_color(Stream::Stderr, |l| l.green()).to_string(),
          Some(b'-') => line.if_supports_color(Stream::Stderr, |l| l.red()).to_string(),
          _ => line.to_string(),
        };
        eprintln!("{colored}");
      }
    }

    if let Some(diff_path) = &self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a line diff with a `Diff for <path>:` header and a trailing blank
/// line.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut rendered = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    rendered.push_str(sign);
    rendered.push_str(change.value());
    if change.missing_newline() {
      rendered.push('\n');
    }
  }
  rendered.push('\n');
  rendered
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_render_diff_insert() {
    let rendered = render_diff(
      Path::new("main.go"),
      "package main\n",
      "// Copyright 2025 Acme\npackage main\n",
    );
    assert_eq!(
      rendered,
      "Diff for main.go:\n+// Copyright 2025 Acme\n package main\n\n"
    );
  }

  #[test]
  fn test_render_diff_update() {
    let rendered = render_diff(Path::new("a.py"), "# Copyright 2022 Acme\n", "# Copyright 2025 Acme\n");
    assert!(rendered.contains("-# Copyright 2022 Acme\n"));
    assert!(rendered.contains("+# Copyright 2025 Acme\n"));
  }

  #[test]
  fn test_render_diff_without_trailing_newline() {
    let rendered = render_diff(Path::new("a.sh"), "echo", "# Copyright 2025\necho");
    assert!(rendered.ends_with(" echo\n\n"));
  }

  #[test]
  fn test_save_diff_appends_after_init() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let diff_path = temp_dir.path().join("changes.diff");
    std::fs::write(&diff_path, "stale content\n").expect("write stale diff");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    assert!(manager.is_enabled());
    manager.init().expect("init diff file");
    manager.emit(Path::new("a.go"), "x\n", "// c\nx\n").expect("emit first");
    manager.emit(Path::new("b.go"), "y\n", "// c\ny\n").expect("emit second");

    let saved = std::fs::read_to_string(&diff_path).expect("read diff");
    assert!(!saved.contains("stale content"));
    let first = saved.find("Diff for a.go:").expect("first diff");
    let second = saved.find("Diff for b.go:").expect("second diff");
    assert!(first < second);
  }

  #[test]
  fn test_disabled_manager() {
    assert!(!DiffManager::default().is_enabled());
  }
}

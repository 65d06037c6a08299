//! # File I/O Module
//!
//! This module reads and writes target files for the processor. Writes replace
//! the file atomically so an interrupted run never leaves a half-written
//! source file behind.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the whole file as UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replaces the file's content.
  ///
  /// The content goes to a temporary file in the same directory, which takes
  /// over the original permissions and is then renamed over the target.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let file_name = path
      .file_name()
      .with_context(|| format!("Not a file path: {}", path.display()))?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let temp_path = dir.join(format!(
      ".{}.copyright-{}.tmp",
      file_name.to_string_lossy(),
      std::process::id()
    ));

    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

    let result = (|| -> Result<()> {
      fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
      if let Some(permissions) = permissions {
        fs::set_permissions(&temp_path, permissions)
          .with_context(|| format!("Failed to copy permissions to: {}", temp_path.display()))?;
      }
      fs::rename(&temp_path, path).with_context(|| format!("Failed to write file: {}", path.display()))
    })();

    if result.is_err() {
      let _ = fs::remove_file(&temp_path);
    }
    result
  }
}

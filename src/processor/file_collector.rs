//! # File Collector Module
//!
//! This module expands the input paths into the list of candidate files.
//! Directories are walked recursively in file-name order. Directories matched
//! by a directory exclude pattern are pruned without being entered.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::patterns::PatternSet;

/// File collector for directory traversal.
pub struct FileCollector<'a> {
  patterns: &'a PatternSet,
}

impl<'a> FileCollector<'a> {
  pub const fn new(patterns: &'a PatternSet) -> Self {
    Self { patterns }
  }

  /// Expands `inputs` into files.
  ///
  /// Inputs that are not directories are kept as given, even if they do not
  /// exist, so that reading them later reports the failure. Duplicates are
  /// dropped, keeping the first occurrence.
  pub fn collect(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
    let start_time = std::time::Instant::now();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
      if input.is_dir() {
        for file in self.traverse_directory(input) {
          if seen.insert(file.clone()) {
            files.push(file);
          }
        }
      } else if seen.insert(input.clone()) {
        files.push(input.clone());
      }
    }

    debug!(
      "Collected {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );
    files
  }

  /// Walks `dir` recursively and returns its regular files, sorted by name.
  pub fn traverse_directory(&self, dir: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", dir.display());

    WalkDir::new(dir)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        let pruned = entry.depth() > 0 && entry.file_type().is_dir() && self.patterns.excludes_dir(entry.path());
        if pruned {
          debug!("Skipping directory: {}", entry.path().display());
        }
        !pruned
      })
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          warn!("Error walking directory {}: {}", dir.display(), e);
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .map(|entry| entry.into_path())
      .collect()
  }
}

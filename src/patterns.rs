//! # Patterns Module
//!
//! This module decides which resolved file paths are eligible for notice
//! checking, based on ordered include and exclude glob lists.
//!
//! Matching rules:
//! - A pattern ending in `/` is a directory pattern. Its segments must appear
//!   as a contiguous run of the path's parent directories, so `vendor/`
//!   matches `vendor/pkg/x.go` and `lib/vendor/x.go` but not `myvendor/x.go`.
//! - Any other pattern is matched against the trailing path components, one
//!   glob per `/`-separated segment. `*.go` tests the file name, `cmd/*.go`
//!   tests the last two components.
//! - A pattern containing a `**` segment is matched against the whole
//!   normalized path.
//!
//! Excludes are checked first and always win. A path that matches no include
//! pattern is not processed.

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Error type for pattern compilation.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
  /// The pattern is not a valid glob.
  #[error("Invalid glob pattern '{pattern}': {source}")]
  Invalid { pattern: String, source: glob::PatternError },

  /// The pattern is empty or only contains separators.
  #[error("Empty pattern is not allowed")]
  Empty,
}

/// Outcome of evaluating a path against a [`PatternSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMatch<'a> {
  /// Matched an include pattern and no exclude pattern
  Included,
  /// Matched the given exclude pattern
  Excluded(&'a str),
  /// Matched no include pattern
  NotIncluded,
}

#[derive(Debug, Clone)]
enum Matcher {
  Directory(Vec<Pattern>),
  Suffix(Vec<Pattern>),
  FullPath(Pattern),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
  raw: String,
  matcher: Matcher,
}

impl CompiledPattern {
  fn new(raw: &str) -> Result<Self, PatternError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);

    let compile = |segment: &str| {
      Pattern::new(segment).map_err(|source| PatternError::Invalid {
        pattern: raw.to_string(),
        source,
      })
    };

    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
      return Err(PatternError::Empty);
    }

    let matcher = if trimmed.ends_with('/') {
      Matcher::Directory(segments.into_iter().map(compile).collect::<Result<_, _>>()?)
    } else if segments.contains(&"**") {
      Matcher::FullPath(compile(segments.join("/").as_str())?)
    } else {
      Matcher::Suffix(segments.into_iter().map(compile).collect::<Result<_, _>>()?)
    };

    Ok(Self {
      raw: raw.to_string(),
      matcher,
    })
  }

  fn matches(&self, components: &[String]) -> bool {
    match &self.matcher {
      Matcher::Directory(segments) => match components.split_last() {
        Some((_, parents)) => contains_run(parents, segments),
        None => false,
      },
      Matcher::Suffix(segments) => {
        if components.len() < segments.len() {
          return false;
        }
        let tail = &components[components.len() - segments.len()..];
        segments_match(tail, segments)
      }
      Matcher::FullPath(pattern) => pattern.matches_with(&components.join("/"), MATCH_OPTIONS),
    }
  }

  fn matches_dir(&self, components: &[String]) -> bool {
    match &self.matcher {
      Matcher::Directory(segments) => contains_run(components, segments),
      Matcher::Suffix(_) | Matcher::FullPath(_) => false,
    }
  }
}

fn segments_match(components: &[String], segments: &[Pattern]) -> bool {
  components
    .iter()
    .zip(segments)
    .all(|(component, segment)| segment.matches_with(component, MATCH_OPTIONS))
}

fn contains_run(components: &[String], segments: &[Pattern]) -> bool {
  components.len() >= segments.len() && components.windows(segments.len()).any(|w| segments_match(w, segments))
}

fn normalize(path: &Path) -> Vec<String> {
  path
    .components()
    .filter_map(|component| match component {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      _ => None,
    })
    .collect()
}

/// Ordered include and exclude patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
  include: Vec<CompiledPattern>,
  exclude: Vec<CompiledPattern>,
}

impl PatternSet {
  /// Compiles include and exclude patterns.
  ///
  /// # Errors
  ///
  /// Returns a [`PatternError`] for the first pattern that is empty or not a
  /// valid glob.
  pub fn new<I, E, S, T>(include: I, exclude: E) -> Result<Self, PatternError>
  where
    I: IntoIterator<Item = S>,
    E: IntoIterator<Item = T>,
    S: AsRef<str>,
    T: AsRef<str>,
  {
    let include = include
      .into_iter()
      .map(|p| CompiledPattern::new(p.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;
    let exclude = exclude
      .into_iter()
      .map(|p| CompiledPattern::new(p.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self { include, exclude })
  }

  /// Evaluates `path` against the exclude list, then the include list.
  pub fn evaluate(&self, path: &Path) -> PatternMatch<'_> {
    let components = normalize(path);
    if components.is_empty() {
      return PatternMatch::NotIncluded;
    }

    if let Some(pattern) = self.exclude.iter().find(|p| p.matches(&components)) {
      return PatternMatch::Excluded(&pattern.raw);
    }

    if self.include.iter().any(|p| p.matches(&components)) {
      PatternMatch::Included
    } else {
      PatternMatch::NotIncluded
    }
  }

  /// Whether `path` should be processed.
  pub fn should_process(&self, path: &Path) -> bool {
    matches!(self.evaluate(path), PatternMatch::Included)
  }

  /// Whether a directory pattern excludes `dir` and everything below it.
  ///
  /// Used to prune directory walks before any file is evaluated.
  pub fn excludes_dir(&self, dir: &Path) -> bool {
    let components = normalize(dir);
    !components.is_empty() && self.exclude.iter().any(|p| p.matches_dir(&components))
  }

  /// Whether the include list is empty, in which case nothing is processed.
  pub fn is_default_deny(&self) -> bool {
    self.include.is_empty()
  }
}

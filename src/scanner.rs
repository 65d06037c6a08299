//! # Scanner Module
//!
//! This module contains the notice detector. It looks for a copyright notice
//! in the leading lines of a file and extracts the notice text and year.
//!
//! Only the first [`SCAN_WINDOW`] lines are inspected. A notice further down
//! the file is treated as missing.

use std::sync::LazyLock;

use regex::Regex;

use crate::file_types::CommentSyntax;

/// Number of leading lines inspected for a notice.
pub const SCAN_WINDOW: usize = 20;

static COPYRIGHT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\bcopyright\b(?:\s*\(c\))?(?:\s*\d{4})?").expect("copyright regex must compile"));

static YEAR_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex must compile"));

/// A copyright notice found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  /// 1-based line number of the notice
  pub line_number: usize,
  /// The notice line with surrounding whitespace trimmed, comment markers kept
  pub raw_text: String,
  /// The last year found on the line, if any
  pub year: Option<i32>,
}

/// Result of scanning one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
  /// Comment syntax the content was scanned with
  pub syntax: CommentSyntax,
  /// The first notice in the window, if any
  pub notice: Option<Notice>,
  /// Number of lines examined
  pub scanned_lines: usize,
}

impl ScanResult {
  pub const fn has_notice(&self) -> bool {
    self.notice.is_some()
  }

  /// The notice year, if a notice with a year was found.
  pub fn notice_year(&self) -> Option<i32> {
    self.notice.as_ref().and_then(|notice| notice.year)
  }

  /// Whether the notice carries a year older than `current_year`.
  ///
  /// A notice without a year is never outdated.
  pub fn is_outdated(&self, current_year: i32) -> bool {
    self.notice_year().is_some_and(|year| year < current_year)
  }

  /// Whether the file needs a notice inserted or its year updated.
  pub fn needs_repair(&self, current_year: i32) -> bool {
    !self.has_notice() || self.is_outdated(current_year)
  }
}

/// Trait for notice detectors.
///
/// Implementations decide whether content carries a copyright notice and
/// where. The pipeline holds a boxed detector so the algorithm can be
/// swapped without touching the processor.
pub trait NoticeDetector: Send + Sync {
  /// Scans `content`, stripping comment markers according to `syntax`.
  fn scan(&self, content: &str, syntax: CommentSyntax) -> ScanResult;
}

/// Default detector: inspects the first [`SCAN_WINDOW`] lines and stops at the
/// first line containing the word "copyright".
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderScanner;

impl NoticeDetector for HeaderScanner {
  fn scan(&self, content: &str, syntax: CommentSyntax) -> ScanResult {
    let mut scanned_lines = 0;

    for (index, line) in content.lines().take(SCAN_WINDOW).enumerate() {
      scanned_lines = index + 1;

      let trimmed = line.trim();
      if trimmed.is_empty() {
        continue;
      }

      let cleaned = strip_comment_markers(trimmed, syntax);
      if !COPYRIGHT_REGEX.is_match(cleaned) {
        continue;
      }

      let year = YEAR_REGEX
        .find_iter(cleaned)
        .last()
        .and_then(|m| m.as_str().parse::<i32>().ok());

      return ScanResult {
        syntax,
        notice: Some(Notice {
          line_number: index + 1,
          raw_text: trimmed.to_string(),
          year,
        }),
        scanned_lines,
      };
    }

    ScanResult {
      syntax,
      notice: None,
      scanned_lines,
    }
  }
}

/// Scans `content` with the default [`HeaderScanner`].
pub fn scan(content: &str, syntax: CommentSyntax) -> ScanResult {
  HeaderScanner.scan(content, syntax)
}

/// Removes the comment marker from an already trimmed line.
///
/// A leading line-comment token is stripped when the line starts with it.
/// Otherwise a leading block start and a trailing block end are stripped.
pub fn strip_comment_markers(line: &str, syntax: CommentSyntax) -> &str {
  if let Some(token) = syntax.line_token()
    && let Some(rest) = line.strip_prefix(token)
  {
    return rest.trim();
  }

  let mut cleaned = line;
  if let Some((start, end)) = syntax.block() {
    cleaned = cleaned.strip_prefix(start).unwrap_or(cleaned);
    cleaned = cleaned.strip_suffix(end).unwrap_or(cleaned);
  }
  cleaned.trim()
}

/// Whether `text` contains the whole word "copyright" (case-insensitive).
pub fn mentions_copyright(text: &str) -> bool {
  COPYRIGHT_REGEX.is_match(text)
}

/// Byte range of the last year token in `line` equal to `year`.
pub(crate) fn last_year_span(line: &str, year: i32) -> Option<std::ops::Range<usize>> {
  let wanted = year.to_string();
  YEAR_REGEX
    .find_iter(line)
    .filter(|m| m.as_str() == wanted)
    .last()
    .map(|m| m.range())
}

#[cfg(test)]
mod tests {
  use super::*;

  const SLASHES: CommentSyntax = CommentSyntax::Line { token: "//" };
  const HASH: CommentSyntax = CommentSyntax::Line { token: "#" };
  const HTML: CommentSyntax = CommentSyntax::Block { start: "<!--", end: "-->" };

  #[test]
  fn test_detects_line_comment_notice() {
    let content = "// Copyright 2022 Acme Inc\npackage main\n";
    let result = scan(content, SLASHES);

    let notice = result.notice.expect("notice should be found");
    assert_eq!(notice.line_number, 1);
    assert_eq!(notice.raw_text, "// Copyright 2022 Acme Inc");
    assert_eq!(notice.year, Some(2022));
    assert_eq!(result.scanned_lines, 1);
  }

  #[test]
  fn test_missing_notice() {
    let content = "package main\n\nfunc main() {}\n";
    let result = scan(content, SLASHES);

    assert!(!result.has_notice());
    assert_eq!(result.notice_year(), None);
    assert_eq!(result.scanned_lines, 3);
    assert!(result.needs_repair(2025));
    assert!(!result.is_outdated(2025));
  }

  #[test]
  fn test_empty_content() {
    let result = scan("", HASH);
    assert!(!result.has_notice());
    assert_eq!(result.scanned_lines, 0);
  }

  #[test]
  fn test_window_boundary() {
    let filler: String = (1..=19).map(|i| format!("line {i}\n")).collect();

    let on_line_20 = format!("{filler}// Copyright 2024 Acme\n");
    let result = scan(&on_line_20, SLASHES);
    assert_eq!(result.notice.map(|n| n.line_number), Some(20));

    let filler: String = (1..=20).map(|i| format!("line {i}\n")).collect();
    let on_line_21 = format!("{filler}// Copyright 2024 Acme\n");
    let result = scan(&on_line_21, SLASHES);
    assert!(!result.has_notice());
    assert_eq!(result.scanned_lines, SCAN_WINDOW);
  }

  #[test]
  fn test_blank_lines_count_toward_line_numbers() {
    let content = "\n\n   \n# Copyright 2021 Acme\n";
    let result = scan(content, HASH);
    assert_eq!(result.notice.map(|n| n.line_number), Some(4));

    let blanks = "\n".repeat(20);
    let content = format!("{blanks}# Copyright 2021 Acme\n");
    assert!(!scan(&content, HASH).has_notice());
  }

  #[test]
  fn test_last_year_wins() {
    let result = scan("// Copyright 1999 Acme, updated 2021\n", SLASHES);
    assert_eq!(result.notice_year(), Some(2021));

    let result = scan("// Copyright (c) 2019-2023 Acme\n", SLASHES);
    assert_eq!(result.notice_year(), Some(2023));
  }

  #[test]
  fn test_notice_without_year() {
    let result = scan("# Copyright Acme Inc. All rights reserved.\n", HASH);
    assert!(result.has_notice());
    assert_eq!(result.notice_year(), None);
    assert!(!result.is_outdated(2025));
    assert!(!result.needs_repair(2025));
  }

  #[test]
  fn test_word_boundary() {
    let result = scan("// this is noncopyrightable content\n", SLASHES);
    assert!(!result.has_notice());

    let result = scan("// Copyrighted 2020\n", SLASHES);
    assert!(!result.has_notice());
  }

  #[test]
  fn test_case_insensitive() {
    let result = scan("// COPYRIGHT (C) 2020 ACME\n", SLASHES);
    assert_eq!(result.notice_year(), Some(2020));
  }

  #[test]
  fn test_only_first_match_is_considered() {
    let content = "// Copyright 2018 First\n// Copyright 2024 Second\n";
    let result = scan(content, SLASHES);
    let notice = result.notice.expect("notice should be found");
    assert_eq!(notice.line_number, 1);
    assert_eq!(notice.year, Some(2018));
  }

  #[test]
  fn test_block_comment_notice() {
    let content = "<?xml version=\"1.0\"?>\n<!-- Copyright 2020 Acme -->\n<root/>\n";
    let result = scan(content, HTML);
    let notice = result.notice.expect("notice should be found");
    assert_eq!(notice.line_number, 2);
    assert_eq!(notice.raw_text, "<!-- Copyright 2020 Acme -->");
    assert_eq!(notice.year, Some(2020));
  }

  #[test]
  fn test_years_outside_range_are_ignored() {
    let result = scan("// Copyright 2022 Acme, build 3050\n", SLASHES);
    assert_eq!(result.notice_year(), Some(2022));
  }

  #[test]
  fn test_outdated_predicates() {
    let result = scan("// Copyright 2022 Acme Inc\n", SLASHES);
    assert!(result.is_outdated(2025));
    assert!(result.needs_repair(2025));
    assert!(!result.is_outdated(2022));
    assert!(!result.is_outdated(2021));
  }

  #[test]
  fn test_strip_comment_markers() {
    assert_eq!(strip_comment_markers("// Copyright", SLASHES), "Copyright");
    assert_eq!(strip_comment_markers("#Copyright", HASH), "Copyright");
    assert_eq!(strip_comment_markers("<!-- Copyright -->", HTML), "Copyright");

    let c_style = CommentSyntax::LineAndBlock {
      token: "//",
      start: "/*",
      end: "*/",
    };
    assert_eq!(strip_comment_markers("/* Copyright 2020 */", c_style), "Copyright 2020");
    assert_eq!(strip_comment_markers("// Copyright 2020", c_style), "Copyright 2020");
  }

  #[test]
  fn test_last_year_span() {
    let line = "// Copyright 2022 Acme, since 2022";
    let span = last_year_span(line, 2022).expect("year should be found");
    assert_eq!(&line[span.clone()], "2022");
    assert_eq!(span.start, line.len() - 4);

    assert!(last_year_span(line, 2021).is_none());
  }
}

//! # Repair Module
//!
//! This module computes repaired file content: it inserts a missing notice or
//! bumps the year of an outdated one.
//!
//! The repairer works on strings only and never touches storage. Writing the
//! result back is the caller's job.
//!
//! Insertion keeps leading constructs in place. A shebang or a mandatory
//! first-line directive (XML declaration, PHP open tag, Python coding line)
//! stays on line 1, followed by one blank line and the notice. A directive
//! right after a shebang stays on line 2. For every other file the notice
//! becomes the first line. A byte order mark always stays at the very start.

use std::borrow::Cow;

use crate::file_types::{CommentSyntax, FileType, is_shebang};
use crate::scanner::{ScanResult, last_year_span};

/// The kind of repair to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairMode {
  /// Insert a notice into content that has none
  Insert,
  /// Replace the outdated year of an existing notice
  Update,
}

impl RepairMode {
  /// Picks the repair a scan calls for, or `None` if the file is compliant.
  pub fn for_scan(scan: &ScanResult, current_year: i32) -> Option<Self> {
    if !scan.has_notice() {
      Some(Self::Insert)
    } else if scan.is_outdated(current_year) {
      Some(Self::Update)
    } else {
      None
    }
  }
}

/// Repaired content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair<'a> {
  /// The resulting content, borrowed when nothing changed
  pub content: Cow<'a, str>,
  /// Whether `content` differs from the input
  pub changed: bool,
}

impl<'a> Repair<'a> {
  const fn unchanged(content: &'a str) -> Self {
    Self {
      content: Cow::Borrowed(content),
      changed: false,
    }
  }

  const fn changed(content: String) -> Self {
    Self {
      content: Cow::Owned(content),
      changed: true,
    }
  }
}

/// Inserts and updates copyright notices.
#[derive(Debug, Clone, Copy)]
pub struct NoticeRepairer {
  current_year: i32,
}

impl NoticeRepairer {
  pub const fn new(current_year: i32) -> Self {
    Self { current_year }
  }

  pub const fn current_year(&self) -> i32 {
    self.current_year
  }

  /// Applies `mode` to `content`.
  ///
  /// `scan` must be the result of scanning this exact content. `rendered` is
  /// the notice text without comment markers, as produced by
  /// [`NoticeTemplate::render`](crate::notice::NoticeTemplate::render).
  ///
  /// Both modes are idempotent: inserting into content that already has a
  /// notice, or updating content that is not outdated, returns the input
  /// unchanged.
  pub fn apply<'a>(
    &self,
    content: &'a str,
    scan: &ScanResult,
    file_type: &FileType,
    rendered: &str,
    mode: RepairMode,
  ) -> Repair<'a> {
    match mode {
      RepairMode::Insert => self.insert(content, scan, file_type, rendered),
      RepairMode::Update => self.update(content, scan),
    }
  }

  /// Inserts the wrapped notice at the top of `content`, after any leading
  /// construct.
  pub fn insert<'a>(&self, content: &'a str, scan: &ScanResult, file_type: &FileType, rendered: &str) -> Repair<'a> {
    if scan.has_notice() {
      return Repair::unchanged(content);
    }

    let eol = line_ending(content);
    let notice = wrap_notice(rendered, file_type.syntax, eol);

    if content.is_empty() {
      return Repair::changed(format!("{notice}{eol}"));
    }

    let (bom, body) = match content.strip_prefix(BOM) {
      Some(body) => (BOM, body),
      None => ("", content),
    };
    let (prefix, rest) = split_leading_prefix(body, file_type);

    let mut repaired = String::with_capacity(content.len() + notice.len() + 3 * eol.len());
    repaired.push_str(bom);
    if prefix.is_empty() {
      repaired.push_str(&notice);
      repaired.push_str(eol);
      repaired.push_str(body);
    } else {
      repaired.push_str(prefix.trim_end_matches(['\r', '\n']));
      repaired.push_str(eol);
      repaired.push_str(eol);
      repaired.push_str(&notice);
      repaired.push_str(eol);
      repaired.push_str(rest);
    }

    Repair::changed(repaired)
  }

  /// Replaces the recorded year on the notice line with the current year.
  ///
  /// Only the last token on that line equal to the recorded year is replaced,
  /// so `2019-2022` becomes `2019-2025`.
  pub fn update<'a>(&self, content: &'a str, scan: &ScanResult) -> Repair<'a> {
    if !scan.is_outdated(self.current_year) {
      return Repair::unchanged(content);
    }
    let Some(notice) = &scan.notice else {
      return Repair::unchanged(content);
    };
    let Some(old_year) = notice.year else {
      return Repair::unchanged(content);
    };

    let mut offset = 0;
    for (index, line) in content.split_inclusive('\n').enumerate() {
      if index + 1 == notice.line_number {
        let text = line.trim_end_matches(['\r', '\n']);
        let Some(span) = last_year_span(text, old_year) else {
          break;
        };

        let start = offset + span.start;
        let end = offset + span.end;
        let mut repaired = String::with_capacity(content.len());
        repaired.push_str(&content[..start]);
        repaired.push_str(&self.current_year.to_string());
        repaired.push_str(&content[end..]);
        return Repair::changed(repaired);
      }
      offset += line.len();
    }

    Repair::unchanged(content)
  }
}

const BOM: &str = "\u{feff}";

/// Splits off the lines that must stay above the notice.
///
/// That is a leading construct on line 1, plus a directive on line 2 when
/// line 1 is a shebang (`#!/usr/bin/env python` then `# -*- coding -*-`).
fn split_leading_prefix<'c>(body: &'c str, file_type: &FileType) -> (&'c str, &'c str) {
  let mut lines = body.split_inclusive('\n');
  let Some(first) = lines.next() else {
    return ("", body);
  };
  let first_text = first.trim_end_matches(['\r', '\n']);
  if !file_type.is_leading_construct(first_text) {
    return ("", body);
  }

  let mut end = first.len();
  if is_shebang(first_text)
    && let Some(second) = lines.next()
  {
    let second_text = second.trim_end_matches(['\r', '\n']);
    if !is_shebang(second_text) && file_type.is_leading_construct(second_text) {
      end += second.len();
    }
  }
  body.split_at(end)
}

/// Line ending to use for inserted lines: CRLF if the content already uses it.
pub fn line_ending(content: &str) -> &'static str {
  if content.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Wraps a rendered notice in comment markers, one comment per line.
///
/// The line token is preferred. Block-only syntaxes wrap each line as
/// `start line end`. Lines are joined with `eol`, without a trailing one.
pub fn wrap_notice(rendered: &str, syntax: CommentSyntax, eol: &str) -> String {
  let wrap = |line: &str| match syntax {
    CommentSyntax::Line { token } | CommentSyntax::LineAndBlock { token, .. } => {
      if line.is_empty() {
        token.to_string()
      } else {
        format!("{token} {line}")
      }
    }
    CommentSyntax::Block { start, end } => format!("{start} {line} {end}"),
  };

  let lines: Vec<String> = if rendered.is_empty() {
    vec![wrap("")]
  } else {
    rendered.lines().map(wrap).collect()
  };
  lines.join(eol)
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use crate::file_types::lookup;
  use crate::scanner::scan;

  const NOTICE: &str = "Copyright 2025 Acme Inc";

  fn repair_file(path: &str, content: &str) -> String {
    let file_type = lookup(Path::new(path)).expect("supported type");
    let result = scan(content, file_type.syntax);
    let repairer = NoticeRepairer::new(2025);
    let mode = RepairMode::for_scan(&result, 2025).expect("needs repair");
    repairer
      .apply(content, &result, file_type, NOTICE, mode)
      .content
      .into_owned()
  }

  #[test]
  fn test_insert_at_top() {
    let repaired = repair_file("main.go", "package main\n");
    assert_eq!(repaired, "// Copyright 2025 Acme Inc\npackage main\n");
  }

  #[test]
  fn test_insert_after_shebang() {
    let repaired = repair_file("run.sh", "#!/bin/bash\necho hi\n");
    assert_eq!(repaired, "#!/bin/bash\n\n# Copyright 2025 Acme Inc\necho hi\n");
  }

  #[test]
  fn test_insert_after_shebang_without_newline() {
    let repaired = repair_file("run.sh", "#!/bin/sh");
    assert_eq!(repaired, "#!/bin/sh\n\n# Copyright 2025 Acme Inc\n");
  }

  #[test]
  fn test_insert_keeps_coding_line_after_shebang() {
    let repaired = repair_file("t.py", "#!/usr/bin/env python\n# -*- coding: latin-1 -*-\nprint(1)\n");
    assert_eq!(
      repaired,
      "#!/usr/bin/env python\n# -*- coding: latin-1 -*-\n\n# Copyright 2025 Acme Inc\nprint(1)\n"
    );

    let repaired = repair_file("gem.rb", "#!/usr/bin/env ruby\n# encoding: utf-8\nputs 1\n");
    assert_eq!(
      repaired,
      "#!/usr/bin/env ruby\n# encoding: utf-8\n\n# Copyright 2025 Acme Inc\nputs 1\n"
    );
  }

  #[test]
  fn test_insert_only_takes_directive_after_shebang() {
    let repaired = repair_file("run.sh", "#!/bin/bash\nset -e\n");
    assert_eq!(repaired, "#!/bin/bash\n\n# Copyright 2025 Acme Inc\nset -e\n");
  }

  #[test]
  fn test_insert_keeps_bom_first() {
    let repaired = repair_file("main.go", "\u{feff}package main\n");
    assert_eq!(repaired, "\u{feff}// Copyright 2025 Acme Inc\npackage main\n");

    let repaired = repair_file("run.sh", "\u{feff}#!/bin/sh\necho hi\n");
    assert_eq!(repaired, "\u{feff}#!/bin/sh\n\n# Copyright 2025 Acme Inc\necho hi\n");
  }

  #[test]
  fn test_insert_above_rust_inner_attribute() {
    let repaired = repair_file("lib.rs", "#![allow(dead_code)]\nfn f() {}\n");
    assert_eq!(repaired, "// Copyright 2025 Acme Inc\n#![allow(dead_code)]\nfn f() {}\n");
  }

  #[test]
  fn test_insert_after_xml_declaration() {
    let repaired = repair_file("pom.xml", "<?xml version=\"1.0\"?>\n<project/>\n");
    assert_eq!(
      repaired,
      "<?xml version=\"1.0\"?>\n\n<!-- Copyright 2025 Acme Inc -->\n<project/>\n"
    );
  }

  #[test]
  fn test_insert_after_php_tag() {
    let repaired = repair_file("index.php", "<?php\necho 'hi';\n");
    assert_eq!(repaired, "<?php\n\n// Copyright 2025 Acme Inc\necho 'hi';\n");
  }

  #[test]
  fn test_insert_keeps_crlf() {
    let repaired = repair_file("main.go", "package main\r\n\r\nfunc main() {}\r\n");
    assert_eq!(
      repaired,
      "// Copyright 2025 Acme Inc\r\npackage main\r\n\r\nfunc main() {}\r\n"
    );

    let repaired = repair_file("run.py", "#!/usr/bin/env python3\r\nprint(1)\r\n");
    assert_eq!(
      repaired,
      "#!/usr/bin/env python3\r\n\r\n# Copyright 2025 Acme Inc\r\nprint(1)\r\n"
    );
  }

  #[test]
  fn test_insert_into_empty_file() {
    let repaired = repair_file("lib.rs", "");
    assert_eq!(repaired, "// Copyright 2025 Acme Inc\n");
  }

  #[test]
  fn test_insert_block_only_syntax() {
    let repaired = repair_file("style.css", "body {}\n");
    assert_eq!(repaired, "/* Copyright 2025 Acme Inc */\nbody {}\n");
  }

  #[test]
  fn test_insert_is_idempotent() {
    let file_type = lookup(Path::new("main.go")).expect("supported type");
    let repairer = NoticeRepairer::new(2025);

    let once = repair_file("main.go", "package main\n");
    let result = scan(&once, file_type.syntax);
    assert!(RepairMode::for_scan(&result, 2025).is_none());

    let twice = repairer.apply(&once, &result, file_type, NOTICE, RepairMode::Insert);
    assert!(!twice.changed);
    assert!(matches!(twice.content, Cow::Borrowed(_)));
    assert_eq!(twice.content, once);
  }

  #[test]
  fn test_update_replaces_recorded_year() {
    let repaired = repair_file("main.go", "// Copyright 2022 Acme Inc\npackage main\n");
    assert_eq!(repaired, "// Copyright 2025 Acme Inc\npackage main\n");
  }

  #[test]
  fn test_update_keeps_founding_year() {
    let repaired = repair_file("main.go", "// Copyright (c) 2019-2022 Acme Inc\npackage main\n");
    assert_eq!(repaired, "// Copyright (c) 2019-2025 Acme Inc\npackage main\n");
  }

  #[test]
  fn test_update_on_later_line() {
    let content = "#!/usr/bin/env python3\n\n# Copyright 2020 Acme\n# 2020 was a good year\n";
    let repaired = repair_file("tool.py", content);
    assert_eq!(
      repaired,
      "#!/usr/bin/env python3\n\n# Copyright 2025 Acme\n# 2020 was a good year\n"
    );
  }

  #[test]
  fn test_update_is_idempotent() {
    let file_type = lookup(Path::new("main.go")).expect("supported type");
    let content = "// Copyright 2025 Acme Inc\n";
    let result = scan(content, file_type.syntax);

    let repair = NoticeRepairer::new(2025).apply(content, &result, file_type, NOTICE, RepairMode::Update);
    assert!(!repair.changed);
    assert_eq!(repair.content, content);
  }

  #[test]
  fn test_for_scan() {
    let syntax = CommentSyntax::Line { token: "//" };
    assert_eq!(
      RepairMode::for_scan(&scan("x\n", syntax), 2025),
      Some(RepairMode::Insert)
    );
    assert_eq!(
      RepairMode::for_scan(&scan("// Copyright 2020\n", syntax), 2025),
      Some(RepairMode::Update)
    );
    assert_eq!(RepairMode::for_scan(&scan("// Copyright 2025\n", syntax), 2025), None);
    assert_eq!(RepairMode::for_scan(&scan("// Copyright Acme\n", syntax), 2025), None);
  }

  #[test]
  fn test_wrap_notice() {
    let hash = CommentSyntax::Line { token: "#" };
    assert_eq!(wrap_notice("Copyright\n\nAcme", hash, "\n"), "# Copyright\n#\n# Acme");

    let html = CommentSyntax::Block { start: "<!--", end: "-->" };
    assert_eq!(wrap_notice("Copyright 2025", html, "\n"), "<!-- Copyright 2025 -->");
  }

  #[test]
  fn test_line_ending() {
    assert_eq!(line_ending("a\nb\n"), "\n");
    assert_eq!(line_ending("a\r\nb\r\n"), "\r\n");
    assert_eq!(line_ending(""), "\n");
  }
}

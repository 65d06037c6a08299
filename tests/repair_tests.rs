use std::path::Path;

use copyright_notice::file_types::lookup;
use copyright_notice::notice::NoticeTemplate;
use copyright_notice::repair::{NoticeRepairer, RepairMode};
use copyright_notice::scanner::scan;

const YEAR: i32 = 2025;

/// Scans and repairs `content` as if it lived in `file_name`.
fn repair(file_name: &str, content: &str) -> String {
  let file_type = lookup(Path::new(file_name)).expect("registered extension");
  let result = scan(content, file_type.syntax);
  let Some(mode) = RepairMode::for_scan(&result, YEAR) else {
    return content.to_string();
  };
  let rendered = NoticeTemplate::new("Copyright $year $company_name", "Acme Inc").render(YEAR);
  NoticeRepairer::new(YEAR)
    .apply(content, &result, file_type, &rendered, mode)
    .content
    .into_owned()
}

#[test]
fn test_repair_then_scan_is_compliant() {
  let cases = [
    ("main.go", "package main\n"),
    ("lib.rs", "//! crate docs\n"),
    ("app.ts", "export {};\n"),
    ("tool.py", "#!/usr/bin/env python3\nimport sys\n"),
    ("legacy.py", "#!/usr/bin/env python\n# -*- coding: latin-1 -*-\nprint(1)\n"),
    ("main.go", "\u{feff}package main\n"),
    ("lib.rs", "#![forbid(unsafe_code)]\n"),
    ("gem.rb", "# frozen_string_literal: true\nclass A; end\n"),
    ("index.php", "<?php\necho 1;\n"),
    ("pom.xml", "<?xml version=\"1.0\"?>\n<project/>\n"),
    ("main.tf", "resource \"x\" \"y\" {}\n"),
    ("core.clj", "(ns core)\n"),
    ("mod.hs", "module Main where\n"),
    ("init.el", ""),
  ];

  for (file_name, content) in cases {
    let repaired = repair(file_name, content);
    let file_type = lookup(Path::new(file_name)).expect("registered extension");
    let result = scan(&repaired, file_type.syntax);
    assert!(result.has_notice(), "{file_name}: no notice after repair:\n{repaired}");
    assert_eq!(result.notice_year(), Some(YEAR), "{file_name}");
    assert_eq!(repair(file_name, &repaired), repaired, "{file_name}: second repair changed content");
  }
}

#[test]
fn test_original_content_is_preserved() {
  let content = "#!/usr/bin/env python3\nimport sys\n\nprint(sys.argv)\n";
  let repaired = repair("tool.py", content);
  assert_eq!(
    repaired,
    "#!/usr/bin/env python3\n\n# Copyright 2025 Acme Inc\nimport sys\n\nprint(sys.argv)\n"
  );
}

#[test]
fn test_crlf_file_stays_crlf() {
  let repaired = repair("Main.java", "class Main {}\r\n");
  assert_eq!(repaired, "// Copyright 2025 Acme Inc\r\nclass Main {}\r\n");
}

#[test]
fn test_notice_beyond_window_is_inserted_again() {
  let mut content = "\n".repeat(20);
  content.push_str("// Copyright 2025 Acme Inc\n");
  let repaired = repair("main.c", &content);
  assert!(repaired.starts_with("// Copyright 2025 Acme Inc\n\n"));
}

#[test]
fn test_update_touches_only_notice_year() {
  let content = "# Copyright (c) 2020, Acme Inc\n# Released 2020\nx = 2020\n";
  assert_eq!(
    repair("script.sh", content),
    "# Copyright (c) 2025, Acme Inc\n# Released 2020\nx = 2020\n"
  );
}

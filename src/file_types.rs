//! # File Types Module
//!
//! This module maps file extensions to the comment syntax used to wrap and
//! strip copyright notices.
//!
//! The table is a closed set: supporting a new language means adding an entry
//! to [`FILE_TYPES`]. Extensions are compared lowercase and never appear in
//! more than one entry.

use std::path::{Path, PathBuf};

/// Comment markers available for a file type, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
  /// Only line comments (e.g. `#` for shell scripts)
  Line { token: &'static str },
  /// Only block comments (e.g. `<!--` / `-->` for HTML)
  Block { start: &'static str, end: &'static str },
  /// Both line and block comments (e.g. `//` and `/*` / `*/` for C)
  LineAndBlock {
    token: &'static str,
    start: &'static str,
    end: &'static str,
  },
}

impl CommentSyntax {
  /// The line-comment token, if this syntax has one.
  pub const fn line_token(&self) -> Option<&'static str> {
    match self {
      Self::Line { token } | Self::LineAndBlock { token, .. } => Some(*token),
      Self::Block { .. } => None,
    }
  }

  /// The block-comment start and end markers, if this syntax has them.
  pub const fn block(&self) -> Option<(&'static str, &'static str)> {
    match self {
      Self::Block { start, end } | Self::LineAndBlock { start, end, .. } => Some((*start, *end)),
      Self::Line { .. } => None,
    }
  }
}

/// A registered file type.
#[derive(Debug, PartialEq, Eq)]
pub struct FileType {
  /// Human-readable name, used in logs
  pub name: &'static str,
  /// Lowercase extensions without the leading dot
  pub extensions: &'static [&'static str],
  /// Comment markers for this type
  pub syntax: CommentSyntax,
  /// Lowercase first-line prefixes that must stay on line 1 when a notice is
  /// inserted. Shebangs are handled for every type and are not listed here.
  pub leading_directives: &'static [&'static str],
}

impl FileType {
  /// Whether `line` is a construct that has to remain the first line of the
  /// file. A leading byte order mark is ignored.
  pub fn is_leading_construct(&self, line: &str) -> bool {
    if is_shebang(line) {
      return true;
    }
    let lower = strip_bom(line).to_lowercase();
    self.leading_directives.iter().any(|directive| lower.starts_with(directive))
  }
}

/// Whether `line` is an interpreter line. `#![` opens a Rust inner attribute,
/// not a shebang.
pub fn is_shebang(line: &str) -> bool {
  let line = strip_bom(line);
  line.starts_with("#!") && !line.starts_with("#![")
}

fn strip_bom(line: &str) -> &str {
  line.strip_prefix('\u{feff}').unwrap_or(line)
}

const C_STYLE: CommentSyntax = CommentSyntax::LineAndBlock {
  token: "//",
  start: "/*",
  end: "*/",
};

const HASH: CommentSyntax = CommentSyntax::Line { token: "#" };

/// The static file type table.
pub static FILE_TYPES: &[FileType] = &[
  FileType {
    name: "Go",
    extensions: &["go"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "Rust",
    extensions: &["rs"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "C/C++",
    extensions: &["c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "Java",
    extensions: &["java"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "Kotlin",
    extensions: &["kt", "kts"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "Scala",
    extensions: &["scala", "sc"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "Swift",
    extensions: &["swift"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "C#",
    extensions: &["cs"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "JavaScript/TypeScript",
    extensions: &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"],
    syntax: C_STYLE,
    leading_directives: &[],
  },
  FileType {
    name: "PHP",
    extensions: &["php"],
    syntax: C_STYLE,
    leading_directives: &["<?php"],
  },
  FileType {
    name: "CSS",
    extensions: &["css"],
    syntax: CommentSyntax::Block { start: "/*", end: "*/" },
    leading_directives: &["@charset"],
  },
  FileType {
    name: "SCSS/Less",
    extensions: &["scss", "less"],
    syntax: C_STYLE,
    leading_directives: &["@charset"],
  },
  FileType {
    name: "Python",
    extensions: &["py", "pyi"],
    syntax: HASH,
    leading_directives: &["# -*- coding", "# coding:", "# coding="],
  },
  FileType {
    name: "Shell",
    extensions: &["sh", "bash", "zsh"],
    syntax: HASH,
    leading_directives: &[],
  },
  FileType {
    name: "Ruby",
    extensions: &["rb"],
    syntax: HASH,
    leading_directives: &["# encoding:", "# frozen_string_literal:"],
  },
  FileType {
    name: "Perl",
    extensions: &["pl", "pm"],
    syntax: HASH,
    leading_directives: &[],
  },
  FileType {
    name: "R",
    extensions: &["r"],
    syntax: HASH,
    leading_directives: &[],
  },
  FileType {
    name: "YAML",
    extensions: &["yaml", "yml"],
    syntax: HASH,
    leading_directives: &["%yaml"],
  },
  FileType {
    name: "TOML",
    extensions: &["toml"],
    syntax: HASH,
    leading_directives: &[],
  },
  FileType {
    name: "Terraform/HCL",
    extensions: &["tf", "hcl"],
    syntax: CommentSyntax::LineAndBlock {
      token: "#",
      start: "/*",
      end: "*/",
    },
    leading_directives: &[],
  },
  FileType {
    name: "SQL",
    extensions: &["sql"],
    syntax: CommentSyntax::LineAndBlock {
      token: "--",
      start: "/*",
      end: "*/",
    },
    leading_directives: &[],
  },
  FileType {
    name: "Haskell/Lua",
    extensions: &["hs", "lua"],
    syntax: CommentSyntax::Line { token: "--" },
    leading_directives: &[],
  },
  FileType {
    name: "Lisp",
    extensions: &["el", "lisp", "clj", "cljs"],
    syntax: CommentSyntax::Line { token: ";;" },
    leading_directives: &[],
  },
  FileType {
    name: "Erlang",
    extensions: &["erl", "hrl"],
    syntax: CommentSyntax::Line { token: "%" },
    leading_directives: &[],
  },
  FileType {
    name: "HTML/XML",
    extensions: &["html", "htm", "xml", "xhtml", "svg", "vue"],
    syntax: CommentSyntax::Block { start: "<!--", end: "-->" },
    leading_directives: &["<?xml", "<!doctype"],
  },
  FileType {
    name: "OCaml",
    extensions: &["ml", "mli"],
    syntax: CommentSyntax::Block { start: "(*", end: "*)" },
    leading_directives: &[],
  },
];

/// Error returned when a path's extension is not in the registry.
///
/// Callers skip such files entirely: they count as neither compliant nor
/// missing.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported file type '{extension}': {}", .path.display())]
pub struct UnsupportedFileType {
  /// The path that was looked up
  pub path: PathBuf,
  /// The lowercased extension, empty if the path has none
  pub extension: String,
}

/// Looks up the file type for `path` by its lowercase extension.
///
/// # Errors
///
/// Returns [`UnsupportedFileType`] when the extension is missing or not
/// registered.
pub fn lookup(path: &Path) -> Result<&'static FileType, UnsupportedFileType> {
  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_lowercase();

  FILE_TYPES
    .iter()
    .find(|file_type| file_type.extensions.contains(&extension.as_str()))
    .ok_or_else(|| UnsupportedFileType {
      path: path.to_path_buf(),
      extension,
    })
}

/// One `*.ext` include glob per registered extension, in table order.
pub fn default_include_patterns() -> Vec<String> {
  FILE_TYPES
    .iter()
    .flat_map(|file_type| file_type.extensions.iter())
    .map(|ext| format!("*.{ext}"))
    .collect()
}

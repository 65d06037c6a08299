//! # copyright-notice
//!
//! A tool that checks source files for a copyright notice near the top of the
//! file, and inserts or updates it in place.
//!
//! It is meant to run as a pre-commit gate: a check exits non-zero when any
//! file lacks a notice or carries a stale year.
//!
//! ## Features
//!
//! * Bounded-window notice detection (first 20 lines)
//! * Per-language comment syntax for 26 file type families
//! * Templated notices with `$year` and `$company_name` placeholders
//! * Insertion that keeps shebangs and mandatory first-line directives on top
//! * Idempotent year updates that keep the founding year of a range
//! * YAML or TOML configuration with include/exclude globs
//!
//! ## Usage as a Library
//!
//! ```rust
//! use std::path::Path;
//!
//! use copyright_notice::file_types::lookup;
//! use copyright_notice::notice::NoticeTemplate;
//! use copyright_notice::repair::{NoticeRepairer, RepairMode};
//! use copyright_notice::scanner::scan;
//!
//! let file_type = lookup(Path::new("main.go")).expect("go is supported");
//! let content = "package main\n";
//!
//! let result = scan(content, file_type.syntax);
//! let mode = RepairMode::for_scan(&result, 2025).expect("notice is missing");
//! let notice = NoticeTemplate::new("Copyright $year $company_name", "Acme Inc").render(2025);
//!
//! let repair = NoticeRepairer::new(2025).apply(content, &result, file_type, &notice, mode);
//! assert_eq!(repair.content, "// Copyright 2025 Acme Inc\npackage main\n");
//! ```
//!
//! ## Modules
//!
//! * [`file_types`] - Extension to comment syntax registry
//! * [`patterns`] - Include/exclude glob matching
//! * [`scanner`] - Notice detection
//! * [`notice`] - Notice template rendering
//! * [`repair`] - Notice insertion and year updates
//! * [`processor`] - Concurrent per-file pipeline
//! * [`config`] - Configuration loading and discovery

pub mod config;
pub mod diff;
pub mod file_types;
pub mod logging;
pub mod notice;
pub mod patterns;
pub mod processor;
pub mod repair;
pub mod report;
pub mod scanner;

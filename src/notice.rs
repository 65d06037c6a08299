//! # Notice Module
//!
//! This module renders the notice text from a template with placeholders.
//!
//! Supported placeholders:
//! - `$company_name` - the configured company name
//! - `$year` - the target year
//! - `$current_year` - also the target year
//!
//! ## Example
//!
//! ```rust
//! use copyright_notice::notice::NoticeTemplate;
//!
//! let template = NoticeTemplate::new("Copyright $year $company_name", "Acme Inc");
//! assert_eq!(template.render(2025), "Copyright 2025 Acme Inc");
//! ```

/// Default notice format.
pub const DEFAULT_NOTICE_FORMAT: &str = "Copyright (C) $year $company_name. All rights reserved.";

/// Default company name.
pub const DEFAULT_COMPANY_NAME: &str = "Your Company";

/// A notice format together with the company name substituted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeTemplate {
  format: String,
  company_name: String,
}

impl NoticeTemplate {
  pub fn new(format: impl Into<String>, company_name: impl Into<String>) -> Self {
    Self {
      format: format.into(),
      company_name: company_name.into(),
    }
  }

  pub fn format(&self) -> &str {
    &self.format
  }

  pub fn company_name(&self) -> &str {
    &self.company_name
  }

  /// Renders the notice for `year`.
  ///
  /// Substitution is plain text replacement, done in order `$company_name`,
  /// `$year`, `$current_year`. A company name that itself contains `$year` is
  /// therefore substituted too. Unknown placeholders are kept verbatim.
  pub fn render(&self, year: i32) -> String {
    let year = year.to_string();
    self
      .format
      .replace("$company_name", &self.company_name)
      .replace("$year", &year)
      .replace("$current_year", &year)
  }
}

impl Default for NoticeTemplate {
  fn default() -> Self {
    Self::new(DEFAULT_NOTICE_FORMAT, DEFAULT_COMPANY_NAME)
  }
}

//! # Configuration Module
//!
//! This module loads the notice configuration: company name, notice format,
//! auto-fix default, and the include/exclude glob lists.
//!
//! Configuration is read from a YAML file, or TOML when the file name ends in
//! `.toml`. The file is discovered in this order:
//! 1. The `--config` flag
//! 2. The `COPYRIGHT_CONFIG` environment variable
//! 3. One of [`DEFAULT_CONFIG_FILENAMES`] in the working directory
//!
//! Every field is optional. Missing fields take their defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file_types::default_include_patterns;
use crate::notice::{DEFAULT_COMPANY_NAME, DEFAULT_NOTICE_FORMAT, NoticeTemplate};
use crate::patterns::{PatternError, PatternSet};
use crate::scanner::mentions_copyright;
use crate::verbose_log;

/// Config file names searched in the working directory, in priority order.
pub const DEFAULT_CONFIG_FILENAMES: &[&str] = &[
  ".copyright.yaml",
  ".copyright.yml",
  "copyright.yaml",
  "copyright.yml",
  ".copyright.toml",
];

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHT_CONFIG";

/// Exclude patterns applied when the config does not set any.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["vendor/", "node_modules/", ".git/", "*.pb.go", "*_generated.go"];

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  /// Substituted for `$company_name` in the notice format
  pub company_name: String,

  /// Notice text with `$year`, `$current_year` and `$company_name`
  /// placeholders
  pub notice_format: String,

  /// Whether `check` repairs files as well as reporting them
  pub auto_fix: bool,

  /// Include globs. A file must match at least one.
  pub file_patterns: Vec<String>,

  /// Exclude globs. A file matching any of them is skipped.
  pub exclude_patterns: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      company_name: DEFAULT_COMPANY_NAME.to_string(),
      notice_format: DEFAULT_NOTICE_FORMAT.to_string(),
      auto_fix: false,
      file_patterns: default_include_patterns(),
      exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
    }
  }
}

/// Values from command-line flags that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub company: Option<String>,
  pub format: Option<String>,
  /// `Some(true)` forces auto-fix on. A flag can't turn it off.
  pub auto_fix: Option<bool>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist.
  #[error("Config file not found: {}", .path.display())]
  NotFound { path: PathBuf },

  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", .path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid YAML.
  #[error("Failed to parse config file '{}': {source}", .path.display())]
  ParseYaml { path: PathBuf, source: serde_yaml::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{}': {source}", .path.display())]
  ParseToml { path: PathBuf, source: toml::de::Error },

  /// An include or exclude pattern does not compile.
  #[error("Invalid pattern in config: {0}")]
  InvalidPattern(#[from] PatternError),

  /// The notice format would not be recognized as a notice once inserted.
  #[error("Invalid notice format '{format}': it must contain the word \"copyright\"")]
  InvalidNoticeFormat { format: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Files ending in `.toml` are parsed as TOML, everything else as YAML. An
  /// empty file yields the default configuration.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
      path: path.to_path_buf(),
      source,
    })?;

    let config = if content.trim().is_empty() {
      Self::default()
    } else if is_toml(path) {
      toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
      })?
    } else {
      serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source,
      })?
    };

    config.validate()?;

    verbose_log!(
      "Loaded config: {} include patterns, {} exclude patterns",
      config.file_patterns.len(),
      config.exclude_patterns.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - All include and exclude patterns compile
  /// - The notice format contains the word "copyright", so inserted notices
  ///   are detected on the next scan
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.pattern_set()?;

    if !mentions_copyright(&self.notice_format) {
      return Err(ConfigError::InvalidNoticeFormat {
        format: self.notice_format.clone(),
      });
    }

    Ok(())
  }

  /// Applies command-line overrides and re-validates the result.
  pub fn with_overrides(mut self, overrides: &CliOverrides) -> Result<Self, ConfigError> {
    if let Some(company) = &overrides.company {
      self.company_name.clone_from(company);
    }
    if let Some(format) = &overrides.format {
      self.notice_format.clone_from(format);
    }
    if overrides.auto_fix == Some(true) {
      self.auto_fix = true;
    }

    self.validate()?;
    Ok(self)
  }

  /// Compiles the include and exclude lists.
  pub fn pattern_set(&self) -> Result<PatternSet, PatternError> {
    PatternSet::new(&self.file_patterns, &self.exclude_patterns)
  }

  /// The notice template built from the format and company name.
  pub fn notice_template(&self) -> NoticeTemplate {
    NoticeTemplate::new(self.notice_format.clone(), self.company_name.clone())
  }
}

fn is_toml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Discover the configuration file path.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when `explicit_path` is given but does
/// not exist. A missing path in the environment variable only logs and falls
/// through to the working directory.
pub fn discover_config_path(explicit_path: Option<&Path>, working_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Ok(Some(path.to_path_buf()));
    }
    return Err(ConfigError::NotFound {
      path: path.to_path_buf(),
    });
  }

  if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
    let path = PathBuf::from(env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Ok(Some(path));
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, path.display());
  }

  for name in DEFAULT_CONFIG_FILENAMES {
    let candidate = working_dir.join(name);
    if candidate.is_file() {
      verbose_log!("Using config from working directory: {}", candidate.display());
      return Ok(Some(candidate));
    }
  }

  verbose_log!("No config file found");
  Ok(None)
}

/// Load the configuration from the discovered path, apply `overrides`, and
/// validate.
///
/// With `no_config` set, discovery is skipped and the defaults are used.
pub fn load_config(
  explicit_path: Option<&Path>,
  working_dir: &Path,
  no_config: bool,
  overrides: &CliOverrides,
) -> Result<Config> {
  let base = if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    Config::default()
  } else {
    match discover_config_path(explicit_path, working_dir)? {
      Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?,
      None => Config::default(),
    }
  };

  base
    .with_overrides(overrides)
    .context("Invalid configuration after applying command-line flags")
}

//! # Logging Module
//!
//! This module provides the logging utilities of the tool:
//! - Structured `tracing` output on stderr, filtered by `-v`/`-q` or `RUST_LOG`
//! - Verbose logging that can be enabled/disabled
//! - Hint messages on stdout, suppressed in quiet mode
//!
//! ## Example
//!
//! ```rust
//! use copyright_notice::logging::{ColorMode, set_verbose};
//! use copyright_notice::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! // Goes to stderr
//! verbose_log!("Scanning file: {}", "main.go");
//!
//! // Goes to stdout
//! info_log!("Run 'copyright fix' to add missing notices");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, level_for, set_normal, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, yellow when stdout supports color.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

//! Terminal styling helpers
//!
//! Colors are applied only when stdout supports them; `anstream` strips
//! anything left over when output is redirected.

use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Success marker
pub const CHECK: &str = "✓";

/// Failure marker
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// De-emphasized text (hints, secondary info)
    fn muted(&self) -> String;
    /// Headings and labels
    fn emphasis(&self) -> String;
    /// Names and numbers worth spotting
    fn accent(&self) -> String;
    /// Completed work
    fn success(&self) -> String;
    /// Non-fatal problems
    fn warn(&self) -> String;
    /// Failures
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    fn error(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.red())
            .to_string()
    }
}

/// Styled success marker
pub fn check() -> String {
    CHECK.success()
}

/// Styled failure marker
pub fn cross() -> String {
    CROSS.error()
}

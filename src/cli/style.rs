//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when the
//! stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use ready_or_not::gates::GateStatus;
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";
/// Cross mark
pub const CROSS: &str = "✗";
/// Ellipsis for pending gates
pub const PENDING: &str = "…";
/// Warning sign for advisories
pub const WARN: &str = "!";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold
    fn emphasis(&self) -> String;
    /// Cyan, for names and numbers
    fn accent(&self) -> String;
    /// Dimmed, for secondary text
    fn muted(&self) -> String;
    /// Green
    fn success(&self) -> String;
    /// Yellow
    fn warn(&self) -> String;
    /// Bold red
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled marker for a gate status
pub fn status_marker(status: GateStatus) -> String {
    match status {
        GateStatus::Pass => CHECK.success(),
        GateStatus::Fail => CROSS.error(),
        GateStatus::Pending => PENDING.muted(),
        GateStatus::Warn => WARN.warn(),
    }
}

/// Spinner used while talking to GitHub
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}

/// Terminal hyperlink when supported, plain text otherwise
pub fn link(text: &str, url: &str) -> String {
    if url.is_empty() || !supports_hyperlinks::on(supports_hyperlinks::Stream::Stderr) {
        return text.to_string();
    }
    terminal_link::Link::new(text, url).to_string()
}

//! Styled terminal output.
//!
//! One place for the glyph conventions (`✓ ✗ ⚠ ◆`) and the orange accent
//! used across commands, so every message reads the same.

use chrono::{DateTime, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Primary accent (256-color orange).
pub fn accent(text: &str) -> String {
    style(text).color256(208).to_string()
}

/// Secondary accent (lighter orange).
pub fn accent_alt(text: &str) -> String {
    style(text).color256(214).to_string()
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn failure(message: &str) {
    println!("{} {}", style("✗").red(), message);
}

pub fn warn(message: &str) {
    println!("    {} {}", style("⚠").yellow(), style(message).yellow());
}

pub fn info(message: &str) {
    println!("{} {}", style("◆").color256(214), message);
}

/// Dim follow-up line printed under an error message.
pub fn hint(message: &str) {
    println!("  {}", style(message).dim());
}

/// `  label: /some/path` with the path underlined.
pub fn path_line(label: &str, path: &Path) {
    println!("  {} {}", style(format!("{label}:")).dim(), style(path.display()).underlined());
}

/// `  label: value` detail line.
pub fn detail(label: &str, value: &str) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Spinner for operations that block on the filesystem or a child process.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Coarse "3 days ago" rendering for project listings.
pub fn format_relative_time(when: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(when);
    if delta.num_days() > 0 {
        format!("{} days ago", delta.num_days())
    } else if delta.num_hours() > 0 {
        format!("{} hours ago", delta.num_hours())
    } else if delta.num_minutes() > 0 {
        format!("{} minutes ago", delta.num_minutes())
    } else {
        "just now".to_string()
    }
}

//! Terminal output for CLI commands.
//!
//! Every helper either prints styled text or, in `--json` mode, one JSON
//! line of the form `{"type": ..., "payload": ...}` so scripts can consume
//! the output.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value as JsonValue};

/// Output flags shared by every CLI command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit JSON lines instead of styled text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    fn suppressed(self) -> bool {
        !self.json && self.quiet
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    *cell().read()
}

fn emit(kind: &str, payload: JsonValue) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply the global `--json`, `--quiet` and `--verbose` flags.
pub fn configure(config: OutputConfig) {
    *cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Application name and version.
pub fn header(version: &str) {
    let config = current();
    if config.json {
        emit("header", json!({ "app": "gdps", "version": version }));
    } else if !config.suppressed() {
        println!("{} {}", "gdps".bold(), version.dimmed());
        println!();
    }
}

pub fn section(title: &str) {
    let config = current();
    if config.json {
        emit("section", json!({ "title": title }));
    } else if !config.suppressed() {
        println!();
        println!("{}", title.bold());
    }
}

/// A labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = current();
    let value = value.to_string();
    if config.json {
        emit("field", json!({ "label": label, "value": value }));
    } else if !config.suppressed() {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    let config = current();
    if config.json {
        emit("success", json!({ "message": message }));
    } else if !config.suppressed() {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Warnings print even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        emit("warning", json!({ "message": message }));
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

pub fn hint(message: &str) {
    let config = current();
    if config.json {
        emit("hint", json!({ "message": message }));
    } else if !config.suppressed() {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    }
}

/// Multi-line text, indented to match the other helpers.
pub fn lines(content: &str) {
    let config = current();
    if config.json {
        emit("lines", json!({ "content": content }));
    } else if !config.suppressed() {
        for line in content.lines() {
            println!("  {line}");
        }
    }
}

/// Command reply text. Printed even in quiet mode, since it is the result.
pub fn reply(content: &str) {
    if is_json() {
        emit("reply", json!({ "content": content }));
    } else {
        println!("{content}");
    }
}

/// Raw JSON document, for commands whose whole output is data.
pub fn json_output(value: JsonValue) {
    println!("{value}");
}

/// Highlight a value in cyan, plain in JSON mode.
#[must_use]
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        value.cyan().to_string()
    }
}

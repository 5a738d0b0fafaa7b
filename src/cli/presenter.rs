//! CLI presenter for output formatting

use colored::Colorize;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Print raw output to stdout
    pub fn output(&self, message: &str) {
        println!("{message}");
    }

    /// Print a key/value line to stdout
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{:<18} {}", key.bold(), value);
    }
}

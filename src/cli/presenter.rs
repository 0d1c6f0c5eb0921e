//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::connection::ConnectionState;

/// Presenter for CLI output formatting.
///
/// Status goes to stderr; stdout is reserved for command output such as
/// `/history` and `config get`.
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        self.stop_spinner();

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Check if a spinner is running
    pub fn is_spinning(&self) -> bool {
        self.spinner.is_some()
    }

    /// Clear the spinner and print a success line
    pub fn spinner_success(&mut self, message: &str) {
        self.stop_spinner();
        self.success(message);
    }

    /// Clear the spinner and print an error line
    pub fn spinner_fail(&mut self, message: &str) {
        self.stop_spinner();
        self.error(message);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Echo a line that reached the destination
    pub fn sent(&self, line: &str) {
        eprintln!("{} {}", "→".dimmed(), line.dimmed());
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format the connection status line
    pub fn format_status(&self, state: ConnectionState, destination: Option<&str>) -> String {
        let dot = match state {
            ConnectionState::Connected => "●".green(),
            ConnectionState::Connecting => "●".yellow(),
            ConnectionState::Disconnected => "●".red(),
        };
        match destination {
            Some(dest) => format!("{} {} ({})", dot, state, dest),
            None => format!("{} {}", dot, state),
        }
    }

    /// Print connection status
    pub fn connection_status(&self, state: ConnectionState, destination: Option<&str>) {
        eprintln!("{}", self.format_status(state, destination));
    }

    /// Print sent lines, newest first, numbered
    pub fn history(&self, lines: &[String]) {
        if lines.is_empty() {
            self.info("Nothing sent yet");
            return;
        }
        for (i, line) in lines.iter().enumerate() {
            println!("{:>3}  {}", i + 1, line);
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

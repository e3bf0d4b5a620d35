//! Reporting: debug listings and colorized error output.
//!
//! Presentation is behind the `Reporter` trait so the host build tool
//! can route output wherever it wants; the default reporter writes to
//! stderr with ANSI colors when attached to a terminal.

use std::sync::RwLock;

use crate::error::EnvErrors;

/// Color output option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOption {
    /// Auto-detect based on terminal capability.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// ANSI color codes for terminal output.
struct Colors {
    error: &'static str,
    key: &'static str,
    value: &'static str,
    accent: &'static str,
    reset: &'static str,
}

impl Colors {
    fn enabled() -> Self {
        Self {
            error: "\x1b[1;31m",  // bold red
            key: "\x1b[35m",      // magenta
            value: "\x1b[33m",    // yellow
            accent: "\x1b[36m",   // cyan
            reset: "\x1b[0m",
        }
    }

    fn disabled() -> Self {
        Self {
            error: "",
            key: "",
            value: "",
            accent: "",
            reset: "",
        }
    }

    fn for_output(use_color: bool) -> Self {
        if use_color {
            Self::enabled()
        } else {
            Self::disabled()
        }
    }
}

/// Detect if stderr is a TTY for color support.
fn should_use_color(color_option: ColorOption) -> bool {
    match color_option {
        ColorOption::Always => true,
        ColorOption::Never => false,
        ColorOption::Auto => {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal()
        }
    }
}

/// Sink for human-facing output lines.
pub trait Reporter: Send + Sync {
    /// Emit one line.
    fn log(&self, line: &str);

    /// Whether emitted lines may carry ANSI colors.
    fn colors_enabled(&self) -> bool {
        false
    }
}

/// Default reporter: writes to stderr.
#[derive(Debug, Clone, Copy)]
pub struct StderrReporter {
    color: ColorOption,
}

impl StderrReporter {
    /// Create a reporter with auto-detected colors.
    pub fn new() -> Self {
        Self {
            color: ColorOption::Auto,
        }
    }

    /// Set the color option.
    pub fn with_color(mut self, color: ColorOption) -> Self {
        self.color = color;
        self
    }
}

impl Default for StderrReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for StderrReporter {
    fn log(&self, line: &str) {
        eprintln!("{}", line);
    }

    fn colors_enabled(&self) -> bool {
        should_use_color(self.color)
    }
}

/// Capturing reporter for tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: RwLock<Vec<String>>,
}

impl MemoryReporter {
    /// Create an empty capturing reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured lines, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().unwrap().clone()
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, line: &str) {
        self.lines.write().unwrap().push(line.to_string());
    }
}

/// Log the debug listing: a tagged header, then one line per variable.
pub(crate) fn log_variables(reporter: &dyn Reporter, variables: &[(String, String)]) {
    let c = Colors::for_output(reporter.colors_enabled());

    reporter.log(&format!(
        "{}[preflight]{} debug resolved environment",
        c.accent, c.reset
    ));

    for (key, value) in variables {
        reporter.log(&format!("  • {}{}{}: {}", c.accent, key, c.reset, value));
    }
}

impl EnvErrors {
    /// Render the aggregate report, optionally colorized.
    ///
    /// `Display` produces the same layout without colors.
    pub fn render(&self, color: ColorOption) -> String {
        let c = Colors::for_output(should_use_color(color));
        let mut out = format!(
            "{}Failed to validate environment variables :{}\n",
            c.error, c.reset
        );

        for error in self.iter() {
            out.push_str(&format!("\n[{}{}{}]:\n", c.key, error.key, c.reset));
            out.push_str(&format!("  {}{}{}\n", c.value, error.message(), c.reset));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EnvError, FieldCause, FieldError};

    fn sample_errors() -> EnvErrors {
        EnvErrors::from_vec(vec![
            FieldError::new("APP_A", FieldCause::Schema(EnvError::missing("APP_A", None))),
            FieldError::new(
                "APP_B",
                FieldCause::Schema(EnvError::invalid("must be a boolean")),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_memory_reporter_captures() {
        let reporter = MemoryReporter::new();
        log_variables(
            &reporter,
            &[
                ("APP_A".to_string(), "1".to_string()),
                ("APP_B".to_string(), "hello".to_string()),
            ],
        );

        let lines = reporter.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[preflight] debug resolved environment");
        assert_eq!(lines[1], "  • APP_A: 1");
        assert_eq!(lines[2], "  • APP_B: hello");
    }

    #[test]
    fn test_render_no_color_matches_display() {
        let errors = sample_errors();
        assert_eq!(errors.render(ColorOption::Never), errors.to_string());
    }

    #[test]
    fn test_render_always_has_ansi() {
        let rendered = sample_errors().render(ColorOption::Always);
        assert!(rendered.contains("\x1b["));
        assert!(rendered.contains("APP_A"));
    }

    #[test]
    fn test_render_lists_every_key() {
        let rendered = sample_errors().render(ColorOption::Never);
        assert!(rendered.contains("[APP_A]:"));
        assert!(rendered.contains("[APP_B]:"));
        assert!(rendered.contains("Missing environment variable \"APP_A\""));
        assert!(rendered.contains("must be a boolean"));
    }
}

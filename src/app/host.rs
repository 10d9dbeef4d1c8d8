//! Host capabilities
//!
//! The session never talks to a terminal or a window directly. Whatever
//! front end drives it supplies file selection and a place to show results.

use std::io::{self, Write};
use std::path::PathBuf;

/// What the session asks the host to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Result lines, replacing whatever was shown before
    Lines(Vec<String>),
    /// An explanatory message, replacing whatever was shown before
    Error(String),
}

impl Rendered {
    pub fn is_error(&self) -> bool {
        matches!(self, Rendered::Error(_))
    }
}

/// Front-end services the session depends on.
pub trait Host {
    /// Ask for a file to load. `None` means the user cancelled.
    fn choose_open_path(&mut self) -> Option<PathBuf>;

    /// Ask where to save the result. `None` means the user cancelled.
    fn choose_save_path(&mut self) -> Option<PathBuf>;

    /// Show a result or an error.
    fn render(&mut self, output: Rendered);
}

/// Host for the command line: paths come from arguments, output goes to
/// stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    /// Suppress result lines (errors are still printed)
    quiet: bool,
    failed: bool,
}

impl ConsoleHost {
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        ConsoleHost {
            input,
            output,
            ..Default::default()
        }
    }

    /// Keep stdout free for machine-readable output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Whether an error has been rendered.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl Host for ConsoleHost {
    fn choose_open_path(&mut self) -> Option<PathBuf> {
        self.input.take()
    }

    fn choose_save_path(&mut self) -> Option<PathBuf> {
        self.output.take()
    }

    fn render(&mut self, output: Rendered) {
        match output {
            Rendered::Lines(lines) => {
                if self.quiet {
                    return;
                }
                let stdout = io::stdout();
                let mut out = stdout.lock();
                for line in lines {
                    // Nothing useful to do if stdout is gone (closed pipe)
                    if writeln!(out, "{}", line).is_err() {
                        break;
                    }
                }
            }
            Rendered::Error(message) => {
                self.failed = true;
                eprintln!("{}", message);
            }
        }
    }
}

//! Console collaborator used by operations
//!
//! Operations never print directly. They report through [`Reporter`], so the
//! same code drives the terminal in the CLI and a recording sink in tests.

use super::printer::{print_data, print_error, print_info, print_success, print_warning};
use super::table::render_table;
use crate::batch::progress::{create_bar, create_spinner};
use crate::error::{CliError, CliResult};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use std::io::IsTerminal;
use std::sync::Mutex;

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Command output, written to stdout
    Data,
    Info,
    Warn,
    Error,
}

/// How a progress indicator ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Success,
    Fail,
}

/// Sink for everything an operation wants the user to see
pub trait Reporter: Send + Sync {
    fn message(&self, level: MessageLevel, text: &str);

    /// Print rows under a header
    fn table(&self, headers: &[&str], rows: &[Vec<String>]);

    /// Start a progress indicator; `total` gives a counted bar, `None` a spinner
    fn start_progress(&self, total: Option<u64>, message: &str);

    /// Update the message; counted bars also advance by one
    fn update_progress(&self, message: &str);

    fn stop_progress(&self, status: ProgressStatus, message: &str);

    /// Ask a yes/no question
    fn confirm(&self, question: &str) -> CliResult<bool>;

    fn data(&self, text: &str) {
        self.message(MessageLevel::Data, text);
    }

    fn info(&self, text: &str) {
        self.message(MessageLevel::Info, text);
    }

    fn warn(&self, text: &str) {
        self.message(MessageLevel::Warn, text);
    }

    fn error(&self, text: &str) {
        self.message(MessageLevel::Error, text);
    }
}

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Terminal reporter backed by indicatif and dialoguer
#[derive(Default)]
pub struct ConsoleReporter {
    bar: Mutex<Option<(ProgressBar, bool)>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with any active bar hidden so output does not interleave
    fn suspended(&self, f: impl FnOnce()) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some((bar, _)) => bar.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.bar
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .map(|(bar, _)| bar)
    }
}

impl Reporter for ConsoleReporter {
    fn message(&self, level: MessageLevel, text: &str) {
        self.suspended(|| match level {
            MessageLevel::Data => print_data(text),
            MessageLevel::Info => print_info(text),
            MessageLevel::Warn => print_warning(text),
            MessageLevel::Error => print_error(text),
        });
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let rendered = render_table(headers, rows);
        self.suspended(|| print!("{rendered}"));
    }

    fn start_progress(&self, total: Option<u64>, message: &str) {
        if let Some(previous) = self.take_bar() {
            previous.finish_and_clear();
        }
        let entry = match total {
            Some(total) => (create_bar(total, message), true),
            None => (create_spinner(message), false),
        };
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(entry);
        }
    }

    fn update_progress(&self, message: &str) {
        if let Ok(guard) = self.bar.lock() {
            if let Some((bar, counted)) = guard.as_ref() {
                if *counted {
                    bar.inc(1);
                }
                bar.set_message(message.to_string());
            }
        }
    }

    fn stop_progress(&self, status: ProgressStatus, message: &str) {
        if let Some(bar) = self.take_bar() {
            bar.finish_and_clear();
        }
        match status {
            ProgressStatus::Success => print_success(message),
            ProgressStatus::Fail => print_error(message),
        }
    }

    fn confirm(&self, question: &str) -> CliResult<bool> {
        if !is_interactive_terminal() {
            return Err(CliError::Validation(
                "Confirmation requires a terminal. Pass --yes to skip it.".to_string(),
            ));
        }
        let mut answer = Ok(false);
        self.suspended(|| {
            answer = Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
                .map_err(CliError::from);
        });
        answer
    }
}

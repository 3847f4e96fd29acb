//! Where notices and delete confirmations go.

use std::io::{self, BufRead, Write};

use yansi::Paint;

use crate::models::{Notice, Severity};

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Asked before anything destructive happens.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Keeps notices until the caller drains them (flash messages, tests).
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Prints notices as they happen; errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.severity() {
            Severity::Success => println!("{}", Paint::new(notice.message()).green()),
            Severity::Error => eprintln!("{}", Paint::new(notice.message()).red()),
        }
    }
}

/// Reads a y/N answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} {} ", Paint::new(prompt).yellow(), Paint::new("[y/N]").dim());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(%e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// A fixed answer, for callers that collected the confirmation elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

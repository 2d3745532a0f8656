//! Reporting of check results
//!
//! Checks talk to a [`Reporter`]. [`RunReport`] prints to the terminal and,
//! when an email address is configured, keeps every warning so a single
//! report can be mailed once the run is over.

pub mod mail;

pub use mail::{MailSink, SendmailSink};

use crate::output;

/// Receiver for everything a check wants to tell the operator
pub trait Reporter {
    /// Something needs attention: unreadable input or an expiring certificate
    fn warning(&mut self, message: &str);

    /// Certificate details shown when the certificate is fine
    fn info(&mut self, message: &str);

    /// Remaining lifetime in seconds, negative once expired
    fn remaining(&mut self, seconds: i64);
}

/// Reporter for one command-line run
#[derive(Debug, Default)]
pub struct RunReport {
    collect_warnings: bool,
    warnings: Vec<String>,
}

impl RunReport {
    /// `collect_warnings` is set when the warnings will be mailed afterwards
    pub fn new(collect_warnings: bool) -> Self {
        Self {
            collect_warnings,
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Accumulated warnings as one block of text
    pub fn body(&self) -> String {
        self.warnings.join("\n")
    }
}

impl Reporter for RunReport {
    fn warning(&mut self, message: &str) {
        output::print_warning(message);
        if self.collect_warnings {
            self.warnings.push(message.to_string());
        }
    }

    fn info(&mut self, message: &str) {
        output::print_success(message);
    }

    fn remaining(&mut self, seconds: i64) {
        output::print_value(&seconds.to_string());
    }
}

/// Reporter that only records, for library callers and tests
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryReporter {
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub remaining: Vec<i64>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for MemoryReporter {
    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn remaining(&mut self, seconds: i64) {
        self.remaining.push(seconds);
    }
}

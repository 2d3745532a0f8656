//! Result of checking one certificate

use std::fmt;

/// Outcome of a single certificate check, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Certificate present and not expiring within the interval
    Ok,
    /// Bad invocation, such as a missing input file
    ParameterError,
    /// Certificate expired, expiring, unreadable or unparseable
    Warning,
}

impl CheckOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            CheckOutcome::Ok => 0,
            CheckOutcome::ParameterError => 1,
            CheckOutcome::Warning => 2,
        }
    }

    pub fn is_ok(self) -> bool {
        self == CheckOutcome::Ok
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Ok => write!(f, "OK"),
            CheckOutcome::ParameterError => write!(f, "PARAMETER_ERROR"),
            CheckOutcome::Warning => write!(f, "WARNING"),
        }
    }
}

impl From<CheckOutcome> for std::process::ExitCode {
    fn from(outcome: CheckOutcome) -> Self {
        std::process::ExitCode::from(outcome.exit_code())
    }
}

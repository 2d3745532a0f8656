//! Error types for ssl-cert-check
//!
//! Each failure domain gets its own `thiserror` enum. `CheckError` wraps
//! them so the binary can report any of them uniformly.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mail delivery error: {0}")]
    Mail(#[from] MailError),
}

/// Caller mistakes, reported with exit code 1
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("expiration interval must be a non-negative number of days, got {days}")]
    NegativeInterval { days: i64 },

    #[error("expiration interval of {days} days is too large")]
    IntervalTooLarge { days: i64 },

    #[error("certificate not found at {}", path.display())]
    CertificateNotFound { path: PathBuf },
}

/// Failures invoking an external executable
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("executable `{program}` not found (searched {searched})")]
    NotFound { program: String, searched: String },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to `{program}`: {source}")]
    Stream {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a certificate source could not produce text for inspection
#[derive(Error, Debug)]
pub enum AcquireError {
    /// Usage mistake, such as a missing input file
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The toolkit step failed; `message` carries its error output
    #[error("{step} failed: {message}")]
    Failed { step: &'static str, message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Email report delivery errors
#[derive(Error, Debug)]
pub enum MailError {
    #[error("could not run mail transport: {0}")]
    Transport(#[from] CommandError),

    #[error("mail transport exited with {status}: {stderr}")]
    Rejected { status: String, stderr: String },
}

/// Result type alias using CheckError
pub type Result<T> = std::result::Result<T, CheckError>;

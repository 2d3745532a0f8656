//! ssl-cert-check library
//!
//! Checks whether a certificate has expired or will expire within a
//! warning interval. Certificates can come from:
//! - a PKCS#12 container
//! - a PEM file
//! - a live HTTPS endpoint
//!
//! Decoding is delegated to the `openssl` command line tool; this crate
//! parses its `key=value` summary and does the date arithmetic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ssl_cert_check::cert_ops::{CertSource, EvaluationContext, ExpiryCheck, SystemCommandRunner};
//! use ssl_cert_check::report::MemoryReporter;
//!
//! let context = EvaluationContext::new(chrono::Utc::now(), 30)?;
//! let mut reporter = MemoryReporter::new();
//! let outcome = ExpiryCheck::new(&SystemCommandRunner, "openssl", &context)
//!     .check(&CertSource::https("example.com", 443, None), &mut reporter);
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod cert_ops;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::CheckOutcome;
pub use utils::{CheckError, Result};

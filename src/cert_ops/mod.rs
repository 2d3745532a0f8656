//! Certificate expiration checking
//!
//! Runs the external toolkit against one certificate source, parses its
//! summary output and decides whether the certificate is safe, expiring or
//! expired.

pub mod command;
pub mod expiry;
pub mod info;
pub mod runner;
pub mod source;

pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use expiry::{evaluate, EvaluationContext, ExpirationVerdict};
pub use info::{parse_date, parse_fields, CertificateInfo};
pub use runner::ExpiryCheck;
pub use source::{CertSource, Pkcs12Password, DEFAULT_HTTPS_PORT};

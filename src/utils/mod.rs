//! Utility modules for ssl-cert-check
//!
//! This module contains the error types shared across the crate.

pub mod error;

pub use error::{
    AcquireError, CheckError, CommandError, ConfigError, MailError, ParameterError, Result,
};

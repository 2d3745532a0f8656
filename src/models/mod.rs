//! Data models for ssl-cert-check

pub mod outcome;

pub use outcome::CheckOutcome;

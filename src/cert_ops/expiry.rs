//! Expiration evaluation
//!
//! Pure date arithmetic: no I/O happens here.

use crate::utils::ParameterError;
use chrono::{DateTime, Duration, Utc};

/// Run-wide evaluation settings, fixed once arguments are parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Reference instant for the whole run
    pub now: DateTime<Utc>,
    /// Warn when fewer than this many days remain
    pub warning_interval_days: u32,
    /// Print certificate details when it is safe
    pub emit_info_on_success: bool,
    /// Print the remaining lifetime in seconds
    pub emit_remaining_seconds: bool,
}

impl EvaluationContext {
    /// Build a context, rejecting negative intervals.
    pub fn new(now: DateTime<Utc>, warning_interval_days: i64) -> Result<Self, ParameterError> {
        if warning_interval_days < 0 {
            return Err(ParameterError::NegativeInterval {
                days: warning_interval_days,
            });
        }
        let days = u32::try_from(warning_interval_days).map_err(|_| {
            ParameterError::IntervalTooLarge {
                days: warning_interval_days,
            }
        })?;

        Ok(Self {
            now,
            warning_interval_days: days,
            emit_info_on_success: false,
            emit_remaining_seconds: false,
        })
    }

    pub fn with_info(mut self, enabled: bool) -> Self {
        self.emit_info_on_success = enabled;
        self
    }

    pub fn with_remaining_seconds(mut self, enabled: bool) -> Self {
        self.emit_remaining_seconds = enabled;
        self
    }
}

/// Outcome of comparing an expiration date against the warning interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationVerdict {
    pub is_safe: bool,
    /// `expire - now`; negative once the certificate has expired
    pub remaining: Duration,
}

impl ExpirationVerdict {
    pub fn is_expired(&self) -> bool {
        self.remaining < Duration::zero()
    }

    /// Remaining lifetime rounded to whole seconds
    pub fn remaining_seconds(&self) -> i64 {
        (self.remaining.num_milliseconds() as f64 / 1000.0).round() as i64
    }
}

/// Classify `expire` relative to `now`.
///
/// Safe when at least `warning_interval_days` remain; a remainder exactly
/// equal to the interval is still safe.
pub fn evaluate(
    expire: DateTime<Utc>,
    warning_interval_days: u32,
    now: DateTime<Utc>,
) -> ExpirationVerdict {
    let remaining = expire - now;
    let threshold = Duration::days(i64::from(warning_interval_days));

    ExpirationVerdict {
        is_safe: remaining >= threshold,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_exact_threshold_is_safe() {
        let verdict = evaluate(now() + Duration::days(7), 7, now());
        assert!(verdict.is_safe);
        assert_eq!(verdict.remaining_seconds(), 7 * 86_400);
    }

    #[test]
    fn test_one_second_short_is_unsafe() {
        let expire = now() + Duration::days(7) - Duration::seconds(1);
        let verdict = evaluate(expire, 7, now());
        assert!(!verdict.is_safe);
        assert!(!verdict.is_expired());
    }

    #[test]
    fn test_expired_certificate() {
        let verdict = evaluate(now() - Duration::days(1), 0, now());
        assert!(!verdict.is_safe);
        assert!(verdict.is_expired());
        assert_eq!(verdict.remaining_seconds(), -86_400);
    }

    #[test]
    fn test_zero_interval_expiring_now_is_safe() {
        let verdict = evaluate(now(), 0, now());
        assert!(verdict.is_safe);
        assert!(!verdict.is_expired());
    }

    #[test]
    fn test_remaining_seconds_rounds() {
        let expire = now() + Duration::milliseconds(1_600);
        assert_eq!(evaluate(expire, 0, now()).remaining_seconds(), 2);
    }

    #[test]
    fn test_negative_interval_rejected() {
        let err = EvaluationContext::new(now(), -1).unwrap_err();
        assert!(matches!(err, ParameterError::NegativeInterval { days: -1 }));
    }

    #[test]
    fn test_context_flags() {
        let ctx = EvaluationContext::new(now(), 30)
            .unwrap()
            .with_info(true)
            .with_remaining_seconds(true);
        assert_eq!(ctx.warning_interval_days, 30);
        assert!(ctx.emit_info_on_success);
        assert!(ctx.emit_remaining_seconds);
    }
}

//! Runner for certificate expiration checks
//!
//! Acquires certificate text from a [`CertSource`], asks the toolkit for the
//! subject and validity dates, and classifies the result. All operator
//! messages go through the supplied [`Reporter`].

use crate::cert_ops::command::CommandRunner;
use crate::cert_ops::expiry::{evaluate, EvaluationContext};
use crate::cert_ops::info::{parse_date, CertificateInfo};
use crate::cert_ops::source::{run_step_with_input, CertSource, CertificateText};
use crate::models::CheckOutcome;
use crate::report::Reporter;
use crate::utils::AcquireError;
use tracing::{debug, info, warn};

/// Checks one certificate against an [`EvaluationContext`]
pub struct ExpiryCheck<'a> {
    runner: &'a dyn CommandRunner,
    openssl: &'a str,
    context: &'a EvaluationContext,
}

impl<'a> ExpiryCheck<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        openssl: &'a str,
        context: &'a EvaluationContext,
    ) -> Self {
        Self {
            runner,
            openssl,
            context,
        }
    }

    /// Run the full check for `source`.
    pub fn check(&self, source: &CertSource, reporter: &mut dyn Reporter) -> CheckOutcome {
        let description = source.description();
        info!(
            source = %description,
            interval_days = self.context.warning_interval_days,
            "Checking certificate"
        );

        let text = match source.acquire(self.runner, self.openssl) {
            Ok(text) => text,
            Err(AcquireError::Parameter(err)) => {
                warn!(source = %description, error = %err, "Invalid certificate source");
                reporter.warning(&err.to_string());
                return CheckOutcome::ParameterError;
            }
            Err(AcquireError::Failed { step, message }) => {
                warn!(source = %description, step, "Certificate acquisition failed");
                reporter.warning(&format!(
                    "Failed to get certificate from {}: {} failed\n{}",
                    description, step, message
                ));
                return CheckOutcome::Warning;
            }
        };

        match self.inspect(&text) {
            Ok(info) => self.evaluate_info(&description, &info, reporter),
            Err(err) => {
                warn!(source = %description, error = %err, "Certificate inspection failed");
                reporter.warning(&format!(
                    "Failed to read certificate info for {}\n{}",
                    description,
                    match err {
                        AcquireError::Failed { message, .. } => message,
                        other => other.to_string(),
                    }
                ));
                CheckOutcome::Warning
            }
        }
    }

    /// Run `x509 -subject -dates -noout` on the certificate text.
    fn inspect(&self, text: &CertificateText) -> Result<CertificateInfo, AcquireError> {
        let mut args = vec![
            "x509".to_string(),
            "-subject".to_string(),
            "-dates".to_string(),
            "-noout".to_string(),
        ];

        let output = match text {
            CertificateText::File(path) => {
                args.push("-in".to_string());
                args.push(path.display().to_string());
                run_step_with_input(self.runner, self.openssl, &args, None, "inspection")?
            }
            CertificateText::Piped(data) => run_step_with_input(
                self.runner,
                self.openssl,
                &args,
                Some(data.as_slice()),
                "inspection",
            )?,
        };

        let info = CertificateInfo::parse(&output.stdout_text());
        debug!(fields = info.fields().len(), "Parsed certificate summary");
        Ok(info)
    }

    /// Classify parsed certificate fields and report the result.
    pub fn evaluate_info(
        &self,
        description: &str,
        info: &CertificateInfo,
        reporter: &mut dyn Reporter,
    ) -> CheckOutcome {
        let Some(raw_expire) = info.not_after() else {
            reporter.warning(&format!("unable to read expire date for {}", description));
            return CheckOutcome::Warning;
        };

        let Some(expire) = parse_date(raw_expire) else {
            reporter.warning(&format!(
                "unable to parse expire date \"{}\" for {}",
                raw_expire, description
            ));
            return CheckOutcome::Warning;
        };

        let ctx = self.context;
        let verdict = evaluate(expire, ctx.warning_interval_days, ctx.now);
        debug!(
            source = %description,
            remaining_secs = verdict.remaining.num_seconds(),
            safe = verdict.is_safe,
            "Evaluated expiration"
        );

        let outcome = if verdict.is_safe {
            if ctx.emit_info_on_success {
                reporter.info(&format!(
                    "Certificate from {} is valid\nSubject: {}\nValid from: {}\nExpire date: {}",
                    description,
                    info.subject_or_placeholder(),
                    info.not_before().unwrap_or("-"),
                    raw_expire
                ));
            }
            CheckOutcome::Ok
        } else {
            let state = if verdict.is_expired() {
                "has expired"
            } else {
                "is about to expire"
            };
            reporter.warning(&format!(
                "Certificate from {} {}!\nSubject: {}\nExpire date: {}",
                description,
                state,
                info.subject_or_placeholder(),
                raw_expire
            ));
            CheckOutcome::Warning
        };

        if ctx.emit_remaining_seconds {
            reporter.remaining(verdict.remaining_seconds());
        }

        outcome
    }
}

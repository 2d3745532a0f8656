//! Email delivery of the run's warnings
//!
//! The message is handed to a local `sendmail`-compatible transport through
//! the same command runner used for the toolkit.

use crate::cert_ops::CommandRunner;
use crate::config::MailSettings;
use crate::utils::MailError;
use tracing::info;

/// Destination for a finished report
pub trait MailSink {
    fn send(&self, to: &str, body: &str) -> Result<(), MailError>;
}

/// [`MailSink`] that pipes an RFC 5322 message into `sendmail -t -i`
pub struct SendmailSink<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a MailSettings,
}

impl<'a> SendmailSink<'a> {
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a MailSettings) -> Self {
        Self { runner, settings }
    }

    /// Build the raw message including headers
    pub fn compose(&self, to: &str, body: &str) -> String {
        let mut message = format!("To: {}\n", to);
        if let Some(from) = &self.settings.from {
            message.push_str(&format!("From: {}\n", from));
        }
        message.push_str(&format!("Subject: {}\n", self.settings.subject));
        message.push_str("Content-Type: text/plain; charset=utf-8\n\n");
        message.push_str(body);
        if !body.ends_with('\n') {
            message.push('\n');
        }
        message
    }
}

impl MailSink for SendmailSink<'_> {
    fn send(&self, to: &str, body: &str) -> Result<(), MailError> {
        let message = self.compose(to, body);
        let args = vec!["-t".to_string(), "-i".to_string()];
        let output = self
            .runner
            .run(&self.settings.sendmail_path, &args, Some(message.as_bytes()))?;

        if !output.success() {
            return Err(MailError::Rejected {
                status: output.status_text(),
                stderr: output.stderr_text(),
            });
        }

        info!(to, "Sent certificate warning report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert_ops::command::fake::ScriptedRunner;

    fn settings() -> MailSettings {
        MailSettings {
            sendmail_path: "/usr/sbin/sendmail".to_string(),
            from: Some("monitoring@example.com".to_string()),
            subject: "Certificates".to_string(),
        }
    }

    #[test]
    fn test_compose_headers_and_body() {
        let runner = ScriptedRunner::new();
        let settings = settings();
        let sink = SendmailSink::new(&runner, &settings);

        let message = sink.compose("ops@example.com", "line one\nline two");
        assert!(message.starts_with("To: ops@example.com\nFrom: monitoring@example.com\n"));
        assert!(message.contains("Subject: Certificates\n"));
        assert!(message.ends_with("\n\nline one\nline two\n"));
    }

    #[test]
    fn test_send_pipes_message_to_sendmail() {
        let runner = ScriptedRunner::new().then_ok("");
        let settings = settings();
        let sink = SendmailSink::new(&runner, &settings);

        sink.send("ops@example.com", "expired").unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, "/usr/sbin/sendmail");
        assert_eq!(calls[0].args, vec!["-t", "-i"]);
        let input = String::from_utf8(calls[0].input.clone().unwrap()).unwrap();
        assert!(input.contains("To: ops@example.com"));
        assert!(input.ends_with("expired\n"));
    }

    #[test]
    fn test_send_failure_reports_stderr() {
        let runner = ScriptedRunner::new().then_fail(75, "queue unavailable");
        let settings = settings();
        let sink = SendmailSink::new(&runner, &settings);

        let err = sink.send("ops@example.com", "expired").unwrap_err();
        assert!(err.to_string().contains("queue unavailable"));
    }
}

//! Certificate sources
//!
//! Each source knows how to get certificate text the toolkit can inspect:
//! a PKCS#12 container is exported first, a PEM file is read in place and an
//! HTTPS endpoint is fetched with a TLS handshake.

use crate::cert_ops::command::{CommandOutput, CommandRunner};
use crate::utils::{AcquireError, ParameterError};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Default HTTPS port
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Password handed to `openssl pkcs12 -passin`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pkcs12Password {
    #[default]
    Empty,
    Value(String),
    File(PathBuf),
}

impl Pkcs12Password {
    /// An explicit password takes precedence over a password file.
    pub fn from_args(password: Option<String>, password_file: Option<PathBuf>) -> Self {
        match (password, password_file) {
            (Some(value), _) => Pkcs12Password::Value(value),
            (None, Some(path)) => Pkcs12Password::File(path),
            (None, None) => Pkcs12Password::Empty,
        }
    }

    pub fn passin_arg(&self) -> String {
        match self {
            Pkcs12Password::Empty => "pass:".to_string(),
            Pkcs12Password::Value(value) => format!("pass:{}", value),
            Pkcs12Password::File(path) => format!("file:{}", path.display()),
        }
    }
}

/// Where the certificate under test comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertSource {
    Pkcs12 {
        path: PathBuf,
        password: Pkcs12Password,
    },
    Pem {
        path: PathBuf,
    },
    Https {
        host: String,
        port: u16,
        sni: Option<String>,
    },
}

/// Certificate text ready for inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateText {
    /// Fed to the toolkit on standard input
    Piped(Vec<u8>),
    /// Read by the toolkit from a file
    File(PathBuf),
}

impl CertSource {
    pub fn pkcs12(path: impl Into<PathBuf>, password: Pkcs12Password) -> Self {
        CertSource::Pkcs12 {
            path: path.into(),
            password,
        }
    }

    pub fn pem(path: impl Into<PathBuf>) -> Self {
        CertSource::Pem { path: path.into() }
    }

    pub fn https(host: impl Into<String>, port: u16, sni: Option<String>) -> Self {
        CertSource::Https {
            host: host.into(),
            port,
            sni,
        }
    }

    /// Label used in every message about this certificate
    pub fn description(&self) -> String {
        match self {
            CertSource::Pkcs12 { path, .. } | CertSource::Pem { path } => {
                format!("file {}", absolute_path(path).display())
            }
            CertSource::Https { host, port, sni } => match sni {
                Some(name) => format!("host {}:{} (SNI {})", host, port, name),
                None => format!("host {}:{}", host, port),
            },
        }
    }

    /// Obtain certificate text, running at most one toolkit command.
    pub fn acquire(
        &self,
        runner: &dyn CommandRunner,
        openssl: &str,
    ) -> Result<CertificateText, AcquireError> {
        match self {
            CertSource::Pkcs12 { path, password } => {
                let path = require_file(path)?;
                let args = vec![
                    "pkcs12".to_string(),
                    "-in".to_string(),
                    path.display().to_string(),
                    "-nodes".to_string(),
                    "-passin".to_string(),
                    password.passin_arg(),
                ];
                let output = run_step(runner, openssl, &args, "PKCS#12 export")?;
                debug!(bytes = output.stdout.len(), "Exported PKCS#12 bundle");
                Ok(CertificateText::Piped(output.stdout))
            }
            CertSource::Pem { path } => {
                let path = require_file(path)?;
                Ok(CertificateText::File(path))
            }
            CertSource::Https { host, port, sni } => {
                let mut args = vec![
                    "s_client".to_string(),
                    "-connect".to_string(),
                    format!("{}:{}", host, port),
                ];
                if let Some(name) = sni {
                    args.push("-servername".to_string());
                    args.push(name.clone());
                }
                info!(host = %host, port, sni = ?sni, "Connecting to TLS endpoint");
                let output = run_step(runner, openssl, &args, "TLS handshake")?;
                Ok(CertificateText::Piped(output.stdout))
            }
        }
    }
}

/// Make `path` absolute and check it names an existing file.
fn require_file(path: &Path) -> Result<PathBuf, ParameterError> {
    let absolute = absolute_path(path);
    if absolute.is_file() {
        Ok(absolute)
    } else {
        Err(ParameterError::CertificateNotFound { path: absolute })
    }
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
fn absolute_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Run one toolkit step, turning a missing executable or a non-zero exit
/// into [`AcquireError::Failed`].
pub(crate) fn run_step(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
    step: &'static str,
) -> Result<CommandOutput, AcquireError> {
    run_step_with_input(runner, program, args, None, step)
}

pub(crate) fn run_step_with_input(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
    input: Option<&[u8]>,
    step: &'static str,
) -> Result<CommandOutput, AcquireError> {
    let output = runner
        .run(program, args, input)
        .map_err(|err| AcquireError::Failed {
            step,
            message: err.to_string(),
        })?;

    if output.success() {
        return Ok(output);
    }

    let stderr = output.stderr_text();
    let message = if stderr.is_empty() {
        output.status_text()
    } else {
        format!("{} ({})", stderr, output.status_text())
    };
    Err(AcquireError::Failed { step, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert_ops::command::fake::ScriptedRunner;

    #[test]
    fn test_password_precedence() {
        let pw = Pkcs12Password::from_args(Some("s3cret".into()), Some("/etc/pw".into()));
        assert_eq!(pw.passin_arg(), "pass:s3cret");

        let pw = Pkcs12Password::from_args(None, Some("/etc/pw".into()));
        assert_eq!(pw.passin_arg(), "file:/etc/pw");

        assert_eq!(Pkcs12Password::from_args(None, None).passin_arg(), "pass:");
    }

    #[test]
    fn test_https_description() {
        assert_eq!(
            CertSource::https("hh.ru", 443, None).description(),
            "host hh.ru:443"
        );
        assert_eq!(
            CertSource::https("10.0.0.1", 8443, Some("api.hh.ru".into())).description(),
            "host 10.0.0.1:8443 (SNI api.hh.ru)"
        );
    }

    #[test]
    fn test_file_description_is_absolute() {
        let description = CertSource::pem("relative/cert.pem").description();
        assert!(description.starts_with("file "));
        assert!(description.ends_with("cert.pem"));
        assert!(Path::new(description.trim_start_matches("file ")).is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_description_folds_parent_components() {
        let description = CertSource::pem("/etc/ssl/sub/../certs/./cert.pem").description();
        assert_eq!(description, "file /etc/ssl/certs/cert.pem");

        let description = CertSource::pem("/../cert.pem").description();
        assert_eq!(description, "file /cert.pem");
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_file_reports_normalized_path() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();
        let runner = ScriptedRunner::new();

        let err = CertSource::pem(nested.join("../missing.pem"))
            .acquire(&runner, "openssl")
            .unwrap_err();
        let expected = std::path::absolute(dir.path().join("missing.pem")).unwrap();
        assert_eq!(
            err.to_string(),
            format!("certificate not found at {}", expected.display())
        );
    }

    #[test]
    fn test_missing_pem_is_parameter_error_without_commands() {
        let runner = ScriptedRunner::new();
        let source = CertSource::pem("/nonexistent/cert.pem");

        let err = source.acquire(&runner, "openssl").unwrap_err();
        assert!(matches!(
            err,
            AcquireError::Parameter(ParameterError::CertificateNotFound { .. })
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_pkcs12_export_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.p12");
        std::fs::write(&path, b"not really pkcs12").unwrap();

        let runner = ScriptedRunner::new().then_ok("-----BEGIN CERTIFICATE-----\n");
        let source = CertSource::pkcs12(&path, Pkcs12Password::Value("pw".into()));

        let text = source.acquire(&runner, "openssl").unwrap();
        assert_eq!(
            text,
            CertificateText::Piped(b"-----BEGIN CERTIFICATE-----\n".to_vec())
        );

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "openssl");
        assert_eq!(
            calls[0].args,
            vec![
                "pkcs12".to_string(),
                "-in".to_string(),
                std::path::absolute(&path).unwrap().display().to_string(),
                "-nodes".to_string(),
                "-passin".to_string(),
                "pass:pw".to_string(),
            ]
        );
        assert_eq!(calls[0].input, None);
    }

    #[test]
    fn test_pkcs12_wrong_password_keeps_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.p12");
        std::fs::write(&path, b"data").unwrap();

        let runner = ScriptedRunner::new().then_fail(1, "Mac verify error: invalid password?\n");
        let source = CertSource::pkcs12(&path, Pkcs12Password::Value("wrong".into()));

        match source.acquire(&runner, "openssl").unwrap_err() {
            AcquireError::Failed { step, message } => {
                assert_eq!(step, "PKCS#12 export");
                assert!(message.contains("Mac verify error: invalid password?"));
                assert!(message.contains("exit code 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_https_passes_servername() {
        let runner = ScriptedRunner::new().then_ok("CONNECTED\n");
        let source = CertSource::https("10.0.0.1", 8443, Some("api.example.com".into()));

        source.acquire(&runner, "/usr/bin/openssl").unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, "/usr/bin/openssl");
        assert_eq!(
            calls[0].args,
            vec!["s_client", "-connect", "10.0.0.1:8443", "-servername", "api.example.com"]
        );
    }

    #[test]
    fn test_missing_toolkit_is_failure() {
        let runner = ScriptedRunner::new().then(Err(crate::utils::CommandError::NotFound {
            program: "openssl".into(),
            searched: "PATH".into(),
        }));
        let source = CertSource::https("example.com", DEFAULT_HTTPS_PORT, None);

        let err = source.acquire(&runner, "openssl").unwrap_err();
        assert!(matches!(err, AcquireError::Failed { .. }));
        assert!(err.to_string().contains("not found"));
    }
}

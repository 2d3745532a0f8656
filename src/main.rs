//! ssl-cert-check - certificate expiration checker
//!
//! Exit codes:
//! - 0: certificate valid and not expiring soon
//! - 1: bad parameters or missing certificate file
//! - 2: certificate expired, expiring soon, or unreadable

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use ssl_cert_check::cert_ops::{EvaluationContext, ExpiryCheck, SystemCommandRunner};
use ssl_cert_check::output::print_error;
use ssl_cert_check::report::{MailSink, Reporter, RunReport, SendmailSink};
use ssl_cert_check::{config, CheckOutcome, Cli, Settings};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1, --help and --version exit 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose, cli.no_color);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let runner = SystemCommandRunner::new();
    let mut report = RunReport::new(cli.email.is_some());

    let loaded = load_settings(&cli).with_context(|| {
        let path = match &cli.config {
            Some(path) => path.display().to_string(),
            None => config::settings::DEFAULT_CONFIG_PATH.to_string(),
        };
        format!("failed to load settings from {}", path)
    });

    let (outcome, settings) = match loaded {
        Ok(settings) => {
            let outcome = run(&cli, &settings, &runner, &mut report);
            (outcome, settings)
        }
        Err(e) => {
            report.warning(&render_error(&e));
            (CheckOutcome::ParameterError, Settings::default())
        }
    };

    debug!(%outcome, "Check finished");

    if !outcome.is_ok() {
        if let Some(to) = cli.email.as_deref() {
            let sent = send_report(&runner, &settings, to, &report)
                .with_context(|| format!("failed to send report to {}", to));
            if let Err(e) = sent {
                print_error(&render_error(&e));
            }
        }
    }

    outcome.into()
}

fn init_logging(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> ssl_cert_check::Result<Settings> {
    let mut settings = config::load(cli.config.as_deref())?;

    if let Some(openssl) = &cli.openssl {
        settings.toolkit.openssl_path = openssl.clone();
    }

    Ok(settings)
}

/// Validate the interval, then check the certificate chosen by the subcommand
fn run(
    cli: &Cli,
    settings: &Settings,
    runner: &SystemCommandRunner,
    report: &mut RunReport,
) -> CheckOutcome {
    let context = match EvaluationContext::new(Utc::now(), cli.expire) {
        Ok(context) => context
            .with_info(cli.info)
            .with_remaining_seconds(cli.remaining),
        Err(e) => {
            report.warning(&e.to_string());
            return CheckOutcome::ParameterError;
        }
    };

    let source = cli.command.source();
    ExpiryCheck::new(runner, &settings.toolkit.openssl_path, &context).check(&source, report)
}

fn send_report(
    runner: &SystemCommandRunner,
    settings: &Settings,
    to: &str,
    report: &RunReport,
) -> ssl_cert_check::Result<()> {
    SendmailSink::new(runner, &settings.mail).send(to, &report.body())?;
    Ok(())
}

/// Context followed by the crate error, whose message already names its causes
fn render_error(err: &anyhow::Error) -> String {
    match err.chain().nth(1) {
        Some(cause) => format!("{}: {}", err, cause),
        None => err.to_string(),
    }
}

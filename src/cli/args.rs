//! CLI argument definitions using clap

use crate::cert_ops::source::{CertSource, Pkcs12Password, DEFAULT_HTTPS_PORT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ssl-cert-check")]
#[command(version)]
#[command(
    about = "Check PKCS#12, PEM and HTTPS certificates for upcoming expiration",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Warn when the certificate expires within this many days
    #[arg(short, long, value_name = "DAYS", allow_negative_numbers = true)]
    pub expire: i64,

    /// Print certificate details when it is valid
    #[arg(short, long)]
    pub info: bool,

    /// Print the remaining lifetime in seconds
    #[arg(short, long)]
    pub remaining: bool,

    /// Email warnings to this address when the check does not pass
    #[arg(short = 'm', long, value_name = "ADDRESS")]
    pub email: Option<String>,

    /// Settings file (default: config/default.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// openssl executable to use
    #[arg(long, value_name = "PATH")]
    pub openssl: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the certificate inside a PKCS#12 container
    P12(P12Args),

    /// Check a PEM encoded certificate file
    Pem(PemArgs),

    /// Check the certificate served by an HTTPS endpoint
    Https(HttpsArgs),
}

#[derive(Args, Debug)]
pub struct P12Args {
    /// PKCS#12 container
    #[arg(short, long, value_name = "PATH")]
    pub cert: PathBuf,

    /// Container password (takes precedence over --password-file)
    #[arg(short, long)]
    pub password: Option<String>,

    /// File holding the container password
    #[arg(long, value_name = "PATH")]
    pub password_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PemArgs {
    /// PEM certificate
    #[arg(short, long, value_name = "PATH")]
    pub cert: PathBuf,
}

#[derive(Args, Debug)]
pub struct HttpsArgs {
    /// Host to connect to
    #[arg(long)]
    pub host: String,

    /// Port to connect to
    #[arg(short, long, default_value_t = DEFAULT_HTTPS_PORT)]
    pub port: u16,

    /// Server name to request during the handshake
    #[arg(long, value_name = "NAME")]
    pub sni: Option<String>,
}

impl Commands {
    /// Certificate source selected by this subcommand
    pub fn source(&self) -> CertSource {
        match self {
            Commands::P12(args) => CertSource::pkcs12(
                &args.cert,
                Pkcs12Password::from_args(args.password.clone(), args.password_file.clone()),
            ),
            Commands::Pem(args) => CertSource::pem(&args.cert),
            Commands::Https(args) => CertSource::https(&args.host, args.port, args.sni.clone()),
        }
    }
}

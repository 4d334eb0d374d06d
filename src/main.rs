//! Domainlock CLI
//!
//! Usage:
//!   domainlock generate --domain <domain> --expire <YYYY-MM-DD> [--hardware-id <id>]
//!   domainlock verify --key <license-key> [--json]
//!
//! Both commands accept `--hmac-secret <secret>` to use the keyed checksum.

use clap::{Parser, Subcommand};
use domainlock::{
    FixedHardwareId, HardwareIdProvider, IssuerConfig, LicenseError, LicenseIssuer,
    SystemHardwareId, VerificationReport,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "domainlock")]
#[command(version)]
#[command(about = "Issue and verify domain-bound license keys", long_about = None)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a keyed HMAC-SHA256 checksum instead of truncated MD5
    #[arg(long, global = true, value_name = "SECRET")]
    hmac_secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a license key for this machine
    Generate {
        /// Domain the key is issued for (e.g. example.com)
        #[arg(short, long)]
        domain: String,

        /// Expiration date, YYYY-MM-DD, strictly in the future
        #[arg(short, long)]
        expire: String,

        /// Bind to this hardware id instead of the local machine's
        #[arg(long, value_name = "ID")]
        hardware_id: Option<String>,
    },

    /// Verify a license key's checksum
    Verify {
        /// Full license key
        #[arg(short, long)]
        key: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: Cli) -> Result<(), LicenseError> {
    let config = match cli.hmac_secret {
        Some(secret) => IssuerConfig::with_hmac_secret(secret),
        None => IssuerConfig::default(),
    };
    debug!(checksum = ?config.checksum, "issuer configured");

    match cli.command {
        Commands::Generate {
            domain,
            expire,
            hardware_id,
        } => {
            let hardware: Arc<dyn HardwareIdProvider> = match hardware_id {
                Some(id) => Arc::new(FixedHardwareId::new(id)),
                None => Arc::new(SystemHardwareId),
            };
            let issuer = LicenseIssuer::with_hardware_id(config, hardware)?;
            let key = issuer.generate(&domain, &expire)?;
            println!("{}", key);
        }
        Commands::Verify { key, json } => {
            let issuer = LicenseIssuer::new(config)?;
            let report = issuer.verify(&key)?;
            print_report(&report, json)?;
        }
    }

    Ok(())
}

fn print_report(report: &VerificationReport, json: bool) -> Result<(), LicenseError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("valid:    {}", report.valid);
    println!("salt:     {}", report.salt);
    println!("digest:   {}", report.digest);
    println!("checksum: {}", report.checksum);
    if !report.canonical {
        println!("note:     key parts are not in canonical length/hex form");
    }
    Ok(())
}

/// Process exit status for each failure kind.
fn exit_code(error: &LicenseError) -> u8 {
    match error {
        LicenseError::InvalidDomain { .. }
        | LicenseError::InvalidExpiration { .. }
        | LicenseError::MalformedKey { .. } => 2,
        LicenseError::ChecksumMismatch => 3,
        LicenseError::HardwareIdUnavailable(_) => 4,
        LicenseError::KeyGeneration(_) => 5,
        LicenseError::ConfigError(_) | LicenseError::Serialization(_) => 1,
    }
}

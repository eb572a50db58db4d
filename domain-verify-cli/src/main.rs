//! Command-line entry point
//!
//! - `domain:dns:challenge <site_env>` lists the ACME challenges of every
//!   custom domain on an environment
//! - `domain:dns:verify:dns <site_env> <domain>` verifies ownership through the
//!   DNS TXT challenge
//! - `domain:dns:verify:file <site_env> <domain>` verifies ownership through the
//!   HTTP file challenge
//!
//! Progress and diagnosis are written to stderr; the report goes to stdout.

mod config;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::ConnectionArgs;
use domain_verify_core::{
    abort_pair, ChallengeReportService, CoreError, LogNotifier, ServiceContext,
    VerificationOutcome, VerificationService,
};
use domain_verify_provider::{ChallengeType, PlatformClient, SiteEnv};
use output::{DomainFilter, OutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for a run interrupted with Ctrl-C.
const EXIT_CANCELLED: u8 = 130;

/// Custom-domain ownership verification
#[derive(Parser, Debug)]
#[command(name = "domain-verify", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the ownership challenges of every custom domain on an environment
    #[command(name = "domain:dns:challenge", visible_alias = "domain-dns-challenge")]
    Challenge {
        /// Site and environment, as `site-name.env`
        site_env: SiteEnv,

        /// Only show one domain, as `domain=<name>`
        #[arg(long)]
        filter: Option<DomainFilter>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Verify domain ownership with the DNS TXT challenge
    #[command(name = "domain:dns:verify:dns", visible_alias = "domain-verify-dns")]
    VerifyDns {
        site_env: SiteEnv,
        domain: String,
    },

    /// Verify domain ownership with the HTTP file challenge
    #[command(name = "domain:dns:verify:file", visible_alias = "domain-verify-file")]
    VerifyFile {
        site_env: SiteEnv,
        domain: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::debug!("connection: {}", cli.connection.describe());

    let client = Arc::new(
        PlatformClient::new(cli.connection.platform_config())
            .context("failed to initialize the HTTP client")?,
    );
    let ctx = Arc::new(ServiceContext::new(
        client.clone(),
        client,
        Arc::new(LogNotifier),
    ));

    match cli.command {
        Command::Challenge {
            site_env,
            filter,
            format,
        } => list_challenges(ctx, &site_env, filter.as_ref(), format).await,
        Command::VerifyDns { site_env, domain } => {
            verify(ctx, &site_env, &domain, ChallengeType::Dns01).await
        }
        Command::VerifyFile { site_env, domain } => {
            verify(ctx, &site_env, &domain, ChallengeType::Http01).await
        }
    }
}

async fn list_challenges(
    ctx: Arc<ServiceContext>,
    site_env: &SiteEnv,
    filter: Option<&DomainFilter>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut rows = ChallengeReportService::new(ctx)
        .list_challenges(site_env)
        .await?;

    if let Some(filter) = filter {
        rows.retain(|row| filter.matches(row));
        if rows.is_empty() {
            tracing::warn!("You have no domains that match domain={}.", filter.domain);
        }
    }

    let rendered = match format {
        OutputFormat::Table => output::render_table(&rows),
        OutputFormat::Json => output::render_json(&rows)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

async fn verify(
    ctx: Arc<ServiceContext>,
    site_env: &SiteEnv,
    domain: &str,
    challenge_type: ChallengeType,
) -> anyhow::Result<()> {
    let (handle, signal) = abort_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping verification");
            handle.abort();
        }
    });

    let outcome = VerificationService::new(ctx)
        .verify_challenge(site_env, domain, challenge_type, &signal)
        .await?;

    match outcome {
        VerificationOutcome::AlreadyVerified => {
            tracing::debug!("{domain}: already verified");
        }
        VerificationOutcome::Verified { attempts } => {
            tracing::debug!("{domain}: verified after {attempts} poll(s)");
        }
    }
    Ok(())
}

/// Print the terminal error once, at a level matching whether it was expected.
fn report_error(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::Cancelled) => {
            tracing::warn!("{error}");
            ExitCode::from(EXIT_CANCELLED)
        }
        Some(core) if core.is_expected() => {
            tracing::warn!("{error}");
            ExitCode::FAILURE
        }
        _ => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

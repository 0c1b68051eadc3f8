use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::error;
use route53_registrar::providers::route53::AwsRoute53;
use route53_registrar::{ChangeOutcome, Config, Zone, ZoneRegistrar};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "route53-registrar",
    version,
    about = "Manage CNAME records in a Route53 hosted zone"
)]
struct Cli {
    /// Hosted zone to manage, e.g. example.com
    #[arg(long, env = "ROUTE53_ZONE")]
    zone: String,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the hosted zone id and its nameservers
    Show,
    /// Create or update a CNAME record
    Upsert { record: String, value: String },
    /// Delete a CNAME record
    Delete { record: String },
}

#[derive(Serialize)]
struct Report<'a> {
    zone: &'a Zone,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a str>,
    #[serde(flatten)]
    outcome: Option<ChangeOutcome>,
}

fn print_report(report: &Report<'_>, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("zone: {} ({})", report.zone.name(), report.zone.id());
    for ns in report.zone.nameservers() {
        println!("  nameserver: {ns}");
    }
    if let (Some(record), Some(outcome)) = (report.record, &report.outcome) {
        match outcome {
            ChangeOutcome::Applied(handle) => println!("{record}: change {handle} is in sync"),
            ChangeOutcome::Submitted(handle) => println!("{record}: change {handle} submitted"),
            ChangeOutcome::AlreadyAbsent => println!("{record}: already absent"),
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let api = Arc::new(AwsRoute53::from_env().await);
    let registrar = ZoneRegistrar::connect(api, &cli.zone, &config).await?;

    let (record, outcome) = match &cli.command {
        Command::Show => (None, None),
        Command::Upsert { record, value } => {
            let outcome = registrar.upsert_cname(record, value).await?;
            (Some(record.as_str()), Some(outcome))
        }
        Command::Delete { record } => {
            let outcome = registrar.delete_cname(record).await?;
            (Some(record.as_str()), Some(outcome))
        }
    };

    let report = Report {
        zone: registrar.zone(),
        record,
        outcome,
    };
    print_report(&report, cli.json)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

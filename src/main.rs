//! `health-checker` CLI.
//!
//! ```text
//! health-checker liveness
//! health-checker --config health.yaml readiness --pretty
//! ```
//!
//! `readiness` exits with status 1 when any integration is unhealthy, so the
//! binary can back an exec probe directly.

use anyhow::Context;
use clap::{Parser, Subcommand};
use health_checker::configuration::get_configuration;
use health_checker::telemetry::{get_subscriber, init_subscriber};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "health-checker",
    version,
    about = "Report liveness and readiness of a service and its dependencies"
)]
struct Cli {
    /// Configuration file (default: ./configuration.{yaml,toml,json} when present)
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<String>,
    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report that the process is up
    Liveness,
    /// Run every configured integration and report their health
    Readiness,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries the report, logs go to stderr
    let subscriber = get_subscriber("health-checker".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let settings =
        get_configuration(cli.config.as_deref()).context("Failed to read configuration")?;

    match cli.command {
        Command::Liveness => {
            print_json(&settings.liveness(), cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Readiness => {
            let checker = settings
                .health_checker()
                .context("Invalid integration settings")?;
            let report = checker.readiness().await;
            print_json(&report, cli.pretty)?;
            if report.is_ready() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

//! `floodcast`: ward flood-risk forecasts, alerts and emergency contacts.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Set up logging (`RUST_LOG`, `-v` for debug).
//! 3. Load config ([`config::load_config`]) and apply URL overrides.
//! 4. Build the service client ([`api::ApiClient`]).
//! 5. Run the command: load the forecast ([`api::forecast`]) and color the
//!    wards ([`color`], [`geo`]), or talk to the alert, SMS and metrics
//!    endpoints, or compose emergency messages ([`contacts`]).
//! 6. Render the result ([`report`]).
//! 7. Exit `0`, or `1` when the service rejected the request or was unreachable.

mod alerts;
mod api;
mod cli;
mod color;
mod config;
mod contacts;
mod geo;
mod metrics;
mod models;
mod regions;
mod report;
mod risk;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use alerts::{sorted_wards, AlertForm, THRESHOLD_OPTIONS};
use api::forecast::LoadedForecast;
use api::sms::DEFAULT_TEST_MESSAGE;
use api::ApiClient;
use cli::{
    AlertsCommand, Cli, Command, EmergencyCommand, MapArgs, MetricsArgs, PositionArgs,
    ReportFormat, SmsCommand,
};
use color::palette::Palette;
use config::{load_config, Config, BASE_URL_ENV};
use contacts::{contacts_in, help_message, sos_message, Position, DEFAULT_HELP_MESSAGE};
use geo::styled_collection;
use models::SmsTestRequest;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let config = load_config(&working_dir, cli.config.as_deref())?
        .with_overrides(std::env::var(BASE_URL_ENV).ok(), cli.api_url.clone());
    tracing::debug!(base_url = %config.api.base_url, timeout = ?config.timeout(), "configuration loaded");

    let client = ApiClient::new(config.api.base_url.clone(), config.timeout())?;
    let palette = config.palette()?;

    let ok = match &cli.command {
        Command::Map(args) => run_map(&cli, args, &config, &client, &palette).await?,
        Command::Summary => run_summary(&cli, &config, &client, &palette).await?,
        Command::Legend => {
            report::terminal::render_legend(&palette);
            true
        }
        Command::Alerts(cmd) => run_alerts(&cli, cmd, &client).await?,
        Command::Sms(cmd) => run_sms(&cli, cmd, &client).await?,
        Command::Metrics(args) => run_metrics(&cli, args, &client).await?,
        Command::Emergency(cmd) => run_emergency(cmd),
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Await `fut` behind a spinner unless `quiet`.
async fn with_spinner<F: Future>(message: &str, quiet: bool, fut: F) -> Result<F::Output> {
    let pb = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let output = fut.await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    Ok(output)
}

fn failure(context: &str, err: impl std::fmt::Display) {
    eprintln!(" {} {}: {}", "✗".red(), context, err);
}

async fn run_map(
    cli: &Cli,
    args: &MapArgs,
    config: &Config,
    client: &ApiClient,
    palette: &Palette,
) -> Result<bool> {
    let loaded = if args.offline {
        LoadedForecast::mock()?
    } else {
        let fallback = config.map.fallback_to_mock && !args.no_fallback;
        match with_spinner(
            "Loading forecast...",
            cli.quiet,
            client.load_forecast_or_mock(fallback),
        )
        .await?
        {
            Ok(loaded) => loaded,
            Err(e) => {
                failure("Error loading forecast", e);
                return Ok(false);
            }
        }
    };

    let regions = config.region_lookup();

    // --png implies the PNG format
    let format = match &args.png {
        Some(_) => ReportFormat::Png,
        None => args.report,
    };

    match format {
        ReportFormat::Terminal => {
            report::terminal::render_map(&loaded, palette, &regions, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            let styled = styled_collection(&loaded.wards, palette, &regions)?;
            let out = serde_json::json!({
                "source": loaded.source,
                "peakFloodProbability": loaded.forecast.peak_flood_probability,
                "topFactors": loaded.forecast.top_factors,
                "hourlyForecast": loaded.forecast.hourly_forecast,
                "lastUpdated": loaded.forecast.last_updated,
                "geoJson": styled,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ReportFormat::Png => {
            let path = args
                .png
                .clone()
                .unwrap_or_else(|| std::path::PathBuf::from("flood-map.png"));
            report::png::render(&loaded.wards, palette, config.map.png_size, &path)?;
        }
    }

    Ok(true)
}

async fn run_summary(
    cli: &Cli,
    config: &Config,
    client: &ApiClient,
    palette: &Palette,
) -> Result<bool> {
    let dashboard = match with_spinner("Loading dashboard...", cli.quiet, client.load_dashboard())
        .await?
    {
        Ok(dashboard) => dashboard,
        Err(e) => {
            failure("Error loading forecast", e);
            return Ok(false);
        }
    };

    report::terminal::render_map(
        &dashboard.forecast,
        palette,
        &config.region_lookup(),
        cli.verbose,
        cli.quiet,
    )?;

    if !cli.quiet {
        match &dashboard.sms {
            Ok(info) => report::terminal::render_sms_info(info),
            Err(e) => println!(
                " {} SMS service status unavailable: {}\n",
                "[SMS]".yellow().bold(),
                e
            ),
        }
    }

    Ok(true)
}

async fn run_alerts(cli: &Cli, cmd: &AlertsCommand, client: &ApiClient) -> Result<bool> {
    match cmd {
        AlertsCommand::Wards => {
            report::terminal::render_wards(&sorted_wards(), &THRESHOLD_OPTIONS);
            Ok(true)
        }
        AlertsCommand::Subscribe(args) => {
            let form = AlertForm {
                name: args.name.clone(),
                ward: args.ward.clone(),
                email: args.email.clone(),
                phone: args.phone.clone().unwrap_or_default(),
                threshold: args.threshold,
                send_test: args.send_test,
            };
            let registration = match form.validate() {
                Ok(r) => r,
                Err(e) => {
                    failure("Invalid alert", e);
                    return Ok(false);
                }
            };

            let reply = with_spinner(
                "Setting up alert...",
                cli.quiet,
                client.register_alert(&registration, args.sms),
            )
            .await?;

            match reply {
                Ok(reply) => Ok(report::terminal::render_reply(
                    &reply,
                    reply.accepted(),
                    "Alert set up successfully!",
                )),
                Err(e) => {
                    failure("Error setting up alert", e);
                    Ok(false)
                }
            }
        }
    }
}

async fn run_sms(cli: &Cli, cmd: &SmsCommand, client: &ApiClient) -> Result<bool> {
    match cmd {
        SmsCommand::Info => match with_spinner("Checking SMS service...", cli.quiet, client.sms_info()).await? {
            Ok(info) => {
                report::terminal::render_sms_info(&info);
                Ok(info.success)
            }
            Err(e) => {
                failure("Error checking SMS service", e);
                Ok(false)
            }
        },
        SmsCommand::Test { phone, message } => {
            let phone = phone.trim();
            if phone.is_empty() {
                failure("Invalid phone", "please enter a phone number");
                return Ok(false);
            }
            let request = SmsTestRequest {
                phone: phone.to_string(),
                message: message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEST_MESSAGE.to_string()),
            };

            match with_spinner("Sending test SMS...", cli.quiet, client.send_test_sms(&request)).await? {
                Ok(reply) => Ok(report::terminal::render_reply(
                    &reply,
                    reply.confirmed(),
                    "Test SMS sent successfully!",
                )),
                Err(e) => {
                    failure("Error sending test SMS", e);
                    Ok(false)
                }
            }
        }
    }
}

async fn run_metrics(cli: &Cli, args: &MetricsArgs, client: &ApiClient) -> Result<bool> {
    let verification = with_spinner(
        "Loading model metrics...",
        cli.quiet,
        client.model_verification(),
    )
    .await?;

    match verification {
        Ok(m) if args.json => {
            println!("{}", serde_json::to_string_pretty(&m)?);
            Ok(true)
        }
        Ok(m) => {
            report::terminal::render_metrics(&m, args.explain);
            Ok(true)
        }
        Err(e) => {
            failure("Error loading model metrics", e);
            Ok(false)
        }
    }
}

fn position_of(args: &PositionArgs) -> Option<Position> {
    match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => Some(Position {
            latitude,
            longitude,
            accuracy: args.accuracy,
        }),
        _ => None,
    }
}

fn run_emergency(cmd: &EmergencyCommand) -> bool {
    match cmd {
        EmergencyCommand::Contacts { category } => {
            let filter = category.as_ref().map(Into::into);
            report::terminal::render_contacts(&contacts_in(filter), filter);
            true
        }
        EmergencyCommand::Sos(position) => {
            println!("{}", sos_message(position_of(position).as_ref()));
            true
        }
        EmergencyCommand::Message {
            to_name,
            to_phone,
            message,
            position,
        } => {
            let text = message.as_deref().unwrap_or(DEFAULT_HELP_MESSAGE);
            match help_message(to_name, to_phone, text, position_of(position).as_ref()) {
                Ok(msg) => {
                    println!("{}", msg);
                    true
                }
                Err(e) => {
                    failure("Cannot compose message", e);
                    false
                }
            }
        }
    }
}

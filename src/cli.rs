use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::contacts::ContactCategory;

#[derive(Parser, Debug)]
#[command(
    name = "floodcast",
    about = "Ward flood-risk forecasts, alerts and emergency contacts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.floodcast/config.toml, fallback ~/.config/floodcast/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Forecast service base URL (overrides config and FLOODCAST_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Show more detail and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ward choropleth of the current forecast
    Map(MapArgs),

    /// Forecast overview plus SMS service status; fails on malformed forecast data
    Summary,

    /// Print the flood-risk color legend
    Legend,

    /// Flood alert subscriptions
    #[command(subcommand)]
    Alerts(AlertsCommand),

    /// SMS gateway status and test messages
    #[command(subcommand)]
    Sms(SmsCommand),

    /// Model validation metrics
    Metrics(MetricsArgs),

    /// Emergency contacts and SOS messages
    #[command(subcommand)]
    Emergency(EmergencyCommand),
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Use the built-in sample wards instead of calling the service
    #[arg(long)]
    pub offline: bool,

    /// Fail instead of falling back to sample wards when the forecast is unavailable
    #[arg(long)]
    pub no_fallback: bool,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PNG output path; use without value to default to flood-map.png
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "flood-map.png")]
    pub png: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Png,
}

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// Register for flood alerts on a ward
    Subscribe(SubscribeArgs),

    /// List wards and threshold options
    Wards,
}

#[derive(Args, Debug)]
pub struct SubscribeArgs {
    #[arg(long)]
    pub name: String,

    /// Ward name (case-insensitive)
    #[arg(long)]
    pub ward: String,

    #[arg(long)]
    pub email: String,

    /// Phone number for SMS alerts (optional)
    #[arg(long)]
    pub phone: Option<String>,

    /// Alert when flood risk exceeds this percentage (75, 80, 85, 90 or 95)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Also deliver alerts by SMS
    #[arg(long)]
    pub sms: bool,

    /// Ask the service to send a test alert right away
    #[arg(long)]
    pub send_test: bool,
}

#[derive(Subcommand, Debug)]
pub enum SmsCommand {
    /// Show the SMS provider and its status
    Info,

    /// Send a test SMS
    Test {
        /// Destination phone number
        phone: String,

        #[arg(long, short)]
        message: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Explain every metric after the tables
    #[arg(long)]
    pub explain: bool,

    /// Print the raw metrics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum EmergencyCommand {
    /// List emergency contacts
    Contacts {
        #[arg(long, value_name = "CATEGORY")]
        category: Option<CategoryArg>,
    },

    /// Compose an SOS signal with your position
    Sos(PositionArgs),

    /// Compose a help message to a personal contact
    Message {
        #[arg(long = "to-name")]
        to_name: String,

        #[arg(long = "to-phone")]
        to_phone: String,

        #[arg(long, short)]
        message: Option<String>,

        #[command(flatten)]
        position: PositionArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct PositionArgs {
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Position accuracy in metres
    #[arg(long)]
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum CategoryArg {
    Emergency,
    Flood,
    Utilities,
    Medical,
}

impl From<&CategoryArg> for ContactCategory {
    fn from(arg: &CategoryArg) -> Self {
        match arg {
            CategoryArg::Emergency => ContactCategory::Emergency,
            CategoryArg::Flood => ContactCategory::Flood,
            CategoryArg::Utilities => ContactCategory::Utilities,
            CategoryArg::Medical => ContactCategory::Medical,
        }
    }
}

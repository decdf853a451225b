use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Response of the forecast endpoint.
///
/// `geo_json` is a FeatureCollection encoded as a JSON *string*; see
/// [`crate::geo::parse_wards`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub geo_json: String,
    #[serde(default)]
    pub peak_flood_probability: f64,
    #[serde(default)]
    pub top_factors: Vec<TopFactor>,
    #[serde(default)]
    pub hourly_forecast: Vec<HourlyForecast>,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopFactor {
    pub feature: String,
    #[serde(default)]
    pub shap_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub hour: String,
    pub probability: f64,
}

/// Where the forecast shown to the user came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    Api,
    Mock,
}

impl std::fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastSource::Api => write!(f, "live"),
            ForecastSource::Mock => write!(f, "mock"),
        }
    }
}

/// Payload posted to the alerts endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRegistration {
    pub name: String,
    pub ward: String,
    pub email: String,
    pub phone: String,
    pub threshold: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_test: Option<bool>,
}

/// Body returned by the alerts and SMS endpoints on success or failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceReply {
    /// A 2xx reply counts as accepted unless it says otherwise.
    pub fn accepted(&self) -> bool {
        self.success.unwrap_or(self.error.is_none())
    }

    /// Only an explicit `success: true` counts.
    pub fn confirmed(&self) -> bool {
        self.success == Some(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsInfo {
    #[serde(default)]
    pub success: bool,
    pub sms_service: Option<SmsService>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsService {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsTestRequest {
    pub phone: String,
    pub message: String,
}

/// Response of the model-verification endpoint. Every figure is optional on
/// the wire and renders as `N/A` when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelVerification {
    #[serde(default)]
    pub enhanced_model: EnhancedModel,
    #[serde(default)]
    pub forecast_horizons: BTreeMap<String, HorizonMetrics>,
    #[serde(default)]
    pub high_water_levels: HighWaterLevels,
    #[serde(default)]
    pub extreme_events: ExtremeEvents,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedModel {
    pub rmse: Option<f64>,
    pub mae: Option<f64>,
    pub r2: Option<f64>,
    pub mape: Option<f64>,
    pub lead_time_hours: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorizonMetrics {
    pub rmse: Option<f64>,
    pub r2: Option<f64>,
    pub mape: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighWaterLevels {
    pub samples: Option<u64>,
    pub rmse: Option<f64>,
    pub r2: Option<f64>,
    pub mape: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtremeEvents {
    pub correct_predictions: Option<f64>,
    pub false_alarms: Option<f64>,
    pub lead_time_accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

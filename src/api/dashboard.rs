use super::forecast::{ForecastError, LoadedForecast};
use super::{ApiClient, ApiError};
use crate::models::SmsInfo;

/// Everything the `summary` command shows.
#[derive(Debug)]
pub struct Dashboard {
    pub forecast: LoadedForecast,
    /// SMS status is informational; its failure does not fail the dashboard.
    pub sms: Result<SmsInfo, ApiError>,
}

impl Dashboard {
    /// Combine the two concurrent results. A forecast failure fails the whole
    /// dashboard and is never replaced by mock wards.
    pub fn assemble(
        forecast: Result<LoadedForecast, ForecastError>,
        sms: Result<SmsInfo, ApiError>,
    ) -> Result<Self, ForecastError> {
        let forecast = forecast?;
        if let Err(e) = &sms {
            tracing::warn!(error = %e, "SMS service status unavailable");
        }
        Ok(Self { forecast, sms })
    }
}

impl ApiClient {
    /// Fetch the forecast and SMS status concurrently.
    pub async fn load_dashboard(&self) -> Result<Dashboard, ForecastError> {
        let (forecast, sms) = futures::join!(self.load_forecast(), self.sms_info());
        Dashboard::assemble(forecast, sms)
    }
}

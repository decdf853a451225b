use thiserror::Error;

use super::{ApiClient, ApiError, FORECAST_PATH};
use crate::geo::mock::mock_forecast;
use crate::geo::{parse_wards, GeoError, WardCollection};
use crate::models::{Forecast, ForecastSource};

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("forecast contained {0}")]
    Geo(#[from] GeoError),
}

/// A forecast together with its parsed wards.
#[derive(Debug, Clone)]
pub struct LoadedForecast {
    pub forecast: Forecast,
    pub wards: WardCollection,
    pub source: ForecastSource,
}

impl LoadedForecast {
    pub fn mock() -> Result<Self, GeoError> {
        let forecast = mock_forecast();
        let wards = parse_wards(&forecast.geo_json)?;
        Ok(Self {
            forecast,
            wards,
            source: ForecastSource::Mock,
        })
    }
}

impl ApiClient {
    /// `GET /predict`, bounded by the client's forecast timeout.
    pub async fn fetch_forecast(&self) -> Result<Forecast, ApiError> {
        self.get_json(FORECAST_PATH, Some(self.forecast_timeout)).await
    }

    /// Fetch the forecast and parse its ward GeoJSON. Any failure is returned.
    pub async fn load_forecast(&self) -> Result<LoadedForecast, ForecastError> {
        let forecast = self.fetch_forecast().await?;
        tracing::debug!(bytes = forecast.geo_json.len(), "received ward GeoJSON");

        let wards = parse_wards(&forecast.geo_json)?;
        tracing::info!(wards = wards.features.len(), "forecast loaded");

        Ok(LoadedForecast {
            forecast,
            wards,
            source: ForecastSource::Api,
        })
    }

    /// Like [`ApiClient::load_forecast`], but any failure falls back to the
    /// built-in mock wards when `fallback` is set.
    pub async fn load_forecast_or_mock(
        &self,
        fallback: bool,
    ) -> Result<LoadedForecast, ForecastError> {
        match self.load_forecast().await {
            Ok(loaded) => Ok(loaded),
            Err(e) if fallback => {
                tracing::warn!(error = %e, "forecast unavailable, using mock wards");
                Ok(LoadedForecast::mock()?)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::test_server::serve_once;

    const FORECAST_BODY: &str = r#"{
        "geoJson": "{\"type\":\"FeatureCollection\",\"features\":[{\"type\":\"Feature\",\"geometry\":null,\"properties\":{\"Name\":\"Ward-3\",\"flood_probability\":33.3,\"inundation_percent\":4}}]}",
        "peakFloodProbability": 33.3,
        "topFactors": [],
        "hourlyForecast": [],
        "lastUpdated": "2024-07-30T06:00:00Z"
    }"#;

    #[tokio::test]
    async fn test_load_forecast_from_service() {
        let (base, request) = serve_once("200 OK", FORECAST_BODY).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let loaded = client.load_forecast().await.unwrap();
        assert_eq!(loaded.source, ForecastSource::Api);
        assert_eq!(loaded.wards.features[0].properties.name, "Ward-3");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("GET /api/predict "), "{raw}");
    }

    #[tokio::test]
    async fn test_malformed_geojson_falls_back_to_mock() {
        let body = r#"{"geoJson": "{broken", "peakFloodProbability": 1}"#;
        let (base, _req) = serve_once("200 OK", body).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let loaded = client.load_forecast_or_mock(true).await.unwrap();
        assert_eq!(loaded.source, ForecastSource::Mock);
        assert_eq!(loaded.wards.features.len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_geojson_without_fallback_is_an_error() {
        let body = r#"{"geoJson": "{broken", "peakFloodProbability": 1}"#;
        let (base, _req) = serve_once("200 OK", body).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let err = client.load_forecast_or_mock(false).await.unwrap_err();
        assert!(matches!(err, ForecastError::Geo(_)));
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_mock() {
        let (base, _req) = serve_once("503 Service Unavailable", "{}").await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let loaded = client.load_forecast_or_mock(true).await.unwrap();
        assert_eq!(loaded.source, ForecastSource::Mock);
    }
}

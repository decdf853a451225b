use super::{ApiClient, ApiError, MODEL_VERIFICATION_PATH};
use crate::models::ModelVerification;

impl ApiClient {
    /// `GET /model-verification`.
    pub async fn model_verification(&self) -> Result<ModelVerification, ApiError> {
        self.get_json(MODEL_VERIFICATION_PATH, None).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::test_server::serve_once;

    #[tokio::test]
    async fn test_model_verification() {
        let body = r#"{
            "enhanced_model": {"rmse": 0.0812, "mae": 0.051, "r2": 0.934, "mape": 3.21, "lead_time_hours": 24},
            "forecast_horizons": {"1h": {"rmse": 0.05, "r2": 0.97, "mape": 1.2}, "24h": {"rmse": 0.11, "r2": 0.88, "mape": 4.5}},
            "extreme_events": {"correct_predictions": 87.5, "false_alarms": 8.2, "lead_time_accuracy": 79.0}
        }"#;
        let (base, _req) = serve_once("200 OK", body).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let m = client.model_verification().await.unwrap();
        assert_eq!(m.enhanced_model.lead_time_hours, Some(24.0));
        assert_eq!(m.forecast_horizons.len(), 2);
        assert_eq!(m.extreme_events.correct_predictions, Some(87.5));
        assert!(m.feature_importance.is_empty());
    }
}

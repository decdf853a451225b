use super::{ApiClient, ApiError, ALERTS_PATH, ALERTS_SMS_PATH};
use crate::models::{AlertRegistration, ServiceReply};

impl ApiClient {
    /// Register an alert. `with_sms` selects the endpoint that also texts the subscriber.
    pub async fn register_alert(
        &self,
        registration: &AlertRegistration,
        with_sms: bool,
    ) -> Result<ServiceReply, ApiError> {
        let path = if with_sms { ALERTS_SMS_PATH } else { ALERTS_PATH };
        tracing::info!(ward = %registration.ward, threshold = registration.threshold, with_sms, "registering alert");
        self.post_json(path, registration).await
    }
}

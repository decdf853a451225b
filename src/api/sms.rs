use super::{ApiClient, ApiError, SMS_INFO_PATH, SMS_TEST_PATH};
use crate::models::{ServiceReply, SmsInfo, SmsTestRequest};

pub const DEFAULT_TEST_MESSAGE: &str = "This is a test message from FloodCast Alert System";

impl ApiClient {
    pub async fn sms_info(&self) -> Result<SmsInfo, ApiError> {
        self.get_json(SMS_INFO_PATH, None).await
    }

    /// Send a test SMS. A 2xx reply with `success: false` is still returned as `Ok`.
    pub async fn send_test_sms(&self, request: &SmsTestRequest) -> Result<ServiceReply, ApiError> {
        tracing::info!(phone = %request.phone, "sending test SMS");
        self.post_json(SMS_TEST_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::test_server::serve_once;

    #[tokio::test]
    async fn test_sms_info() {
        let body = r#"{"success":true,"sms_service":{"provider":"twilio","enabled":true,"status":"ready"}}"#;
        let (base, _req) = serve_once("200 OK", body).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let info = client.sms_info().await.unwrap();
        let service = info.sms_service.unwrap();
        assert_eq!(service.provider, "twilio");
        assert!(service.enabled);
    }

    #[tokio::test]
    async fn test_send_test_sms_failure_reply() {
        let body = r#"{"success":false,"error":"SMS disabled"}"#;
        let (base, request) = serve_once("200 OK", body).await;
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();

        let reply = client
            .send_test_sms(&SmsTestRequest {
                phone: "+911234567890".into(),
                message: DEFAULT_TEST_MESSAGE.into(),
            })
            .await
            .unwrap();
        assert_eq!(reply.success, Some(false));
        assert_eq!(reply.error.as_deref(), Some("SMS disabled"));
        assert!(request.await.unwrap().starts_with("POST /api/sms/test "));
    }
}

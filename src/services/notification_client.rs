use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, Url};

use crate::config::{AppConfig, AuthScheme, TargetConfig};
use crate::models::{Credential, NotificationRecord, NotificationResponse};
use crate::providers::StructuredLogger;
use crate::utils::error::{AppError, Result};
use crate::utils::{BasicScheme, BearerScheme, CredentialScheme, REQUEST_ID_HEADER};

#[async_trait]
pub trait NotificationSender {
    /// Posts one notification and returns whatever the endpoint answered.
    /// Non-2xx statuses are not errors.
    async fn send_notification(
        &self,
        record: &NotificationRecord,
        credential: &Credential,
        request_id: &str,
    ) -> Result<NotificationResponse>;

    fn endpoint(&self) -> String;
}

#[derive(Clone)]
pub struct NotificationClient {
    client: Client,
    target: TargetConfig,
    scheme: Arc<dyn CredentialScheme>,
}

impl NotificationClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.webclient.timeout);
        let client = Client::builder().timeout(timeout).build()?;

        let scheme: Arc<dyn CredentialScheme> = match config.target.auth_scheme {
            AuthScheme::Basic => Arc::new(BasicScheme),
            AuthScheme::Bearer => Arc::new(BearerScheme),
        };

        Ok(Self {
            client,
            target: config.target.clone(),
            scheme,
        })
    }

    pub fn with_scheme(mut self, scheme: Arc<dyn CredentialScheme>) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme_name(&self) -> &'static str {
        self.scheme.name()
    }

    /// Builds the POST without sending it. `Credential::Absent` leaves the
    /// `Authorization` header out entirely.
    pub fn build_request(
        &self,
        record: &NotificationRecord,
        credential: &Credential,
        request_id: &str,
    ) -> Result<Request> {
        let endpoint = self.target.endpoint_url();
        let url = Url::parse(&endpoint).map_err(|e| {
            AppError::request_build(format!("invalid endpoint URL '{}': {}", endpoint, e))
        })?;

        let mut builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, HeaderValue::from_str(request_id)?)
            .json(record);

        if let Credential::Token(token) = credential {
            let mut value = HeaderValue::from_str(&self.scheme.authorization_value(token))?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl NotificationSender for NotificationClient {
    async fn send_notification(
        &self,
        record: &NotificationRecord,
        credential: &Credential,
        request_id: &str,
    ) -> Result<NotificationResponse> {
        let request = self.build_request(record, credential, request_id)?;

        StructuredLogger::log_info(
            "Sending notification",
            None,
            Some(request_id),
            Some(serde_json::json!({
                "method": request.method().as_str(),
                "url": request.url().as_str(),
                "fields": record.keys().collect::<Vec<_>>(),
                "authorization": credential.label(),
                "scheme": self.scheme.name(),
            })),
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                StructuredLogger::log_warning(
                    &format!("Failed to read notification response body: {}", e),
                    None,
                    Some(request_id),
                );
                String::new()
            }
        };

        StructuredLogger::log_info(
            &format!("Notification endpoint answered {}", status),
            None,
            Some(request_id),
            Some(serde_json::json!({
                "status": status.as_u16(),
                "body_size": body.len(),
            })),
        );

        Ok(NotificationResponse {
            status_code: status.as_u16(),
            body,
        })
    }

    fn endpoint(&self) -> String {
        self.target.endpoint_url()
    }
}

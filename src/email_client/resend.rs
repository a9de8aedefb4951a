use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use url::Url;

use crate::{domain::NotificationEmail, settings::EmailClientSettings};

use super::{DeliveryOutcome, EmailClient, EmailClientError};

/// Resend API 클라이언트
pub struct Resend {
    http_client: Client,
    base_url: Url,
    authorization_token: Secret<String>,
}

impl Resend {
    pub fn new(
        base_url: &str,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, EmailClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            authorization_token,
        })
    }

    pub fn from_email_client_settings(
        settings: &EmailClientSettings,
        authorization_token: Secret<String>,
    ) -> Result<Self, EmailClientError> {
        Self::new(&settings.base_url, authorization_token, settings.timeout())
    }
}

impl EmailClient for Resend {
    #[tracing::instrument(
        name = "Sending a notification email via Resend.",
        skip_all,
        fields(reply_to = %email.reply_to)
    )]
    async fn send_email(
        &self,
        email: &NotificationEmail,
    ) -> Result<DeliveryOutcome, EmailClientError> {
        let url = self.base_url.join("emails")?;
        let response = self
            .http_client
            .post(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // 본문을 읽지 못해도 상태 코드는 남긴다.
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, provider_error = %body, "Resend API Error");
            return Err(EmailClientError::Rejected { status, body });
        }

        Ok(DeliveryOutcome::Sent)
    }
}

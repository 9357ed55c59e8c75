use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;
use serde_json::Value;

use crate::config::Config;
use crate::subscription::errors::NotifyError;
use crate::subscription::ports::NotificationSink;

/// Outbound notification adapter: SMTP for email contacts, HTTP POST for
/// webhook contacts.
///
/// Every delivery call carries the configured timeout so a slow subscriber
/// cannot stall the fan-out.
pub struct DeliveryNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    http: reqwest::Client,
}

impl DeliveryNotifier {
    /// Build the notifier from application configuration.
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let timeout = Duration::from_secs(config.notifier.timeout_seconds);

        let credentials = Credentials::new(
            config.smtp.username.clone(),
            config.smtp.password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp.host)?
            .port(config.smtp.port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();

        let from: Mailbox = config.smtp.from.parse()?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::info!(
            smtp_host = %config.smtp.host,
            timeout_seconds = config.notifier.timeout_seconds,
            "Notification delivery client initialized"
        );

        Ok(Self { mailer, from, http })
    }
}

#[async_trait]
impl NotificationSink for DeliveryNotifier {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| NotifyError::EmailFailed(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::EmailFailed(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::EmailFailed(e.to_string()))
    }

    async fn post_webhook(&self, url: &str, payload: &Value) -> Result<(), NotifyError> {
        self.http
            .post(url)
            .json(payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map(|_| ())
            .map_err(|e| NotifyError::WebhookFailed(e.to_string()))
    }
}

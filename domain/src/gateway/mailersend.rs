use crate::error::Error;
use email_address::EmailAddress;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// MailerSend API client for sending transactional emails
pub struct MailerSendClient {
    client: reqwest::Client,
    base_url: String,
}

/// Email recipient with name and email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecipient {
    pub email: String,
    pub name: Option<String>,
}

/// Email sender with name and email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSender {
    pub email: String,
    pub name: Option<String>,
}

/// Request payload for sending a plain text email via MailerSend
#[derive(Debug, Serialize)]
pub struct SendEmailRequest {
    pub from: EmailSender,
    pub to: Vec<EmailRecipient>,
    pub subject: String,
    pub text: String,
}

/// Response from MailerSend API
#[derive(Debug, Deserialize)]
pub struct SendEmailResponse {
    pub message_id: Option<String>,
}

/// Error body returned by MailerSend for rejected requests
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl SendEmailRequest {
    /// One plain text message from `from` to every address in `to`, in order.
    pub fn text_message(
        from: impl Into<String>,
        to: &[String],
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from: EmailSender {
                email: from.into(),
                name: None,
            },
            to: to
                .iter()
                .map(|email| EmailRecipient {
                    email: email.clone(),
                    name: None,
                })
                .collect(),
            subject: subject.into(),
            text: text.into(),
        }
    }
}

impl MailerSendClient {
    /// Create a new MailerSend client authenticated with the configured `EMAIL_PASS` token
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = build_client(config)?;
        let base_url = config.mailersend_base_url().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Send an email using MailerSend API
    ///
    /// Any failure, whether the request never reached MailerSend or MailerSend rejected
    /// it, is a delivery error carrying the most specific message available.
    pub async fn send_email(&self, request: SendEmailRequest) -> Result<SendEmailResponse, Error> {
        let url = format!("{}/email", self.base_url);

        info!("Sending email to {} recipients", request.to.len());
        debug!("Email subject: {}", request.subject);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!("Failed to send email request: {e:?}");
                Error::delivery(e.to_string()).with_source(e)
            })?;

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .headers()
                .get("x-message-id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());

            info!("Email sent successfully, message_id: {:?}", message_id);

            Ok(SendEmailResponse { message_id })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Failed to send email: {} - {}", status, error_text);

            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Mail relay responded with status {status}"));
            Err(Error::delivery(message))
        }
    }
}

/// Build HTTP client with MailerSend authentication
fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    let headers = build_auth_headers(config)?;

    Ok(reqwest::Client::builder()
        .use_rustls_tls()
        .default_headers(headers)
        .build()?)
}

/// Build authentication headers for MailerSend API
fn build_auth_headers(config: &Config) -> Result<reqwest::header::HeaderMap, Error> {
    let api_key = config.email_pass().ok_or_else(|| {
        warn!("Failed to get mail relay token from config");
        Error::config("Missing EMAIL_PASS in environment")
    })?;

    let mut headers = reqwest::header::HeaderMap::new();
    let auth_value = format!("Bearer {}", api_key);
    let mut auth_header = reqwest::header::HeaderValue::from_str(&auth_value).map_err(|err| {
        warn!("Failed to create authorization header value: {err:?}");
        Error::config("EMAIL_PASS is not a valid authorization token").with_source(err)
    })?;
    auth_header.set_sensitive(true);
    headers.insert(reqwest::header::AUTHORIZATION, auth_header);

    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    Ok(headers)
}

/// Validate email address format using email_address crate
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

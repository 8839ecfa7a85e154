//! Emailing a finished summary to a list of recipients.

use crate::error::Error;
use crate::gateway::mailersend::{is_valid_email, MailerSendClient, SendEmailRequest};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

pub const SUMMARY_EMAIL_SUBJECT: &str = "Meeting Summary";

/// Recipient addresses, either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Recipients {
    List(Vec<String>),
    Joined(String),
}

impl Default for Recipients {
    fn default() -> Self {
        Recipients::List(Vec::new())
    }
}

impl Recipients {
    /// Trimmed addresses in their original order, with blank entries dropped.
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Recipients::List(list) => list.iter().map(String::as_str).collect(),
            Recipients::Joined(joined) => joined.split(',').collect(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ShareRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub emails: Recipients,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareResult {
    pub delivered: bool,
    pub message_id: Option<String>,
}

/// Validates caller input and returns the normalized recipient list.
fn validate(request: &ShareRequest) -> Result<Vec<String>, Error> {
    if request.summary.trim().is_empty() {
        return Err(Error::validation("Missing summary to share"));
    }

    let recipients = request.emails.normalize();
    if recipients.is_empty() {
        return Err(Error::validation("At least one recipient email is required"));
    }

    if let Some(invalid) = recipients.iter().find(|email| !is_valid_email(email)) {
        warn!("Rejecting share request with invalid recipient: {invalid}");
        return Err(Error::validation(format!(
            "Invalid recipient email address: {invalid}"
        )));
    }

    Ok(recipients)
}

/// Returns the sender address once both mail secrets are known to be configured.
fn mail_identity(config: &Config) -> Result<String, Error> {
    let missing: Vec<&str> = [
        ("EMAIL_USER", config.email_user().is_none()),
        ("EMAIL_PASS", config.email_pass().is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    if !missing.is_empty() {
        error!("Mail credentials not configured: {}", missing.join(", "));
        return Err(Error::config(format!(
            "Missing {} in environment",
            missing.join(" and ")
        )));
    }

    let sender = config.email_user().unwrap_or_default();
    if !is_valid_email(&sender) {
        error!("Configured EMAIL_USER is not a valid sender address");
        return Err(Error::config("EMAIL_USER is not a valid email address"));
    }
    Ok(sender)
}

/// Email `request.summary` to every recipient in a single message.
pub async fn share_summary(config: &Config, request: &ShareRequest) -> Result<ShareResult, Error> {
    let recipients = validate(request)?;
    let sender = mail_identity(config)?;
    let client = MailerSendClient::new(config)?;

    let email = SendEmailRequest::text_message(
        sender,
        &recipients,
        SUMMARY_EMAIL_SUBJECT,
        request.summary.as_str(),
    );
    let response = client.send_email(email).await?;

    Ok(ShareResult {
        delivered: true,
        message_id: response.message_id,
    })
}

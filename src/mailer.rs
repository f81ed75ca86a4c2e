// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Notification dispatch.
//!
//! A dispatcher turns an accepted submission into two emails: the
//! operator notification and the submitter acknowledgment. Both sends
//! must succeed; there is no retry or queueing, so a transient provider
//! failure is terminal for that request.
//!
//! Two implementations behind [`NotificationDispatcher`]:
//! [`HttpMailer`] posts the send-email contract to a transactional mail
//! provider; [`LogDispatcher`] logs the would-be sends and is selected
//! at startup when the provider is not configured.

use crate::submission::Submission;
use crate::templates;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// An outbound email, ready for the provider.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Dispatch failure. Detail stays server-side; clients get a generic 500.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("mail provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail provider rejected send with status {status}")]
    Provider { status: u16 },
}

/// Capability for sending the two notification emails.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send operator notification and submitter acknowledgment.
    ///
    /// Succeeds only if both provider calls succeed. Not atomic: the
    /// operator notification may have been delivered when the
    /// acknowledgment send fails.
    async fn dispatch(&self, submission: &Submission) -> Result<(), DispatchError>;
}

/// Wire payload of the provider's send-email contract.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

/// Real dispatcher speaking HTTP to a transactional mail provider.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    from_address: String,
    admin_address: String,
}

impl HttpMailer {
    pub fn new(
        api_url: String,
        api_token: String,
        from_address: String,
        admin_address: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url,
            api_token,
            from_address,
            admin_address,
        })
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        let payload = SendEmailRequest {
            from: &self.from_address,
            to: &message.to,
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), subject = %message.subject, "Mail provider rejected send");
            return Err(DispatchError::Provider {
                status: status.as_u16(),
            });
        }

        info!(subject = %message.subject, "Email accepted by provider");
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for HttpMailer {
    async fn dispatch(&self, submission: &Submission) -> Result<(), DispatchError> {
        let notification = templates::operator_notification(submission, &self.admin_address);
        self.send(&notification).await?;

        let acknowledgment = templates::submitter_acknowledgment(submission);
        self.send(&acknowledgment).await?;

        Ok(())
    }
}

/// Logging stub used when no mail provider is configured.
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, submission: &Submission) -> Result<(), DispatchError> {
        info!(
            from = %submission.email,
            name = %submission.name,
            organization = %submission.organization,
            organization_type = %submission.organization_type,
            service = %submission.service,
            urgency = %submission.urgency,
            phone = ?submission.phone,
            "Contact form submission (mail provider not configured, logging only)"
        );
        Ok(())
    }
}

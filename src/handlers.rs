// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact intake service.
//!
//! The submission pipeline runs strictly in order: client id → rate
//! limit → parse → validate → sanitize → spam check → dispatch. The
//! handler reads the raw body itself so that rate limiting happens
//! before any parsing work.

use crate::error::ApiError;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::mailer::NotificationDispatcher;
use crate::spam::SpamFilter;
use crate::submission::ContactRequest;
use crate::{config::Config, validator};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared application state.
pub struct AppState {
    pub limiter: RateLimiter,
    pub spam: SpamFilter,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
    pub config: Config,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub success: bool,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-intake-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Derive the rate-limit key from forwarded-IP headers.
///
/// `x-forwarded-for` (first hop) wins, then `x-real-ip`, then the
/// literal "unknown" — so all unidentifiable clients share one bucket.
pub fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// `POST /api/contact`: the contact form submission pipeline.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let client = client_id(&headers);
    debug!(client = %client, "Processing contact submission");

    // Rate limit before touching the body
    if let RateLimitResult::Limited { retry_after } = state.limiter.check(&client).await {
        info!(client = %client, retry_after_secs = retry_after.as_secs(), "Submission rate limited");
        return Err(ApiError::RateLimited { retry_after });
    }

    let request: ContactRequest =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let submission = validator::validate(&request).map_err(|errors| {
        info!(client = %client, violations = errors.len(), "Validation failed");
        ApiError::Validation(errors)
    })?;

    let submission = submission.sanitized();

    if let Some(reason) = state.spam.classify(&submission) {
        // Reason stays server-side; the client gets a generic message
        warn!(
            client = %client,
            reason = %reason,
            organization = %submission.organization,
            "Spam detected, submission rejected"
        );
        return Err(ApiError::SpamRejected);
    }

    state.dispatcher.dispatch(&submission).await.map_err(|e| {
        warn!(client = %client, error = %e, "Notification dispatch failed");
        ApiError::Dispatch {
            detail: state.config.expose_errors.then(|| e.to_string()),
        }
    })?;

    // Log the accepted submission without the message body
    info!(
        client = %client,
        organization = %submission.organization,
        organization_type = %submission.organization_type,
        service = %submission.service,
        urgency = %submission.urgency,
        "Contact form submitted successfully"
    );

    Ok((
        StatusCode::OK,
        Json(SubmitResponse {
            message: "Message sent successfully! We'll respond within your specified timeframe.",
            success: true,
        }),
    ))
}

/// `OPTIONS /api/contact`: CORS preflight with a fixed permissive
/// header set, independent of the main flow.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ],
        Json(serde_json::json!({})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_id_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_id(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_id_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_id(&headers), "198.51.100.2");
    }

    #[test]
    fn test_client_id_unknown_when_unidentifiable() {
        assert_eq!(client_id(&HeaderMap::new()), "unknown");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_id(&headers), "unknown");
    }
}

// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! API error taxonomy and HTTP response mapping.
//!
//! Every error renders to a JSON body with a human-readable `message`
//! suitable for direct display. Spam and dispatch detail never reaches
//! the client; dispatch detail is included only when `expose_errors` is
//! set (non-production).

use crate::validator::FieldError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Error outcome of a contact submission.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("rate limit exceeded")]
    RateLimited { retry_after: Duration },

    #[error("submission classified as spam")]
    SpamRejected,

    #[error("malformed request body: {0}")]
    BadRequest(String),

    #[error("notification dispatch failed")]
    Dispatch {
        /// Provider/transport detail, exposed only outside production
        detail: Option<String>,
    },
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorBody {
    fn message(message: &'static str) -> Self {
        Self {
            message,
            errors: None,
            error: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    message: "Please check your form data and try again.",
                    errors: Some(errors),
                    error: None,
                }),
            )
                .into_response(),

            Self::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after.as_secs().to_string())],
                Json(ErrorBody::message("Too many requests. Please try again later.")),
            )
                .into_response(),

            // No field detail on purpose: don't tip off abusive senders
            Self::SpamRejected => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::message(
                    "Your message appears to be spam and could not be sent.",
                )),
            )
                .into_response(),

            Self::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::message("Please check your form data and try again.")),
            )
                .into_response(),

            Self::Dispatch { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Unable to send message at this time. Please try again later \
                              or contact us directly at +44 20 7123 4567.",
                    errors: None,
                    error: detail,
                }),
            )
                .into_response(),
        }
    }
}

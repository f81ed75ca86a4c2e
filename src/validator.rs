// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form validator.
//!
//! Checks the raw request against the form contract:
//! - name and organization at least 2 characters
//! - syntactically valid email address
//! - organizationType / service / urgency from their closed enumerations
//! - message at least 10 characters
//! - consent strictly true
//!
//! Every violated field is reported, not just the first. Side-effect
//! free; the caller maps the error list to a 400 response.

use crate::submission::{ContactRequest, OrganizationType, ServiceKind, Submission, Urgency};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// One non-whitespace local part, an @, and a dotted domain. Deliberately
// conservative; the mail provider is the final arbiter.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A single field violation, serialized into the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a raw contact request into a typed submission.
///
/// Returns the full list of violations on failure.
pub fn validate(req: &ContactRequest) -> Result<Submission, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = req.name.as_deref().unwrap_or("");
    if name.chars().count() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }

    let email = req.email.as_deref().unwrap_or("");
    if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }

    let organization = req.organization.as_deref().unwrap_or("");
    if organization.chars().count() < 2 {
        errors.push(FieldError::new("organization", "Organization name is required"));
    }

    let organization_type = req
        .organization_type
        .as_deref()
        .and_then(|s| s.parse::<OrganizationType>().ok());
    if organization_type.is_none() {
        errors.push(FieldError::new(
            "organizationType",
            "Organization type must be one of: nhs-trust, private-hospital, care-home, clinic, other",
        ));
    }

    let service = req
        .service
        .as_deref()
        .and_then(|s| s.parse::<ServiceKind>().ok());
    if service.is_none() {
        errors.push(FieldError::new(
            "service",
            "Service must be one of: water-testing, legionella-assessment, htm-compliance, \
             emergency-response, training, consultation",
        ));
    }

    let urgency = req
        .urgency
        .as_deref()
        .and_then(|s| s.parse::<Urgency>().ok());
    if urgency.is_none() {
        errors.push(FieldError::new(
            "urgency",
            "Urgency must be one of: routine, urgent, emergency",
        ));
    }

    let message = req.message.as_deref().unwrap_or("");
    if message.chars().count() < 10 {
        errors.push(FieldError::new(
            "message",
            "Message must be at least 10 characters",
        ));
    }

    if req.consent != Some(true) {
        errors.push(FieldError::new(
            "consent",
            "You must consent to data processing",
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Submission {
        name: name.to_string(),
        email: email.to_string(),
        phone: req.phone.clone().filter(|p| !p.trim().is_empty()),
        organization: organization.to_string(),
        // Checked above; the unwraps cannot fail once errors is empty.
        organization_type: organization_type.unwrap(),
        service: service.unwrap(),
        urgency: urgency.unwrap(),
        message: message.to_string(),
    })
}

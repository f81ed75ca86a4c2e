// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the contact submission pipeline components.

use contact_intake_service::{
    config::RateLimitConfig,
    limiter::{MemoryStore, RateLimitResult, RateLimiter},
    sanitize::sanitize,
    spam::{SpamFilter, SpamReason},
    submission::ContactRequest,
    validator::validate,
};
use std::sync::Arc;

fn valid_request() -> ContactRequest {
    ContactRequest {
        name: Some("Jo Smith".to_string()),
        email: Some("jo@nhs.uk".to_string()),
        phone: None,
        organization: Some("City Hospital".to_string()),
        organization_type: Some("nhs-trust".to_string()),
        service: Some("water-testing".to_string()),
        urgency: Some("routine".to_string()),
        message: Some("We need quarterly legionella sampling for our main building.".to_string()),
        consent: Some(true),
    }
}

#[tokio::test]
async fn test_full_pipeline_accepts_clean_submission() {
    let limiter = RateLimiter::new(RateLimitConfig::default(), Arc::new(MemoryStore::new()));
    let filter = SpamFilter::new();

    // Rate limit
    let rate_result = limiter.check("203.0.113.7").await;
    assert!(matches!(rate_result, RateLimitResult::Allowed { .. }));

    // Validate + sanitize
    let submission = validate(&valid_request()).unwrap().sanitized();
    assert_eq!(submission.email, "jo@nhs.uk");

    // Spam check
    assert_eq!(filter.classify(&submission), None);
}

#[tokio::test]
async fn test_fourth_submission_rate_limited() {
    let limiter = RateLimiter::new(RateLimitConfig::default(), Arc::new(MemoryStore::new()));

    for i in 0..3 {
        let result = limiter.check("203.0.113.7").await;
        assert!(
            matches!(result, RateLimitResult::Allowed { .. }),
            "submission {} should be allowed",
            i + 1
        );
    }

    let result = limiter.check("203.0.113.7").await;
    assert!(matches!(result, RateLimitResult::Limited { .. }));
}

#[test]
fn test_spam_rejected_despite_valid_fields() {
    let request = ContactRequest {
        message: Some("WIN A FREE LOTTERY PRIZE NOW http://example.com".to_string()),
        ..valid_request()
    };

    // Passes validation...
    let submission = validate(&request).unwrap().sanitized();

    // ...but any one heuristic condemns it
    let verdict = SpamFilter::new().classify(&submission);
    assert!(matches!(
        verdict,
        Some(SpamReason::KeywordMatch | SpamReason::ContainsLink)
    ));
}

#[test]
fn test_sanitization_applied_before_spam_check() {
    let request = ContactRequest {
        name: Some("<b>Jo Smith</b>".to_string()),
        message: Some("  javascript:alert(1) but otherwise a normal enquiry about sampling.  ".to_string()),
        ..valid_request()
    };

    let submission = validate(&request).unwrap().sanitized();
    assert_eq!(submission.name, "bJo Smith/b");
    assert!(!submission.message.contains("javascript:"));
    assert_eq!(SpamFilter::new().classify(&submission), None);
}

#[test]
fn test_sanitize_idempotent_over_pipeline_inputs() {
    let inputs = [
        "We need quarterly legionella sampling for our main building.",
        "<script>alert('xss')</script>",
        "javajavascript:script:payload",
        "   padded   ",
    ];
    for input in inputs {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once);
    }
}

#[test]
fn test_validation_failure_reports_all_fields() {
    let request = ContactRequest {
        name: Some("X".to_string()),
        email: Some("nope".to_string()),
        consent: Some(false),
        ..valid_request()
    };

    let errors = validate(&request).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "consent"]);
}

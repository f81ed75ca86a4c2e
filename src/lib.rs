// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Intake Service
//!
//! This crate provides the server side of the Pure Water Solutions
//! contact form: a single submission endpoint with anti-abuse controls
//! in front of a transactional-email dispatcher.
//!
//! - Field validation with every violation reported (not just the first)
//! - Free-text sanitization (angle brackets, `javascript:`/`data:` schemes)
//! - Per-client sliding-window rate limiting (3 submissions / 15 min)
//! - Keyword/link/caps spam heuristics
//! - Operator notification + submitter acknowledgment emails

pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod sanitize;
pub mod spam;
pub mod submission;
pub mod templates;
pub mod validator;

pub use config::Config;
pub use limiter::{MemoryStore, RateLimitResult, RateLimiter};
pub use mailer::{HttpMailer, LogDispatcher, NotificationDispatcher};
pub use spam::{SpamFilter, SpamReason};
pub use submission::{ContactRequest, Submission};
pub use validator::{validate, FieldError};

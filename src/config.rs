// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact intake service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the contact intake service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Mail provider configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Include error detail in 500 responses (never enable in production)
    #[serde(default)]
    pub expose_errors: bool,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds (default: 900 = 15 minutes)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum submissions per window per client (default: 3)
    #[serde(default = "default_max_submissions")]
    pub max_submissions: u32,
}

/// Transactional mail provider configuration.
///
/// The service speaks a provider-agnostic send-email contract: a JSON
/// POST to `api_url` authorized by `api_token`. When either is absent
/// the service starts with the logging dispatcher instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Provider send endpoint
    #[serde(default)]
    pub api_url: Option<String>,

    /// Provider bearer token
    #[serde(default)]
    pub api_token: Option<String>,

    /// Source address for both outbound emails
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Operator address receiving submission notifications
    #[serde(default = "default_admin_address")]
    pub admin_address: String,

    /// Request timeout for provider calls in milliseconds (default: 10000)
    #[serde(default = "default_mail_timeout_ms")]
    pub timeout_ms: u64,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_window_secs() -> u64 {
    900 // 15 minutes
}

fn default_max_submissions() -> u32 {
    3
}

fn default_from_address() -> String {
    "noreply@purewateruk.com".to_string()
}

fn default_admin_address() -> String {
    "admin@purewateruk.com".to_string()
}

fn default_mail_timeout_ms() -> u64 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            mail: MailConfig::default(),
            expose_errors: false,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_submissions: default_max_submissions(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            from_address: default_from_address(),
            admin_address: default_admin_address(),
            timeout_ms: default_mail_timeout_ms(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl MailConfig {
    /// True when the provider endpoint and token are both present.
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_token.is_some()
    }

    /// Get the provider request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

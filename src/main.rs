// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Intake Service
//!
//! Server side of the Pure Water Solutions contact form: a single
//! submission endpoint with validation, sanitization, per-client rate
//! limiting and spam heuristics in front of the notification
//! dispatcher.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_WINDOW_SECS`: Rate limit window (default: 900)
//! - `RATE_MAX_SUBMISSIONS`: Submissions per window (default: 3)
//! - `MAIL_API_URL` / `MAIL_API_TOKEN`: mail provider endpoint and
//!   token; when either is missing the service logs submissions
//!   instead of sending email
//! - `MAIL_FROM` / `MAIL_ADMIN`: source and operator addresses
//! - `MAIL_TIMEOUT_MS`: provider request timeout (default: 10000)
//! - `EXPOSE_ERRORS`: include dispatch detail in 500 bodies (never in
//!   production)

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_intake_service::{
    config::{Config, MailConfig, RateLimitConfig},
    handlers::{health, preflight, submit, AppState},
    limiter::{MemoryStore, RateLimiter},
    mailer::{HttpMailer, LogDispatcher, NotificationDispatcher},
    spam::SpamFilter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        window_secs = config.rate_limit.window_secs,
        max_submissions = config.rate_limit.max_submissions,
        mail_configured = config.mail.is_configured(),
        "Starting contact intake service"
    );

    // Select the dispatcher at startup: real provider when configured,
    // logging stub otherwise
    let dispatcher: Arc<dyn NotificationDispatcher> = if config.mail.is_configured() {
        let mail = &config.mail;
        info!(from = %mail.from_address, admin = %mail.admin_address, "Using HTTP mail dispatcher");
        Arc::new(HttpMailer::new(
            mail.api_url.clone().unwrap_or_default(),
            mail.api_token.clone().unwrap_or_default(),
            mail.from_address.clone(),
            mail.admin_address.clone(),
            mail.timeout(),
        )?)
    } else {
        info!("Mail provider not configured, submissions will be logged only");
        Arc::new(LogDispatcher)
    };

    // Create application state
    let limiter = RateLimiter::new(config.rate_limit.clone(), Arc::new(MemoryStore::new()));

    let state = Arc::new(AppState {
        limiter,
        spam: SpamFilter::new(),
        dispatcher,
        config: config.clone(),
    });

    // Spawn rate-limit sweep task
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweep_state.limiter.sweep().await;
        }
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/contact", post(submit).options(preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: RateLimitConfig {
            window_secs: std::env::var("RATE_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            max_submissions: std::env::var("RATE_MAX_SUBMISSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        },
        mail: MailConfig {
            api_url: std::env::var("MAIL_API_URL").ok().filter(|v| !v.is_empty()),
            api_token: std::env::var("MAIL_API_TOKEN").ok().filter(|v| !v.is_empty()),
            from_address: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@purewateruk.com".to_string()),
            admin_address: std::env::var("MAIL_ADMIN")
                .unwrap_or_else(|_| "admin@purewateruk.com".to_string()),
            timeout_ms: std::env::var("MAIL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        },
        expose_errors: std::env::var("EXPOSE_ERRORS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false),
    }
}

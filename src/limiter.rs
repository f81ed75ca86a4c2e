// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for contact form submissions.
//!
//! One window per client identifier (forwarded IP or "unknown"):
//! 3 submissions per 15 minutes by default. Expiry is checked lazily on
//! each submission; a periodic sweep reclaims entries for clients that
//! never come back.
//!
//! The counter table sits behind the [`RateLimitStore`] trait so a
//! multi-instance deployment can swap in a shared external store
//! without touching the handler logic. The in-process [`MemoryStore`]
//! is the only implementation shipped here.

use crate::config::RateLimitConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Per-client submission counter.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitEntry {
    /// Submissions seen in the current window
    pub count: u32,
    /// When the current window ends
    pub window_ends: Instant,
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining submissions in the current window
        remaining: u32,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

/// Storage seam for the counter table.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<RateLimitEntry>;
    async fn set(&self, key: &str, entry: RateLimitEntry);
    /// Remove entries whose window has ended.
    async fn sweep(&self);
}

/// In-process counter table.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, RateLimitEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of tracked clients (expired or not).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.read().await.get(key).copied()
    }

    async fn set(&self, key: &str, entry: RateLimitEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
    }

    async fn sweep(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now < entry.window_ends);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Swept expired rate limit entries");
        }
    }
}

/// Sliding-window rate limiter over an injected store.
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    /// Create a rate limiter backed by the given store.
    pub fn new(config: RateLimitConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self { config, store }
    }

    /// Check and count a submission from the given client.
    ///
    /// Counts the submission unless the client is already over the
    /// threshold in an active window.
    pub async fn check(&self, client_id: &str) -> RateLimitResult {
        let now = Instant::now();

        match self.store.get(client_id).await {
            Some(entry) if now < entry.window_ends => {
                if entry.count >= self.config.max_submissions {
                    let retry_after = entry.window_ends.duration_since(now);
                    debug!(client = %client_id, ?retry_after, "Rate limit exceeded");
                    return RateLimitResult::Limited { retry_after };
                }

                let updated = RateLimitEntry {
                    count: entry.count + 1,
                    window_ends: entry.window_ends,
                };
                self.store.set(client_id, updated).await;
                RateLimitResult::Allowed {
                    remaining: self.config.max_submissions - updated.count,
                }
            }
            // No entry, or the stored window has expired: start a fresh one.
            _ => {
                let entry = RateLimitEntry {
                    count: 1,
                    window_ends: now + self.config.window_duration(),
                };
                self.store.set(client_id, entry).await;
                RateLimitResult::Allowed {
                    remaining: self.config.max_submissions - 1,
                }
            }
        }
    }

    /// Sweep expired entries from the backing store.
    pub async fn sweep(&self) {
        self.store.sweep().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(config: RateLimitConfig) -> RateLimiter {
        RateLimiter::new(config, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_threshold_enforced() {
        let limiter = limiter(RateLimitConfig::default());

        // First 3 submissions allowed
        for i in 0..3 {
            match limiter.check("203.0.113.7").await {
                RateLimitResult::Allowed { remaining } => {
                    assert_eq!(remaining, 2 - i);
                }
                RateLimitResult::Limited { .. } => panic!("submission {} should be allowed", i + 1),
            }
        }

        // 4th submission limited
        match limiter.check("203.0.113.7").await {
            RateLimitResult::Limited { retry_after } => {
                assert!(retry_after <= Duration::from_secs(900));
            }
            RateLimitResult::Allowed { .. } => panic!("4th submission should be limited"),
        }
    }

    #[tokio::test]
    async fn test_clients_independent() {
        let limiter = limiter(RateLimitConfig::default());

        for _ in 0..3 {
            limiter.check("203.0.113.7").await;
        }
        assert!(matches!(
            limiter.check("203.0.113.7").await,
            RateLimitResult::Limited { .. }
        ));

        // A different client is unaffected
        assert!(matches!(
            limiter.check("198.51.100.2").await,
            RateLimitResult::Allowed { .. }
        ));
    }

    #[tokio::test]
    async fn test_expired_window_resets_count() {
        let store = Arc::new(MemoryStore::new());
        let limiter = RateLimiter::new(RateLimitConfig::default(), store.clone());

        // Simulate a client that exhausted a window that has since ended
        store
            .set(
                "203.0.113.7",
                RateLimitEntry {
                    count: 3,
                    window_ends: Instant::now() - Duration::from_secs(1),
                },
            )
            .await;

        match limiter.check("203.0.113.7").await {
            RateLimitResult::Allowed { remaining } => assert_eq!(remaining, 2),
            RateLimitResult::Limited { .. } => panic!("expired window should reset"),
        }

        // Counter restarted at 1
        let entry = store.get("203.0.113.7").await.unwrap();
        assert_eq!(entry.count, 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let store = Arc::new(MemoryStore::new());

        store
            .set(
                "stale",
                RateLimitEntry {
                    count: 2,
                    window_ends: Instant::now() - Duration::from_secs(1),
                },
            )
            .await;
        store
            .set(
                "active",
                RateLimitEntry {
                    count: 1,
                    window_ends: Instant::now() + Duration::from_secs(600),
                },
            )
            .await;

        store.sweep().await;

        assert!(store.get("stale").await.is_none());
        assert!(store.get("active").await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_shared_unknown_bucket() {
        let limiter = limiter(RateLimitConfig::default());

        // Unidentifiable clients all share the "unknown" key
        for _ in 0..3 {
            assert!(matches!(
                limiter.check("unknown").await,
                RateLimitResult::Allowed { .. }
            ));
        }
        assert!(matches!(
            limiter.check("unknown").await,
            RateLimitResult::Limited { .. }
        ));
    }
}

//! Per-endpoint rate limiting for the Tenable.io API
//!
//! Limiting is reactive: a category is only throttled after the platform has
//! answered one of its requests with a 429.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

/// Categories of API endpoints with their throttled rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointCategory {
    /// /api/v3/* explore searches - 10 req/sec
    Explore,
    /// /tags/assets/assignments (POST) - 1 req/sec
    TagAssignment,
    /// /scanners/* agent listings - 5 req/sec
    Agents,
    /// /remediation/goal (POST) - 12 req/min
    RemediationCreate,
    /// Everything else - 5 req/sec
    Default,
}

impl EndpointCategory {
    /// All endpoint categories for initialization.
    pub const ALL: [EndpointCategory; 5] = [
        EndpointCategory::Explore,
        EndpointCategory::TagAssignment,
        EndpointCategory::Agents,
        EndpointCategory::RemediationCreate,
        EndpointCategory::Default,
    ];

    /// Categorize a request by path (without host) and method.
    pub fn from_request(path: &str, method: &reqwest::Method) -> Self {
        if path.starts_with("/api/v3/") {
            return EndpointCategory::Explore;
        }

        if path == "/tags/assets/assignments" && *method == reqwest::Method::POST {
            return EndpointCategory::TagAssignment;
        }

        if path.starts_with("/scanners/") {
            return EndpointCategory::Agents;
        }

        if path == "/remediation/goal" && *method == reqwest::Method::POST {
            return EndpointCategory::RemediationCreate;
        }

        EndpointCategory::Default
    }

    /// Throttled rate for this category (requests per second).
    pub fn rate_limit(&self) -> f64 {
        match self {
            EndpointCategory::Explore => 10.0,
            EndpointCategory::TagAssignment => 1.0,
            EndpointCategory::Agents => 5.0,
            EndpointCategory::RemediationCreate => 0.2,
            EndpointCategory::Default => 5.0,
        }
    }
}

/// Rate limiter state for a single endpoint category.
pub struct EndpointRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    category: EndpointCategory,
}

impl EndpointRateLimiter {
    pub fn new(category: EndpointCategory) -> Self {
        let rate = category.rate_limit();

        // sub-1 rates become per-minute quotas
        let quota = if rate >= 1.0 {
            Quota::per_second(NonZeroU32::new(rate as u32).unwrap_or(NonZeroU32::MIN))
        } else {
            let per_min = (rate * 60.0).round() as u32;
            Quota::per_minute(NonZeroU32::new(per_min).unwrap_or(NonZeroU32::MIN))
        };

        Self {
            limiter: RateLimiter::direct(quota),
            active: AtomicBool::new(false),
            category,
        }
    }

    /// Start throttling this category.
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?}", self.category);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for a permit if throttling is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.category);
            self.limiter.until_ready().await;
        }
    }
}

/// Rate limiters for every endpoint category.
pub struct RateLimiterSet {
    limiters: HashMap<EndpointCategory, EndpointRateLimiter>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    pub fn new() -> Self {
        let limiters = EndpointCategory::ALL
            .into_iter()
            .map(|c| (c, EndpointRateLimiter::new(c)))
            .collect();
        Self { limiters }
    }

    /// Wait for a permit for `category` (if active).
    pub async fn wait_for(&self, category: EndpointCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.wait_if_active().await;
        }
    }

    /// Start throttling `category` (called on 429).
    pub fn activate(&self, category: EndpointCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.activate();
        }
    }

    #[cfg(test)]
    pub fn is_active(&self, category: EndpointCategory) -> bool {
        self.limiters
            .get(&category)
            .is_some_and(EndpointRateLimiter::is_active)
    }
}

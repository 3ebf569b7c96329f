//! Per-caller rate limiting.
//!
//! Authenticated requests are limited per user ID using an in-memory
//! token bucket. The limiter map grows with the number of distinct
//! callers seen since startup; entries are cheap and the process is
//! restarted on deploy, so no eviction is done.

use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde_json::json;
use uuid::Uuid;

use crate::{app::AppState, middleware::user_auth::UserAuth};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Holds one limiter per authenticated caller.
pub struct RateLimiterState {
    limiters: Mutex<HashMap<Uuid, Arc<DirectLimiter>>>,
    quota: Quota,
}

impl RateLimiterState {
    /// Creates limiter state allowing `per_minute` requests per caller.
    /// Returns `None` when `per_minute` is zero, which disables limiting.
    pub fn new(per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(per_minute)?;
        Some(Self {
            limiters: Mutex::new(HashMap::new()),
            quota: Quota::per_minute(per_minute),
        })
    }

    /// Checks whether the caller may proceed, consuming one permit.
    pub fn check(&self, user_id: Uuid) -> bool {
        let limiter = {
            let mut limiters = self.limiters.lock().expect("limiter map poisoned");
            limiters
                .entry(user_id)
                .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)))
                .clone()
        };
        limiter.check().is_ok()
    }

    #[cfg(test)]
    pub fn tracked_callers(&self) -> usize {
        self.limiters.lock().expect("limiter map poisoned").len()
    }
}

fn rate_limited_response() -> Response {
    let body = json!({
        "error": "rate_limited",
        "message": "Too many requests. Please try again later.",
    });
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from_static("60"));
    response
}

/// Middleware enforcing the per-caller rate limit.
///
/// Must run after authentication so the caller identity is available in
/// request extensions. Unauthenticated requests pass through untouched.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let Some(auth) = req.extensions().get::<UserAuth>() else {
        return next.run(req).await;
    };

    if !limiter.check(auth.user_id) {
        tracing::warn!(user_id = %auth.user_id, "Rate limit exceeded");
        return rate_limited_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quota_disables_limiting() {
        assert!(RateLimiterState::new(0).is_none());
    }

    #[test]
    fn test_limit_enforced_per_caller() {
        let state = RateLimiterState::new(3).expect("quota");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        for _ in 0..3 {
            assert!(state.check(alice));
        }
        assert!(!state.check(alice));

        // Another caller gets a fresh bucket.
        assert!(state.check(bob));
        assert_eq!(state.tracked_callers(), 2);
    }

    #[test]
    fn test_rate_limited_response_shape() {
        let response = rate_limited_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER),
            Some(&HeaderValue::from_static("60"))
        );
    }
}

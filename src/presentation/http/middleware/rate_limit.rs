// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type AuthRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Requests per second replenished for each client IP on the auth routes.
pub const AUTH_REQUESTS_PER_SECOND: u64 = 2;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Per-IP limiter shared by the login and registration routes.
///
/// Returns `None` when the limiter configuration is rejected, in which case
/// the routes are served without throttling.
pub fn auth_rate_limit_layer() -> Option<AuthRateLimitLayer> {
    static RATE_LIMITER: OnceLock<Option<AuthRateLimitLayer>> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(AUTH_REQUESTS_PER_SECOND);
            builder.burst_size(AUTH_BURST_SIZE);
            let Some(config) = builder.key_extractor(SmartIpKeyExtractor).finish() else {
                tracing::warn!("invalid auth rate limit configuration; throttling disabled");
                return None;
            };

            Some(GovernorLayer::new(config))
        })
        .clone()
}

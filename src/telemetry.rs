//! Telemetry metric name constants.
//!
//! Centralised metric names for futmarket operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `futmarket_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `operation` — façade method invoked (e.g. "player_price", "search")
//! - `status` — outcome: "ok" or "error"

/// Total upstream HTTP requests sent.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "futmarket_requests_total";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "futmarket_retries_total";

/// Total response cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "futmarket_cache_hits_total";

/// Total response cache misses.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "futmarket_cache_misses_total";

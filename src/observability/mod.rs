//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! proxy engine / host server produce:
//!     → logging.rs (structured log events, `[Proxy] ...` lines)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the host server to the upstream
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;

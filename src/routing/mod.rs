//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → matcher.rs (evaluate prefix)
//!     → proxied, or handed back to the host application untouched
//! ```
//!
//! # Design Decisions
//! - One rule, compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)

pub mod matcher;

pub use matcher::{Matcher, PathPrefixMatcher};

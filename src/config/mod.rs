//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)           CLI flags
//!     → loader.rs (parse)          │
//!     → ProxyConfig  ◀─────────────┘ (overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyRuleConfig::to_options()
//!     → ProxyOptions (immutable, owned by the forwarding engine)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults, so an empty file is the stock `/api` rule
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, ProxyRuleConfig};
pub use validation::{validate_config, ValidationError};

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the path prefix and the upstream target
//! - Validate forced header names and values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("proxy.path_prefix `{0}` must start with `/`")]
    PathPrefix(String),

    #[error("proxy.target `{target}`: {reason}")]
    Target { target: String, reason: String },

    #[error("proxy.headers: `{0}` is not a valid header name")]
    HeaderName(String),

    #[error("proxy.headers: value of `{0}` is not a valid header value")]
    HeaderValue(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !config.proxy.path_prefix.starts_with('/') {
        errors.push(ValidationError::PathPrefix(config.proxy.path_prefix.clone()));
    }

    if let Err(reason) = check_target(&config.proxy.target) {
        errors.push(ValidationError::Target {
            target: config.proxy.target.clone(),
            reason: reason.to_string(),
        });
    }

    for (name, value) in &config.proxy.headers {
        if HeaderName::try_from(name.as_str()).is_err() {
            errors.push(ValidationError::HeaderName(name.clone()));
        } else if HeaderValue::try_from(value.as_str()).is_err() {
            errors.push(ValidationError::HeaderValue(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The target must be a plain `http` origin, optionally with a base path.
fn check_target(target: &str) -> Result<(), &'static str> {
    let url = Url::parse(target).map_err(|_| "not an absolute URL")?;

    if url.scheme() != "http" {
        return Err("only http targets are supported");
    }
    if url.host_str().is_none() {
        return Err("missing host");
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed");
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err("credentials are not allowed");
    }
    Ok(())
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev proxy.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::config::validation::ValidationError;
use crate::proxy::ProxyOptions;

/// Root configuration for the dev proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Host server settings (bind address, static files).
    pub listener: ListenerConfig,

    /// The single forwarding rule.
    pub proxy: ProxyRuleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Host server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Directory served for every path the proxy does not claim.
    pub static_dir: Option<PathBuf>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            static_dir: None,
        }
    }
}

/// Forwarding rule: which requests are proxied and how.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProxyRuleConfig {
    /// Path prefix to match (case-sensitive).
    pub path_prefix: String,

    /// Upstream origin, e.g. "http://127.0.0.1:5000".
    pub target: String,

    /// Rewrite the outbound Host header to the target's authority.
    pub change_origin: bool,

    /// Reuse pooled upstream connections across forwarded requests.
    ///
    /// Off by default: with pooling, localhost targets resolved over a
    /// dual-stack resolver misbehave.
    pub use_connection_agent: bool,

    /// Add X-Forwarded-For / -Proto / -Host to forwarded requests.
    pub xfwd: bool,

    /// Headers forced onto every forwarded request.
    ///
    /// Supplying this table replaces the default entirely.
    pub headers: BTreeMap<String, String>,
}

impl Default for ProxyRuleConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Connection".to_string(), "keep-alive".to_string());

        Self {
            path_prefix: crate::proxy::DEFAULT_PATH_PREFIX.to_string(),
            target: crate::proxy::DEFAULT_TARGET.to_string(),
            change_origin: true,
            use_connection_agent: false,
            xfwd: false,
            headers,
        }
    }
}

impl ProxyRuleConfig {
    /// Convert the rule into forwarding-engine options with the default hooks.
    pub fn to_options(&self) -> Result<ProxyOptions, ConfigError> {
        let target: Uri = self.target.parse().map_err(|_| {
            ConfigError::Validation(vec![ValidationError::Target {
                target: self.target.clone(),
                reason: "not a valid URI".to_string(),
            }])
        })?;

        let mut headers = HeaderMap::new();
        let mut errors = Vec::new();
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                (Err(_), _) => errors.push(ValidationError::HeaderName(name.clone())),
                (_, Err(_)) => errors.push(ValidationError::HeaderValue(name.clone())),
            }
        }
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(ProxyOptions {
            path_prefix: self.path_prefix.clone(),
            target,
            change_origin: self.change_origin,
            use_connection_agent: self.use_connection_agent,
            xfwd: self.xfwd,
            headers,
            ..ProxyOptions::default()
        })
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONNECTION;

    #[test]
    fn defaults_describe_the_api_rule() {
        let config = ProxyConfig::default();
        assert_eq!(config.proxy.path_prefix, "/api");
        assert_eq!(config.proxy.target, "http://127.0.0.1:5000");
        assert!(config.proxy.change_origin);
        assert!(!config.proxy.use_connection_agent);
        assert_eq!(
            config.proxy.headers.get("Connection").map(String::as_str),
            Some("keep-alive")
        );
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [proxy]
            target = "http://localhost:8000"
            "#,
        )
        .unwrap();

        assert_eq!(config.proxy.target, "http://localhost:8000");
        assert_eq!(config.proxy.path_prefix, "/api");
        assert_eq!(config.listener, ListenerConfig::default());
    }

    #[test]
    fn to_options_carries_forced_headers() {
        let options = ProxyRuleConfig::default().to_options().unwrap();
        assert_eq!(options.headers.get(CONNECTION).unwrap(), "keep-alive");
        assert_eq!(options.target, Uri::from_static("http://127.0.0.1:5000"));
        assert!(!options.use_connection_agent);
    }

    #[test]
    fn to_options_rejects_bad_header_names() {
        let mut rule = ProxyRuleConfig::default();
        rule.headers.insert("bad header".to_string(), "x".to_string());

        match rule.to_options() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::HeaderName("bad header".to_string())]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

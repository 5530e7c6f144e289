//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all
//! validation errors, not just the first, so an operator can fix a bad
//! config in one pass.

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one upstream provider must be configured")]
    NoProviders,

    #[error("provider '{url}' is not a valid URL: {reason}")]
    InvalidProviderUrl { url: String, reason: String },

    #[error("provider '{url}' must use http or https")]
    UnsupportedScheme { url: String },

    #[error("provider '{url}' is configured more than once")]
    DuplicateProvider { url: String },

    #[error("upstream attempt timeout must be greater than zero")]
    ZeroAttemptTimeout,

    #[error("notifier is enabled but has no endpoint")]
    NotifierMissingEndpoint,

    #[error("notifier is enabled but has no recipient")]
    NotifierMissingRecipient,

    #[error("notifier queue capacity must be greater than zero")]
    ZeroQueueCapacity,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.providers.is_empty() {
        errors.push(ValidationError::NoProviders);
    }

    let mut seen = Vec::new();
    for raw in &config.upstream.providers {
        match Url::parse(raw) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(ValidationError::UnsupportedScheme { url: raw.clone() });
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidProviderUrl {
                    url: raw.clone(),
                    reason: e.to_string(),
                });
            }
        }

        let normalized = raw.trim_end_matches('/');
        if seen.contains(&normalized) {
            errors.push(ValidationError::DuplicateProvider { url: raw.clone() });
        } else {
            seen.push(normalized);
        }
    }

    if config.upstream.attempt_timeout_secs == 0 {
        errors.push(ValidationError::ZeroAttemptTimeout);
    }

    if config.notifier.enabled {
        if config.notifier.endpoint.is_empty() {
            errors.push(ValidationError::NotifierMissingEndpoint);
        }
        if config.notifier.recipient.is_empty() {
            errors.push(ValidationError::NotifierMissingRecipient);
        }
        if config.notifier.queue_capacity == 0 {
            errors.push(ValidationError::ZeroQueueCapacity);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_providers(providers: &[&str]) -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.upstream.providers = providers.iter().map(|s| s.to_string()).collect();
        config
    }

    #[test]
    fn empty_provider_list_is_rejected() {
        let config = GatewayConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoProviders));
    }

    #[test]
    fn valid_providers_pass() {
        let config = config_with_providers(&["https://a.example.com", "http://b.example.com"]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn duplicate_providers_are_rejected_despite_trailing_slash() {
        let config = config_with_providers(&["https://a.example.com", "https://a.example.com/"]);
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::DuplicateProvider { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let config = config_with_providers(&["ftp://a.example.com"]);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnsupportedScheme { .. })));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = config_with_providers(&["not a url"]);
        config.upstream.attempt_timeout_secs = 0;
        config.notifier.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors.len() >= 4,
            "expected url, timeout, endpoint and recipient errors, got {errors:?}"
        );
    }
}

//! Immutable provider registry.

use std::fmt;
use std::sync::Arc;

/// A single upstream provider, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    base: String,
}

impl Provider {
    /// Create a provider from a configured base URL. Trailing slashes are
    /// stripped so the same upstream always has one spelling.
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized base URL. This is the provider's identity on the
    /// wire (`source_api`, `set_primary?api=`).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full URL for fetching `key` through this provider.
    pub fn endpoint(&self, path_prefix: &str, key: &str) -> String {
        format!("{}{}/{}", self.base, path_prefix, key)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Fixed ordered collection of providers.
///
/// Built once from validated configuration; config validation guarantees
/// the list is non-empty and free of duplicates.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: Vec<Arc<Provider>>,
}

impl ProviderRegistry {
    /// Build the registry from configured base URLs, preserving order.
    pub fn new(base_urls: &[String]) -> Self {
        let providers = base_urls
            .iter()
            .map(|url| Arc::new(Provider::new(url)))
            .collect();
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider at `index`. Callers pass indices obtained from this
    /// registry, so `index` is always in range.
    pub fn get(&self, index: usize) -> Arc<Provider> {
        self.providers[index].clone()
    }

    /// Position of the provider with the given base URL, if configured.
    /// Accepts the same spellings `Provider::new` normalizes.
    pub fn position_of(&self, base_url: &str) -> Option<usize> {
        let normalized = base_url.trim_end_matches('/');
        self.providers.iter().position(|p| p.base() == normalized)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Provider>> {
        self.providers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let provider = Provider::new("https://a.example.com/");
        assert_eq!(provider.base(), "https://a.example.com");
        assert_eq!(
            provider.endpoint("/scrape", "alice"),
            "https://a.example.com/scrape/alice"
        );
    }

    #[test]
    fn position_lookup_accepts_either_spelling() {
        let registry = ProviderRegistry::new(&[
            "https://a.example.com".to_string(),
            "https://b.example.com/".to_string(),
        ]);
        assert_eq!(registry.position_of("https://a.example.com/"), Some(0));
        assert_eq!(registry.position_of("https://b.example.com"), Some(1));
        assert_eq!(registry.position_of("https://c.example.com"), None);
    }
}

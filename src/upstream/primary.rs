//! Sticky primary pointer and traversal-order derivation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::upstream::registry::{Provider, ProviderRegistry};

/// Holds the index of the currently preferred provider and derives the
/// per-request traversal order from it.
///
/// The pointer is a single atomic word. `order` reads it exactly once and
/// rotates over that snapshot, so a concurrent repoint can never make a
/// rotation repeat or omit a provider. A request that started before a
/// repoint simply finishes with its stale order.
#[derive(Debug)]
pub struct PrimarySelector {
    registry: Arc<ProviderRegistry>,
    primary: AtomicUsize,
}

impl PrimarySelector {
    /// Create a selector pointing at the first configured provider.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            primary: AtomicUsize::new(0),
        }
    }

    /// Full traversal order: every provider exactly once, starting at the
    /// current primary and wrapping around the registry.
    pub fn order(&self) -> Vec<(usize, Arc<Provider>)> {
        let n = self.registry.len();
        let start = self.primary.load(Ordering::Acquire);

        (0..n)
            .map(|i| {
                let index = (start + i) % n;
                (index, self.registry.get(index))
            })
            .collect()
    }

    /// The provider currently preferred as the first attempt.
    pub fn current(&self) -> Arc<Provider> {
        self.registry.get(self.primary.load(Ordering::Acquire))
    }

    /// Repoint the primary to the provider with the given base URL.
    ///
    /// Fails without touching the pointer if the URL is not one of the
    /// configured providers.
    pub fn set_primary_by_value(&self, base_url: &str) -> Result<Arc<Provider>, GatewayError> {
        let index = self
            .registry
            .position_of(base_url)
            .ok_or_else(|| GatewayError::InvalidProvider(base_url.to_string()))?;

        self.primary.store(index, Ordering::Release);
        Ok(self.registry.get(index))
    }

    /// Repoint the primary after a successful attempt. `index` came from
    /// iterating this registry, so it is always in range.
    pub(crate) fn set_primary_by_index(&self, index: usize) {
        debug_assert!(index < self.registry.len());
        self.primary.store(index, Ordering::Release);
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(n: usize) -> PrimarySelector {
        let urls: Vec<String> = (0..n)
            .map(|i| format!("https://p{}.example.com", i))
            .collect();
        PrimarySelector::new(Arc::new(ProviderRegistry::new(&urls)))
    }

    #[test]
    fn order_is_a_rotation_from_any_starting_pointer() {
        for n in 1..=5 {
            let s = selector(n);
            for p in 0..n {
                s.set_primary_by_index(p);
                let order = s.order();

                assert_eq!(order.len(), n);
                assert_eq!(order[0].0, p, "order must start at the primary");

                let mut indices: Vec<usize> = order.iter().map(|(i, _)| *i).collect();
                indices.sort_unstable();
                assert_eq!(
                    indices,
                    (0..n).collect::<Vec<_>>(),
                    "every provider appears exactly once"
                );

                for (offset, (index, provider)) in order.iter().enumerate() {
                    assert_eq!(*index, (p + offset) % n);
                    assert_eq!(provider.base(), format!("https://p{}.example.com", index));
                }
            }
        }
    }

    #[test]
    fn set_primary_by_value_moves_the_pointer() {
        let s = selector(3);
        let provider = s.set_primary_by_value("https://p2.example.com").unwrap();
        assert_eq!(provider.base(), "https://p2.example.com");
        assert_eq!(s.current().base(), "https://p2.example.com");
        assert_eq!(s.order()[0].0, 2);
    }

    #[test]
    fn unknown_provider_leaves_pointer_unchanged() {
        let s = selector(3);
        s.set_primary_by_index(1);

        let err = s.set_primary_by_value("https://stranger.example.com");
        assert_eq!(
            err.unwrap_err(),
            GatewayError::InvalidProvider("https://stranger.example.com".to_string())
        );
        assert_eq!(s.current().base(), "https://p1.example.com");
    }

    #[test]
    fn concurrent_repoints_leave_a_valid_pointer() {
        let s = Arc::new(selector(8));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let s = s.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        s.set_primary_by_index(i);
                        let order = s.order();
                        assert_eq!(order.len(), 8);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Final pointer is whichever writer landed last; it must be one of
        // the indices written and still in range.
        let final_index = s.order()[0].0;
        assert!(final_index < 8);
        assert_eq!(s.current().base(), format!("https://p{}.example.com", final_index));
    }
}

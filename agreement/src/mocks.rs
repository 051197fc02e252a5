//! Mock terms provider for testing.

use crate::error::{FetchError, Result};
use crate::item::Item;
use crate::provider::TermsProvider;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Mock terms provider.
///
/// Replays a script of results, one per fetch. Once the script is used up
/// every fetch gets the fallback result. Clones share the script and the
/// call counter.
#[derive(Debug, Clone)]
pub struct MockTermsProvider {
    script: Arc<Mutex<VecDeque<Result<Vec<Item>>>>>,
    fallback: Result<Vec<Item>>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl MockTermsProvider {
    /// Mock that always answers with `items`
    #[must_use]
    pub fn returning(items: Vec<Item>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Ok(items),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that always fails with `error`
    #[must_use]
    pub fn failing(error: FetchError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::returning(Vec::new())
        }
    }

    /// Queue a result for the next unscripted fetch
    #[must_use]
    pub fn then(self, result: Result<Vec<Item>>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
        self
    }

    /// Delay every answer
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches started so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TermsProvider for MockTermsProvider {
    fn fetch_items(&self) -> impl Future<Output = Result<Vec<Item>>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        let delay = self.delay;

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_fallback() {
        let mock = MockTermsProvider::returning(vec![Item::optional(1, "a")])
            .then(Err(FetchError::Provider("first".to_string())));

        assert!(mock.fetch_items().await.is_err());
        assert_eq!(mock.fetch_items().await.unwrap().len(), 1);
        assert_eq!(mock.fetch_items().await.unwrap().len(), 1);
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn clones_share_calls() {
        let mock = MockTermsProvider::failing(FetchError::Unavailable("down".to_string()));
        let clone = mock.clone();
        let _ = clone.fetch_items().await;
        assert_eq!(mock.calls(), 1);
    }
}

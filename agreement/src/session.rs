//! One screen's worth of state container.
//!
//! An [`AgreementSession`] owns the store (and with it the undo history) and
//! the notification emitter. Closing or dropping the session aborts any
//! fetch still in flight; its result is never applied.

use crate::config::AgreementConfig;
use crate::effect::AgreementEffect;
use crate::environment::AgreementEnvironment;
use crate::intent::{AgreementAction, AgreementIntent};
use crate::provider::TermsProvider;
use crate::reducer::AgreementReducer;
use crate::state::AgreementState;
use checklist_core::EffectEmitter;
use checklist_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use futures::Stream;
use tokio::sync::{broadcast, watch};

/// Store specialized for the agreement screen
pub type AgreementStore<P> =
    Store<AgreementState, AgreementAction, AgreementEnvironment<P>, AgreementReducer<P>>;

/// Agreement screen session
///
/// # Example
///
/// ```no_run
/// use checklist_agreement::{AgreementConfig, AgreementIntent, AgreementSession, FakeTermsApi};
///
/// # async fn example() -> Result<(), checklist_runtime::StoreError> {
/// let session = AgreementSession::open(FakeTermsApi::new(), AgreementConfig::default()).await?;
/// let mut effects = session.subscribe_effects();
///
/// session.handle_intent(AgreementIntent::SetRequiredOnly).await?;
/// session.handle_intent(AgreementIntent::Play).await?;
///
/// let toast = effects.recv().await;
/// # Ok(())
/// # }
/// ```
pub struct AgreementSession<P: TermsProvider> {
    store: AgreementStore<P>,
    effects: EffectEmitter<AgreementEffect>,
    config: AgreementConfig,
}

impl<P: TermsProvider> AgreementSession<P> {
    /// Create a session without loading anything
    #[must_use]
    pub fn new(provider: P, config: AgreementConfig) -> Self {
        let effects = EffectEmitter::new(config.effect_capacity);
        let environment = AgreementEnvironment::new(provider, effects.clone());
        let store = Store::with_config(
            AgreementState::new(config.history_capacity),
            AgreementReducer::new(),
            environment,
            StoreConfig::default().with_shutdown_timeout(config.shutdown_timeout),
        );

        tracing::info!(
            history_capacity = config.history_capacity,
            "Agreement session started"
        );

        Self {
            store,
            effects,
            config,
        }
    }

    /// Create a session and dispatch the initial `Load` when configured to
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial `Load` is rejected.
    pub async fn open(provider: P, config: AgreementConfig) -> Result<Self, StoreError> {
        let load = config.load_on_start;
        let session = Self::new(provider, config);
        if load {
            session.handle_intent(AgreementIntent::Load).await?;
        }
        Ok(session)
    }

    /// Submit a user intent
    ///
    /// The returned handle completes once the effects started by this intent
    /// finish (for `Load`, once the fetch result has been reduced).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the session is closed.
    pub async fn handle_intent(&self, intent: AgreementIntent) -> Result<EffectHandle, StoreError> {
        self.store.send(AgreementAction::Intent(intent)).await
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> AgreementState {
        self.store.current()
    }

    /// Watch the state; the receiver starts at the current value
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<AgreementState> {
        self.store.subscribe_state()
    }

    /// State updates as a stream, starting with the current state
    pub fn state_stream(&self) -> impl Stream<Item = AgreementState> + Send + 'static {
        self.store.state_stream()
    }

    /// Receive notifications emitted from now on
    #[must_use]
    pub fn subscribe_effects(&self) -> broadcast::Receiver<AgreementEffect> {
        self.effects.subscribe()
    }

    /// Notifications as a stream
    pub fn effect_stream(&self) -> impl Stream<Item = AgreementEffect> + Send + 'static {
        self.effects.stream()
    }

    /// Session configuration
    #[must_use]
    pub const fn config(&self) -> &AgreementConfig {
        &self.config
    }

    /// Whether the session has been closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.store.is_closed()
    }

    /// Stop accepting intents and abort in-flight work
    pub fn close(&self) {
        if !self.store.is_closed() {
            tracing::info!("Agreement session closed");
        }
        self.store.close();
    }

    /// Stop accepting intents and wait for running effects
    ///
    /// Waits at most the configured shutdown timeout, then aborts whatever
    /// is left. Results arriving after this call are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects were still running
    /// when the timeout elapsed.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        let result = self.store.shutdown_default().await;
        self.store.cancel_effects();
        result
    }
}

impl<P: TermsProvider> Drop for AgreementSession<P> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<P: TermsProvider> std::fmt::Debug for AgreementSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgreementSession")
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::mocks::MockTermsProvider;
    use checklist_testing::wait_for_state;
    use std::time::Duration;

    fn quiet() -> AgreementConfig {
        AgreementConfig::default().with_load_on_start(false)
    }

    #[tokio::test]
    async fn test_new_session_is_idle() {
        let session = AgreementSession::new(MockTermsProvider::returning(vec![]), quiet());
        assert_eq!(session.state(), AgreementState::default());
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_open_loads_items() {
        let mock = MockTermsProvider::returning(vec![Item::required(1, "Term 1")]);
        let session = AgreementSession::open(mock.clone(), AgreementConfig::default())
            .await
            .unwrap();
        let mut rx = session.subscribe_state();

        let loaded = wait_for_state(&mut rx, |s| !s.loading && !s.items.is_empty(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_closed_session_rejects_intents() {
        let session = AgreementSession::new(MockTermsProvider::returning(vec![]), quiet());
        session.close();

        let result = session.handle_intent(AgreementIntent::Play).await;
        assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
        assert!(session.state().logs.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_fetch() {
        let mock = MockTermsProvider::returning(vec![Item::optional(1, "a")])
            .with_delay(Duration::from_millis(20));
        let session = AgreementSession::new(mock, quiet());
        session.handle_intent(AgreementIntent::Load).await.unwrap();

        session.shutdown().await.unwrap();
        assert!(session.is_closed());

        // The fetch ran to completion but the closed session refused its result
        assert!(session.state().items.is_empty());
    }

    #[tokio::test]
    async fn test_drop_aborts_fetch() {
        let mock = MockTermsProvider::returning(vec![Item::optional(1, "a")])
            .with_delay(Duration::from_millis(200));
        let session = AgreementSession::new(mock, quiet());
        let mut rx = session.subscribe_state();
        let mut handle = session.handle_intent(AgreementIntent::Load).await.unwrap();
        assert!(rx.borrow_and_update().loading);

        drop(session);
        handle
            .wait_with_timeout(Duration::from_secs(1))
            .await
            .unwrap();

        assert!(rx.borrow().items.is_empty());
        assert!(rx.borrow().loading);
    }
}

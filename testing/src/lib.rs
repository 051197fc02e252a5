//! # Checklist Testing
//!
//! Testing utilities and helpers for the checklist reducer architecture.
//!
//! This crate provides:
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for returned effects
//! - Helpers that run effect descriptions without a store
//! - Helpers for observing store state in async tests
//!
//! ## Example
//!
//! ```ignore
//! use checklist_testing::{drain_effects, wait_for_state};
//!
//! #[tokio::test]
//! async fn test_load_flow() {
//!     let mut state = AgreementState::default();
//!     let effects = reducer.reduce(&mut state, AgreementAction::Intent(AgreementIntent::Load), &env);
//!
//!     let feedback = drain_effects(effects).await;
//!     assert_eq!(feedback.len(), 1);
//! }
//! ```


pub use reducer_test::{ReducerTest, assertions};

use checklist_core::effect::Effect;
use std::time::Duration;
use tokio::sync::watch;

/// Execute effect descriptions in-process and collect their feedback actions
///
/// `Future` effects are awaited in order; `None` yields nothing.
///
/// Feedback actions are returned, not reduced. Feed them back yourself to
/// step a reducer through a flow.
pub async fn drain_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut actions = Vec::new();
    for effect in effects {
        match effect {
            Effect::None => {},
            Effect::Future(fut) => actions.extend(fut.await),
        }
    }
    actions
}

/// Wait until a watched state satisfies `predicate`
///
/// Checks the current value first. Returns `None` on timeout or when the
/// sender is dropped.
pub async fn wait_for_state<S, F>(
    rx: &mut watch::Receiver<S>,
    predicate: F,
    timeout: Duration,
) -> Option<S>
where
    S: Clone,
    F: Fn(&S) -> bool,
{
    tokio::time::timeout(timeout, rx.wait_for(|state| predicate(state)))
        .await
        .ok()?
        .ok()
        .map(|state| state.clone())
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Honors `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

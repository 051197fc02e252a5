//! Agreement reducer: routes intents to transitions.
//!
//! Every mutating intent follows the same shape: compute the next item list,
//! and if it differs from the current one, snapshot the current list into the
//! history stack before replacing it. Unchanged transitions leave the history
//! alone.

use crate::effect::AgreementEffect;
use crate::environment::AgreementEnvironment;
use crate::intent::{AgreementAction, AgreementIntent};
use crate::item::Item;
use crate::provider::TermsProvider;
use crate::state::AgreementState;
use checklist_core::{Effect, Reducer, SmallVec, async_effect, emit, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Agreement reducer
///
/// Generic over the terms provider so the environment can be swapped in
/// tests.
#[derive(Debug)]
pub struct AgreementReducer<P> {
    _phantom: PhantomData<fn() -> P>,
}

impl<P> AgreementReducer<P> {
    /// Create a new agreement reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<P> Default for AgreementReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for AgreementReducer<P> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Log line listing the checked ids, e.g. `[PLAY] [1, 2]`
fn log_line(tag: &str, ids: &[i32]) -> String {
    format!("[{tag}] {ids:?}")
}

/// Replace the items, recording the previous list when anything changed
///
/// Returns whether the items changed.
fn commit_items(state: &mut AgreementState, next: Vec<Item>) -> bool {
    if next == state.items {
        return false;
    }

    if state.history.record(&state.items) {
        tracing::warn!(
            capacity = state.history.capacity(),
            "History full, oldest snapshot evicted"
        );
        metrics::counter!("agreement.history.evicted").increment(1);
    }

    state.items = next;
    state.history_available = true;
    true
}

impl<P: TermsProvider> AgreementReducer<P> {
    fn reduce_intent(
        state: &mut AgreementState,
        intent: AgreementIntent,
        env: &AgreementEnvironment<P>,
    ) -> SmallVec<[Effect<AgreementAction>; 4]> {
        match intent {
            AgreementIntent::Load => {
                if state.loading {
                    tracing::debug!("Load ignored: fetch already in flight");
                    return smallvec![Effect::None];
                }
                state.loading = true;

                let provider = Arc::clone(&env.provider);
                smallvec![async_effect! {
                    let action = match provider.fetch_items().await {
                        Ok(items) => AgreementAction::ItemsLoaded { items },
                        Err(error) => AgreementAction::LoadFailed {
                            reason: error.to_string(),
                        },
                    };
                    Some(action)
                }]
            },

            AgreementIntent::ToggleItem { id } => {
                let next = state
                    .items
                    .iter()
                    .map(|item| if item.id == id { item.toggled() } else { item.clone() })
                    .collect();
                if !commit_items(state, next) {
                    tracing::debug!(id, "Toggle ignored: unknown item");
                }
                smallvec![Effect::None]
            },

            AgreementIntent::SetAll { checked } => {
                let next = state
                    .items
                    .iter()
                    .map(|item| item.with_checked(checked))
                    .collect();
                commit_items(state, next);
                smallvec![Effect::None]
            },

            AgreementIntent::SetRequiredOnly => {
                let next = state
                    .items
                    .iter()
                    .map(|item| item.with_checked(item.required))
                    .collect();
                commit_items(state, next);
                smallvec![Effect::None]
            },

            AgreementIntent::Play => {
                let ids = state.checked_ids();
                state.logs.push(log_line("PLAY", &ids));
                tracing::info!(?ids, play_enabled = state.play_enabled(), "Play");

                smallvec![emit! {
                    emitter: env.effects,
                    value: AgreementEffect::ShowToast {
                        message: format!("Agreed: {ids:?}"),
                    }
                }]
            },

            AgreementIntent::Rewind => {
                let Some(snapshot) = state.history.pop() else {
                    tracing::debug!("Rewind ignored: history empty");
                    return smallvec![Effect::None];
                };

                state.items = snapshot.to_vec();
                let ids = state.checked_ids();
                state.logs.push(log_line("REWIND", &ids));
                state.history_available = !state.history.is_empty();
                smallvec![Effect::None]
            },
        }
    }
}

impl<P: TermsProvider> Reducer for AgreementReducer<P> {
    type State = AgreementState;
    type Action = AgreementAction;
    type Environment = AgreementEnvironment<P>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AgreementAction::Intent(intent) => {
                tracing::debug!(?intent, "Handling intent");
                Self::reduce_intent(state, intent, env)
            },

            AgreementAction::ItemsLoaded { items } => {
                tracing::debug!(count = items.len(), "Items loaded");
                state.loading = false;
                state.items = items;
                smallvec![Effect::None]
            },

            AgreementAction::LoadFailed { reason } => {
                tracing::warn!(%reason, "Loading agreement items failed");
                metrics::counter!("agreement.load.failed").increment(1);
                state.loading = false;

                smallvec![emit! {
                    emitter: env.effects,
                    value: AgreementEffect::ShowError {
                        message: format!("Failed to load agreement items: {reason}"),
                    }
                }]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::MockTermsProvider;
    use crate::error::FetchError;
    use checklist_core::EffectEmitter;
    use checklist_testing::{ReducerTest, assertions, drain_effects};

    type TestReducer = AgreementReducer<MockTermsProvider>;

    fn defaults() -> Vec<Item> {
        vec![
            Item::required(1, "Term 1"),
            Item::required(2, "Term 2"),
            Item::optional(3, "Term 3"),
        ]
    }

    fn test_env() -> AgreementEnvironment<MockTermsProvider> {
        AgreementEnvironment::new(MockTermsProvider::returning(defaults()), EffectEmitter::new(8))
    }

    fn intent(intent: AgreementIntent) -> AgreementAction {
        AgreementAction::Intent(intent)
    }

    fn reduce(state: &mut AgreementState, env: &AgreementEnvironment<MockTermsProvider>, i: AgreementIntent) {
        let _ = TestReducer::new().reduce(state, intent(i), env);
    }

    #[test]
    fn test_toggle_flips_one_item() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_action(intent(AgreementIntent::ToggleItem { id: 2 }))
            .then_state(|state| {
                assert!(!state.items[0].checked);
                assert!(state.items[1].checked);
                assert!(!state.items[2].checked);
                assert!(state.history_available);
                assert_eq!(state.history_len(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_action(intent(AgreementIntent::ToggleItem { id: 99 }))
            .then_state(|state| {
                assert_eq!(state.items, defaults());
                assert!(!state.history_available);
                assert_eq!(state.history_len(), 0);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_set_all_then_rewind() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_action(intent(AgreementIntent::SetAll { checked: true }))
            .when_action(intent(AgreementIntent::Rewind))
            .then_state(|state| {
                assert!(state.none_agreed());
                assert!(!state.history_available);
                assert_eq!(state.logs, vec!["[REWIND] []".to_string()]);
            })
            .run();
    }

    #[test]
    fn test_set_required_only() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_action(intent(AgreementIntent::SetRequiredOnly))
            .then_state(|state| {
                assert_eq!(state.checked_ids(), vec![1, 2]);
                assert!(state.required_only_agreed());
                assert!(!state.all_agreed());
                assert!(state.play_enabled());
            })
            .run();
    }

    #[test]
    fn test_idempotent_bulk_intents_skip_history() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_actions([
                intent(AgreementIntent::SetAll { checked: true }),
                intent(AgreementIntent::SetAll { checked: true }),
                intent(AgreementIntent::SetRequiredOnly),
                intent(AgreementIntent::SetRequiredOnly),
            ])
            .then_state(|state| {
                assert_eq!(state.history_len(), 2);
            })
            .run();
    }

    #[test]
    fn test_rewind_on_empty_history_is_noop() {
        let mut state = AgreementState::with_items(defaults());
        state.logs.push("[PLAY] []".to_string());
        let before = state.clone();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(intent(AgreementIntent::Rewind))
            .then_state(move |state| {
                assert_eq!(*state, before);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_rewind_logs_restored_selection() {
        let env = test_env();
        let mut state = AgreementState::with_items(defaults());

        reduce(&mut state, &env, AgreementIntent::ToggleItem { id: 1 });
        reduce(&mut state, &env, AgreementIntent::ToggleItem { id: 3 });
        reduce(&mut state, &env, AgreementIntent::Rewind);

        assert_eq!(state.checked_ids(), vec![1]);
        assert_eq!(state.logs, vec!["[REWIND] [1]".to_string()]);
        assert!(state.history_available);

        reduce(&mut state, &env, AgreementIntent::Rewind);
        assert!(state.none_agreed());
        assert!(!state.history_available);
    }

    #[tokio::test]
    async fn test_play_logs_and_toasts() {
        let env = test_env();
        let mut toasts = env.effects.subscribe();
        let mut state = AgreementState::with_items(defaults());
        reduce(&mut state, &env, AgreementIntent::SetRequiredOnly);

        let effects = TestReducer::new().reduce(&mut state, intent(AgreementIntent::Play), &env);
        assertions::assert_has_future_effect(&effects);
        assert_eq!(state.logs, vec!["[PLAY] [1, 2]".to_string()]);

        // Emitted only when the effect runs
        assert!(toasts.try_recv().is_err());
        let feedback = drain_effects(effects).await;
        assert!(feedback.is_empty());
        assert_eq!(
            toasts.try_recv().unwrap(),
            AgreementEffect::ShowToast {
                message: "Agreed: [1, 2]".to_string()
            }
        );
        assert!(toasts.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_load_success_feeds_items_back() {
        let env = test_env();
        let mut state = AgreementState::default();

        let effects = TestReducer::new().reduce(&mut state, intent(AgreementIntent::Load), &env);
        assert!(state.loading);

        let feedback = drain_effects(effects).await;
        assert_eq!(feedback, vec![AgreementAction::ItemsLoaded { items: defaults() }]);

        for action in feedback {
            let _ = TestReducer::new().reduce(&mut state, action, &env);
        }
        assert!(!state.loading);
        assert_eq!(state.items, defaults());
        assert!(state.none_agreed());
    }

    #[tokio::test]
    async fn test_load_failure_emits_single_error() {
        let env = AgreementEnvironment::new(
            MockTermsProvider::failing(FetchError::Unavailable("offline".to_string())),
            EffectEmitter::new(8),
        );
        let mut errors = env.effects.subscribe();
        let mut state = AgreementState::with_items(defaults());

        let effects = TestReducer::new().reduce(&mut state, intent(AgreementIntent::Load), &env);
        let feedback = drain_effects(effects).await;
        assert!(matches!(feedback.as_slice(), [AgreementAction::LoadFailed { .. }]));

        for action in feedback {
            let effects = TestReducer::new().reduce(&mut state, action, &env);
            drain_effects(effects).await;
        }

        assert!(!state.loading);
        assert_eq!(state.items, defaults());
        let error = errors.try_recv().unwrap();
        assert!(error.is_error());
        assert_eq!(
            error.message(),
            "Failed to load agreement items: terms source unavailable: offline"
        );
        assert!(errors.try_recv().is_err());
    }

    #[test]
    fn test_load_while_loading_is_ignored() {
        let mut state = AgreementState::default();
        state.loading = true;

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(intent(AgreementIntent::Load))
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reload_keeps_history() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AgreementState::with_items(defaults()))
            .when_action(intent(AgreementIntent::SetAll { checked: true }))
            .when_action(AgreementAction::ItemsLoaded { items: defaults() })
            .then_state(|state| {
                assert!(!state.loading);
                assert!(state.none_agreed());
                assert!(state.history_available);
                assert_eq!(state.history_len(), 1);
            })
            .run();
    }

    #[test]
    fn test_rewind_after_reload_restores_snapshot() {
        let env = test_env();
        let mut state = AgreementState::with_items(defaults());

        reduce(&mut state, &env, AgreementIntent::ToggleItem { id: 2 });
        reduce(&mut state, &env, AgreementIntent::SetAll { checked: true });
        let _ = TestReducer::new().reduce(
            &mut state,
            AgreementAction::ItemsLoaded { items: defaults() },
            &env,
        );
        assert!(state.none_agreed());

        reduce(&mut state, &env, AgreementIntent::Rewind);
        assert_eq!(state.checked_ids(), vec![2]);
        assert_eq!(state.logs, vec!["[REWIND] [2]".to_string()]);
        assert!(state.history_available);
    }

    #[test]
    fn test_history_bound_evicts_oldest() {
        let env = test_env();
        let mut state = AgreementState::new(2);
        state.items = defaults();

        for id in [1, 2, 3] {
            reduce(&mut state, &env, AgreementIntent::ToggleItem { id });
        }
        assert_eq!(state.history_len(), 2);

        reduce(&mut state, &env, AgreementIntent::Rewind);
        reduce(&mut state, &env, AgreementIntent::Rewind);
        reduce(&mut state, &env, AgreementIntent::Rewind);

        // The snapshot before the first toggle was evicted
        assert_eq!(state.checked_ids(), vec![1]);
        assert!(!state.history_available);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_intent() -> impl Strategy<Value = AgreementIntent> {
            prop_oneof![
                (0..5i32).prop_map(|id| AgreementIntent::ToggleItem { id }),
                any::<bool>().prop_map(|checked| AgreementIntent::SetAll { checked }),
                Just(AgreementIntent::SetRequiredOnly),
                Just(AgreementIntent::Play),
                Just(AgreementIntent::Rewind),
            ]
        }

        fn mutates(intent: &AgreementIntent) -> bool {
            matches!(
                intent,
                AgreementIntent::ToggleItem { .. }
                    | AgreementIntent::SetAll { .. }
                    | AgreementIntent::SetRequiredOnly
            )
        }

        proptest! {
            #[test]
            fn set_all_is_idempotent(checked in any::<bool>(), intents in prop::collection::vec(arb_intent(), 0..10)) {
                let env = test_env();
                let mut state = AgreementState::with_items(defaults());
                for i in intents {
                    reduce(&mut state, &env, i);
                }

                reduce(&mut state, &env, AgreementIntent::SetAll { checked });
                let once = state.items.clone();
                reduce(&mut state, &env, AgreementIntent::SetAll { checked });
                prop_assert_eq!(state.items, once);
            }

            #[test]
            fn toggle_twice_restores_item(id in 1..=3i32, intents in prop::collection::vec(arb_intent(), 0..10)) {
                let env = test_env();
                let mut state = AgreementState::with_items(defaults());
                for i in intents {
                    reduce(&mut state, &env, i);
                }

                let before = state.items.clone();
                reduce(&mut state, &env, AgreementIntent::ToggleItem { id });
                reduce(&mut state, &env, AgreementIntent::ToggleItem { id });
                prop_assert_eq!(state.items, before);
            }

            #[test]
            fn rewind_restores_items_before_last_change(intents in prop::collection::vec(arb_intent().prop_filter("mutating", mutates), 1..20)) {
                let env = test_env();
                let mut state = AgreementState::with_items(defaults());
                let mut before_last_change = None;

                for i in intents {
                    let before = state.items.clone();
                    reduce(&mut state, &env, i);
                    if state.items != before {
                        before_last_change = Some(before);
                    }
                }

                reduce(&mut state, &env, AgreementIntent::Rewind);
                if let Some(expected) = before_last_change {
                    prop_assert_eq!(state.items, expected);
                } else {
                    prop_assert_eq!(state.items, defaults());
                }
            }

            #[test]
            fn rewind_on_empty_history_changes_nothing(intents in prop::collection::vec(arb_intent(), 0..10)) {
                let env = test_env();
                let mut state = AgreementState::with_items(defaults());
                for i in intents {
                    reduce(&mut state, &env, i);
                }
                while state.history_available {
                    reduce(&mut state, &env, AgreementIntent::Rewind);
                }

                let before = state.clone();
                reduce(&mut state, &env, AgreementIntent::Rewind);
                prop_assert_eq!(state, before);
            }

            #[test]
            fn history_available_tracks_stack(intents in prop::collection::vec(arb_intent(), 0..30)) {
                let env = test_env();
                let mut state = AgreementState::with_items(defaults());
                for i in intents {
                    reduce(&mut state, &env, i);
                    prop_assert_eq!(state.history_available, state.history_len() > 0);
                }
            }
        }
    }
}

//! Injected dependencies of the agreement reducer.

use crate::effect::AgreementEffect;
use crate::provider::TermsProvider;
use checklist_core::EffectEmitter;
use std::sync::Arc;

/// Agreement environment
///
/// Holds the terms source used by `Load` and the emitter one-shot
/// notifications are published through.
#[derive(Debug)]
pub struct AgreementEnvironment<P> {
    /// Source of the initial terms
    pub provider: Arc<P>,
    /// Outlet for toasts and error popups
    pub effects: EffectEmitter<AgreementEffect>,
}

impl<P: TermsProvider> AgreementEnvironment<P> {
    /// Create an environment
    #[must_use]
    pub fn new(provider: P, effects: EffectEmitter<AgreementEffect>) -> Self {
        Self {
            provider: Arc::new(provider),
            effects,
        }
    }
}

impl<P> Clone for AgreementEnvironment<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            effects: self.effects.clone(),
        }
    }
}

//! # Agreement Checklist
//!
//! A single-screen "agree to the terms" checklist built on the checklist
//! reducer architecture.
//!
//! This crate showcases:
//! - Value-typed items with derived aggregate flags
//! - Snapshot-based undo with a bounded history
//! - Async loading through an injected [`TermsProvider`]
//! - One-shot notifications (toasts, errors) kept out of state
//!
//! ## Architecture
//!
//! ```text
//! AgreementIntent ──▶ Store::send ──▶ AgreementReducer ──▶ AgreementState (watch)
//!                                         │
//!                                         ├─ Effect::Future(fetch) ──▶ ItemsLoaded / LoadFailed
//!                                         └─ emit! ──▶ AgreementEffect (broadcast)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use checklist_agreement::{AgreementConfig, AgreementIntent, AgreementSession, FakeTermsApi};
//!
//! # async fn example() -> Result<(), checklist_runtime::StoreError> {
//! let session = AgreementSession::open(FakeTermsApi::new(), AgreementConfig::default()).await?;
//!
//! session.handle_intent(AgreementIntent::SetAll { checked: true }).await?;
//! assert!(session.state().all_agreed());
//!
//! session.handle_intent(AgreementIntent::Rewind).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod derived;
pub mod effect;
pub mod environment;
pub mod error;
pub mod history;
pub mod intent;
pub mod item;
pub mod mocks;
pub mod provider;
pub mod reducer;
pub mod session;
pub mod state;

pub use config::AgreementConfig;
pub use effect::AgreementEffect;
pub use environment::AgreementEnvironment;
pub use error::FetchError;
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryStack, Snapshot};
pub use intent::{AgreementAction, AgreementIntent};
pub use item::Item;
pub use mocks::MockTermsProvider;
pub use provider::{FakeTermsApi, JsonTermsProvider, TermDto, TermsProvider, default_terms};
pub use reducer::AgreementReducer;
pub use session::{AgreementSession, AgreementStore};
pub use state::AgreementState;

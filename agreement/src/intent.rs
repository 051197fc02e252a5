//! Reducer inputs.

use crate::item::Item;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementIntent {
    /// Fetch the terms
    Load,
    /// Flip one term
    ToggleItem {
        /// Target item
        id: i32,
    },
    /// Check or uncheck every term
    SetAll {
        /// New value for every item
        checked: bool,
    },
    /// Check exactly the required terms
    SetRequiredOnly,
    /// Confirm the current selection
    Play,
    /// Undo the last change to the terms
    Rewind,
}

/// Everything the agreement reducer handles
///
/// `ItemsLoaded` and `LoadFailed` are produced only by the fetch effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementAction {
    /// A user intent
    Intent(AgreementIntent),
    /// Fetch finished
    ItemsLoaded {
        /// Fetched terms
        items: Vec<Item>,
    },
    /// Fetch failed
    LoadFailed {
        /// Human-readable cause
        reason: String,
    },
}

impl From<AgreementIntent> for AgreementAction {
    fn from(intent: AgreementIntent) -> Self {
        Self::Intent(intent)
    }
}

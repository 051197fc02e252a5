//! Screen state.

use crate::derived;
use crate::history::{DEFAULT_HISTORY_CAPACITY, HistoryStack};
use crate::item::Item;

/// Everything the agreement screen renders
///
/// The undo history travels with the state so the reducer stays the only
/// writer, but it is private and ignored by equality: two states render the
/// same when their visible fields match.
#[derive(Debug, Clone)]
pub struct AgreementState {
    /// A fetch is in flight
    pub loading: bool,
    /// Current terms
    pub items: Vec<Item>,
    /// Activity log, oldest first
    pub logs: Vec<String>,
    /// Whether `Rewind` would restore anything
    pub history_available: bool,
    pub(crate) history: HistoryStack,
}

impl AgreementState {
    /// Empty state with a history of the given depth
    #[must_use]
    pub fn new(history_capacity: usize) -> Self {
        Self {
            loading: false,
            items: Vec::new(),
            logs: Vec::new(),
            history_available: false,
            history: HistoryStack::new(history_capacity),
        }
    }

    /// State already holding `items`, with default history depth
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Number of undo steps currently stored
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Maximum number of undo steps
    #[must_use]
    pub const fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// See [`derived::all_agreed`]
    #[must_use]
    pub fn all_agreed(&self) -> bool {
        derived::all_agreed(&self.items)
    }

    /// See [`derived::required_only_agreed`]
    #[must_use]
    pub fn required_only_agreed(&self) -> bool {
        derived::required_only_agreed(&self.items)
    }

    /// See [`derived::partially_agreed`]
    #[must_use]
    pub fn partially_agreed(&self) -> bool {
        derived::partially_agreed(&self.items)
    }

    /// See [`derived::none_agreed`]
    #[must_use]
    pub fn none_agreed(&self) -> bool {
        derived::none_agreed(&self.items)
    }

    /// See [`derived::play_enabled`]
    #[must_use]
    pub fn play_enabled(&self) -> bool {
        derived::play_enabled(&self.items)
    }

    /// Ids of the checked items
    #[must_use]
    pub fn checked_ids(&self) -> Vec<i32> {
        derived::checked_ids(&self.items)
    }

    /// Item with the given id
    #[must_use]
    pub fn item(&self, id: i32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Default for AgreementState {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PartialEq for AgreementState {
    fn eq(&self, other: &Self) -> bool {
        self.loading == other.loading
            && self.items == other.items
            && self.logs == other.logs
            && self.history_available == other.history_available
    }
}

impl Eq for AgreementState {}

//! The checkable term.

use serde::{Deserialize, Serialize};

/// A single term the user can agree to
///
/// Items are values: transitions build new items with [`Item::with_checked`]
/// or [`Item::toggled`] instead of flipping fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique within a list
    pub id: i32,
    /// Display text
    pub title: String,
    /// Whether the user has agreed to this term
    pub checked: bool,
    /// Whether agreement is mandatory
    pub required: bool,
}

impl Item {
    /// Create an unchecked item
    #[must_use]
    pub fn new(id: i32, title: impl Into<String>, required: bool) -> Self {
        Self {
            id,
            title: title.into(),
            checked: false,
            required,
        }
    }

    /// Create an unchecked mandatory item
    #[must_use]
    pub fn required(id: i32, title: impl Into<String>) -> Self {
        Self::new(id, title, true)
    }

    /// Create an unchecked optional item
    #[must_use]
    pub fn optional(id: i32, title: impl Into<String>) -> Self {
        Self::new(id, title, false)
    }

    /// Copy of this item with `checked` replaced
    #[must_use]
    pub fn with_checked(&self, checked: bool) -> Self {
        Self {
            checked,
            ..self.clone()
        }
    }

    /// Copy of this item with `checked` flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        self.with_checked(!self.checked)
    }
}

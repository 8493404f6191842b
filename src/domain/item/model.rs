//! Item domain entity and its assembled view

use crate::domain::comment::Comment;
use crate::domain::reservation::ItemAvailability;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    /// Whether new reservations may be made
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ItemPatch {
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}

/// Item as presented to a viewer.
///
/// `availability` is only filled in for the item's owner.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub item: Item,
    pub availability: Option<ItemAvailability>,
    pub comments: Vec<Comment>,
}

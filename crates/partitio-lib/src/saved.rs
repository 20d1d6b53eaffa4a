use chrono::{DateTime, Utc};

use crate::Id;

/// A persisted composition-list entry, produced when the editor saves.
/// `content` is the text rendering from [`crate::Composition::render_text`];
/// nothing re-parses it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedComposition {
    pub id: Id<SavedComposition>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_public: bool,
}

impl SavedComposition {
    /// Fresh entry stamped with the current time. Not publicly shared by
    /// default; nothing in the editor toggles that yet.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Id::arbitrary(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            last_modified: now,
            is_public: false,
        }
    }
}

use chrono::{DateTime, Utc};

use crate::Id;

/// Difficulty rating shown on catalog cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Débutant",
            Difficulty::Intermediate => "Intermédiaire",
            Difficulty::Advanced => "Avancé",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One browsable sheet in the catalog.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetMusic {
    pub id: Id<SheetMusic>,
    pub title: String,
    pub composer: String,
    pub genre: String,
    pub difficulty: Difficulty,
    pub thumbnail: String,
    pub download_url: Option<String>,
    pub is_downloaded: bool,
    pub date_added: DateTime<Utc>,
    /// Megabytes, when known.
    pub file_size: Option<f32>,
}

impl SheetMusic {
    pub fn new(
        title: impl Into<String>,
        composer: impl Into<String>,
        genre: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: Id::arbitrary(),
            title: title.into(),
            composer: composer.into(),
            genre: genre.into(),
            difficulty,
            thumbnail: String::new(),
            download_url: None,
            is_downloaded: false,
            date_added: Utc::now(),
            file_size: None,
        }
    }
}

/// The signed-in user's profile.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: Id<User>,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    /// Megabytes.
    pub storage_used: f32,
    pub storage_limit: f32,
}

use chrono::Utc;
use partitio_lib::{Difficulty, Id, SavedComposition, SheetMusic, User};

/// Catalog search filters. An empty string — or the "Tous" chip — means the
/// criterion doesn't restrict anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub genre: String,
    pub difficulty: String,
    pub composer: String,
}

/// Partial filter update; `None` fields keep their current value.
#[derive(Clone, Debug, Default)]
pub struct SearchFilterPatch {
    pub genre: Option<String>,
    pub difficulty: Option<String>,
    pub composer: Option<String>,
}

/// Application-wide state, owned by the root of the app and handed down to
/// the screens. All mutation goes through the named update functions below;
/// everything runs on the UI thread, so the most recent user action wins.
#[derive(Debug)]
pub struct AppState {
    user: Option<User>,

    sheet_music: Vec<SheetMusic>,
    // download order; kept synchronized with the `is_downloaded` flags
    downloads: Vec<Id<SheetMusic>>,

    compositions: Vec<SavedComposition>,

    is_menu_drawer_open: bool,
    is_composer_drawer_open: bool,

    search_query: String,
    search_filters: SearchFilters,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: Some(demo_user()),
            sheet_music: demo_catalog(),
            downloads: Vec::new(),
            compositions: demo_compositions(),
            is_menu_drawer_open: false,
            is_composer_drawer_open: false,
            search_query: String::new(),
            search_filters: SearchFilters::default(),
        }
    }
}

impl AppState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn sheet_music(&self) -> &[SheetMusic] {
        &self.sheet_music
    }
    pub fn sheet(&self, id: Id<SheetMusic>) -> Option<&SheetMusic> {
        self.sheet_music.iter().find(|sheet| sheet.id == id)
    }
    pub fn add_sheet_music(&mut self, sheet: SheetMusic) {
        self.sheet_music.push(sheet);
    }

    /// Marks a sheet as downloaded and records it in the download list.
    /// Unknown ids and repeated downloads change nothing.
    pub fn download_sheet(&mut self, id: Id<SheetMusic>) {
        let Some(sheet) = self.sheet_music.iter_mut().find(|sheet| sheet.id == id) else {
            return;
        };
        if sheet.is_downloaded && self.downloads.contains(&id) {
            return;
        }
        sheet.is_downloaded = true;
        if !self.downloads.contains(&id) {
            self.downloads.push(id);
        }
        tracing::debug!(?id, title = %sheet.title, "sheet downloaded");
    }

    pub fn remove_download(&mut self, id: Id<SheetMusic>) {
        if let Some(sheet) = self.sheet_music.iter_mut().find(|sheet| sheet.id == id) {
            sheet.is_downloaded = false;
        }
        self.downloads.retain(|&other| other != id);
    }

    /// Downloaded sheets in download order.
    pub fn downloaded_sheets(&self) -> impl Iterator<Item = &SheetMusic> {
        self.downloads.iter().filter_map(|&id| self.sheet(id))
    }

    pub fn compositions(&self) -> &[SavedComposition] {
        &self.compositions
    }
    pub fn add_composition(&mut self, composition: SavedComposition) {
        self.compositions.push(composition);
    }

    /// Applies `update` to the entry with `id` and bumps its `last_modified`.
    /// Returns whether the entry existed.
    pub fn update_composition(
        &mut self,
        id: Id<SavedComposition>,
        update: impl FnOnce(&mut SavedComposition),
    ) -> bool {
        let Some(entry) = self.compositions.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        update(entry);
        entry.last_modified = Utc::now();
        true
    }

    pub fn delete_composition(&mut self, id: Id<SavedComposition>) -> bool {
        let before = self.compositions.len();
        self.compositions.retain(|entry| entry.id != id);
        self.compositions.len() != before
    }

    pub fn is_menu_drawer_open(&self) -> bool {
        self.is_menu_drawer_open
    }
    pub fn set_menu_drawer_open(&mut self, open: bool) {
        self.is_menu_drawer_open = open;
    }
    pub fn is_composer_drawer_open(&self) -> bool {
        self.is_composer_drawer_open
    }
    pub fn set_composer_drawer_open(&mut self, open: bool) {
        self.is_composer_drawer_open = open;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_filters(&self) -> &SearchFilters {
        &self.search_filters
    }
    pub fn set_search_filters(&mut self, patch: SearchFilterPatch) {
        if let Some(genre) = patch.genre {
            self.search_filters.genre = genre;
        }
        if let Some(difficulty) = patch.difficulty {
            self.search_filters.difficulty = difficulty;
        }
        if let Some(composer) = patch.composer {
            self.search_filters.composer = composer;
        }
    }

    /// Catalog entries matching the current query and filters: the query is a
    /// case-insensitive substring of the title or the composer, and each set
    /// filter must match exactly.
    pub fn filtered_sheets(&self) -> Vec<&SheetMusic> {
        fn passes(filter: &str, value: &str) -> bool {
            filter.is_empty() || filter == "Tous" || filter == value
        }

        let query = self.search_query.to_lowercase();
        self.sheet_music
            .iter()
            .filter(|sheet| {
                let matches_query = sheet.title.to_lowercase().contains(&query)
                    || sheet.composer.to_lowercase().contains(&query);
                matches_query
                    && passes(&self.search_filters.genre, &sheet.genre)
                    && passes(
                        &self.search_filters.difficulty,
                        sheet.difficulty.display_name(),
                    )
                    && passes(&self.search_filters.composer, &sheet.composer)
            })
            .collect()
    }
}

fn demo_user() -> User {
    User {
        id: Id::arbitrary(),
        name: "Utilisateur".into(),
        email: "user@partitio.com".into(),
        avatar: None,
        storage_used: 25.2,
        storage_limit: 100.0,
    }
}

fn demo_catalog() -> Vec<SheetMusic> {
    let mut clair_de_lune = SheetMusic::new(
        "Clair de Lune",
        "Claude Debussy",
        "Classique",
        Difficulty::Intermediate,
    );
    clair_de_lune.thumbnail =
        "https://images.pexels.com/photos/164743/pexels-photo-164743.jpeg".into();
    clair_de_lune.is_downloaded = true;
    clair_de_lune.file_size = Some(2.4);

    let mut fur_elise = SheetMusic::new(
        "Für Elise",
        "Ludwig van Beethoven",
        "Classique",
        Difficulty::Beginner,
    );
    fur_elise.thumbnail =
        "https://images.pexels.com/photos/1407322/pexels-photo-1407322.jpeg".into();
    fur_elise.file_size = Some(1.8);

    let mut canon = SheetMusic::new(
        "Canon en Ré",
        "Johann Pachelbel",
        "Classique",
        Difficulty::Intermediate,
    );
    canon.thumbnail = "https://images.pexels.com/photos/1246437/pexels-photo-1246437.jpeg".into();
    canon.is_downloaded = true;
    canon.file_size = Some(3.1);

    vec![clair_de_lune, fur_elise, canon]
}

fn demo_compositions() -> Vec<SavedComposition> {
    vec![SavedComposition::new(
        "Ma première composition",
        "C G Am F",
    )]
}

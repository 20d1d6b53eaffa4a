mod editor;
pub use editor::{DeletePrompt, Editor, EditorUiState, SaveError};
mod store;
pub use store::{AppState, SearchFilterPatch, SearchFilters};

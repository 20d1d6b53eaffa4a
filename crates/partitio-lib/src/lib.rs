mod id;
pub use id::{Id, IdMap};
mod section;
pub use section::{Section, SectionKind, SectionStats, Voice};
mod composition;
pub use composition::{Composition, KEY_PRESETS, MoveDirection, TEMPO_PRESETS};
mod catalog;
pub use catalog::{Difficulty, SheetMusic, User};
mod saved;
pub use saved::SavedComposition;

#[cfg(feature = "serde")]
mod serde;

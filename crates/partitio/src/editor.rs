use partitio_command::metadata::{MetadataField, MetadataUpdate};
use partitio_command::section::{SectionAddOrRemove, SectionDuplicate, SectionMove, SectionRename};
use partitio_command::voice::{VoiceAppend, VoiceBackspace, VoiceReplace};
use partitio_command::{StateCommand, StateTracker};
use partitio_lib::{
    Composition, Id, MoveDirection, SavedComposition, Section, SectionKind, Voice,
};
use thiserror::Error;

use crate::AppState;

/// Transient selection state: which section and voice receive keyboard input.
/// Not part of the document — it never survives the editor and is mutated
/// directly rather than through commands.
#[derive(Clone, Copy, Debug)]
pub struct EditorUiState {
    pub active_section: Option<Id<Section>>,
    pub active_voice: Voice,
}

/// Confirmation request for a section delete. The caller shows it and either
/// calls [`Editor::confirm_delete_section`] or drops it, which leaves the
/// document untouched.
#[derive(Clone, Debug)]
pub struct DeletePrompt {
    pub section_id: Id<Section>,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("Veuillez saisir un titre pour votre composition")]
    EmptyTitle,
}

/// The composition editor: the document, the selection, and the history of
/// applied commands. Every document mutation funnels through
/// `partitio-command` so it can be rolled back.
pub struct Editor {
    composition: Composition,
    ui: EditorUiState,
    history: StateTracker,
}

impl Editor {
    /// Fresh document: default metadata plus one verse section, which starts
    /// out active with the soprano voice focused.
    pub fn new() -> Self {
        let mut composition = Composition::default();
        let id = Id::arbitrary();
        let name = composition.next_section_name(SectionKind::Verse);
        composition.push_section(id, Section::empty(name));

        Self {
            composition,
            ui: EditorUiState {
                active_section: Some(id),
                active_voice: Voice::Soprano,
            },
            history: StateTracker::new(),
        }
    }

    /// Opens an existing document. The first section, if any, becomes active.
    pub fn with_composition(composition: Composition) -> Self {
        let active_section = composition.first_section();
        Self {
            composition,
            ui: EditorUiState {
                active_section,
                active_voice: Voice::Soprano,
            },
            history: StateTracker::new(),
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }
    pub fn ui(&self) -> &EditorUiState {
        &self.ui
    }
    pub fn active_section(&self) -> Option<Id<Section>> {
        self.ui.active_section
    }
    pub fn active_voice(&self) -> Voice {
        self.ui.active_voice
    }

    fn apply(&mut self, mut command: impl StateCommand) {
        command.execute(&mut self.composition);
        self.history.add(command);
    }

    /// Rolls back the most recent command. Returns whether anything happened.
    pub fn undo(&mut self) -> bool {
        let Some(mut command) = self.history.pop() else {
            return false;
        };
        command.rollback(&mut self.composition);
        // the rollback may have removed the selected section
        if let Some(id) = self.ui.active_section {
            if !self.composition.has_section(id) {
                self.ui.active_section = self.composition.first_section();
            }
        }
        true
    }

    pub fn update_title(&mut self, value: impl Into<String>) {
        self.apply(MetadataUpdate::new(MetadataField::Title, value.into()));
    }
    pub fn update_tempo(&mut self, value: impl Into<String>) {
        self.apply(MetadataUpdate::new(MetadataField::Tempo, value.into()));
    }
    pub fn update_key(&mut self, value: impl Into<String>) {
        self.apply(MetadataUpdate::new(MetadataField::Key, value.into()));
    }

    /// Appends a new empty section named after `kind` and selects it.
    pub fn add_section(&mut self, kind: SectionKind) -> Id<Section> {
        let id = Id::arbitrary();
        let name = self.composition.next_section_name(kind);
        tracing::debug!(?id, name = %name, "adding section");
        self.apply(SectionAddOrRemove::addition(id, Section::empty(name)));
        self.ui.active_section = Some(id);
        id
    }

    /// First half of the destructive delete: the confirmation prompt.
    /// `None` for an unknown id.
    pub fn request_delete_section(&self, id: Id<Section>) -> Option<DeletePrompt> {
        let section = self.composition.section(id)?;
        Some(DeletePrompt {
            section_id: id,
            title: "Supprimer la section".into(),
            message: format!("Êtes-vous sûr de vouloir supprimer \"{}\" ?", section.name),
        })
    }

    /// Second half of the destructive delete, after the user confirmed.
    /// Deleting an unknown id is a no-op. A dangling active selection is
    /// repaired immediately: first remaining section, or none at all.
    pub fn confirm_delete_section(&mut self, id: Id<Section>) {
        tracing::debug!(?id, "deleting section");
        self.apply(SectionAddOrRemove::removal(id));
        if self.ui.active_section == Some(id) {
            self.ui.active_section = self.composition.first_section();
        }
    }

    /// Duplicates a section to the end of the list. The selection stays where
    /// it was. `None` for an unknown id.
    pub fn duplicate_section(&mut self, id: Id<Section>) -> Option<Id<Section>> {
        if !self.composition.has_section(id) {
            return None;
        }
        let new_id = Id::arbitrary();
        self.apply(SectionDuplicate::new(id, new_id));
        Some(new_id)
    }

    pub fn rename_section(&mut self, id: Id<Section>, name: impl Into<String>) {
        self.apply(SectionRename::new(id, name.into()));
    }

    pub fn move_section_up(&mut self, index: usize) {
        self.apply(SectionMove::new(index, MoveDirection::Up));
    }
    pub fn move_section_down(&mut self, index: usize) {
        self.apply(SectionMove::new(index, MoveDirection::Down));
    }

    /// Selects a section. Unknown ids are ignored so the selection can only
    /// ever point at a live section.
    pub fn set_active_section(&mut self, id: Id<Section>) {
        if self.composition.has_section(id) {
            self.ui.active_section = Some(id);
        }
    }
    pub fn set_active_voice(&mut self, voice: Voice) {
        self.ui.active_voice = voice;
    }

    /// Both a staff tap and a keyboard focus land here: select, then type.
    pub fn focus_staff(&mut self, voice: Voice, section_id: Id<Section>) {
        self.set_active_voice(voice);
        self.set_active_section(section_id);
    }

    /// Appends a note token (plus its trailing space) to the focused voice.
    /// Does nothing when no section is selected.
    pub fn insert_note(&mut self, token: &str) {
        let Some(section_id) = self.ui.active_section else {
            return;
        };
        self.apply(VoiceAppend::note(section_id, self.ui.active_voice, token));
    }

    /// Appends a raw symbol, with no added spacing.
    pub fn insert_symbol(&mut self, symbol: &str) {
        let Some(section_id) = self.ui.active_section else {
            return;
        };
        self.apply(VoiceAppend::symbol(section_id, self.ui.active_voice, symbol));
    }

    /// Appends a measure boundary (`" | "`).
    pub fn insert_measure(&mut self) {
        let Some(section_id) = self.ui.active_section else {
            return;
        };
        self.apply(VoiceAppend::measure(section_id, self.ui.active_voice));
    }

    /// Removes the last character of the focused voice.
    pub fn delete_last(&mut self) {
        let Some(section_id) = self.ui.active_section else {
            return;
        };
        self.apply(VoiceBackspace::new(section_id, self.ui.active_voice));
    }

    /// Replaces a voice's whole content — the staff text-field edit path,
    /// which targets an explicit staff rather than the selection.
    pub fn replace_voice(&mut self, section_id: Id<Section>, voice: Voice, text: impl Into<String>) {
        self.apply(VoiceReplace::new(section_id, voice, text.into()));
    }

    /// Renders the document and appends it to the persisted composition
    /// list. Rejected — with no side effect — when the trimmed title is
    /// empty; that is the only operation in the editor that can fail.
    pub fn save(&self, store: &mut AppState) -> Result<Id<SavedComposition>, SaveError> {
        let title = self.composition.title.trim();
        if title.is_empty() {
            tracing::warn!("rejected save of an untitled composition");
            return Err(SaveError::EmptyTitle);
        }

        let entry = SavedComposition::new(title, self.composition.render_text());
        let id = entry.id;
        tracing::info!(?id, title, "composition saved");
        store.add_composition(entry);
        Ok(id)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

use partitio_lib::{Composition, Id, Section, Voice};

use crate::StateCommand;

/// Appends text to one voice of one section. Both keyboard insertion paths
/// funnel through this: a note token always trails with one space, a raw
/// symbol (including the measure bar) is appended exactly as given.
pub struct VoiceAppend {
    section_id: Id<Section>,
    voice: Voice,
    text: String,
    applied: bool,
}

impl VoiceAppend {
    pub fn new(section_id: Id<Section>, voice: Voice, text: impl Into<String>) -> Self {
        Self {
            section_id,
            voice,
            text: text.into(),
            applied: false,
        }
    }

    /// Note insertion: the token plus one trailing space.
    pub fn note(section_id: Id<Section>, voice: Voice, token: &str) -> Self {
        Self::new(section_id, voice, format!("{token} "))
    }

    /// Symbol insertion: the raw text, no added spacing.
    pub fn symbol(section_id: Id<Section>, voice: Voice, symbol: &str) -> Self {
        Self::new(section_id, voice, symbol)
    }

    /// Measure boundary: the bar character padded on both sides.
    pub fn measure(section_id: Id<Section>, voice: Voice) -> Self {
        Self::new(section_id, voice, " | ")
    }
}

impl StateCommand for VoiceAppend {
    fn execute(&mut self, composition: &mut Composition) {
        if let Some(section) = composition.section_mut(self.section_id) {
            section.append_voice(self.voice, &self.text);
            self.applied = true;
        }
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if !self.applied {
            return;
        }
        if let Some(section) = composition.section_mut(self.section_id) {
            // execute() appended exactly self.text, so the truncation point
            // lands on a char boundary
            let new_len = section.voice(self.voice).len() - self.text.len();
            section.truncate_voice(self.voice, new_len);
            self.applied = false;
        }
    }
}

/// Removes exactly the last character of a voice string. A no-op on an empty
/// voice or an unknown section.
pub struct VoiceBackspace {
    section_id: Id<Section>,
    voice: Voice,
    removed: Option<char>,
}

impl VoiceBackspace {
    pub fn new(section_id: Id<Section>, voice: Voice) -> Self {
        Self {
            section_id,
            voice,
            removed: None,
        }
    }
}

impl StateCommand for VoiceBackspace {
    fn execute(&mut self, composition: &mut Composition) {
        self.removed = composition
            .section_mut(self.section_id)
            .and_then(|section| section.pop_voice(self.voice));
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if let Some(ch) = self.removed.take() {
            if let Some(section) = composition.section_mut(self.section_id) {
                section.push_voice(self.voice, ch);
            }
        }
    }
}

/// Replaces the whole voice string — the staff text-field edit path, where
/// the platform input hands back the full new content.
pub struct VoiceReplace {
    section_id: Id<Section>,
    voice: Voice,
    text: String,
    previous: Option<String>,
}

impl VoiceReplace {
    pub fn new(section_id: Id<Section>, voice: Voice, text: impl Into<String>) -> Self {
        Self {
            section_id,
            voice,
            text: text.into(),
            previous: None,
        }
    }
}

impl StateCommand for VoiceReplace {
    fn execute(&mut self, composition: &mut Composition) {
        if let Some(section) = composition.section_mut(self.section_id) {
            self.previous = Some(section.replace_voice(self.voice, self.text.clone()));
        }
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if let Some(previous) = self.previous.take() {
            if let Some(section) = composition.section_mut(self.section_id) {
                section.replace_voice(self.voice, previous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use partitio_lib::{Composition, Id, Section, Voice};

    use super::{VoiceAppend, VoiceBackspace, VoiceReplace};
    use crate::StateCommand;

    fn single_section() -> (Composition, Id<Section>) {
        let mut composition = Composition::default();
        let id = Id::arbitrary();
        composition.push_section(id, Section::empty("Couplet 1"));
        (composition, id)
    }

    #[test]
    fn note_append_trails_with_one_space() {
        let (mut composition, id) = single_section();

        VoiceAppend::note(id, Voice::Soprano, "do").execute(&mut composition);
        VoiceAppend::note(id, Voice::Soprano, "re").execute(&mut composition);
        assert_eq!(
            composition.section(id).unwrap().voice(Voice::Soprano),
            "do re "
        );

        VoiceAppend::measure(id, Voice::Soprano).execute(&mut composition);
        assert_eq!(
            composition.section(id).unwrap().voice(Voice::Soprano),
            "do re  | "
        );
    }

    #[test]
    fn symbol_append_adds_no_spacing() {
        let (mut composition, id) = single_section();

        VoiceAppend::symbol(id, Voice::Alto, "♪").execute(&mut composition);
        VoiceAppend::symbol(id, Voice::Alto, "♯").execute(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Alto), "♪♯");
    }

    #[test]
    fn append_rollback_restores_the_previous_content() {
        let (mut composition, id) = single_section();

        let mut first = VoiceAppend::note(id, Voice::Tenor, "do");
        first.execute(&mut composition);
        let mut second = VoiceAppend::symbol(id, Voice::Tenor, "♭");
        second.execute(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Tenor), "do ♭");

        second.rollback(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Tenor), "do ");
        first.rollback(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Tenor), "");
    }

    #[test]
    fn append_to_an_unknown_section_is_a_no_op() {
        let (mut composition, _) = single_section();
        let mut command = VoiceAppend::note(Id::arbitrary(), Voice::Soprano, "do");

        command.execute(&mut composition);
        command.rollback(&mut composition);
        assert_eq!(composition.len(), 1);
    }

    #[test]
    fn backspace_pops_one_char_and_rolls_back() {
        let (mut composition, id) = single_section();
        VoiceAppend::note(id, Voice::Bass, "do").execute(&mut composition);

        let mut command = VoiceBackspace::new(id, Voice::Bass);
        command.execute(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Bass), "do");

        command.rollback(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Bass), "do ");
    }

    #[test]
    fn backspace_on_an_empty_voice_is_a_no_op() {
        let (mut composition, id) = single_section();
        let mut command = VoiceBackspace::new(id, Voice::Bass);

        command.execute(&mut composition);
        command.rollback(&mut composition);
        assert_eq!(composition.section(id).unwrap().voice(Voice::Bass), "");
    }

    #[test]
    fn replace_swaps_the_whole_voice_and_rolls_back() {
        let (mut composition, id) = single_section();
        VoiceAppend::note(id, Voice::Soprano, "do").execute(&mut composition);

        let mut command = VoiceReplace::new(id, Voice::Soprano, "fa sol | la");
        command.execute(&mut composition);
        assert_eq!(
            composition.section(id).unwrap().voice(Voice::Soprano),
            "fa sol | la"
        );

        command.rollback(&mut composition);
        assert_eq!(
            composition.section(id).unwrap().voice(Voice::Soprano),
            "do "
        );
    }
}

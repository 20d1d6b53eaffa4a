use std::fmt;

/// One of the four independent voice parts of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Voice {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Soprano, Voice::Alto, Voice::Tenor, Voice::Bass];

    /// Single-letter label used on staff lines and in the text export.
    pub fn label(self) -> &'static str {
        match self {
            Voice::Soprano => "S",
            Voice::Alto => "A",
            Voice::Tenor => "T",
            Voice::Bass => "B",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Voice::Soprano => "Soprano",
            Voice::Alto => "Alto",
            Voice::Tenor => "Ténor",
            Voice::Bass => "Basse",
        }
    }
}

/// Preset section flavors offered by the configuration drawer. Only the
/// display-name prefix differs between them; a `Custom` section is just
/// "Section n".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
    Intro,
    Outro,
    Custom,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Verse,
        SectionKind::Chorus,
        SectionKind::Bridge,
        SectionKind::Intro,
        SectionKind::Outro,
        SectionKind::Custom,
    ];

    pub fn name_prefix(self) -> &'static str {
        match self {
            SectionKind::Verse => "Couplet",
            SectionKind::Chorus => "Refrain",
            SectionKind::Bridge => "Pont",
            SectionKind::Intro => "Introduction",
            SectionKind::Outro => "Conclusion",
            SectionKind::Custom => "Section",
        }
    }
}

/// A named subdivision of a composition holding four parallel voice-part
/// strings. Voice content is free-form: space-separated note tokens, with the
/// literal character `|` marking a measure boundary.
#[derive(Clone, Debug)]
pub struct Section {
    pub name: String,

    // Always present; an unwritten voice is the empty string.
    soprano: String,
    alto: String,
    tenor: String,
    bass: String,
}

impl Section {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            soprano: String::new(),
            alto: String::new(),
            tenor: String::new(),
            bass: String::new(),
        }
    }

    pub fn voice(&self, voice: Voice) -> &str {
        match voice {
            Voice::Soprano => &self.soprano,
            Voice::Alto => &self.alto,
            Voice::Tenor => &self.tenor,
            Voice::Bass => &self.bass,
        }
    }

    fn voice_mut(&mut self, voice: Voice) -> &mut String {
        match voice {
            Voice::Soprano => &mut self.soprano,
            Voice::Alto => &mut self.alto,
            Voice::Tenor => &mut self.tenor,
            Voice::Bass => &mut self.bass,
        }
    }

    pub fn append_voice(&mut self, voice: Voice, text: &str) {
        self.voice_mut(voice).push_str(text);
    }

    pub fn push_voice(&mut self, voice: Voice, ch: char) {
        self.voice_mut(voice).push(ch);
    }

    /// Removes and returns the last character of the voice, if any.
    pub fn pop_voice(&mut self, voice: Voice) -> Option<char> {
        self.voice_mut(voice).pop()
    }

    /// Replaces the whole voice string, returning the previous content.
    pub fn replace_voice(&mut self, voice: Voice, text: String) -> String {
        std::mem::replace(self.voice_mut(voice), text)
    }

    pub fn truncate_voice(&mut self, voice: Voice, new_len: usize) {
        self.voice_mut(voice).truncate(new_len);
    }

    /// Letter characters (accented included) summed over the four voices.
    /// Spaces, bar lines and every other symbol are ignored.
    pub fn note_count(&self) -> usize {
        Voice::ALL
            .iter()
            .flat_map(|&voice| self.voice(voice).chars())
            .filter(|c| c.is_alphabetic())
            .count()
    }

    /// The maximum number of `|` occurrences across the four voices
    /// independently. Not the sum: voices of one section share bar lines, the
    /// fullest voice determines how many the section has.
    pub fn measure_count(&self) -> usize {
        Voice::ALL
            .iter()
            .map(|&voice| self.voice(voice).matches('|').count())
            .max()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> SectionStats {
        SectionStats {
            notes: self.note_count(),
            measures: self.measure_count(),
        }
    }
}

/// Display-only statistics shown under a section's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionStats {
    pub notes: usize,
    pub measures: usize,
}

impl fmt::Display for SectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} notes • {} mesures", self.notes, self.measures)
    }
}

#[cfg(test)]
mod tests {
    use super::{Section, Voice};

    fn section_with(soprano: &str, alto: &str, tenor: &str, bass: &str) -> Section {
        let mut section = Section::empty("Couplet 1");
        section.append_voice(Voice::Soprano, soprano);
        section.append_voice(Voice::Alto, alto);
        section.append_voice(Voice::Tenor, tenor);
        section.append_voice(Voice::Bass, bass);
        section
    }

    #[test]
    fn measure_count_is_max_across_voices() {
        let section = section_with("do re|mi", "fa|sol|la", "", "ti");
        assert_eq!(section.measure_count(), 2);
    }

    #[test]
    fn note_count_sums_letters_of_all_voices() {
        let section = section_with("do re|mi", "fa|sol|la", "", "ti");
        // "doremi" + "fasolla" + "" + "ti"
        assert_eq!(section.note_count(), 15);
    }

    #[test]
    fn note_count_includes_accented_letters() {
        let section = section_with("ré mi", "", "", "");
        assert_eq!(section.note_count(), 4);
    }

    #[test]
    fn stats_render_in_french() {
        let section = section_with("do re|mi", "fa|sol|la", "", "ti");
        assert_eq!(section.stats().to_string(), "15 notes • 2 mesures");
    }

    #[test]
    fn voice_and_kind_labels() {
        use crate::SectionKind;

        assert_eq!(Voice::Tenor.label(), "T");
        assert_eq!(Voice::Tenor.display_name(), "Ténor");

        let prefixes: Vec<_> = SectionKind::ALL
            .iter()
            .map(|kind| kind.name_prefix())
            .collect();
        assert_eq!(
            prefixes,
            ["Couplet", "Refrain", "Pont", "Introduction", "Conclusion", "Section"]
        );
    }

    #[test]
    fn pop_voice_on_empty_is_none() {
        let mut section = Section::empty("Refrain 1");
        assert_eq!(section.pop_voice(Voice::Bass), None);
        section.append_voice(Voice::Bass, "do ");
        assert_eq!(section.pop_voice(Voice::Bass), Some(' '));
        assert_eq!(section.voice(Voice::Bass), "do");
    }
}

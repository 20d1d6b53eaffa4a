use std::fmt::Write;

use crate::{Id, IdMap, Section, SectionKind, Voice};

/// Preset time signatures offered next to the tempo field.
pub const TEMPO_PRESETS: [&str; 6] = ["2/4", "3/4", "4/4", "6/8", "9/8", "12/8"];

/// Preset key names offered next to the key field.
pub const KEY_PRESETS: [&str; 17] = [
    "Do ", "Ré ", "Mi ", "Fa ", "Sol ", "La ", "Si ", "Do #", "Ré #", "Fa #", "Sol #", "La #",
    "Re b", "Mi b", "Sol b", "La b", "Ti b",
];

/// Direction for adjacent section reordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The in-memory editable document: title/tempo/key metadata plus an ordered
/// sequence of sections. Section order is performance order.
#[derive(Clone, Debug)]
pub struct Composition {
    pub title: String,
    pub tempo: String,
    pub key: String,

    // these two fields are kept synchronized with one another
    section_map: IdMap<Section>,
    section_order: Vec<Id<Section>>,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            title: "Ma Composition".into(),
            tempo: "4/4".into(),
            key: "Do M".into(),

            section_map: IdMap::new(),
            section_order: Vec::new(),
        }
    }
}

impl Composition {
    pub fn len(&self) -> usize {
        self.section_order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.section_order.is_empty()
    }

    pub fn has_section(&self, id: Id<Section>) -> bool {
        self.section_map.has(id)
    }
    pub fn section(&self, id: Id<Section>) -> Option<&Section> {
        self.section_map.get(id)
    }
    pub fn section_mut(&mut self, id: Id<Section>) -> Option<&mut Section> {
        self.section_map.get_mut(id)
    }

    /// Section ids in performance order.
    pub fn section_ids(&self) -> &[Id<Section>] {
        &self.section_order
    }

    /// Sections in performance order.
    pub fn sections(&self) -> impl Iterator<Item = (Id<Section>, &Section)> {
        self.section_order.iter().map(|&id| {
            (
                id,
                self.section_map
                    .get(id)
                    .unwrap_or_else(|| unreachable!("section order out of sync with section map")),
            )
        })
    }

    pub fn first_section(&self) -> Option<Id<Section>> {
        self.section_order.first().copied()
    }

    pub fn index_of(&self, id: Id<Section>) -> Option<usize> {
        self.section_order.iter().position(|&other| other == id)
    }

    /// Appends a section at the end. Panics if the id already exists.
    pub fn push_section(&mut self, id: Id<Section>, section: Section) {
        self.insert_section(self.section_order.len(), id, section);
    }

    /// Inserts a section at `index`. Panics if the id already exists.
    pub fn insert_section(&mut self, index: usize, id: Id<Section>, section: Section) {
        self.section_map.insert(id, section);
        self.section_order.insert(index, id);
    }

    /// Removes a section by id, returning its former index and data.
    /// Returns `None` (and changes nothing) for an unknown id.
    pub fn remove_section(&mut self, id: Id<Section>) -> Option<(usize, Section)> {
        let index = self.index_of(id)?;
        self.section_order.remove(index);
        let section = self
            .section_map
            .remove(id)
            .unwrap_or_else(|| unreachable!("section order out of sync with section map"));
        Some((index, section))
    }

    /// Swaps the section at `index` with its immediate neighbor. Returns
    /// whether anything moved; the first index cannot move up and the last
    /// cannot move down.
    pub fn swap_adjacent(&mut self, index: usize, direction: MoveDirection) -> bool {
        let neighbor = match direction {
            MoveDirection::Up => {
                if index == 0 || index >= self.section_order.len() {
                    return false;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= self.section_order.len() {
                    return false;
                }
                index + 1
            }
        };
        self.section_order.swap(index, neighbor);
        true
    }

    /// Display name for the next section of `kind`: `"{prefix} {n+1}"` where
    /// `n` counts existing sections whose name starts with the prefix. The
    /// textual prefix match deliberately picks up user-renamed sections that
    /// happen to share the prefix.
    pub fn next_section_name(&self, kind: SectionKind) -> String {
        let prefix = kind.name_prefix();
        let existing = self
            .sections()
            .filter(|(_, section)| section.name.starts_with(prefix))
            .count();
        format!("{prefix} {}", existing + 1)
    }

    /// Deterministic text rendering used as the `content` of a saved
    /// composition. Human-legible, not meant to be parsed back.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Titre: {}", self.title);
        let _ = writeln!(out, "# Temps: {}", self.tempo);
        let _ = writeln!(out, "# Gamme: {}", self.key);
        let _ = writeln!(out);

        for (_, section) in self.sections() {
            let _ = writeln!(out, "## {}", section.name);
            for voice in Voice::ALL {
                let _ = writeln!(out, "{}: {}", voice.label(), section.voice(voice));
            }
            let _ = writeln!(out);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Composition, MoveDirection};
    use crate::{Id, Section, SectionKind, Voice};

    fn composition_with_names(names: &[&str]) -> Composition {
        let mut composition = Composition::default();
        for &name in names {
            composition.push_section(Id::arbitrary(), Section::empty(name));
        }
        composition
    }

    #[test]
    fn next_name_counts_sections_sharing_the_prefix() {
        let composition = composition_with_names(&["Couplet 1", "Couplet 2", "Refrain 1"]);
        assert_eq!(
            composition.next_section_name(SectionKind::Verse),
            "Couplet 3"
        );
        assert_eq!(
            composition.next_section_name(SectionKind::Chorus),
            "Refrain 2"
        );
        assert_eq!(composition.next_section_name(SectionKind::Bridge), "Pont 1");
    }

    #[test]
    fn next_name_picks_up_renamed_sections_with_the_same_prefix() {
        // a user rename like "Couplet final" participates in the count
        let composition = composition_with_names(&["Couplet 1", "Couplet final"]);
        assert_eq!(
            composition.next_section_name(SectionKind::Verse),
            "Couplet 3"
        );
    }

    #[test]
    fn swap_is_a_no_op_at_the_boundaries() {
        let mut composition = composition_with_names(&["Couplet 1", "Refrain 1"]);
        let order: Vec<_> = composition.section_ids().to_vec();

        assert!(!composition.swap_adjacent(0, MoveDirection::Up));
        assert!(!composition.swap_adjacent(1, MoveDirection::Down));
        assert_eq!(composition.section_ids(), order);

        assert!(composition.swap_adjacent(0, MoveDirection::Down));
        assert_eq!(composition.section_ids(), [order[1], order[0]]);
    }

    #[test]
    fn remove_section_reports_index_and_ignores_unknown_ids() {
        let mut composition = composition_with_names(&["Couplet 1", "Refrain 1"]);
        let refrain = composition.section_ids()[1];

        let (index, section) = composition.remove_section(refrain).unwrap();
        assert_eq!(index, 1);
        assert_eq!(section.name, "Refrain 1");
        assert_eq!(composition.len(), 1);

        assert!(composition.remove_section(refrain).is_none());
        assert_eq!(composition.len(), 1);
    }

    #[test]
    fn section_ids_stay_unique_through_add_and_delete() {
        let mut composition = Composition::default();
        let mut ids = Vec::new();
        for _ in 0..8 {
            let id = Id::arbitrary();
            let name = composition.next_section_name(SectionKind::Custom);
            composition.push_section(id, Section::empty(name));
            ids.push(id);
        }
        composition.remove_section(ids[2]);
        composition.remove_section(ids[5]);
        let id = Id::arbitrary();
        composition.push_section(id, Section::empty("Section 7"));
        ids.push(id);

        let mut seen = std::collections::HashSet::new();
        for &id in composition.section_ids() {
            assert!(seen.insert(id));
        }
        assert_eq!(composition.len(), 7);
    }

    #[test]
    fn defaults_come_from_the_preset_tables() {
        use super::{KEY_PRESETS, TEMPO_PRESETS};

        let composition = Composition::default();
        assert!(TEMPO_PRESETS.contains(&composition.tempo.as_str()));
        assert_eq!(KEY_PRESETS.len(), 17);
    }

    #[test]
    fn render_text_matches_the_export_format() {
        let mut composition = Composition::default();
        composition.title = "Hymne".into();
        composition.tempo = "3/4".into();
        composition.key = "Sol M".into();

        let id = Id::arbitrary();
        composition.push_section(id, Section::empty("Couplet 1"));
        let section = composition.section_mut(id).unwrap();
        section.append_voice(Voice::Soprano, "do re | mi");
        section.append_voice(Voice::Bass, "do");
        composition.push_section(Id::arbitrary(), Section::empty("Refrain 1"));

        assert_eq!(
            composition.render_text(),
            "# Titre: Hymne\n\
             # Temps: 3/4\n\
             # Gamme: Sol M\n\
             \n\
             ## Couplet 1\n\
             S: do re | mi\n\
             A: \n\
             T: \n\
             B: do\n\
             \n\
             ## Refrain 1\n\
             S: \n\
             A: \n\
             T: \n\
             B: \n\
             \n"
        );
    }
}

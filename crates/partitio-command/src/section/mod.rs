use partitio_lib::{Composition, Id, MoveDirection, Section};

use crate::StateCommand;

pub struct SectionAddOrRemove {
    id: Id<Section>,
    index: Option<usize>,
    data: Option<Section>,
    is_removal: bool,
}

impl SectionAddOrRemove {
    /// Appends `data` at the end of the composition.
    pub fn addition(id: Id<Section>, data: Section) -> Self {
        Self {
            id,
            index: None,
            data: Some(data),
            is_removal: false,
        }
    }
    /// Removes the section with `id`. Removing an unknown id is a no-op.
    pub fn removal(id: Id<Section>) -> Self {
        Self {
            id,
            index: None,
            data: None,
            is_removal: true,
        }
    }

    fn execute_add(&mut self, composition: &mut Composition) {
        let Some(data) = self.data.take() else {
            // rollback of a removal that never found its section
            return;
        };
        let index = self.index.unwrap_or(composition.len());
        composition.insert_section(index, self.id, data);
        self.index = Some(index);
    }
    fn execute_remove(&mut self, composition: &mut Composition) {
        if let Some((index, data)) = composition.remove_section(self.id) {
            self.index = Some(index);
            self.data = Some(data);
        }
    }
}

impl StateCommand for SectionAddOrRemove {
    fn execute(&mut self, composition: &mut Composition) {
        if self.is_removal {
            self.execute_remove(composition);
        } else {
            self.execute_add(composition);
        }
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if self.is_removal {
            self.execute_add(composition);
        } else {
            self.execute_remove(composition);
        }
    }
}

/// Deep-copies a section (name suffixed with " (copie)") to the end of the
/// composition under a fresh id. The active selection is left alone.
pub struct SectionDuplicate {
    source_id: Id<Section>,
    new_id: Id<Section>,
    duplicated: bool,
}

impl SectionDuplicate {
    pub fn new(source_id: Id<Section>, new_id: Id<Section>) -> Self {
        Self {
            source_id,
            new_id,
            duplicated: false,
        }
    }
}

impl StateCommand for SectionDuplicate {
    fn execute(&mut self, composition: &mut Composition) {
        let Some(source) = composition.section(self.source_id) else {
            return;
        };
        let mut copy = source.clone();
        copy.name = format!("{} (copie)", copy.name);
        composition.push_section(self.new_id, copy);
        self.duplicated = true;
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if self.duplicated {
            composition.remove_section(self.new_id);
            self.duplicated = false;
        }
    }
}

/// Sets a section's display name. Names may collide between sections;
/// uniqueness is not enforced.
pub struct SectionRename {
    id: Id<Section>,
    name: String,
    previous: Option<String>,
}

impl SectionRename {
    pub fn new(id: Id<Section>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            previous: None,
        }
    }
}

impl StateCommand for SectionRename {
    fn execute(&mut self, composition: &mut Composition) {
        if let Some(section) = composition.section_mut(self.id) {
            self.previous = Some(std::mem::replace(&mut section.name, self.name.clone()));
        }
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if let Some(previous) = self.previous.take() {
            if let Some(section) = composition.section_mut(self.id) {
                section.name = previous;
            }
        }
    }
}

/// Swaps the section at `index` with its neighbor. An adjacent swap, not a
/// general reorder; boundary indices don't move.
pub struct SectionMove {
    index: usize,
    direction: MoveDirection,
    moved: bool,
}

impl SectionMove {
    pub fn new(index: usize, direction: MoveDirection) -> Self {
        Self {
            index,
            direction,
            moved: false,
        }
    }
}

impl StateCommand for SectionMove {
    fn execute(&mut self, composition: &mut Composition) {
        self.moved = composition.swap_adjacent(self.index, self.direction);
    }
    fn rollback(&mut self, composition: &mut Composition) {
        if self.moved {
            // the same pair of slots swaps back
            composition.swap_adjacent(self.index, self.direction);
            self.moved = false;
        }
    }
}

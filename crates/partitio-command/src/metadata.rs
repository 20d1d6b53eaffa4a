use partitio_lib::Composition;

use crate::StateCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Tempo,
    Key,
}

/// Sets one of the composition's free-text metadata fields. Always succeeds;
/// no value is ever rejected.
pub struct MetadataUpdate {
    field: MetadataField,
    value: String,
    previous: Option<String>,
}

impl MetadataUpdate {
    pub fn new(field: MetadataField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            previous: None,
        }
    }

    fn target(field: MetadataField, composition: &mut Composition) -> &mut String {
        match field {
            MetadataField::Title => &mut composition.title,
            MetadataField::Tempo => &mut composition.tempo,
            MetadataField::Key => &mut composition.key,
        }
    }
}

impl StateCommand for MetadataUpdate {
    fn execute(&mut self, composition: &mut Composition) {
        let target = Self::target(self.field, composition);
        self.previous = Some(std::mem::replace(target, self.value.clone()));
    }
    fn rollback(&mut self, composition: &mut Composition) {
        let previous = self
            .previous
            .take()
            .expect("rollback() called before execute() in MetadataUpdate");
        *Self::target(self.field, composition) = previous;
    }
}

#[cfg(test)]
mod tests {
    use partitio_lib::Composition;

    use super::{MetadataField, MetadataUpdate};
    use crate::StateCommand;

    #[test]
    fn update_and_rollback_round_trip() {
        let mut composition = Composition::default();
        let mut command = MetadataUpdate::new(MetadataField::Key, "Sol M");

        command.execute(&mut composition);
        assert_eq!(composition.key, "Sol M");

        command.rollback(&mut composition);
        assert_eq!(composition.key, "Do M");
    }
}

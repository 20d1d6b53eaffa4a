use crate::StateCommand;

/// Ordered record of the commands applied to a composition, most recent last.
#[derive(Default)]
pub struct StateTracker(Vec<Box<dyn StateCommand>>);

impl StateTracker {
    pub fn new() -> Self {
        Self(Vec::new())
    }
    pub fn add(&mut self, command: impl StateCommand) {
        self.0.push(Box::new(command));
    }
    pub fn pop(&mut self) -> Option<Box<dyn StateCommand>> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

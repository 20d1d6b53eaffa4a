//! Command system for partitio. Separate from `partitio-lib` because it's not strictly needed to store state

use partitio_lib::Composition;

pub mod metadata;
pub mod section;
pub mod voice;

mod tracker;
pub use tracker::StateTracker;

pub trait StateCommand: 'static + Send {
    fn execute(&mut self, composition: &mut Composition);
    fn rollback(&mut self, composition: &mut Composition);
}

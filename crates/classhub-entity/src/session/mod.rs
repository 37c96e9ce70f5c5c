//! Session entry model.

pub mod model;

pub use model::SessionEntry;

//! Core data structures shared by the three pipelines.

mod item;
mod reference;
mod report;

pub use item::{Extraction, Origin, SourceItem, SourceKind};
pub use reference::{Reference, ReferenceBuilder};
pub use report::{ItemReport, Outcome, RunReport};

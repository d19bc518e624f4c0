//! Records stored at the composite keys.
//!
//! Field names follow the JSON already stored by existing deployments, and every field
//! has a default so records written with omitted zero values still decode.

mod action;
mod counter;
mod project;

pub use action::Action;
pub use counter::Counter;
pub use project::Project;

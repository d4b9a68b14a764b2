//! Set-at-a-time table operators

pub mod join;
pub mod project;
pub mod rename;

pub use join::{join, JoinSuffixes};
pub use project::project;
pub use rename::rename;

//! Pipeline module - distance/annotation merge

pub mod merge;

pub use merge::{load_inputs, merge_tables, run};

//! Map individuals from a pairwise genetic distance table onto their
//! EIGENSTRAT annotations (locale, coordinates, age in years BP).

pub mod config;
pub mod error;
pub mod io;
pub mod ops;
pub mod pipeline;
pub mod stats;
pub mod table;

pub use config::MergeConfig;
pub use error::{MergeError, Stage};
pub use pipeline::run;
pub use table::{Column, ColumnType, Table, Value};

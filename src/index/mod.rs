pub mod build;
pub mod table;
pub mod types;

pub use build::{build_index, populate_index, walk_files};
pub use table::{hash_name, NameIndex};
pub use types::*;

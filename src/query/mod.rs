pub mod executor;
pub mod matcher;

pub use executor::{search, SearchEngine, SearchOutcome};
pub use matcher::{matches, QueryMatcher};

//! # Spyglass - interactive file name finder
//!
//! Spyglass walks a directory tree once, keeps every file name in memory and
//! lets the user narrow the list by typing. A chosen result is opened with
//! the host's default application.
//!
//! ## Architecture
//!
//! - [`index`] - In-memory name table and the directory walk that fills it
//! - [`query`] - Case-insensitive substring matching and the bounded search
//! - [`session`] - Interaction state machine, independent of the terminal
//! - [`tui`] - Full-screen raw-key front end (`interactive` feature)
//! - [`line`] - Line-oriented front end for pipes and dumb terminals
//! - [`output`] - Result formatting shared by both front ends
//! - [`launcher`] - Opening files with the platform's default handler
//! - [`utils`] - Config, logging and small helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use spyglass::index::{build_index, IndexOptions};
//! use spyglass::query::SearchEngine;
//! use std::path::Path;
//!
//! let (index, stats) = build_index(Path::new("."), &IndexOptions::default());
//! println!("{} files", stats.indexed);
//!
//! let outcome = SearchEngine::new(&index).search("readme", 12);
//! for entry in &outcome.matches {
//!     println!("{}", entry.full_path().display());
//! }
//! ```

pub mod index;
pub mod launcher;
pub mod line;
pub mod output;
pub mod query;
pub mod session;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;

//! shcompose: composable POSIX shell command trees.
//!
//! Build a tree of [`Node`]s from raw strings and nested nodes, then render
//! it into one shell script with correct grouping and quoting:
//!
//! ```
//! use shcompose::Node;
//!
//! let tree = Node::and(["make", "make install"]).unwrap();
//! assert_eq!(tree.render(), "{\nmake\n} && {\nmake install\n}");
//! ```
//!
//! # Architecture
//!
//! - **[`node`]** — Command tree types, constructors, `render` and `describe`.
//! - **[`quote`]** — POSIX single-quoting and `printf` transcript helpers.
//! - **[`document`]** — Loading trees from JSON/TOML documents.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Logger setup for the binary (stderr + optional file).

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// JSON/TOML tree documents.
pub mod document;
/// Construction and document errors.
pub mod error;
/// Logger initialisation.
pub mod logging;
/// Command tree nodes and their rendering.
pub mod node;
/// Shell quoting helpers.
pub mod quote;

pub use error::{CommandError, DocumentError};
pub use node::{Command, Node};

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod dag;
mod identities;
pub mod newtypes;
mod trie;

pub use identities::Identities;
pub use newtypes::{Group, NewtypeError, Vector};

/// Returns the current version of the identities-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

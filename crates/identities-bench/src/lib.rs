//! Random family generator and invariant checkers for benchmarking and
//! property testing `identities-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_vectors};

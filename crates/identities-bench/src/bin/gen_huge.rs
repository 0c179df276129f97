//! Builds the XLarge-tier benchmark family and reports its shape.
//!
//! Run via `just gen-huge`. There is no on-disk fixture to write — unlike the
//! teacher's multi-hundred-megabyte JSON/CBOR fixtures, `identities-core`
//! values are built directly from a deterministic seed, so there is nothing
//! worth caching to disk. This binary just exercises the full
//! generate-then-contract pipeline once and prints its measures, so the cost
//! of the largest benchmarked tier can be sanity checked without running
//! `cargo bench`.

use std::time::Instant;

use identities_bench::{SizeTier, generate_vectors};
use identities_core::Identities;

fn main() {
    let config = SizeTier::XLarge.config(42);
    println!(
        "Generating XLarge tier ({} vectors, depth {})...",
        config.vector_count, config.depth
    );

    let start = Instant::now();
    let vectors = generate_vectors(&config);
    println!(
        "Generated {} vectors in {:?}",
        vectors.len(),
        start.elapsed()
    );

    let start = Instant::now();
    let identities = Identities::contracted(vectors);
    println!("Contracted in {:?}", start.elapsed());

    println!(
        "breadth={} depth={} storage_size={}",
        identities.breadth(),
        identities.depth(),
        identities.storage_size()
    );
}

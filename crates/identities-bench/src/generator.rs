//! Deterministic generator of large `Identities` vector families for
//! benchmarking.
//!
//! Every generated vector walks a random branching tree from a single
//! virtual root, so siblings produced under the same branch share a common
//! prefix — the way divisions of one organization share a common ownership
//! lineage in the supply-chain generator this crate stands in for.
use identities_core::{Group, Vector};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for the random family-of-vectors generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Target number of vectors to produce.
    pub vector_count: usize,
    /// Number of groups per vector.
    pub depth: usize,
    /// Maximum identifiers per group.
    pub group_width: usize,
    /// Size of the identifier pool each group value is drawn from.
    pub id_pool_size: u32,
    /// Children spawned per branch below the root.
    pub branching_factor: usize,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~50 vectors, depth 5.
    Small,
    /// ~500 vectors, depth 7.
    Medium,
    /// ~5,000 vectors, depth 9.
    Large,
    /// ~50,000 vectors, depth 11.
    XLarge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                vector_count: 50,
                depth: 5,
                group_width: 2,
                id_pool_size: 200,
                branching_factor: 3,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                vector_count: 500,
                depth: 7,
                group_width: 2,
                id_pool_size: 2_000,
                branching_factor: 4,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                vector_count: 5_000,
                depth: 9,
                group_width: 3,
                id_pool_size: 20_000,
                branching_factor: 5,
            },
            SizeTier::XLarge => GeneratorConfig {
                seed,
                vector_count: 50_000,
                depth: 11,
                group_width: 3,
                id_pool_size: 200_000,
                branching_factor: 6,
            },
        }
    }
}

/// Generates a family of `Vector<u32>` from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_vectors(config: &GeneratorConfig) -> Vec<Vector<u32>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut vectors = Vec::with_capacity(config.vector_count);
    let mut prefix: Vec<Group<u32>> = Vec::with_capacity(config.depth);
    grow(&mut rng, config, &mut prefix, &mut vectors, 0);
    vectors.truncate(config.vector_count);
    vectors
}

fn random_group(rng: &mut StdRng, config: &GeneratorConfig) -> Group<u32> {
    let width = rng.gen_range(1..=config.group_width.max(1));
    let values: Vec<u32> = (0..width)
        .map(|_| rng.gen_range(0..config.id_pool_size.max(1)))
        .collect();
    Group::try_from(values).unwrap_or_else(|_| Group::singleton(0))
}

/// Recursively extends `prefix` one group at a time, emitting a leaf vector
/// whenever `config.depth` is reached, and stopping once `config.vector_count`
/// vectors have been produced.
fn grow(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    prefix: &mut Vec<Group<u32>>,
    out: &mut Vec<Vector<u32>>,
    level: usize,
) {
    if out.len() >= config.vector_count {
        return;
    }
    if level >= config.depth {
        if let Ok(vector) = Vector::try_from(prefix.clone()) {
            out.push(vector);
        }
        return;
    }

    let children = if level == 0 { 1 } else { config.branching_factor };
    for _ in 0..children {
        if out.len() >= config.vector_count {
            break;
        }
        prefix.push(random_group(rng, config));
        grow(rng, config, prefix, out, level + 1);
        prefix.pop();
    }
}

//! Post-operation invariant checkers for correctness validation.

use std::collections::HashSet;
use std::hash::Hash;

use identities_core::{Identities, Vector};

/// Verifies that `merge(a, b)` expands to exactly the union of `a` and `b`'s
/// expansions — no fabricated or dropped paths.
pub fn check_merge_expansion<V: Clone + Eq + Hash + Ord>(
    a: &Identities<V>,
    b: &Identities<V>,
    merged: &Identities<V>,
) -> Result<(), String> {
    let mut want: HashSet<Vector<V>> = a.expanded().into_iter().collect();
    want.extend(b.expanded());
    let got: HashSet<Vector<V>> = merged.expanded().into_iter().collect();
    if got != want {
        return Err(format!(
            "merge expansion mismatch: {} paths expected, {} produced",
            want.len(),
            got.len()
        ));
    }
    Ok(())
}

/// Verifies that `storage_size` never exceeds the naive unshared sum of
/// group counts across the expanded vector set (sharing can only reduce it).
pub fn check_storage_size_bounded<V: Clone + Eq + Hash + Ord>(
    identities: &Identities<V>,
) -> Result<(), String> {
    let naive: usize = identities.expanded().iter().map(Vector::len).sum();
    let actual = identities.storage_size();
    if actual > naive {
        return Err(format!(
            "storage_size {actual} exceeds naive unshared sum {naive}"
        ));
    }
    Ok(())
}

/// Verifies idempotency: `merge(a, a)` equals `a`.
pub fn check_merge_idempotent<V: Clone + Eq + Hash + Ord>(
    a: &Identities<V>,
) -> Result<(), String> {
    let merged = a.merge(a);
    if merged != *a {
        return Err("merge(a, a) is not equal to a".to_owned());
    }
    Ok(())
}

/// Verifies that no vector in the expansion is duplicated.
pub fn check_no_duplicate_vectors<V: Clone + Eq + Hash + Ord>(
    identities: &Identities<V>,
) -> Result<(), String> {
    let expanded = identities.expanded();
    let distinct: HashSet<&Vector<V>> = expanded.iter().collect();
    if distinct.len() != expanded.len() {
        return Err(format!(
            "expansion has {} vectors but only {} distinct",
            expanded.len(),
            distinct.len()
        ));
    }
    Ok(())
}

/// Verifies `breadth`/`depth` consistency with the expanded vector set.
pub fn check_breadth_and_depth<V: Clone + Eq + Hash + Ord>(
    identities: &Identities<V>,
) -> Result<(), String> {
    let expanded = identities.expanded();
    if identities.breadth() != expanded.len() {
        return Err(format!(
            "breadth {} does not match expansion length {}",
            identities.breadth(),
            expanded.len()
        ));
    }
    let want_depth = expanded.iter().map(Vector::len).max().unwrap_or(0);
    if identities.depth() != want_depth {
        return Err(format!(
            "depth {} does not match max vector length {}",
            identities.depth(),
            want_depth
        ));
    }
    Ok(())
}

/// Verifies that `submerge` preserves breadth and increases depth by exactly
/// one on a non-empty value.
pub fn check_submerge_splices_one_group<V: Clone + Eq + Hash + Ord>(
    before: &Identities<V>,
    after: &Identities<V>,
) -> Result<(), String> {
    if before.breadth() != after.breadth() {
        return Err(format!(
            "submerge changed breadth from {} to {}",
            before.breadth(),
            after.breadth()
        ));
    }
    if before.depth() + 1 != after.depth() {
        return Err(format!(
            "submerge should bump depth by exactly one: {} -> {}",
            before.depth(),
            after.depth()
        ));
    }
    Ok(())
}

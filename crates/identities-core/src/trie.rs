//! Construction of the minimal DAG for a set of [`Vector`]s.
//!
//! Two passes, mirroring the two-pass construction style used for the
//! `OmtsGraph` build in the sibling graph module this crate was adapted from:
//!
//! 1. **Prefix pass** (top-down) — insert every vector into a branching trie
//!    keyed on `Group` equality, so vectors sharing a prefix share nodes
//!    immediately. A node may only be reused as the *continuation* of a vector
//!    if it already has children, and only as the *terminus* of a vector if it
//!    has none; a vector whose requirement conflicts with the matching node's
//!    current role gets a fresh sibling node instead of corrupting the other
//!    vector's path. This is what lets one vector terminate exactly where
//!    another, sharing the same prefix, continues.
//! 2. **Suffix pass** (bottom-up) — visit the trie in reverse construction
//!    order (children are always created after their parent, so descending
//!    index order is a valid post-order) and hash-cons each node on
//!    `(Group, successor set)`. Two nodes merge only when their whole
//!    downstream reachable structure already agreed, which is exactly the
//!    classical minimal-acyclic-automaton construction used for dictionary
//!    compression: it can never fuse two paths into a spurious third one,
//!    because fusion requires the full suffix to already coincide.
use std::collections::HashMap;
use std::hash::Hash;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::newtypes::{Group, Vector};

struct RawNode<V> {
    group: Group<V>,
    children: Vec<usize>,
}

/// An unminimized forest built directly from an input vector set: one private
/// chain of nodes per vector, except where an earlier vector's chain could be
/// safely reused.
struct RawTrie<V> {
    arena: Vec<RawNode<V>>,
    roots: Vec<usize>,
}

/// Finds an existing child of `parent` (or a root, if `parent` is `None`)
/// whose group matches and whose current leaf-ness matches `want_leaf`;
/// otherwise creates a fresh node and links it in.
fn find_or_create_child<V: Clone + PartialEq>(
    arena: &mut Vec<RawNode<V>>,
    roots: &mut Vec<usize>,
    parent: Option<usize>,
    group: &Group<V>,
    want_leaf: bool,
) -> usize {
    let candidates: &[usize] = match parent {
        None => roots,
        Some(p) => &arena[p].children,
    };
    let existing = candidates
        .iter()
        .copied()
        .find(|&idx| arena[idx].group == *group && arena[idx].children.is_empty() == want_leaf);

    if let Some(idx) = existing {
        return idx;
    }

    let new_idx = arena.len();
    arena.push(RawNode {
        group: group.clone(),
        children: Vec::new(),
    });
    match parent {
        None => roots.push(new_idx),
        Some(p) => arena[p].children.push(new_idx),
    }
    new_idx
}

fn build_raw_trie<V: Clone + PartialEq>(vectors: &[Vector<V>]) -> RawTrie<V> {
    let mut trie = RawTrie {
        arena: Vec::new(),
        roots: Vec::new(),
    };

    for vector in vectors {
        let groups: &[Group<V>] = vector;
        let len = groups.len();
        let mut parent: Option<usize> = None;
        for (i, group) in groups.iter().enumerate() {
            let is_last = i + 1 == len;
            let idx = find_or_create_child(
                &mut trie.arena,
                &mut trie.roots,
                parent,
                group,
                is_last,
            );
            parent = Some(idx);
        }
    }

    trie
}

/// Collapses the raw trie bottom-up, merging any two nodes whose `Group` and
/// already-canonicalized successor set are identical.
fn minimize<V: Clone + Eq + Hash + Ord>(
    trie: &RawTrie<V>,
) -> (StableDiGraph<Group<V>, ()>, Vec<NodeIndex>) {
    let mut graph: StableDiGraph<Group<V>, ()> = StableDiGraph::new();
    let mut resolved: Vec<Option<NodeIndex>> = vec![None; trie.arena.len()];
    let mut signatures: HashMap<(Group<V>, Vec<NodeIndex>), NodeIndex> = HashMap::new();

    for raw_idx in (0..trie.arena.len()).rev() {
        let node = &trie.arena[raw_idx];
        let mut children: Vec<NodeIndex> = node
            .children
            .iter()
            .map(|&c| {
                let Some(final_idx) = resolved[c] else {
                    unreachable!("children are created strictly after their parent, so a reverse scan always resolves them first")
                };
                final_idx
            })
            .collect();
        children.sort_unstable();
        children.dedup();

        let key = (node.group.clone(), children);
        let final_idx = *signatures.entry(key.clone()).or_insert_with(|| {
            let idx = graph.add_node(node.group.clone());
            for &child in &key.1 {
                graph.add_edge(idx, child, ());
            }
            idx
        });
        resolved[raw_idx] = Some(final_idx);
    }

    let mut roots: Vec<NodeIndex> = trie
        .roots
        .iter()
        .map(|&r| {
            let Some(final_idx) = resolved[r] else {
                unreachable!("every raw node is resolved during the reverse scan above")
            };
            final_idx
        })
        .collect();
    roots.sort_unstable();
    roots.dedup();

    (graph, roots)
}

/// Builds the canonical minimal DAG representing exactly the given vector
/// set: every vector becomes one root-to-sink path, and no two nodes share
/// both an equal `Group` and an equal successor set.
pub(crate) fn build<V: Clone + Eq + Hash + Ord>(
    vectors: &[Vector<V>],
) -> (StableDiGraph<Group<V>, ()>, Vec<NodeIndex>) {
    if vectors.is_empty() {
        return (StableDiGraph::new(), Vec::new());
    }
    let raw = build_raw_trie(vectors);
    minimize(&raw)
}

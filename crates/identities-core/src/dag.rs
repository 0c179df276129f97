//! The internal canonical DAG representation backing [`crate::Identities`].
//!
//! Every `Dag` in existence is already in minimal form, built either via
//! [`crate::trie::build`] or via [`Dag::init`]'s direct bottom-up transform;
//! there is no separate "normalize" step because nothing constructs a
//! non-minimal `Dag`. Both constructions share one invariant: a node's
//! `NodeIndex` is always strictly greater than any of its children's, so a
//! single forward scan over `node_indices()` visits children before their
//! parents.
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::newtypes::{Group, Vector};
use crate::trie;

pub(crate) struct Dag<V> {
    graph: StableDiGraph<Group<V>, ()>,
    roots: Vec<NodeIndex>,
}

impl<V: Clone + Eq + Hash + Ord> Dag<V> {
    pub(crate) fn empty() -> Self {
        Self {
            graph: StableDiGraph::new(),
            roots: Vec::new(),
        }
    }

    pub(crate) fn from_vectors(vectors: Vec<Vector<V>>) -> Self {
        if vectors.is_empty() {
            return Self::empty();
        }
        let (graph, roots) = trie::build(&vectors);
        Self { graph, roots }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total identifier occurrences across the DAG's node set — the sharing
    /// metric.
    pub(crate) fn storage_size(&self) -> usize {
        self.graph.node_weights().map(|g| g.len()).sum()
    }

    pub(crate) fn breadth(&self) -> usize {
        self.expand().len()
    }

    pub(crate) fn depth(&self) -> usize {
        self.expand().iter().map(Vector::len).max().unwrap_or(0)
    }

    /// Drops the last group of every represented vector in a single
    /// bottom-up pass over the existing DAG, per spec.md §4.4 — no
    /// intermediate expansion to the represented vector set.
    ///
    /// A node with no children is an original sink: it holds exactly the
    /// last group of whatever vectors reach it, so it is simply removed,
    /// truncating those vectors by one group. A node that had at least one
    /// sink child gains a *terminal* replacement — a node with the same
    /// `Group` and no children — for the vectors that used to end there. A
    /// node with at least one non-sink child keeps a *continuation*
    /// replacement whose children are the union of its children's own
    /// replacements. A node with a mix of both kinds of children (it is a
    /// shared prefix for vectors that diverge into "ends here" and
    /// "continues" branches) needs both replacements simultaneously, since a
    /// single DAG node cannot be a sink for some incoming paths and an
    /// interior node for others — this is the node-splitting the classical
    /// minimal-automaton quotient construction performs when trimming
    /// accepting states. Every replacement is hash-consed on `(Group,
    /// children)` exactly as [`trie::minimize`] hash-conses during
    /// construction, so two nodes that end up sharing both are merged —
    /// the "merge any newly equivalent sinks" step spec.md §4.4 calls for.
    /// A root that was itself a sink (a single-group vector) has no
    /// replacement at all and is dropped, matching "discard vectors that
    /// had only one group".
    ///
    /// `None` if `self` is empty.
    pub(crate) fn init(&self) -> Option<Self> {
        if self.is_empty() {
            return None;
        }

        let mut new_graph: StableDiGraph<Group<V>, ()> = StableDiGraph::new();
        // Each original node resolves to zero, one, or two replacement
        // nodes: zero for a dropped sink, one for a pure terminal or pure
        // continuation, two when it had to split.
        let mut resolved: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        let mut signatures: HashMap<(Group<V>, Vec<NodeIndex>), NodeIndex> = HashMap::new();

        for idx in self.graph.node_indices() {
            let mut children = self.graph.neighbors_directed(idx, Direction::Outgoing).peekable();
            if children.peek().is_none() {
                resolved.insert(idx, Vec::new());
                continue;
            }

            let mut had_sink_child = false;
            let mut continuing: Vec<NodeIndex> = Vec::new();
            for child in children {
                let child_is_sink = self
                    .graph
                    .neighbors_directed(child, Direction::Outgoing)
                    .next()
                    .is_none();
                if child_is_sink {
                    had_sink_child = true;
                } else {
                    let Some(replacement) = resolved.get(&child) else {
                        unreachable!(
                            "children have a smaller NodeIndex than their parent, so a forward scan always resolves them first"
                        )
                    };
                    continuing.extend(replacement.iter().copied());
                }
            }
            continuing.sort_unstable();
            continuing.dedup();

            let group = self.graph[idx].clone();
            let mut replacements = Vec::with_capacity(2);

            if had_sink_child {
                let key = (group.clone(), Vec::new());
                let terminal = *signatures
                    .entry(key)
                    .or_insert_with(|| new_graph.add_node(group.clone()));
                replacements.push(terminal);
            }
            if !continuing.is_empty() {
                let key = (group.clone(), continuing.clone());
                let continuation = *signatures.entry(key).or_insert_with(|| {
                    let n = new_graph.add_node(group.clone());
                    for &child in &continuing {
                        new_graph.add_edge(n, child, ());
                    }
                    n
                });
                replacements.push(continuation);
            }

            resolved.insert(idx, replacements);
        }

        let mut roots: Vec<NodeIndex> = self
            .roots
            .iter()
            .flat_map(|r| {
                let Some(replacement) = resolved.get(r) else {
                    unreachable!("every node is resolved during the scan above")
                };
                replacement.iter().copied()
            })
            .collect();
        roots.sort_unstable();
        roots.dedup();

        Some(Self {
            graph: new_graph,
            roots,
        })
    }

    /// Enumerates one [`Vector`] per distinct root-to-sink path.
    pub(crate) fn expand(&self) -> Vec<Vector<V>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        for &root in &self.roots {
            self.collect_paths(root, &mut prefix, &mut out);
        }
        out
    }

    fn collect_paths(&self, node: NodeIndex, prefix: &mut Vec<Group<V>>, out: &mut Vec<Vector<V>>) {
        prefix.push(self.graph[node].clone());

        let mut has_successor = false;
        for child in self.graph.neighbors_directed(node, Direction::Outgoing) {
            has_successor = true;
            self.collect_paths(child, prefix, out);
        }
        if !has_successor {
            let Ok(vector) = Vector::try_from(prefix.clone()) else {
                unreachable!("a root-to-sink path always visits at least one node")
            };
            out.push(vector);
        }

        prefix.pop();
    }
}

impl<V: Clone + Eq + Hash + Ord> PartialEq for Dag<V> {
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<Vector<V>> = self.expand().into_iter().collect();
        let theirs: HashSet<Vector<V>> = other.expand().into_iter().collect();
        ours == theirs
    }
}

impl<V: Clone + Eq + Hash + Ord> Eq for Dag<V> {}

impl<V: Clone + Eq + Hash + Ord + fmt::Display> fmt::Display for Dag<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vectors = self.expand();
        vectors.sort();
        f.write_str("{")?;
        for (i, v) in vectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

//! Connected components over `0..n`, backed by petgraph.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;

/// Number of connected components of the undirected graph on `0..n` with
/// the given edges.
pub fn component_count(n: usize, edges: &[(usize, usize)]) -> usize {
    let mut graph = UnGraph::<(), ()>::with_capacity(n, edges.len());
    for _ in 0..n {
        graph.add_node(());
    }
    for &(u, v) in edges {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }
    connected_components(&graph)
}

/// Labels every element by its set, numbering sets `0, 1, 2, ...` in order
/// of their lowest element.
///
/// Returns the labels and the number of sets.
pub fn component_labels(sets: UnionFind<usize>) -> (Vec<usize>, usize) {
    let roots = sets.into_labeling();
    let mut root_label = vec![usize::MAX; roots.len()];
    let mut next = 0;
    let labels = roots
        .iter()
        .map(|&r| {
            if root_label[r] == usize::MAX {
                root_label[r] = next;
                next += 1;
            }
            root_label[r]
        })
        .collect();
    (labels, next)
}

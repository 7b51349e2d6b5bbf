use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

/// Weighted neighbor enumeration over a graph.
pub trait Pather {
    /// Graph node type. Nodes compare and hash by value.
    type Node: Clone + Eq + Hash;

    /// Append `(neighbor, edge_cost)` pairs of `node` into `buf`. The caller
    /// clears `buf` before calling. Costs must be non-negative.
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<(Self::Node, i32)>);
}

/// Pather with an admissible heuristic, as used by guided search.
pub trait AstarPather: Pather {
    /// Estimated remaining cost from `node` to the goal.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, node: &Self::Node) -> i32;
}

/// An explicit graph: node → (neighbor → edge cost).
pub type Adjacency<N> = HashMap<N, HashMap<N, i32>>;

impl<N: Clone + Eq + Hash> Pather for Adjacency<N> {
    type Node = N;

    fn neighbors(&self, node: &N, buf: &mut Vec<(N, i32)>) {
        if let Some(edges) = self.get(node) {
            buf.extend(edges.iter().map(|(n, &w)| (n.clone(), w)));
        }
    }
}

impl<N: Clone + Eq + Hash> AstarPather for Adjacency<N> {
    fn estimate(&self, _: &N) -> i32 {
        0
    }
}

/// Adapts a pair of closures to [`AstarPather`].
///
/// `neighbors` is called lazily, once per expanded node.
pub struct FnPather<N, F, H> {
    neighbors: F,
    heuristic: H,
    _node: PhantomData<fn(&N)>,
}

impl<N, F, H> FnPather<N, F, H>
where
    F: Fn(&N) -> Vec<(N, i32)>,
    H: Fn(&N) -> i32,
{
    /// Wrap a neighbor function and a heuristic.
    pub fn new(neighbors: F, heuristic: H) -> Self {
        Self {
            neighbors,
            heuristic,
            _node: PhantomData,
        }
    }
}

impl<N, F, H> Pather for FnPather<N, F, H>
where
    N: Clone + Eq + Hash,
    F: Fn(&N) -> Vec<(N, i32)>,
{
    type Node = N;

    fn neighbors(&self, node: &N, buf: &mut Vec<(N, i32)>) {
        buf.extend((self.neighbors)(node));
    }
}

impl<N, F, H> AstarPather for FnPather<N, F, H>
where
    N: Clone + Eq + Hash,
    F: Fn(&N) -> Vec<(N, i32)>,
    H: Fn(&N) -> i32,
{
    fn estimate(&self, node: &N) -> i32 {
        (self.heuristic)(node)
    }
}

use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::hash::Hash;

/// A found path together with its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<N> {
    /// Nodes from start to end, both included.
    pub nodes: Vec<N>,
    /// Sum of the edge costs along `nodes`.
    pub distance: i32,
}

impl<N> Path<N> {
    /// First node of the path.
    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Last node of the path.
    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Number of nodes, endpoints included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Errors reported by [`PathSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// No chain of edges leads from the start to the goal.
    Unreachable,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "path: goal is unreachable from start"),
        }
    }
}

impl std::error::Error for PathError {}

/// Sentinel distance meaning "unreachable".
pub const UNREACHABLE: i32 = i32::MAX;

pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Internal per-node bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct Record {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) closed: bool,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

/// Heap entry, ordered by `f` for use in `BinaryHeap`.
///
/// `g` is the distance the entry was pushed with; entries whose `g` no longer
/// matches the node's record are stale and skipped on pop.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) g: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, then the
        // earliest discovered node.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
            .then_with(|| other.g.cmp(&self.g))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Shortest-path engine over nodes of type `N`.
///
/// A `PathSearch` owns the search state (distance records, predecessors and
/// the frontier heap) and reuses its allocations between queries. Each query
/// starts from a clean state, so one value can serve many searches in a row;
/// concurrent searches each need their own `PathSearch`.
///
/// Two modes are available:
///
/// - [`exhaustive`](Self::exhaustive) settles every node reachable in an
///   explicit [`Adjacency`](crate::Adjacency) map (Dijkstra);
/// - [`guided`](Self::guided) expands nodes lazily through an
///   [`AstarPather`](crate::AstarPather) and stops as soon as the goal is
///   popped (A*).
#[derive(Debug, Clone)]
pub struct PathSearch<N> {
    pub(crate) index: HashMap<N, usize>,
    pub(crate) nodes: Vec<N>,
    pub(crate) records: Vec<Record>,
    pub(crate) open: BinaryHeap<NodeRef>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<(N, i32)>,
    pub(crate) expanded: usize,
}

impl<N: Clone + Eq + Hash> Default for PathSearch<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash> PathSearch<N> {
    /// Create an empty search engine.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an engine with room for `nodes` nodes before reallocating.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            index: HashMap::with_capacity(nodes),
            nodes: Vec::with_capacity(nodes),
            records: Vec::with_capacity(nodes),
            open: BinaryHeap::new(),
            nbuf: Vec::new(),
            expanded: 0,
        }
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of distinct nodes the last search knew about.
    pub fn discovered(&self) -> usize {
        self.nodes.len()
    }

    /// Best known distance to `node` after the last search, or `None` if the
    /// search never reached it.
    ///
    /// After [`exhaustive`](Self::exhaustive) these are final shortest
    /// distances for every node; after a guided search only the nodes
    /// settled before the goal are final.
    pub fn distance_to(&self, node: &N) -> Option<i32> {
        let &i = self.index.get(node)?;
        let g = self.records[i].g;
        (g != UNREACHABLE).then_some(g)
    }

    // -----------------------------------------------------------------------
    // Helpers shared by both modes
    // -----------------------------------------------------------------------

    pub(crate) fn reset(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.records.clear();
        self.open.clear();
        self.nbuf.clear();
        self.expanded = 0;
    }

    /// Index of `node`, registering it with an unreachable record on first
    /// sight.
    pub(crate) fn intern(&mut self, node: &N) -> usize {
        if let Some(&i) = self.index.get(node) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node.clone());
        self.records.push(Record::default());
        i
    }

    /// Make `idx` the start: distance 0, no predecessor.
    pub(crate) fn seed(&mut self, idx: usize, f: i32) {
        let r = &mut self.records[idx];
        r.g = 0;
        r.parent = NO_PARENT;
        r.closed = false;
        self.open.push(NodeRef { idx, f, g: 0 });
    }

    /// Try to improve `to` through `from` with edge cost `w`. Returns the new
    /// distance of `to` when it strictly improved.
    ///
    /// A `from` without a finite distance never yields a finite candidate.
    pub(crate) fn relax(&mut self, from: usize, to: usize, w: i32) -> Option<i32> {
        let from_g = self.records[from].g;
        if from_g == UNREACHABLE {
            return None;
        }
        let candidate = from_g.saturating_add(w);
        let r = &mut self.records[to];
        if candidate == UNREACHABLE || candidate >= r.g {
            return None;
        }
        r.g = candidate;
        r.parent = from;
        r.closed = false;
        Some(candidate)
    }

    /// Pop the next live frontier entry, skipping stale and settled ones.
    pub(crate) fn pop_open(&mut self) -> Option<NodeRef> {
        while let Some(cur) = self.open.pop() {
            let r = &self.records[cur.idx];
            if r.closed || r.g != cur.g {
                continue;
            }
            return Some(cur);
        }
        None
    }

    /// Walk predecessors back from `end` to `start`.
    pub(crate) fn reconstruct(&self, start: usize, end: usize) -> Result<Path<N>, PathError> {
        let distance = self.records[end].g;
        if distance == UNREACHABLE {
            return Err(PathError::Unreachable);
        }
        let mut path = Vec::new();
        let mut ci = end;
        loop {
            path.push(self.nodes[ci].clone());
            if ci == start {
                break;
            }
            let parent = self.records[ci].parent;
            // A broken or cyclic chain means the goal was never connected.
            if parent == NO_PARENT || path.len() > self.records.len() {
                return Err(PathError::Unreachable);
            }
            ci = parent;
        }
        path.reverse();
        Ok(Path {
            nodes: path,
            distance,
        })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let p = Path {
            nodes: vec![1u32, 2, 3],
            distance: 2,
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: Path<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}

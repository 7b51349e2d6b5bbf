use std::hash::Hash;

use log::{debug, warn};

use crate::search::{NodeRef, Path, PathError, PathSearch};
use crate::traits::Adjacency;

impl<N: Clone + Eq + Hash> PathSearch<N> {
    /// Shortest path from `start` to `end` over an explicit graph, settling
    /// every node reachable from `start` (Dijkstra).
    ///
    /// The node set is every key of `adjacency` plus every neighbor named in
    /// any edge list. Edges with negative weight are ignored. Fails with
    /// [`PathError::Unreachable`] when no predecessor chain connects `end`
    /// to `start`.
    ///
    /// After the call, [`distance_to`](Self::distance_to) reports the final
    /// distance of every node.
    pub fn exhaustive(
        &mut self,
        adjacency: &Adjacency<N>,
        start: N,
        end: N,
    ) -> Result<Path<N>, PathError> {
        self.reset();

        // Enumerate all nodes upfront.
        for (node, edges) in adjacency {
            self.intern(node);
            for n in edges.keys() {
                self.intern(n);
            }
        }
        let start_idx = self.intern(&start);
        let end_idx = self.intern(&end);
        self.seed(start_idx, 0);

        while let Some(cur) = self.pop_open() {
            let ci = cur.idx;
            self.records[ci].closed = true;
            self.expanded += 1;

            let Some(edges) = adjacency.get(&self.nodes[ci]) else {
                continue;
            };
            for (n, &w) in edges {
                if w < 0 {
                    warn!("exhaustive search: skipping negative edge weight {w}");
                    continue;
                }
                let ni = self.index[n];
                if let Some(g) = self.relax(ci, ni, w) {
                    self.open.push(NodeRef { idx: ni, f: g, g });
                }
            }
        }

        let result = self.reconstruct(start_idx, end_idx);
        debug!(
            "exhaustive search: {} nodes, {} settled, result {:?}",
            self.nodes.len(),
            self.expanded,
            result.as_ref().map(|p| p.distance)
        );
        result
    }
}

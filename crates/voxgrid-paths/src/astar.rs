use std::hash::Hash;

use log::{debug, trace, warn};

use crate::search::{NodeRef, Path, PathError, PathSearch};
use crate::traits::{AstarPather, FnPather};

impl<N: Clone + Eq + Hash> PathSearch<N> {
    /// Compute the shortest path from `start` to `end` using A*.
    ///
    /// Neighbors are requested lazily from `pather`, one expanded node at a
    /// time, and the search stops as soon as `end` leaves the frontier. With
    /// an admissible estimate the returned distance is optimal; with the zero
    /// estimate this reduces to Dijkstra.
    pub fn guided<P>(&mut self, pather: &P, start: N, end: N) -> Result<Path<N>, PathError>
    where
        P: AstarPather<Node = N>,
    {
        self.guided_any(pather, start, |n| *n == end)
    }

    /// Like [`guided`](Self::guided), but stops at the first node for which
    /// `is_goal` holds. The pather's estimate should bound the cost to the
    /// nearest such node.
    pub fn guided_any<P, G>(
        &mut self,
        pather: &P,
        start: N,
        is_goal: G,
    ) -> Result<Path<N>, PathError>
    where
        P: AstarPather<Node = N>,
        G: Fn(&N) -> bool,
    {
        self.reset();

        let start_idx = self.intern(&start);
        self.seed(start_idx, pather.estimate(&start).max(0));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(cur) = self.pop_open() else {
                break 'search None;
            };
            let ci = cur.idx;
            if is_goal(&self.nodes[ci]) {
                break 'search Some(ci);
            }

            self.records[ci].closed = true;
            self.expanded += 1;
            let current = self.nodes[ci].clone();
            trace!("guided search: expanding node #{ci} (g = {}, f = {})", cur.g, cur.f);

            nbuf.clear();
            pather.neighbors(&current, &mut nbuf);

            for (n, w) in nbuf.drain(..) {
                if n == current {
                    continue;
                }
                if w < 0 {
                    warn!("guided search: skipping negative edge weight {w}");
                    continue;
                }
                let ni = self.intern(&n);
                if let Some(g) = self.relax(ci, ni, w) {
                    let f = g.saturating_add(pather.estimate(&n).max(0));
                    self.open.push(NodeRef { idx: ni, f, g });
                }
            }
        };

        self.nbuf = nbuf;

        let result = match found {
            Some(goal_idx) => self.reconstruct(start_idx, goal_idx),
            None => Err(PathError::Unreachable),
        };
        debug!(
            "guided search: {} discovered, {} expanded, result {:?}",
            self.nodes.len(),
            self.expanded,
            result.as_ref().map(|p| p.distance)
        );
        result
    }

    /// Closure form of [`guided`](Self::guided): `neighbors` returns the
    /// `(neighbor, edge_cost)` pairs of a node and `heuristic` estimates the
    /// remaining cost. Pass [`zero_heuristic`](crate::zero_heuristic) for
    /// plain Dijkstra behavior.
    pub fn guided_fn<F, H>(
        &mut self,
        start: N,
        end: N,
        neighbors: F,
        heuristic: H,
    ) -> Result<Path<N>, PathError>
    where
        F: Fn(&N) -> Vec<(N, i32)>,
        H: Fn(&N) -> i32,
    {
        self.guided(&FnPather::new(neighbors, heuristic), start, end)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::heuristic::zero_heuristic;
    use crate::traits::Adjacency;

    fn sample() -> Adjacency<&'static str> {
        let mut g: Adjacency<&'static str> = HashMap::new();
        for (a, b, w) in [
            ("A", "B", 2),
            ("A", "D", 8),
            ("B", "D", 5),
            ("B", "E", 6),
            ("D", "E", 3),
            ("D", "F", 2),
            ("E", "F", 1),
            ("E", "C", 9),
            ("F", "C", 3),
        ] {
            g.entry(a).or_default().insert(b, w);
            g.entry(b).or_default().insert(a, w);
        }
        g
    }

    /// The 7x8 board; `#` is blocked, the goal `+` is open.
    const BOARD: &str = "\
.#.....
....#..
##.....
...#...
..#....
....#.#
....##.
.....+#";

    fn board() -> Vec<Vec<bool>> {
        BOARD
            .lines()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect()
    }

    fn blocked(b: &[Vec<bool>], x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return true;
        }
        b.get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(true)
    }

    fn four_way(b: &[Vec<bool>]) -> impl Fn(&(i32, i32)) -> Vec<((i32, i32), i32)> + '_ {
        move |&(x, y)| {
            [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                .into_iter()
                .filter(|&(nx, ny)| !blocked(b, nx, ny))
                .map(|n| (n, 1))
                .collect()
        }
    }

    fn board_adjacency(b: &[Vec<bool>]) -> Adjacency<(i32, i32)> {
        let step = four_way(b);
        let mut g = HashMap::new();
        for y in 0..b.len() as i32 {
            for x in 0..b[0].len() as i32 {
                if !blocked(b, x, y) {
                    g.insert((x, y), step(&(x, y)).into_iter().collect());
                }
            }
        }
        g
    }

    #[test]
    fn sample_graph_with_zero_heuristic() {
        let g = sample();
        let mut s = PathSearch::new();
        let guided = s.guided(&g, "A", "C").unwrap();
        let exhaustive = s.exhaustive(&g, "A", "C").unwrap();
        assert_eq!(guided.distance, 12);
        assert_eq!(guided.distance, exhaustive.distance);
    }

    #[test]
    fn closure_interface_matches_adjacency() {
        let g = sample();
        let mut s = PathSearch::new();
        let p = s
            .guided_fn(
                "A",
                "C",
                |n| g[n].iter().map(|(&m, &w)| (m, w)).collect(),
                zero_heuristic,
            )
            .unwrap();
        assert_eq!(p.distance, 12);
    }

    #[test]
    fn stops_before_settling_everything() {
        // A long tail behind the start never needs expanding.
        let mut g: Adjacency<u32> = HashMap::new();
        g.entry(0).or_default().insert(1, 1);
        for i in 0..50 {
            g.entry(0).or_default().insert(100 + i, 10);
        }
        let mut s = PathSearch::new();
        let p = s.guided(&g, 0, 1).unwrap();
        assert_eq!(p.nodes, vec![0, 1]);
        assert_eq!(s.expanded(), 1);
    }

    #[test]
    fn board_path_avoids_walls() {
        let b = board();
        let mut s = PathSearch::new();
        let p = s
            .guided_fn((0, 0), (5, 7), four_way(&b), zero_heuristic)
            .unwrap();
        assert_eq!(p.start(), Some(&(0, 0)));
        assert_eq!(p.end(), Some(&(5, 7)));
        assert_eq!(p.distance, p.len() as i32 - 1);
        for &(x, y) in &p.nodes {
            assert!(!blocked(&b, x, y), "path crosses wall at ({x}, {y})");
        }
        for w in p.nodes.windows(2) {
            let (a, c) = (w[0], w[1]);
            assert_eq!((a.0 - c.0).abs() + (a.1 - c.1).abs(), 1);
        }
    }

    #[test]
    fn board_manhattan_matches_exhaustive() {
        let b = board();
        let goal = (5, 7);
        let manhattan = move |&(x, y): &(i32, i32)| (x - goal.0).abs() + (y - goal.1).abs();
        let mut s = PathSearch::new();
        let guided = s.guided_fn((0, 0), goal, four_way(&b), manhattan).unwrap();
        let guided_expanded = s.expanded();
        let exhaustive = s.exhaustive(&board_adjacency(&b), (0, 0), goal).unwrap();
        assert_eq!(guided.distance, exhaustive.distance);
        assert_eq!(guided.distance, 14);
        assert!(guided_expanded <= s.expanded());
    }

    #[test]
    fn walled_in_goal_is_unreachable() {
        let mut g: Adjacency<u32> = HashMap::new();
        g.entry(0).or_default().insert(1, 1);
        g.entry(1).or_default().insert(0, 1);
        g.entry(2).or_default();
        let mut s = PathSearch::new();
        assert_eq!(s.guided(&g, 0, 2), Err(PathError::Unreachable));
        assert_eq!(s.exhaustive(&g, 0, 2), Err(PathError::Unreachable));
    }

    #[test]
    fn self_edges_are_discarded() {
        let mut s = PathSearch::new();
        let p = s
            .guided_fn(
                0u32,
                3,
                |&n| vec![(n, 0), (n + 1, 1)],
                zero_heuristic,
            )
            .unwrap();
        assert_eq!(p.nodes, vec![0, 1, 2, 3]);
        assert_eq!(p.distance, 3);
    }

    #[test]
    fn start_is_goal() {
        let mut s = PathSearch::new();
        let p = s.guided(&sample(), "E", "E").unwrap();
        assert_eq!(p.nodes, vec!["E"]);
        assert_eq!(p.distance, 0);
        assert_eq!(s.expanded(), 0);
    }

    #[test]
    fn guided_any_stops_at_nearest_goal() {
        let g = sample();
        let mut s = PathSearch::new();
        let p = s.guided_any(&g, "A", |n| *n == "C" || *n == "D").unwrap();
        assert_eq!(p.end(), Some(&"D"));
        assert_eq!(p.distance, 7);
    }

    #[test]
    fn infinite_graph_terminates_with_goal() {
        // Neighbors are generated on demand; the graph has no finite node set.
        let mut s = PathSearch::new();
        let goal = 37i64;
        let p = s
            .guided_fn(
                0i64,
                goal,
                |&n| vec![(n + 1, 1), (n - 1, 1), (n * 2, 1)],
                |&n| if n == goal { 0 } else { 1 },
            )
            .unwrap();
        assert_eq!(p.end(), Some(&goal));
        // 0 -> 1 -> 2 -> 4 -> 8 -> 9 -> 18 -> 36 -> 37
        assert_eq!(p.distance, 8);
    }
}

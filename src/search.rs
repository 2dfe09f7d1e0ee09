use crate::errors::{KdResult, KdTreeError};
use crate::kdtree::{KdTree, NodeId};
use crate::point::{Point, axis_distance_squared};
use log::trace;

/// A point found by a radius query together with its squared distance to the query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match<'a> {
    pub point: &'a Point,
    pub distance_squared: f64,
}

/// State of one backtracking pass, rooted at `root`.
///
/// A pass walks from the closest leaf below `root` up to `root`. When the sibling subtree of
/// the path might hold something closer, a fresh pass is started for that subtree and the
/// current one is parked until it finishes.
struct Backtrack {
    root: NodeId,
    current: NodeId,
    last: Option<NodeId>,
    best: NodeId,
    best_distance: f64,
    visited: bool,
}

impl KdTree {
    /// Walks from the root towards `query`, going right when the query is strictly greater
    /// than the node on its axis and left otherwise. Returns the last node reached.
    pub fn closest_leaf(&self, query: [f64; 3]) -> Option<NodeId> {
        self.root.map(|root| self.closest_leaf_from(root, &query))
    }

    fn closest_leaf_from(&self, start: NodeId, query: &[f64; 3]) -> NodeId {
        let mut closest = start;
        loop {
            let node = self.node(closest);
            let axis = node.axis();
            let next = if query[axis] > self.point(closest).coords[axis] {
                node.right()
            } else {
                node.left()
            };
            match next {
                Some(child) => closest = child,
                None => return closest,
            }
        }
    }

    fn start_backtrack(&self, root: NodeId, query: &[f64; 3]) -> Backtrack {
        let seed = self.closest_leaf_from(root, query);
        Backtrack {
            root,
            current: seed,
            last: None,
            best: seed,
            best_distance: self.point(seed).distance_squared(query),
            visited: false,
        }
    }

    /// Node holding the point closest to `query`.
    ///
    /// Ties keep whichever candidate was found first. Fails with [`KdTreeError::EmptyTree`] when
    /// there is nothing to search.
    pub fn nearest_node(&self, query: [f64; 3]) -> KdResult<NodeId> {
        let root = self.root.ok_or(KdTreeError::EmptyTree)?;

        let mut parked: Vec<Backtrack> = Vec::new();
        let mut pass = self.start_backtrack(root, &query);
        let mut visited = 0usize;

        loop {
            if !pass.visited {
                pass.visited = true;
                visited += 1;

                let distance = self.point(pass.current).distance_squared(&query);
                if distance < pass.best_distance {
                    pass.best = pass.current;
                    pass.best_distance = distance;
                }

                let node = self.node(pass.current);
                let plane = axis_distance_squared(&self.point(pass.current).coords, &query, node.axis());
                if plane < pass.best_distance {
                    // Whichever child we did not come up from.
                    let sibling = if pass.last == node.left() {
                        node.right()
                    } else if pass.last == node.right() {
                        node.left()
                    } else {
                        None
                    };
                    if let Some(sibling) = sibling {
                        let sub = self.start_backtrack(sibling, &query);
                        parked.push(std::mem::replace(&mut pass, sub));
                        continue;
                    }
                }
            }

            if pass.current == pass.root {
                let (best, best_distance) = (pass.best, pass.best_distance);
                match parked.pop() {
                    Some(outer) => {
                        pass = outer;
                        if best_distance < pass.best_distance {
                            pass.best = best;
                            pass.best_distance = best_distance;
                        }
                        continue;
                    }
                    None => {
                        trace!(
                            "nearest: {} nodes visited, best {} at distance^2 {}",
                            visited,
                            self.point(best).id,
                            best_distance
                        );
                        return Ok(best);
                    }
                }
            }

            match self.node(pass.current).parent() {
                Some(parent) => {
                    pass.last = Some(pass.current);
                    pass.current = parent;
                    pass.visited = false;
                }
                // Only the root lacks a parent, and the root check above caught it.
                None => return Ok(pass.best),
            }
        }
    }

    /// The point closest to `query`, by squared Euclidean distance.
    pub fn find_nearest(&self, query: [f64; 3]) -> KdResult<&Point> {
        self.nearest_node(query).map(|id| self.point(id))
    }

    /// Every point whose squared distance to `query` is strictly less than `radius_squared`.
    ///
    /// Matches are in discovery order, not sorted by distance. A radius of zero or less matches
    /// nothing.
    pub fn find_in_radius(&self, query: [f64; 3], radius_squared: f64) -> Vec<Match<'_>> {
        let mut matches = Vec::new();
        self.find_in_radius_into(query, radius_squared, &mut matches);
        matches
    }

    /// Like [`KdTree::find_in_radius`], appending to `out`. Returns the number of matches added.
    pub fn find_in_radius_into<'a>(
        &'a self,
        query: [f64; 3],
        radius_squared: f64,
        out: &mut Vec<Match<'a>>,
    ) -> usize {
        self.range_from(self.root, query, radius_squared, out)
    }

    /// Radius search restricted to the subtree rooted at `subtree`. An absent subtree yields no
    /// matches.
    ///
    /// Each node is visited at most once. The child on the query's side of the splitting plane
    /// is always followed; the other child is queued only when the query sphere crosses the
    /// plane.
    pub fn range_from<'a>(
        &'a self,
        subtree: Option<NodeId>,
        query: [f64; 3],
        radius_squared: f64,
        out: &mut Vec<Match<'a>>,
    ) -> usize {
        let before = out.len();
        let mut pending: Vec<NodeId> = subtree.into_iter().collect();

        while let Some(mut current) = pending.pop() {
            loop {
                let node = self.node(current);
                let point = self.point(current);

                let mut d = [0.0; 3];
                for (i, di) in d.iter_mut().enumerate() {
                    let delta = point.coords[i] - query[i];
                    *di = delta * delta;
                }
                let distance = d[0] + d[1] + d[2];
                if distance < radius_squared {
                    out.push(Match {
                        point,
                        distance_squared: distance,
                    });
                }

                let axis = node.axis();
                let (same, opposite) = if query[axis] > point.coords[axis] {
                    (node.right(), node.left())
                } else {
                    (node.left(), node.right())
                };

                if d[axis] < radius_squared {
                    if let Some(opposite) = opposite {
                        pending.push(opposite);
                    }
                }

                match same {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        let added = out.len() - before;
        trace!("range: {} matches within distance^2 {}", added, radius_squared);
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Point> {
        vec![
            Point::new(1, 0.0, 0.0, 0.0),
            Point::new(2, 1.0, 0.0, 0.0),
            Point::new(3, 0.0, 1.0, 0.0),
            Point::new(4, 5.0, 5.0, 5.0),
        ]
    }

    #[test]
    fn test_closest_leaf_empty() {
        assert_eq!(KdTree::new().closest_leaf([0.0; 3]), None);
    }

    #[test]
    fn test_closest_leaf_is_leaf_or_dead_end() {
        let tree = KdTree::build(scenario());
        for query in [[0.1, 0.0, 0.0], [9.0, 9.0, 9.0], [-3.0, 0.5, 0.0]] {
            let leaf = tree.closest_leaf(query).unwrap();
            let node = tree.node(leaf);
            let axis = node.axis();
            let towards = if query[axis] > tree.point(leaf).coords[axis] {
                node.right()
            } else {
                node.left()
            };
            assert_eq!(towards, None);
        }
    }

    #[test]
    fn test_nearest_on_empty_tree() {
        let tree = KdTree::new();
        assert_eq!(tree.find_nearest([0.0; 3]).unwrap_err(), KdTreeError::EmptyTree);
    }

    #[test]
    fn test_nearest_needs_backtracking() {
        // The closest leaf for the query sits on the wrong side of the root's plane.
        let tree = KdTree::build(vec![
            Point::new(1, 0.0, 0.0, 0.0),
            Point::new(2, 1.0, 10.0, 0.0),
            Point::new(3, 1.1, 0.0, 0.0),
        ]);
        let nearest = tree.find_nearest([0.9, 0.0, 0.0]).unwrap();
        assert_eq!(nearest.id, 3);
    }

    #[test]
    fn test_nearest_tie_keeps_first_found() {
        let tree = KdTree::build(vec![Point::new(1, 1.0, 0.0, 0.0), Point::new(2, 1.0, 0.0, 0.0)]);
        let seed = tree.closest_leaf([0.0, 0.0, 0.0]).unwrap();
        let nearest = tree.nearest_node([0.0, 0.0, 0.0]).unwrap();
        assert_eq!(nearest, seed);
    }

    #[test]
    fn test_range_counts() {
        let tree = KdTree::build(scenario());
        let mut out = Vec::new();
        assert_eq!(tree.find_in_radius_into([0.0; 3], 1.5, &mut out), 3);
        assert_eq!(tree.find_in_radius_into([0.0; 3], 1.5, &mut out), 3);
        assert_eq!(out.len(), 6);
        // Distance exactly equal to the radius is excluded.
        assert_eq!(tree.find_in_radius([0.0; 3], 1.0).len(), 1);
    }

    #[test]
    fn test_range_non_positive_radius() {
        let tree = KdTree::build(scenario());
        assert!(tree.find_in_radius([0.0; 3], 0.0).is_empty());
        assert!(tree.find_in_radius([0.0; 3], -4.0).is_empty());
    }

    #[test]
    fn test_range_absent_subtree() {
        let tree = KdTree::build(scenario());
        let mut out = Vec::new();
        assert_eq!(tree.range_from(None, [0.0; 3], 100.0, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_range_from_subtree() {
        let tree = KdTree::build(scenario());
        let root = tree.root().unwrap();
        let right = tree.node(root).right().unwrap();
        let mut out = Vec::new();
        let n = tree.range_from(Some(right), [0.0; 3], 1000.0, &mut out);
        assert_eq!(n, tree.pre_order_from(Some(right)).count());
        assert!(out.iter().all(|m| m.point.id != tree.point(root).id));
    }
}

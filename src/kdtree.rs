use crate::errors::{KdResult, KdTreeError};
use crate::median::{median_position, select_median};
use crate::point::Point;
use log::{debug, trace};

/// Index of a node in the tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the tree. Wraps exactly one point and links to its neighbours in the arena.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    point: u32,
    axis: u8,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    /// Index of the wrapped point in [`KdTree::points`].
    pub fn point_index(&self) -> usize {
        self.point as usize
    }

    /// Splitting axis at this node: 0, 1 or 2 for x, y, z.
    pub fn axis(&self) -> usize {
        self.axis as usize
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[inline]
fn next_axis(axis: u8) -> u8 {
    (axis + 1) % 3
}

/// A three-dimensional k-d tree over a fixed or growing set of points.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]; the points they wrap are
/// owned by the tree and never modified by queries. A tree is either built in one go with
/// [`KdTree::build`], which yields a height-balanced tree, or grown one point at a time with
/// [`KdTree::insert`], whose shape depends on insertion order. Both may be mixed.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    pub(crate) points: Vec<Point>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeId>,
}

/// Builds a balanced tree over `points`, splitting on x at the root.
pub fn build_tree(points: Vec<Point>) -> KdTree {
    KdTree::build(points)
}

impl KdTree {
    pub fn new() -> Self {
        KdTree {
            points: Vec::new(),
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Empty tree with room for `capacity` points before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        KdTree {
            points: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Builds a height-balanced tree by recursive median splits, cycling the splitting axis
    /// x, y, z with depth. An empty input produces an empty tree.
    ///
    /// Nodes are allocated in pre-order so the root is always the first node in the arena.
    pub fn build(points: Vec<Point>) -> Self {
        let count = points.len();
        let mut tree = KdTree {
            nodes: Vec::with_capacity(count),
            points,
            root: None,
        };
        if count == 0 {
            return tree;
        }

        let mut order: Vec<u32> = (0..count as u32).collect();
        tree.root = tree.build_recursive(&mut order, 0, None);

        debug!(
            "built balanced k-d tree: {} points, height {}",
            count,
            tree.height()
        );
        tree
    }

    /// Builds a balanced tree from an identifier array and an interleaved `x, y, z` array.
    pub fn from_flat(ids: &[u64], coords: &[f64]) -> KdResult<Self> {
        if coords.len() % 3 != 0 {
            return Err(KdTreeError::MalformedCoordinates { len: coords.len() });
        }
        let count = coords.len() / 3;
        if ids.len() != count {
            return Err(KdTreeError::IdCountMismatch {
                ids: ids.len(),
                points: count,
            });
        }

        let points = ids
            .iter()
            .zip(coords.chunks_exact(3))
            .map(|(&id, c)| Point::new(id, c[0], c[1], c[2]))
            .collect();
        Ok(Self::build(points))
    }

    fn build_recursive(&mut self, order: &mut [u32], axis: u8, parent: Option<NodeId>) -> Option<NodeId> {
        let point = select_median(order, &self.points, axis as usize)?;

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            point,
            axis,
            parent,
            left: None,
            right: None,
        });

        // Left side gets one fewer point than the right when the count is even.
        let mid = median_position(order.len());
        let (left, rest) = order.split_at_mut(mid);
        let right = &mut rest[1..];

        let next = next_axis(axis);
        let left = self.build_recursive(left, next, Some(id));
        self.nodes[id.index()].left = left;
        let right = self.build_recursive(right, next, Some(id));
        self.nodes[id.index()].right = right;

        Some(id)
    }

    /// Attaches `point` below the existing nodes without rebalancing.
    ///
    /// Descent starts on axis 0 at the root and advances the axis by one per level. At each node
    /// the new point goes left if its coordinate is strictly less than the node's coordinate on
    /// the node's own axis, right otherwise. Height can degrade to the point count for sorted
    /// input.
    pub fn insert(&mut self, point: Point) -> NodeId {
        let point_index = self.points.len() as u32;
        self.points.push(point);
        let id = NodeId(self.nodes.len() as u32);

        let Some(mut current) = self.root else {
            self.nodes.push(Node {
                point: point_index,
                axis: 0,
                parent: None,
                left: None,
                right: None,
            });
            self.root = Some(id);
            trace!("inserted point {} as root", point.id);
            return id;
        };

        let mut axis = 0u8;
        loop {
            let node = &self.nodes[current.index()];
            let split = self.points[node.point as usize].coords[node.axis as usize];
            let go_left = point.coords[axis as usize] < split;
            axis = next_axis(axis);

            let child = if go_left { node.left } else { node.right };
            match child {
                Some(next) => current = next,
                None => {
                    self.nodes.push(Node {
                        point: point_index,
                        axis,
                        parent: Some(current),
                        left: None,
                        right: None,
                    });
                    let parent = &mut self.nodes[current.index()];
                    if go_left {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                    trace!("inserted point {} under node {}", point.id, current.index());
                    return id;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Points in the order they were supplied; not tree order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The point wrapped by node `id`.
    #[inline]
    pub fn point(&self, id: NodeId) -> &Point {
        &self.points[self.nodes[id.index()].point as usize]
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            depth += 1;
            current = self.node(p).parent;
        }
        depth
    }

    /// Number of levels in the tree: 0 when empty, 1 for a single node.
    pub fn height(&self) -> usize {
        self.pre_order()
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Walks the whole tree in pre-order, yielding each node with its depth.
    pub fn pre_order(&self) -> PreOrder<'_> {
        self.pre_order_from(self.root)
    }

    /// Walks the subtree rooted at `start` in pre-order. Depths are relative to `start`.
    pub fn pre_order_from(&self, start: Option<NodeId>) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: start.into_iter().map(|id| (id, 0)).collect(),
        }
    }
}

impl FromIterator<Point> for KdTree {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        KdTree::build(iter.into_iter().collect())
    }
}

impl Extend<Point> for KdTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.insert(point);
        }
    }
}

/// Pre-order traversal driven by an explicit stack.
pub struct PreOrder<'a> {
    tree: &'a KdTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = self.tree.node(id);
        if let Some(right) = node.right {
            self.stack.push((right, depth + 1));
        }
        if let Some(left) = node.left {
            self.stack.push((left, depth + 1));
        }
        Some((id, depth))
    }
}

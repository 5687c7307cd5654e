//! Segment contour trees
//!
//! A segmentation region is a forest of closed contours. Children of a
//! contour are its holes, children of a hole are islands inside the hole,
//! and so on. The tree is stored as an arena: nodes live in one vector and
//! refer to their children by index, so parents always precede children and
//! the structure cannot contain a cycle. The serialized form is the nested
//! [`Segment`] list, rebuilt through the same checks on load.

use overlaykit_core::{ContourError, Point};
use serde::{Deserialize, Serialize};

/// Index of a node in a [`SegmentTree`]
pub type SegmentId = usize;

/// Owned, nested contour used to assemble a tree in one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub points: Vec<Point>,
    #[serde(default)]
    pub children: Vec<Segment>,
}

impl Segment {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Segment) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SegmentNode {
    points: Vec<Point>,
    children: Vec<SegmentId>,
    depth: usize,
}

/// Arena of contours with child-index lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct SegmentTree {
    nodes: Vec<SegmentNode>,
    roots: Vec<SegmentId>,
}

impl SegmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nested segments, keeping sibling order.
    pub fn from_nested<I>(roots: I) -> Result<Self, ContourError>
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut tree = Self::new();
        // (parent, segment) pairs; children are pushed reversed so they pop in order.
        let mut pending: Vec<(Option<SegmentId>, Segment)> = Vec::new();
        let mut roots: Vec<Segment> = roots.into_iter().collect();
        roots.reverse();
        pending.extend(roots.into_iter().map(|s| (None, s)));

        while let Some((parent, segment)) = pending.pop() {
            let Segment { points, children } = segment;
            let id = match parent {
                None => tree.add_root(points)?,
                Some(parent) => tree.add_child(parent, points)?,
            };
            pending.extend(children.into_iter().rev().map(|c| (Some(id), c)));
        }
        Ok(tree)
    }

    /// Nested copy of the tree, roots and children in insertion order
    pub fn to_nested(&self) -> Vec<Segment> {
        self.roots.iter().map(|&id| self.nested(id)).collect()
    }

    fn nested(&self, id: SegmentId) -> Segment {
        let node = &self.nodes[id];
        Segment {
            points: node.points.clone(),
            children: node.children.iter().map(|&c| self.nested(c)).collect(),
        }
    }

    /// Append a top-level contour
    pub fn add_root(&mut self, points: Vec<Point>) -> Result<SegmentId, ContourError> {
        let id = self.push_node(points, 0)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Append a hole (or island) under `parent`
    pub fn add_child(
        &mut self,
        parent: SegmentId,
        points: Vec<Point>,
    ) -> Result<SegmentId, ContourError> {
        let depth = self.node(parent)?.depth + 1;
        let id = self.push_node(points, depth)?;
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    pub fn children(&self, id: SegmentId) -> Result<&[SegmentId], ContourError> {
        Ok(&self.node(id)?.children)
    }

    pub fn points(&self, id: SegmentId) -> Result<&[Point], ContourError> {
        Ok(&self.node(id)?.points)
    }

    /// Nesting level of `id`; roots are at depth 0
    pub fn depth(&self, id: SegmentId) -> Result<usize, ContourError> {
        Ok(self.node(id)?.depth)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order walk over every node, roots in insertion order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    fn node(&self, id: SegmentId) -> Result<&SegmentNode, ContourError> {
        self.nodes.get(id).ok_or(ContourError::DanglingIndex {
            index: id,
            len: self.nodes.len(),
        })
    }

    fn push_node(&mut self, points: Vec<Point>, depth: usize) -> Result<SegmentId, ContourError> {
        let id = self.nodes.len();
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(ContourError::NonFinitePoint {
                segment: id,
                x: bad.x,
                y: bad.y,
            });
        }
        self.nodes.push(SegmentNode {
            points,
            children: Vec::new(),
            depth,
        });
        Ok(id)
    }
}

impl TryFrom<Vec<Segment>> for SegmentTree {
    type Error = ContourError;

    fn try_from(roots: Vec<Segment>) -> Result<Self, Self::Error> {
        Self::from_nested(roots)
    }
}

impl From<SegmentTree> for Vec<Segment> {
    fn from(tree: SegmentTree) -> Self {
        tree.to_nested()
    }
}

/// Pre-order iterator returned by [`SegmentTree::pre_order`]
pub struct PreOrder<'a> {
    tree: &'a SegmentTree,
    stack: Vec<SegmentId>,
}

/// A node visited by [`PreOrder`]
#[derive(Debug, Clone, Copy)]
pub struct SegmentView<'a> {
    pub id: SegmentId,
    pub depth: usize,
    pub points: &'a [Point],
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = SegmentView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id];
        self.stack.extend(node.children.iter().rev().copied());
        Some(SegmentView {
            id,
            depth: node.depth,
            points: &node.points,
        })
    }
}

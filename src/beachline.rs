//! The beach line: a height-balanced binary tree whose leaves are parabolic
//! arcs and whose internal nodes are breakpoints between them.

use crate::dcel::{FaceIndex, HalfEdgeIndex};
use crate::event::CircleEventIndex;
use crate::geometry;
use crate::point::Point;
use crate::typed_vec::{TypedIndex, TypedVec};

pub type NodeIndex = TypedIndex<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ArcData {
    focus: Point,
    face: FaceIndex,
    circle_event: Option<CircleEventIndex>,
}

#[derive(Debug, Clone, Copy)]
struct BreakPointData {
    half_edge: Option<HalfEdgeIndex>,
}

#[derive(Debug, Clone, Copy)]
enum NodeData {
    Arc(ArcData),
    BreakPoint(BreakPointData),
}

#[derive(Debug, Clone, Copy)]
pub struct Node {
    parent: Option<NodeIndex>,
    parent_side: Option<Side>,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
    data: NodeData,
}

/// Result of splitting an arc in two when a new site event arrives under it.
pub struct SplitResult {
    pub arc_left: NodeIndex,
    pub arc_new: NodeIndex,
    pub arc_right: NodeIndex,
    pub left_breakpoint: NodeIndex,
    pub right_breakpoint: NodeIndex,
}

/// Result of squeezing an arc out when a circle event fires.
pub struct DeleteResult {
    pub left_breakpoint: NodeIndex,
    pub right_breakpoint: NodeIndex,
    /// The breakpoint that vanished along with the arc.
    pub removed: NodeIndex,
    /// The breakpoint that survives, now tracking the new edge between the
    /// arc's former neighbors.
    pub updated: NodeIndex,
}

#[derive(Debug, Clone, Default)]
pub struct BeachLine {
    nodes: TypedVec<Node>,
    root: Option<NodeIndex>,
}

impl BeachLine {
    pub fn new() -> Self {
        BeachLine {
            nodes: TypedVec::new(),
            root: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn focus(&self, arc: NodeIndex) -> Point {
        match self.nodes.get(arc).data {
            NodeData::Arc(a) => a.focus,
            NodeData::BreakPoint(_) => panic!("focus() called on a breakpoint node"),
        }
    }

    pub fn face_of(&self, arc: NodeIndex) -> FaceIndex {
        match self.nodes.get(arc).data {
            NodeData::Arc(a) => a.face,
            NodeData::BreakPoint(_) => panic!("face_of() called on a breakpoint node"),
        }
    }

    pub fn set_circle_event(&mut self, arc: NodeIndex, event: Option<CircleEventIndex>) {
        match &mut self.nodes.get_mut(arc).data {
            NodeData::Arc(a) => a.circle_event = event,
            NodeData::BreakPoint(_) => panic!("set_circle_event() called on a breakpoint node"),
        }
    }

    pub fn circle_event_of(&self, arc: NodeIndex) -> Option<CircleEventIndex> {
        match self.nodes.get(arc).data {
            NodeData::Arc(a) => a.circle_event,
            NodeData::BreakPoint(_) => panic!("circle_event_of() called on a breakpoint node"),
        }
    }

    pub fn set_half_edge(&mut self, breakpoint: NodeIndex, half_edge: HalfEdgeIndex) {
        match &mut self.nodes.get_mut(breakpoint).data {
            NodeData::BreakPoint(bp) => bp.half_edge = Some(half_edge),
            NodeData::Arc(_) => panic!("set_half_edge() called on an arc node"),
        }
    }

    pub fn half_edge_of(&self, breakpoint: NodeIndex) -> Option<HalfEdgeIndex> {
        match self.nodes.get(breakpoint).data {
            NodeData::BreakPoint(bp) => bp.half_edge,
            NodeData::Arc(_) => panic!("half_edge_of() called on an arc node"),
        }
    }

    pub fn get_left_arc(&self, breakpoint: NodeIndex) -> NodeIndex {
        let mut cur = self.nodes.get(breakpoint).left.expect("breakpoint missing left child");
        loop {
            let node = self.nodes.get(cur);
            match node.data {
                NodeData::Arc(_) => return cur,
                NodeData::BreakPoint(_) => cur = node.right.or(node.left).expect("breakpoint has a child"),
            }
        }
    }

    pub fn get_right_arc(&self, breakpoint: NodeIndex) -> NodeIndex {
        let mut cur = self.nodes.get(breakpoint).right.expect("breakpoint missing right child");
        loop {
            let node = self.nodes.get(cur);
            match node.data {
                NodeData::Arc(_) => return cur,
                NodeData::BreakPoint(_) => cur = node.left.or(node.right).expect("breakpoint has a child"),
            }
        }
    }

    pub fn coords_at(&self, breakpoint: NodeIndex, sweep_y: f64) -> Point {
        let left = self.focus(self.get_left_arc(breakpoint));
        let right = self.focus(self.get_right_arc(breakpoint));
        geometry::breakpoint_xy(left, right, sweep_y, None)
    }

    fn key_at(&self, node: NodeIndex, sweep_y: f64) -> f64 {
        match self.nodes.get(node).data {
            NodeData::Arc(a) => a.focus.x,
            NodeData::BreakPoint(_) => self.coords_at(node, sweep_y).x,
        }
    }

    pub fn search(&self, x: f64, sweep_y: f64) -> NodeIndex {
        let mut node = self.root.expect("search on an empty beach line");
        loop {
            match self.nodes.get(node).data {
                NodeData::Arc(_) => return node,
                NodeData::BreakPoint(_) => {
                    let n = self.nodes.get(node);
                    node = if self.key_at(node, sweep_y) > x {
                        n.left.expect("breakpoint missing left child")
                    } else {
                        n.right.expect("breakpoint missing right child")
                    };
                }
            }
        }
    }

    pub fn get_nodes_ordered(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.in_order(root, &mut out);
        }
        out
    }

    fn in_order(&self, node: NodeIndex, out: &mut Vec<NodeIndex>) {
        let n = self.nodes.get(node);
        if let Some(left) = n.left {
            self.in_order(left, out);
        }
        out.push(node);
        if let Some(right) = n.right {
            self.in_order(right, out);
        }
    }

    pub fn get_arcs_ordered(&self) -> Vec<NodeIndex> {
        self.get_nodes_ordered()
            .into_iter()
            .filter(|&n| matches!(self.nodes.get(n).data, NodeData::Arc(_)))
            .collect()
    }

    pub fn get_surrounding_breakpoints(&self, arc: NodeIndex) -> (NodeIndex, NodeIndex) {
        let nodes = self.get_nodes_ordered();
        let pos = nodes
            .iter()
            .position(|&n| n == arc)
            .expect("arc is present in the beach line");
        (nodes[pos - 1], nodes[pos + 1])
    }

    // `None` if `arc` doesn't have two neighbors on the `reverse` side yet.
    pub fn get_three_consecutive_arcs(
        &self,
        arc: NodeIndex,
        reverse: bool,
    ) -> Option<(NodeIndex, NodeIndex, NodeIndex)> {
        let arcs = self.get_arcs_ordered();
        let pos = arcs.iter().position(|&a| a == arc)?;
        let slice = if reverse {
            let start = pos.saturating_sub(2);
            &arcs[start..(pos + 1).min(arcs.len())]
        } else {
            &arcs[pos..(pos + 3).min(arcs.len())]
        };
        if slice.len() == 3 {
            Some((slice[0], slice[1], slice[2]))
        } else {
            None
        }
    }

    fn child(&self, node: NodeIndex, side: Side) -> Option<NodeIndex> {
        let n = self.nodes.get(node);
        match side {
            Side::Left => n.left,
            Side::Right => n.right,
        }
    }

    fn set_child(&mut self, node: NodeIndex, side: Side, child: Option<NodeIndex>) {
        let n = self.nodes.get_mut(node);
        match side {
            Side::Left => n.left = child,
            Side::Right => n.right = child,
        }
    }

    fn set_parent(&mut self, node: NodeIndex, parent: Option<NodeIndex>, side: Option<Side>) {
        let n = self.nodes.get_mut(node);
        n.parent = parent;
        n.parent_side = side;
    }

    fn new_node(&mut self, data: NodeData) -> NodeIndex {
        self.nodes.insert(Node {
            parent: None,
            parent_side: None,
            left: None,
            right: None,
            data,
        })
    }

    fn attach_children(&mut self, parent: NodeIndex, left: NodeIndex, right: NodeIndex) {
        self.set_child(parent, Side::Left, Some(left));
        self.set_child(parent, Side::Right, Some(right));
        self.set_parent(left, Some(parent), Some(Side::Left));
        self.set_parent(right, Some(parent), Some(Side::Right));
    }

    pub(crate) fn insert_first_arc(&mut self, focus: Point, face: FaceIndex) -> NodeIndex {
        let node = self.new_node(NodeData::Arc(ArcData {
            focus,
            face,
            circle_event: None,
        }));
        self.root = Some(node);
        node
    }

    /// Splits `arc` into `arc_left, arc_new, arc_right` under a pair of new
    /// breakpoints, wires the new subtree into `arc`'s old slot, and rebalances.
    pub(crate) fn split_arc(&mut self, arc: NodeIndex, new_focus: Point, new_face: FaceIndex) -> SplitResult {
        let (old_focus, old_face) = match self.nodes.get(arc).data {
            NodeData::Arc(a) => (a.focus, a.face),
            NodeData::BreakPoint(_) => panic!("split_arc() called on a breakpoint node"),
        };
        let parent = self.nodes.get(arc).parent;
        let parent_side = self.nodes.get(arc).parent_side;

        let arc_left = self.new_node(NodeData::Arc(ArcData {
            focus: old_focus,
            face: old_face,
            circle_event: None,
        }));
        let arc_new = self.new_node(NodeData::Arc(ArcData {
            focus: new_focus,
            face: new_face,
            circle_event: None,
        }));
        let arc_right = self.new_node(NodeData::Arc(ArcData {
            focus: old_focus,
            face: old_face,
            circle_event: None,
        }));

        let right_bp = self.new_node(NodeData::BreakPoint(BreakPointData { half_edge: None }));
        self.attach_children(right_bp, arc_new, arc_right);

        let left_bp = self.new_node(NodeData::BreakPoint(BreakPointData { half_edge: None }));
        self.attach_children(left_bp, arc_left, right_bp);
        self.set_parent(left_bp, parent, parent_side);

        match parent {
            Some(p) => self.set_child(p, parent_side.expect("parent side set alongside parent"), Some(left_bp)),
            None => self.root = Some(left_bp),
        }

        self.balance_and_propagate(left_bp);

        SplitResult {
            arc_left,
            arc_new,
            arc_right,
            left_breakpoint: left_bp,
            right_breakpoint: right_bp,
        }
    }

    /// Removes `arc` (whose circle event just fired) from the tree.
    pub(crate) fn delete(&mut self, arc: NodeIndex) -> DeleteResult {
        let (left_bp, right_bp) = self.get_surrounding_breakpoints(arc);

        let parent = self.nodes.get(arc).parent.expect("arc has a parent breakpoint");
        let parent_side = self.nodes.get(arc).parent_side.expect("arc has a parent side");
        let opposite = parent_side.other();
        let sibling = self.child(parent, opposite);

        let grandparent = self.nodes.get(parent).parent;
        let grandparent_side = self.nodes.get(parent).parent_side;

        match grandparent {
            Some(gp) => self.set_child(gp, grandparent_side.expect("grandparent side set"), sibling),
            None => self.root = sibling,
        }
        if let Some(sib) = sibling {
            self.set_parent(sib, grandparent, grandparent_side);
        }

        let removed = if opposite == Side::Right { right_bp } else { left_bp };
        let updated = if opposite == Side::Left { right_bp } else { left_bp };

        if let Some(gp) = grandparent {
            self.balance_and_propagate(gp);
        }

        DeleteResult {
            left_breakpoint: left_bp,
            right_breakpoint: right_bp,
            removed,
            updated,
        }
    }

    fn depth(&self, node: Option<NodeIndex>) -> i64 {
        match node {
            None => 0,
            Some(n) => {
                let node = self.nodes.get(n);
                1 + self.depth(node.right).max(self.depth(node.left))
            }
        }
    }

    fn balance_factor(&self, node: NodeIndex) -> i64 {
        let n = self.nodes.get(node);
        self.depth(n.right) - self.depth(n.left)
    }

    fn left_rotate(&mut self, node: NodeIndex) -> NodeIndex {
        if self.depth(Some(node)) < 3 {
            return node;
        }
        let right = self.nodes.get(node).right.expect("left_rotate requires a right child");
        let right_left = self.nodes.get(right).left;
        self.set_child(node, Side::Right, right_left);
        if let Some(rl) = right_left {
            self.set_parent(rl, Some(node), Some(Side::Right));
        }
        self.set_child(right, Side::Left, Some(node));

        let parent = self.nodes.get(node).parent;
        let parent_side = self.nodes.get(node).parent_side;
        self.set_parent(node, Some(right), Some(Side::Left));
        self.nodes.get_mut(right).parent = parent;
        self.nodes.get_mut(right).parent_side = parent_side;

        match parent {
            Some(p) => self.set_child(p, parent_side.expect("parent side set alongside parent"), Some(right)),
            None => self.root = Some(right),
        }
        right
    }

    fn right_rotate(&mut self, node: NodeIndex) -> NodeIndex {
        if self.depth(Some(node)) < 3 {
            return node;
        }
        let left = self.nodes.get(node).left.expect("right_rotate requires a left child");
        let left_right = self.nodes.get(left).right;
        self.set_child(node, Side::Left, left_right);
        if let Some(lr) = left_right {
            self.set_parent(lr, Some(node), Some(Side::Left));
        }
        self.set_child(left, Side::Right, Some(node));

        let parent = self.nodes.get(node).parent;
        let parent_side = self.nodes.get(node).parent_side;
        self.set_parent(node, Some(left), Some(Side::Right));
        self.nodes.get_mut(left).parent = parent;
        self.nodes.get_mut(left).parent_side = parent_side;

        match parent {
            Some(p) => self.set_child(p, parent_side.expect("parent side set alongside parent"), Some(left)),
            None => self.root = Some(left),
        }
        left
    }

    fn balance(&mut self, node: NodeIndex) -> NodeIndex {
        match self.balance_factor(node) {
            -2 => {
                let left = self.nodes.get(node).left.expect("bf -2 implies a left child");
                if self.balance_factor(left) == 1 {
                    self.left_rotate(left);
                }
                self.right_rotate(node)
            }
            2 => {
                let right = self.nodes.get(node).right.expect("bf 2 implies a right child");
                if self.balance_factor(right) == -1 {
                    self.right_rotate(right);
                }
                self.left_rotate(node)
            }
            _ => node,
        }
    }

    fn balance_and_propagate(&mut self, node: NodeIndex) {
        let root = self.balance(node);
        if let Some(parent) = self.nodes.get(root).parent {
            self.balance_and_propagate(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding_box::BoundingBox;
    use crate::dcel::Tessellation;

    /// Three distinct, stable `FaceIndex`es to hang arcs off in tests.
    fn three_faces() -> (Tessellation, FaceIndex, FaceIndex, FaceIndex) {
        let sites = vec![Point::new(-5.0, 10.0), Point::new(0.0, 8.0), Point::new(5.0, 6.0)];
        let bbox = BoundingBox::from_sites(&sites, 1.0);
        let t = Tessellation::new(sites, bbox);
        let f0 = t.face_index_of_site(0);
        let f1 = t.face_index_of_site(1);
        let f2 = t.face_index_of_site(2);
        (t, f0, f1, f2)
    }

    #[test]
    fn first_site_becomes_the_only_arc() {
        let (_t, f0, _f1, _f2) = three_faces();
        let mut bl = BeachLine::new();
        let arc = bl.insert_first_arc(Point::new(0.0, 0.0), f0);
        assert_eq!(bl.root(), Some(arc));
        assert_eq!(bl.get_arcs_ordered(), vec![arc]);
    }

    #[test]
    fn splitting_an_arc_produces_three_arcs_in_order() {
        let (_t, f0, f1, _f2) = three_faces();
        let mut bl = BeachLine::new();
        let arc = bl.insert_first_arc(Point::new(0.0, 10.0), f0);
        let split = bl.split_arc(arc, Point::new(0.0, 5.0), f1);
        let ordered = bl.get_arcs_ordered();
        assert_eq!(ordered, vec![split.arc_left, split.arc_new, split.arc_right]);
    }

    #[test]
    fn deleting_the_middle_arc_of_a_triple_leaves_two_arcs() {
        let (_t, f0, f1, f2) = three_faces();
        let mut bl = BeachLine::new();
        let arc = bl.insert_first_arc(Point::new(-5.0, 10.0), f0);
        let split = bl.split_arc(arc, Point::new(0.0, 8.0), f1);
        let _split2 = bl.split_arc(split.arc_right, Point::new(5.0, 6.0), f2);

        let middle = split.arc_new;
        let result = bl.delete(middle);
        let ordered = bl.get_arcs_ordered();
        assert_eq!(ordered.len(), 2);
        assert!(!ordered.contains(&middle));
        assert_ne!(result.left_breakpoint, result.right_breakpoint);
        assert!(!bl.get_nodes_ordered().contains(&result.removed));
        assert!(bl.get_nodes_ordered().contains(&result.updated));
    }
}

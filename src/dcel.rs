//! Half-edges, faces, vertices, and the [`Tessellation`] they make up.
//! Everything is indexed into a `TypedVec` arena rather than linked through
//! `Rc`/`RefCell`.

use std::collections::HashSet;

use crate::beachline::NodeIndex;
use crate::bounding_box::BoundingBox;
use crate::point::Point;
use crate::typed_vec::{TypedIndex, TypedVec};

pub type VertexIndex = TypedIndex<Vertex>;
pub type HalfEdgeIndex = TypedIndex<HalfEdge>;
pub type FaceIndex = TypedIndex<Face>;

/// A concrete location, or a placeholder pointing back at the breakpoint
/// node whose sweep position will eventually determine it.
#[derive(Debug, Clone, Copy)]
pub enum VertexOrigin {
    Defined(Point),
    Pending(NodeIndex),
}

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    origin: VertexOrigin,
    // Only true for a circle event's own circumcenter. Clipping placeholders
    // stay false even once resolved, so `vertices()` can tell them apart.
    from_circle_event: bool,
}

impl Vertex {
    fn defined(point: Point) -> Self {
        Vertex {
            origin: VertexOrigin::Defined(point),
            from_circle_event: true,
        }
    }

    fn pending(breakpoint: NodeIndex) -> Self {
        Vertex {
            origin: VertexOrigin::Pending(breakpoint),
            from_circle_event: false,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self.origin, VertexOrigin::Defined(_))
    }

    pub fn point(&self) -> Option<Point> {
        match self.origin {
            VertexOrigin::Defined(p) => Some(p),
            VertexOrigin::Pending(_) => None,
        }
    }

    pub fn pending_breakpoint(&self) -> Option<NodeIndex> {
        match self.origin {
            VertexOrigin::Pending(bp) => Some(bp),
            VertexOrigin::Defined(_) => None,
        }
    }

    fn resolve(&mut self, point: Point) {
        self.origin = VertexOrigin::Defined(point);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    origin: VertexIndex,
    twin: Option<HalfEdgeIndex>,
    next: Option<HalfEdgeIndex>,
    prev: Option<HalfEdgeIndex>,
    incident_face: FaceIndex,
}

impl HalfEdge {
    pub fn origin(&self) -> VertexIndex {
        self.origin
    }

    pub fn twin(&self) -> Option<HalfEdgeIndex> {
        self.twin
    }

    pub fn next(&self) -> Option<HalfEdgeIndex> {
        self.next
    }

    pub fn prev(&self) -> Option<HalfEdgeIndex> {
        self.prev
    }

    pub fn incident_face(&self) -> FaceIndex {
        self.incident_face
    }
}

#[derive(Debug, Clone)]
pub struct Face {
    site: Point,
    outer_component: Option<HalfEdgeIndex>,
}

impl Face {
    pub fn site(&self) -> Point {
        self.site
    }

    pub fn outer_component(&self) -> Option<HalfEdgeIndex> {
        self.outer_component
    }
}

/// The output of the algorithm: every face, half-edge, and vertex produced
/// over the sweep, plus the bounding box edges were clipped against.
#[derive(Debug, Clone)]
pub struct Tessellation {
    sites: Vec<Point>,
    faces: TypedVec<Face>,
    vertices: TypedVec<Vertex>,
    half_edges: TypedVec<HalfEdge>,
    bounding_box: BoundingBox,
    // Edges both of whose endpoints were still placeholders when the sweep
    // ended. Hidden from `half_edges()` unless the caller opted in via
    // `Config::retain_unbounded_edges`.
    hidden_edges: HashSet<HalfEdgeIndex>,
}

impl Tessellation {
    pub(crate) fn new(sites: Vec<Point>, bounding_box: BoundingBox) -> Self {
        let mut faces = TypedVec::new();
        for &site in &sites {
            faces.insert(Face {
                site,
                outer_component: None,
            });
        }
        Tessellation {
            sites,
            faces,
            vertices: TypedVec::new(),
            half_edges: TypedVec::new(),
            bounding_box,
            hidden_edges: HashSet::new(),
        }
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn face_index_of_site(&self, index: usize) -> FaceIndex {
        debug_assert!(index < self.sites.len());
        // Faces are inserted in the same order as `sites`, so the site's
        // position in the sorted list is also its face's arena index.
        self.faces.iter().nth(index).expect("site index in range").0
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceIndex, &Face)> {
        self.faces.iter()
    }

    pub fn face(&self, index: FaceIndex) -> &Face {
        self.faces.get(index)
    }

    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeIndex, &HalfEdge)> {
        self.half_edges.iter().filter(move |(idx, _)| !self.hidden_edges.contains(idx))
    }

    pub fn half_edge(&self, index: HalfEdgeIndex) -> &HalfEdge {
        self.half_edges.get(index)
    }

    /// Circle-event circumcenters only; clipping placeholders are excluded
    /// even once resolved.
    pub fn vertices(&self) -> Vec<Point> {
        self.vertices
            .iter()
            .filter(|(_, v)| v.from_circle_event)
            .filter_map(|(_, v)| v.point())
            .collect()
    }

    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        self.vertices.get(index)
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub(crate) fn add_vertex_defined(&mut self, point: Point) -> VertexIndex {
        self.vertices.insert(Vertex::defined(point))
    }

    pub(crate) fn add_vertex_pending(&mut self, breakpoint: NodeIndex) -> VertexIndex {
        self.vertices.insert(Vertex::pending(breakpoint))
    }

    pub(crate) fn resolve_vertex(&mut self, index: VertexIndex, point: Point) {
        self.vertices.get_mut(index).resolve(point);
    }

    // Walks live half-edge origins rather than the raw vertex arena, so a
    // placeholder a circle event already overwrote (`set_half_edge_origin`)
    // doesn't get resolved a second time through its now-dangling back-reference.
    pub(crate) fn pending_vertex_indices(&self) -> Vec<(VertexIndex, NodeIndex)> {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for (_, half_edge) in self.half_edges.iter() {
            let origin = half_edge.origin;
            if !seen.insert(origin) {
                continue;
            }
            if let Some(breakpoint) = self.vertices.get(origin).pending_breakpoint() {
                pending.push((origin, breakpoint));
            }
        }
        pending
    }

    pub(crate) fn add_half_edge_pair(
        &mut self,
        origin_a: VertexIndex,
        face_a: FaceIndex,
        origin_b: VertexIndex,
        face_b: FaceIndex,
    ) -> (HalfEdgeIndex, HalfEdgeIndex) {
        let he_a = self.half_edges.insert(HalfEdge {
            origin: origin_a,
            twin: None,
            next: None,
            prev: None,
            incident_face: face_a,
        });
        let he_b = self.half_edges.insert(HalfEdge {
            origin: origin_b,
            twin: None,
            next: None,
            prev: None,
            incident_face: face_b,
        });
        self.half_edges.get_mut(he_a).twin = Some(he_b);
        self.half_edges.get_mut(he_b).twin = Some(he_a);

        if self.faces.get(face_a).outer_component.is_none() {
            self.faces.get_mut(face_a).outer_component = Some(he_a);
        }
        if self.faces.get(face_b).outer_component.is_none() {
            self.faces.get_mut(face_b).outer_component = Some(he_b);
        }

        (he_a, he_b)
    }

    pub(crate) fn set_half_edge_origin(&mut self, half_edge: HalfEdgeIndex, origin: VertexIndex) {
        self.half_edges.get_mut(half_edge).origin = origin;
    }

    pub(crate) fn link(&mut self, prev: HalfEdgeIndex, next: HalfEdgeIndex) {
        self.half_edges.get_mut(prev).next = Some(next);
        self.half_edges.get_mut(next).prev = Some(prev);
    }

    pub(crate) fn hide_half_edges(&mut self, edges: impl IntoIterator<Item = HalfEdgeIndex>) {
        self.hidden_edges.extend(edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tessellation_with_two_sites() -> (Tessellation, FaceIndex, FaceIndex) {
        let sites = vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        let bbox = BoundingBox::from_sites(&sites, 2.0);
        let t = Tessellation::new(sites, bbox);
        let fa = t.face_index_of_site(0);
        let fb = t.face_index_of_site(1);
        (t, fa, fb)
    }

    #[test]
    fn half_edge_pair_are_mutual_twins() {
        let (mut t, fa, fb) = tessellation_with_two_sites();
        let va = t.add_vertex_defined(Point::new(1.0, 0.0));
        let vb = t.add_vertex_defined(Point::new(1.0, 1.0));
        let (he_a, he_b) = t.add_half_edge_pair(va, fa, vb, fb);
        assert_eq!(t.half_edge(he_a).twin(), Some(he_b));
        assert_eq!(t.half_edge(he_b).twin(), Some(he_a));
    }

    #[test]
    fn faces_adopt_first_half_edge_as_outer_component() {
        let (mut t, fa, fb) = tessellation_with_two_sites();
        let va = t.add_vertex_defined(Point::new(1.0, 0.0));
        let vb = t.add_vertex_defined(Point::new(1.0, 1.0));
        let (he_a, he_b) = t.add_half_edge_pair(va, fa, vb, fb);
        assert_eq!(t.face(fa).outer_component(), Some(he_a));
        assert_eq!(t.face(fb).outer_component(), Some(he_b));
    }

    #[test]
    fn vertices_only_reports_defined_ones() {
        let (mut t, _fa, _fb) = tessellation_with_two_sites();
        t.add_vertex_defined(Point::new(1.0, 1.0));
        assert_eq!(t.vertices().len(), 1);
    }

    #[test]
    fn resolved_clipping_placeholders_are_not_voronoi_vertices() {
        let (mut t, fa, fb) = tessellation_with_two_sites();
        let mut bl = crate::beachline::BeachLine::new();
        let arc = bl.insert_first_arc(Point::new(0.0, 0.0), fa);

        let circumcenter = t.add_vertex_defined(Point::new(1.0, 1.0));
        let placeholder = t.add_vertex_pending(arc);
        t.add_half_edge_pair(circumcenter, fa, placeholder, fb);

        // Finishing resolves the placeholder to a concrete point...
        t.resolve_vertex(placeholder, Point::new(1.0, -5.0));
        // ...but it's a clip endpoint, not a Voronoi vertex.
        assert_eq!(t.vertices(), vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn overwritten_placeholder_origin_is_excluded_from_pending() {
        let (mut t, fa, fb) = tessellation_with_two_sites();
        let mut bl = crate::beachline::BeachLine::new();
        let arc = bl.insert_first_arc(Point::new(0.0, 0.0), fa);

        let placeholder = t.add_vertex_pending(arc);
        let other = t.add_vertex_defined(Point::new(1.0, 1.0));
        let (he, _twin) = t.add_half_edge_pair(placeholder, fa, other, fb);

        // A circle event gives `he` a concrete origin instead, orphaning
        // the original placeholder vertex.
        let resolved = t.add_vertex_defined(Point::new(2.0, 2.0));
        t.set_half_edge_origin(he, resolved);

        assert!(t.pending_vertex_indices().is_empty());
    }
}

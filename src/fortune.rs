//! The sweep-line driver: validates input, runs the event loop, and finishes
//! whatever edges the beach line never got around to closing.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::beachline::{BeachLine, NodeIndex};
use crate::bounding_box::BoundingBox;
use crate::dcel::{Tessellation, VertexIndex};
use crate::error::VoronoiError;
use crate::event::{Event, EventQueue};
use crate::geometry;
use crate::inspector::{NullObserver, SweepObserver, SweepSnapshot};
use crate::point::Point;
use crate::sweep_line::SweepLine;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    // Padding added around the sites' bounding hull on every side.
    pub margin: f64,
    // How far past the bottom of the bounding box unresolved edges are
    // extended when the sweep finishes.
    pub finishing_offset: f64,
    // Keep edges whose both endpoints were never pinned down by a circle
    // event, rather than hiding them.
    pub retain_unbounded_edges: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            margin: 10.0,
            finishing_offset: 10.0,
            retain_unbounded_edges: false,
        }
    }
}

impl Config {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_finishing_offset(mut self, offset: f64) -> Self {
        self.finishing_offset = offset;
        self
    }

    pub fn with_retain_unbounded_edges(mut self, retain: bool) -> Self {
        self.retain_unbounded_edges = retain;
        self
    }
}

pub fn build_tessellation(sites: &[Point]) -> Result<Tessellation, VoronoiError> {
    build_tessellation_with(sites, &Config::default())
}

pub fn build_tessellation_with(sites: &[Point], config: &Config) -> Result<Tessellation, VoronoiError> {
    build_tessellation_observed(sites, config, &mut NullObserver)
}

pub fn build_tessellation_observed(
    sites: &[Point],
    config: &Config,
    observer: &mut impl SweepObserver,
) -> Result<Tessellation, VoronoiError> {
    if sites.is_empty() {
        return Err(VoronoiError::EmptyInput);
    }

    let mut sorted = sites.to_vec();
    sorted.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap().then(a.x.partial_cmp(&b.x).unwrap()));
    for pair in sorted.windows(2) {
        if pair[0].x == pair[1].x && pair[0].y == pair[1].y {
            return Err(VoronoiError::DuplicateSite {
                x: pair[0].x,
                y: pair[0].y,
            });
        }
    }

    let bounding_box = BoundingBox::from_sites(&sorted, config.margin);
    let mut tessellation = Tessellation::new(sorted.clone(), bounding_box);
    let mut beach_line = BeachLine::new();
    let mut sweep_line = SweepLine::new();
    let mut event_queue = EventQueue::new();

    for (index, site) in sorted.iter().enumerate() {
        event_queue.push_site(index, *site);
    }

    while let Some(event) = event_queue.pop() {
        match event {
            Event::Site(index) => handle_site_event(
                index,
                sorted[index],
                &mut beach_line,
                &mut tessellation,
                &mut event_queue,
                &bounding_box,
                &mut sweep_line,
            ),
            Event::Circle(index) => {
                let record = *event_queue.circle_event(index);
                handle_circle_event(
                    &record,
                    &mut beach_line,
                    &mut tessellation,
                    &mut event_queue,
                    &bounding_box,
                    &mut sweep_line,
                )
            }
        }

        let arcs: Vec<Point> = beach_line.get_arcs_ordered().iter().map(|&a| beach_line.focus(a)).collect();
        let snapshot = SweepSnapshot {
            sweep_y: sweep_line.height(),
            event_site: match event {
                Event::Site(index) => Some(sorted[index]),
                Event::Circle(_) => None,
            },
            arcs: &arcs,
        };
        observer.on_step(&event, &snapshot);
    }

    finish_edges(&mut tessellation, &beach_line, config);

    Ok(tessellation)
}

#[allow(clippy::too_many_arguments)]
fn handle_site_event(
    site_index: usize,
    point: Point,
    beach_line: &mut BeachLine,
    tessellation: &mut Tessellation,
    event_queue: &mut EventQueue,
    bounding_box: &BoundingBox,
    sweep_line: &mut SweepLine,
) {
    sweep_line.set_height(point.y);
    trace!("site event at ({}, {})", point.x, point.y);

    let new_face = tessellation.face_index_of_site(site_index);

    if beach_line.is_empty() {
        beach_line.insert_first_arc(point, new_face);
        return;
    }

    let arc = beach_line.search(point.x, point.y);
    if let Some(circle) = beach_line.circle_event_of(arc) {
        event_queue.invalidate(circle);
        beach_line.set_circle_event(arc, None);
    }

    let old_face = beach_line.face_of(arc);
    let split = beach_line.split_arc(arc, point, new_face);

    let v_right = tessellation.add_vertex_pending(split.right_breakpoint);
    let v_left = tessellation.add_vertex_pending(split.left_breakpoint);
    let (he_right_side, he_left_side) = tessellation.add_half_edge_pair(v_right, old_face, v_left, new_face);
    beach_line.set_half_edge(split.right_breakpoint, he_right_side);
    beach_line.set_half_edge(split.left_breakpoint, he_left_side);

    look_for_circle_event(beach_line, event_queue, bounding_box, split.arc_new, false);
    look_for_circle_event(beach_line, event_queue, bounding_box, split.arc_new, true);
}

#[allow(clippy::too_many_arguments)]
fn handle_circle_event(
    record: &crate::event::CircleEventRecord,
    beach_line: &mut BeachLine,
    tessellation: &mut Tessellation,
    event_queue: &mut EventQueue,
    bounding_box: &BoundingBox,
    sweep_line: &mut SweepLine,
) {
    let trigger = record.trigger_point();
    sweep_line.set_height(trigger.y);
    debug!("circle event at ({}, {}), radius {}", record.center.x, record.center.y, record.radius);

    if let Some(pred_event) = beach_line.circle_event_of(record.predecessor) {
        event_queue.invalidate(pred_event);
        beach_line.set_circle_event(record.predecessor, None);
    }
    if let Some(succ_event) = beach_line.circle_event_of(record.successor) {
        event_queue.invalidate(succ_event);
        beach_line.set_circle_event(record.successor, None);
    }

    let deleted = beach_line.delete(record.arc);

    let vertex = tessellation.add_vertex_defined(record.center);

    let he_left = beach_line
        .half_edge_of(deleted.left_breakpoint)
        .expect("left breakpoint carries a half-edge");
    let he_right = beach_line
        .half_edge_of(deleted.right_breakpoint)
        .expect("right breakpoint carries a half-edge");
    tessellation.set_half_edge_origin(he_left, vertex);
    tessellation.set_half_edge_origin(he_right, vertex);

    let updated = deleted.updated;
    let left_arc = beach_line.get_left_arc(updated);
    let right_arc = beach_line.get_right_arc(updated);
    let face_left = beach_line.face_of(left_arc);
    let face_right = beach_line.face_of(right_arc);

    let v_pending = tessellation.add_vertex_pending(updated);
    let (he_1, he_2) = tessellation.add_half_edge_pair(vertex, face_left, v_pending, face_right);

    let he_left_twin = tessellation.half_edge(he_left).twin().expect("he_left has a twin");
    let he_right_twin = tessellation.half_edge(he_right).twin().expect("he_right has a twin");
    tessellation.link(he_left_twin, he_1);
    tessellation.link(he_right_twin, he_left);
    tessellation.link(he_2, he_right);

    beach_line.set_half_edge(updated, he_2);

    look_for_circle_event(beach_line, event_queue, bounding_box, left_arc, false);
    look_for_circle_event(beach_line, event_queue, bounding_box, right_arc, true);
}

fn look_for_circle_event(
    beach_line: &mut BeachLine,
    event_queue: &mut EventQueue,
    bounding_box: &BoundingBox,
    arc: NodeIndex,
    reverse: bool,
) {
    let Some((predecessor, middle, successor)) = beach_line.get_three_consecutive_arcs(arc, reverse) else {
        return;
    };

    let a = beach_line.focus(predecessor);
    let b = beach_line.focus(middle);
    let c = beach_line.focus(successor);

    let Some(center) = geometry::circumcenter(a, b, c) else {
        return;
    };

    if !bounding_box.contains(&center) {
        return;
    }
    if !geometry::is_clockwise(a, b, c, center) {
        return;
    }

    let radius = a.distance(&center);
    let circle = event_queue.push_circle(center, radius, middle, predecessor, successor);
    beach_line.set_circle_event(middle, Some(circle));
}

fn finish_edges(tessellation: &mut Tessellation, beach_line: &BeachLine, config: &Config) {
    let finish_y = tessellation.bounding_box().y_min - config.finishing_offset;
    let pending = tessellation.pending_vertex_indices();

    if pending.is_empty() {
        return;
    }
    warn!("{} edge(s) left unbounded at the end of the sweep, finishing at y={}", pending.len(), finish_y);

    for &(vertex, breakpoint) in &pending {
        let point = beach_line.coords_at(breakpoint, finish_y);
        tessellation.resolve_vertex(vertex, point);
    }

    if !config.retain_unbounded_edges {
        let pending_set: HashSet<VertexIndex> = pending.iter().map(|&(v, _)| v).collect();
        let mut hidden = Vec::new();
        for (index, he) in tessellation.half_edges() {
            if !pending_set.contains(&he.origin()) {
                continue;
            }
            let Some(twin) = he.twin() else { continue };
            if pending_set.contains(&tessellation.half_edge(twin).origin()) {
                hidden.push(index);
            }
        }
        tessellation.hide_half_edges(hidden);
    }
}

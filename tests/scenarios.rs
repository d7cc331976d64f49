use approx::assert_relative_eq;
use itertools::Itertools;

use fortune_voronoi::{build_tessellation, build_tessellation_with, Config, Point, VoronoiError};

#[test]
fn empty_input_is_rejected() {
    let result = build_tessellation(&[]);
    assert_eq!(result.unwrap_err(), VoronoiError::EmptyInput);
}

#[test]
fn duplicate_site_is_rejected() {
    let sites = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(1.0, 1.0)];
    match build_tessellation(&sites).unwrap_err() {
        VoronoiError::DuplicateSite { x, y } => {
            assert_relative_eq!(x, 1.0);
            assert_relative_eq!(y, 1.0);
        }
        other => panic!("expected DuplicateSite, got {other:?}"),
    }
}

#[test]
fn single_site_has_one_face_and_no_vertices() {
    let sites = [Point::new(0.0, 0.0)];
    let diagram = build_tessellation(&sites).unwrap();
    assert_eq!(diagram.faces().count(), 1);
    assert!(diagram.vertices().is_empty());
    assert!(diagram.half_edges().next().is_none());
}

#[test]
fn two_sites_produce_one_unbounded_bisector() {
    let sites = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];

    // By default a bisector neither end of which was ever pinned down by a
    // circle event is hidden rather than reported as a synthetic segment.
    let hidden_by_default = build_tessellation(&sites).unwrap();
    assert!(hidden_by_default.vertices().is_empty());
    assert_eq!(hidden_by_default.half_edges().count(), 0);

    let retained = build_tessellation_with(&sites, &Config::default().with_retain_unbounded_edges(true)).unwrap();
    assert_eq!(retained.half_edges().count(), 2);
    // The midline between two equal-weight sites is vertical.
    for (_, edge) in retained.half_edges() {
        let origin = retained.vertex(edge.origin()).point().unwrap();
        assert_relative_eq!(origin.x, 2.0, epsilon = 1e-6);
    }
}

#[test]
fn three_non_collinear_sites_meet_at_their_circumcenter() {
    let sites = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 4.0)];
    let diagram = build_tessellation(&sites).unwrap();

    assert_eq!(diagram.faces().count(), 3);
    assert_eq!(diagram.vertices().len(), 1);
    assert_eq!(diagram.half_edges().count(), 6);

    let vertex = diagram.vertices()[0];
    assert_relative_eq!(vertex.x, 2.0, epsilon = 1e-6);
    assert_relative_eq!(vertex.y, 1.5, epsilon = 1e-6);

    for site in &sites {
        assert_relative_eq!(vertex.distance(site), 2.5, epsilon = 1e-6);
    }
}

#[test]
fn collinear_sites_never_produce_a_circle_event() {
    let sites = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)];
    let diagram = build_tessellation(&sites).unwrap();
    assert!(diagram.vertices().is_empty());

    let retained = build_tessellation_with(&sites, &Config::default().with_retain_unbounded_edges(true)).unwrap();
    assert_eq!(retained.half_edges().count(), 4);
}

#[test]
fn four_cocircular_sites_still_resolve_without_panicking() {
    // Exact squares put two circle events at the same trigger point; the
    // tie-break in the event queue must not deadlock or double-handle an arc.
    let sites = [
        Point::new(-1.0, -1.0),
        Point::new(1.0, -1.0),
        Point::new(1.0, 1.0),
        Point::new(-1.0, 1.0),
    ];
    let diagram = build_tessellation(&sites).unwrap();
    assert_eq!(diagram.faces().count(), 4);
    assert!(diagram.vertices().len() <= 2);
}

#[test]
fn vertex_set_is_invariant_under_input_order() {
    let sites = [
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(2.0, 4.0),
        Point::new(2.0, -5.0),
    ];
    let reversed: Vec<Point> = sites.iter().rev().copied().collect();

    let forward = build_tessellation(&sites).unwrap();
    let backward = build_tessellation(&reversed).unwrap();

    let key = |p: &Point| ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64);
    let forward_keys: Vec<_> = forward.vertices().iter().map(key).sorted().collect();
    let backward_keys: Vec<_> = backward.vertices().iter().map(key).sorted().collect();

    assert_eq!(forward_keys, backward_keys);
}

#[test]
fn random_sites_respect_the_euler_bound_and_vertex_degree() {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(20260728);
    let sites: Vec<Point> = (0..50)
        .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    let n = sites.len();

    let diagram = build_tessellation(&sites).unwrap();

    assert!(diagram.vertices().len() <= 2 * n - 5);
    assert!(diagram.half_edges().count() / 2 <= 3 * n - 6);

    let real_vertices = diagram.vertices();
    let mut degree: HashMap<_, u32> = HashMap::new();
    for (_, half_edge) in diagram.half_edges() {
        *degree.entry(half_edge.origin()).or_insert(0) += 1;
    }
    for (vertex_index, count) in &degree {
        let Some(point) = diagram.vertex(*vertex_index).point() else { continue };
        if real_vertices.contains(&point) {
            assert_eq!(*count, 3, "every Voronoi vertex should have degree 3");
        }
    }
}

#[test]
fn logging_can_be_initialized_by_a_consumer() {
    let _ = env_logger::builder().is_test(true).try_init();
    let sites = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 4.0)];
    let diagram = build_tessellation(&sites).unwrap();
    assert_eq!(diagram.vertices().len(), 1);
}

#[test]
fn every_face_corresponds_to_a_distinct_site() {
    let sites = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 1.0),
        Point::new(3.0, 6.0),
        Point::new(-2.0, 3.0),
    ];
    let diagram = build_tessellation(&sites).unwrap();
    let face_sites: Vec<Point> = diagram.faces().map(|(_, f)| f.site()).collect();
    assert_eq!(face_sites.len(), sites.len());
    for site in &sites {
        assert!(face_sites.iter().any(|s| s.distance(site) < 1e-9));
    }
}

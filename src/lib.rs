//! Planar Voronoi tessellation via Fortune's sweep-line algorithm.
//!
//! ```no_run
//! use fortune_voronoi::{build_tessellation, Point};
//!
//! let sites = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 3.0)];
//! let diagram = build_tessellation(&sites).unwrap();
//! for vertex in diagram.vertices() {
//!     println!("{vertex}");
//! }
//! ```

mod beachline;
mod bounding_box;
mod dcel;
mod error;
mod event;
mod fortune;
mod geometry;
mod inspector;
mod point;
mod sweep_line;
mod typed_vec;

pub use bounding_box::BoundingBox;
pub use dcel::{Face, FaceIndex, HalfEdge, HalfEdgeIndex, Tessellation, Vertex, VertexIndex, VertexOrigin};
pub use error::VoronoiError;
pub use fortune::{build_tessellation, build_tessellation_observed, build_tessellation_with, Config};
pub use inspector::{NullObserver, SweepObserver, SweepSnapshot};
pub use point::Point;

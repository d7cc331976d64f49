//! Error taxonomy for the core. Numeric degeneracies are handled locally in
//! `geometry`/`beachline` and never escape as an `Err`; invariant violations
//! panic rather than threading through `Result`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VoronoiError {
    #[error("cannot build a tessellation from zero sites")]
    EmptyInput,

    #[error("duplicate site at ({x}, {y}): Fortune's algorithm requires distinct sites")]
    DuplicateSite { x: f64, y: f64 },
}

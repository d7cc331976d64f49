//! A read-only hook into the sweep, for callers that want to watch the
//! algorithm work without the core depending on any rendering stack.

use crate::event::Event;
use crate::point::Point;

#[derive(Debug, Clone, Copy)]
pub struct SweepSnapshot<'a> {
    pub sweep_y: f64,
    pub event_site: Option<Point>,
    pub arcs: &'a [Point],
}

pub trait SweepObserver {
    fn on_step(&mut self, _event: &Event, _snapshot: &SweepSnapshot<'_>) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SweepObserver for NullObserver {}

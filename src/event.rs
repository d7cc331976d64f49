//! The sweep-line event queue: site events and circle events, ordered by
//! decreasing `y` (ties broken by increasing `x`, circle before site on an
//! exact tie). Invalidated circle events stay in the queue as tombstones
//! and are skipped on pop rather than removed.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::beachline::NodeIndex;
use crate::point::Point;
use crate::typed_vec::{TypedIndex, TypedVec};

pub type CircleEventIndex = TypedIndex<CircleEventRecord>;

#[derive(Debug, Clone, Copy)]
pub struct CircleEventRecord {
    pub center: Point,
    pub radius: f64,
    pub arc: NodeIndex,
    pub predecessor: NodeIndex,
    pub successor: NodeIndex,
    valid: bool,
}

impl CircleEventRecord {
    // y of the circle's lowest point, where this event actually fires.
    pub fn trigger_point(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Site(usize),
    Circle(CircleEventIndex),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EventPriority {
    y: OrderedFloat<f64>,
    x: OrderedFloat<f64>,
    is_circle: bool,
}

impl EventPriority {
    fn new(point: Point, is_circle: bool) -> Self {
        EventPriority {
            y: OrderedFloat(point.y),
            x: OrderedFloat(point.x),
            is_circle,
        }
    }
}

impl Eq for EventPriority {}

impl PartialOrd for EventPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match other.x.cmp(&self.x) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match (self.is_circle, other.is_circle) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug)]
pub struct EventQueue {
    queue: PriorityQueue<Event, EventPriority>,
    circle_events: TypedVec<CircleEventRecord>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue {
            queue: PriorityQueue::new(),
            circle_events: TypedVec::new(),
        }
    }

    pub fn push_site(&mut self, site_index: usize, point: Point) {
        self.queue.push(Event::Site(site_index), EventPriority::new(point, false));
    }

    pub fn push_circle(
        &mut self,
        center: Point,
        radius: f64,
        arc: NodeIndex,
        predecessor: NodeIndex,
        successor: NodeIndex,
    ) -> CircleEventIndex {
        let record = CircleEventRecord {
            center,
            radius,
            arc,
            predecessor,
            successor,
            valid: true,
        };
        let trigger = record.trigger_point();
        let index = self.circle_events.insert(record);
        self.queue.push(Event::Circle(index), EventPriority::new(trigger, true));
        index
    }

    pub fn invalidate(&mut self, index: CircleEventIndex) {
        self.circle_events.get_mut(index).valid = false;
    }

    pub fn circle_event(&self, index: CircleEventIndex) -> &CircleEventRecord {
        self.circle_events.get(index)
    }

    /// Pops the next live event, silently discarding any tombstoned circle
    /// events it finds along the way.
    pub fn pop(&mut self) -> Option<Event> {
        loop {
            let (event, _priority) = self.queue.pop()?;
            if let Event::Circle(index) = event {
                if !self.circle_events.get(index).valid {
                    continue;
                }
            }
            return Some(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

//! Pure numeric helpers: parabola evaluation, breakpoint intersection,
//! circumcenters, and the clockwise test used to validate circle events.
//! Naive double-precision arithmetic, no epsilon fudging.

use crate::point::Point;

pub fn parabola_y(x: f64, focus: Point, sweep_y: f64) -> f64 {
    let dy = focus.y - sweep_y;
    ((x - focus.x).powi(2) + focus.y.powi(2) - sweep_y.powi(2)) / (2.0 * dy)
}

// `y_max` stands in for +infinity when the breakpoint has swept above the
// beach line entirely; callers that only need relative `x` order pass a
// finite value instead.
pub fn breakpoint_xy(left: Point, right: Point, sweep_y: f64, y_max: Option<f64>) -> Point {
    let (a, b) = (left.x, left.y);
    let (c, d) = (right.x, right.y);
    let s = sweep_y;

    let mut p = left;
    let x;

    if b == d {
        x = (a + c) / 2.0;
        if c < a {
            return Point::new(x, y_max.unwrap_or(f64::INFINITY));
        }
    } else if b == s {
        x = a;
        p = right;
    } else if d == s {
        x = c;
    } else {
        let u = 2.0 * (b - s);
        let v = 2.0 * (d - s);
        x = -((v * (a * a * u - 2.0 * a * c * u + b * b * (u - v) + c * c * u)
            + d * d * u * (v - u)
            + s * s * (u - v) * (u - v))
        .sqrt()
            + a * v
            - c * u)
            / (u - v);
    }

    let u = 2.0 * (p.y - s);
    if u == 0.0 {
        return Point::new(x, f64::INFINITY);
    }
    let y = (1.0 / u) * (x * x - 2.0 * p.x * x + p.x * p.x + p.y * p.y - s * s);
    Point::new(x, y)
}

// `None` if the three foci are exactly collinear.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * ((b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x));
    if d == 0.0 {
        return None;
    }

    let t2 = (b.x - a.x) * (a.x + b.x) + (b.y - a.y) * (a.y + b.y);
    let t3 = (c.x - a.x) * (a.x + c.x) + (c.y - a.y) * (a.y + c.y);

    let x = ((c.y - a.y) * t2 - (b.y - a.y) * t3) / d;
    let y = ((b.x - a.x) * t3 - (c.x - a.x) * t2) / d;

    Some(Point::new(x, y))
}

fn polar_angle(point: Point, center: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).rem_euclid(std::f64::consts::TAU)
}

// True iff `a, b, c` appear in clockwise order as seen from `center`; false
// means the middle focus's arc is vanishing upward, so discard the event.
pub fn is_clockwise(a: Point, b: Point, c: Point, center: Point) -> bool {
    let angle_a = polar_angle(a, center);
    let angle_b = polar_angle(b, center);
    let angle_c = polar_angle(c, center);

    let tau = std::f64::consts::TAU;
    let counter_clockwise = (angle_c - angle_a).rem_euclid(tau) > (angle_c - angle_b).rem_euclid(tau);
    !counter_clockwise
}

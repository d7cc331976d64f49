//! Axis-aligned rectangle enclosing the input sites, inflated by a margin.

use crate::point::Point;

#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    // Panics if `sites` is empty; the driver validates that first.
    pub fn from_sites(sites: &[Point], margin: f64) -> Self {
        let x_min = sites.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let x_max = sites.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let y_min = sites.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_max = sites.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        BoundingBox {
            x_min: x_min - margin,
            x_max: x_max + margin,
            y_min: y_min - margin,
            y_max: y_max + margin,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x > self.x_min && point.x < self.x_max && point.y > self.y_min && point.y < self.y_max
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_min),
            Point::new(self.x_max, self.y_max),
            Point::new(self.x_min, self.y_max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sites_inflates_hull_by_margin() {
        let sites = [Point::new(0.0, 0.0), Point::new(4.0, 2.0)];
        let bbox = BoundingBox::from_sites(&sites, 2.0);
        assert_eq!(bbox.x_min, -2.0);
        assert_eq!(bbox.x_max, 6.0);
        assert_eq!(bbox.y_min, -2.0);
        assert_eq!(bbox.y_max, 4.0);
    }

    #[test]
    fn contains_is_strict_on_the_boundary() {
        let bbox = BoundingBox::from_sites(&[Point::new(0.0, 0.0), Point::new(2.0, 2.0)], 0.0);
        assert!(!bbox.contains(&Point::new(0.0, 1.0)));
        assert!(bbox.contains(&Point::new(1.0, 1.0)));
    }
}

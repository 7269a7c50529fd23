//! Stay-within area geometry.
//!
//! An objective's allowed region has an inner bound (fully compliant) and an
//! outer bound. Between the two the player is in the warning sub-zone: the
//! tracker shows a warning but no grace period runs. Only beyond the outer
//! bound does the grace countdown start.

use serde::{Deserialize, Serialize};

/// A position on the world's horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Where the player stands relative to an objective's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    Inside,
    /// Outside the inner bound but still within the outer bound.
    Warning,
    Outside,
}

impl Containment {
    /// Inside or in the warning sub-zone -- either one keeps the grace
    /// period from starting and clears a running one.
    pub fn is_compliant(self) -> bool {
        !matches!(self, Containment::Outside)
    }
}

/// Axis-aligned rectangle, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectBounds {
    pub min: Point,
    pub max: Point,
}

impl RectBounds {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The region a stay-within objective confines the player to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum StayWithinArea {
    /// Point-of-interest region: inner bound is `radius`, outer bound is
    /// `radius + margin`.
    Radial {
        center: Point,
        radius: f64,
        margin: f64,
    },
    /// Generic rectangular region with explicit inner and outer rectangles.
    Rect {
        inner: RectBounds,
        outer: RectBounds,
    },
}

impl StayWithinArea {
    pub fn classify(&self, pos: Point) -> Containment {
        match *self {
            StayWithinArea::Radial {
                center,
                radius,
                margin,
            } => {
                let d = center.distance(pos);
                if d <= radius {
                    Containment::Inside
                } else if d <= radius + margin {
                    Containment::Warning
                } else {
                    Containment::Outside
                }
            }
            StayWithinArea::Rect { inner, outer } => {
                if inner.contains(pos) {
                    Containment::Inside
                } else if outer.contains(pos) {
                    Containment::Warning
                } else {
                    Containment::Outside
                }
            }
        }
    }

    /// Shrink the radial warning margin by the configured multiplier.
    ///
    /// Applied when a point-of-interest objective's bounds are parsed, so
    /// the countdown starts closer to the region itself. Rectangular areas
    /// keep their explicit outer bound unchanged.
    pub fn apply_margin_multiplier(&mut self, multiplier: f64) {
        if let StayWithinArea::Radial { margin, .. } = self {
            *margin *= multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radial() -> StayWithinArea {
        StayWithinArea::Radial {
            center: Point::new(0.0, 0.0),
            radius: 10.0,
            margin: 6.0,
        }
    }

    #[test]
    fn radial_classification() {
        let area = radial();
        assert_eq!(area.classify(Point::new(3.0, 4.0)), Containment::Inside);
        assert_eq!(area.classify(Point::new(12.0, 0.0)), Containment::Warning);
        assert_eq!(area.classify(Point::new(20.0, 0.0)), Containment::Outside);
    }

    #[test]
    fn radial_bounds_are_inclusive() {
        let area = radial();
        assert_eq!(area.classify(Point::new(10.0, 0.0)), Containment::Inside);
        assert_eq!(area.classify(Point::new(16.0, 0.0)), Containment::Warning);
    }

    #[test]
    fn rect_classification() {
        let area = StayWithinArea::Rect {
            inner: RectBounds::new(Point::new(-5.0, -5.0), Point::new(5.0, 5.0)),
            outer: RectBounds::new(Point::new(-8.0, -8.0), Point::new(8.0, 8.0)),
        };
        assert_eq!(area.classify(Point::new(0.0, 0.0)), Containment::Inside);
        assert_eq!(area.classify(Point::new(6.0, 0.0)), Containment::Warning);
        assert_eq!(area.classify(Point::new(9.0, 0.0)), Containment::Outside);
    }

    #[test]
    fn margin_multiplier_shrinks_radial_warning_zone() {
        let mut area = radial();
        area.apply_margin_multiplier(0.5);
        assert_eq!(area.classify(Point::new(12.0, 0.0)), Containment::Warning);
        assert_eq!(area.classify(Point::new(14.0, 0.0)), Containment::Outside);
    }

    #[test]
    fn margin_multiplier_leaves_rect_unchanged() {
        let inner = RectBounds::new(Point::new(-5.0, -5.0), Point::new(5.0, 5.0));
        let outer = RectBounds::new(Point::new(-8.0, -8.0), Point::new(8.0, 8.0));
        let mut area = StayWithinArea::Rect { inner, outer };
        area.apply_margin_multiplier(0.33);
        assert_eq!(area, StayWithinArea::Rect { inner, outer });
    }

    #[test]
    fn warning_counts_as_compliant() {
        assert!(Containment::Inside.is_compliant());
        assert!(Containment::Warning.is_compliant());
        assert!(!Containment::Outside.is_compliant());
    }
}

/// 2D line segments
use crate::vector::Vector2D;

/// Which segments an intersection point has to lie on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionBound {
    /// Only the receiving segment is bounded; `other` acts as an infinite line.
    OneSided,
    /// The point must lie on both segments.
    #[default]
    Both,
}

/// Alias for the receiver-only bound
pub const ONE_SIDED_BOUND: IntersectionBound = IntersectionBound::OneSided;

/// Segment from `point1` to `point2`, parametrized as `point1 + t * (point2 - point1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2D {
    pub point1: Vector2D,
    pub point2: Vector2D,
}

impl LineSegment2D {
    pub fn new(point1: impl Into<Vector2D>, point2: impl Into<Vector2D>) -> Self {
        Self {
            point1: point1.into(),
            point2: point2.into(),
        }
    }

    pub fn direction(&self) -> Vector2D {
        self.point2 - self.point1
    }

    /// Crossing point of the two segments, `None` when parallel or out of bounds.
    pub fn find_intersection(&self, other: &Self) -> Option<Vector2D> {
        self.find_intersection_with(other, IntersectionBound::Both)
    }

    pub fn find_intersection_with(
        &self,
        other: &Self,
        bound: IntersectionBound,
    ) -> Option<Vector2D> {
        let (x1, y1) = (self.point1.x, self.point1.y);
        let (x2, y2) = (self.point2.x, self.point2.y);
        let (x3, y3) = (other.point1.x, other.point1.y);
        let (x4, y4) = (other.point2.x, other.point2.y);

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        if bound == IntersectionBound::Both {
            let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;
            if !(0.0..=1.0).contains(&u) {
                return None;
            }
        }

        Some(self.point1 + self.direction() * t)
    }
}

//! World-space positions.

/// A point on the world plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point `distance` units from `self` along the line towards `target`.
    ///
    /// Returns `self` when both points coincide.
    pub fn point_towards(self, target: Position, distance: f32) -> Position {
        let length = self.distance(target);
        if length <= f32::EPSILON {
            return self;
        }
        let t = distance / length;
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// Points sampled every `stride` units on the segment `self..=end`.
    ///
    /// Both endpoints are always included.
    pub fn sample_segment(self, end: Position, stride: f32) -> Vec<Position> {
        let length = self.distance(end);
        if length <= f32::EPSILON || stride <= 0.0 {
            return vec![self];
        }
        let steps = (length / stride).floor() as usize;
        let mut points: Vec<Position> = (0..=steps)
            .map(|i| self.point_towards(end, i as f32 * stride))
            .collect();
        if points.last().is_some_and(|last| last.distance(end) > f32::EPSILON) {
            points.push(end);
        }
        points
    }
}

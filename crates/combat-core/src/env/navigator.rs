use crate::geometry::Position;

/// Pathfinding and locomotion.
///
/// `stay_in_frame` asks the host to restrict queries to the currently loaded
/// region of the map.
pub trait Navigator {
    /// Walking distance between two points, `f32::INFINITY` when unreachable.
    fn path_distance(&self, from: Position, to: Position, stay_in_frame: bool) -> f32;

    fn can_see(&self, from: Position, to: Position, stay_in_frame: bool) -> bool;

    /// Nearest walkable point to `point`.
    fn walkable_near(&self, point: Position) -> Position {
        point
    }

    /// Issues one movement step towards `point`; false when no step was taken.
    fn move_towards(&mut self, point: Position) -> bool;
}

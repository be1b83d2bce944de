//! Spatial queries over the tick snapshot.
use combat_core::{Candidate, Door, EntityId, Navigator, Position, Rarity};

/// Spacing of sample points along a segment.
pub const SEGMENT_STRIDE: f32 = 10.0;

/// Corpses further than this (straight line or walking) are not raised.
pub const CORPSE_RADIUS: f32 = 30.0;

/// Number of live hostiles strictly within `radius` of `point`.
///
/// `exclude` skips the entity the query is centred on.
pub fn hostiles_near(
    hostiles: &[Candidate],
    point: Position,
    radius: f32,
    exclude: Option<EntityId>,
) -> usize {
    hostiles
        .iter()
        .filter(|candidate| Some(candidate.id) != exclude)
        .filter(|candidate| candidate.is_active())
        .filter(|candidate| candidate.position.distance(point) < radius)
        .count()
}

/// How crowded the straight line from `start` to `end` is.
///
/// Samples the segment every [`SEGMENT_STRIDE`] units and counts, for each
/// sample, the live hostiles within `radius` of it. A hostile close to several
/// samples is counted once per sample.
pub fn hostiles_along(
    hostiles: &[Candidate],
    start: Position,
    end: Position,
    radius: f32,
) -> usize {
    let live: Vec<&Candidate> = hostiles.iter().filter(|c| c.is_active()).collect();
    if live.is_empty() {
        return 0;
    }
    start
        .sample_segment(end, SEGMENT_STRIDE)
        .into_iter()
        .map(|sample| {
            live.iter()
                .filter(|candidate| candidate.position.distance(sample) <= radius)
                .count()
        })
        .sum()
}

/// Whether a closed door lies within `radius` of the segment, sampled every
/// `stride` units.
pub fn closed_door_between(
    doors: &[Door],
    start: Position,
    end: Position,
    radius: f32,
    stride: f32,
) -> bool {
    let closed: Vec<&Door> = doors.iter().filter(|door| !door.opened).collect();
    if closed.is_empty() {
        return false;
    }
    start.sample_segment(end, stride).into_iter().any(|sample| {
        closed
            .iter()
            .any(|door| door.position.distance(sample) <= radius)
    })
}

/// The point `distance` units from `from` towards `to`.
pub fn point_towards(from: Position, to: Position, distance: f32) -> Position {
    from.point_towards(to, distance)
}

/// Nearest body a corpse ability can use.
///
/// Bodies qualify when they are close both in a straight line and by walking
/// distance, are flagged usable and did not belong to a unique.
pub fn best_corpse<'a, N>(
    hostiles: &'a [Candidate],
    agent: Position,
    navigator: &N,
    stay_in_frame: bool,
) -> Option<&'a Candidate>
where
    N: Navigator + ?Sized,
{
    hostiles
        .iter()
        .filter(|candidate| {
            candidate.distance < CORPSE_RADIUS
                && candidate.is_active_dead()
                && candidate.rarity != Rarity::Unique
                && candidate.corpse_usable
        })
        .filter(|candidate| {
            navigator.path_distance(agent, candidate.position, stay_in_frame) < CORPSE_RADIUS
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

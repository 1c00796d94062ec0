//! Shared path/stamp types and the "prepend the implicit start" iteration
//! pattern used by commit (§4.4), the timeline projector (§4.5) and the text
//! renderer (§4.6) alike.

use serde::Serialize;

use crate::topology::model::HubId;

/// 1-based index of a drone in the solve order `D1 .. D_nb_drones` (§5).
pub type DroneId = u32;

/// A single `(hub, turn)` stamp in a drone's path (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stamp {
    pub hub: HubId,
    pub turn: u32,
}

/// A drone's accepted path: the sequence of stamps returned by the search
/// (§4.4), *not* including the implicit `(start, 0)` stamp every drone
/// begins at.
pub type Path = Vec<Stamp>;

/// Iterates `(previous, current)` stamp pairs across a drone's full
/// space-time trajectory, prepending the implicit `(start, 0)` stamp that
/// every path begins at but that `path_so_far` itself omits (§4.4 commit
/// rule, §4.5 timeline projection, §4.6 rendering all walk this same
/// sequence of pairs).
pub fn consecutive_pairs(start: HubId, path: &[Stamp]) -> impl Iterator<Item = (Stamp, Stamp)> + '_ {
    let initial = Stamp { hub: start, turn: 0 };
    std::iter::once(initial)
        .chain(path.iter().copied())
        .zip(path.iter().copied())
}

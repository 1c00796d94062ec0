//! Per-drone time-expanded search (SPEC_FULL.md §4.4).
//!
//! A min-heap frontier ordered by `(turn, priority, insertion sequence)`,
//! grounded on the `BinaryHeap` + reversed custom `Ord` pattern used for
//! PDR-ordered routing state in `RustRoveri-server`'s `Topology` (see
//! DESIGN.md), generalized from a single ordering field to this scheduler's
//! three-way tiebreak.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::path::{Path, Stamp};
use crate::topology::model::{HubId, Network, Zone};

use super::registry::AdjacencyRegistry;
use super::reservation::{ReservationTable, ResourceKey};

#[derive(Debug, Clone, Eq, PartialEq)]
struct FrontierState {
    turn: u32,
    priority: i64,
    hub: HubId,
    sequence: u64,
    path: Path,
}

impl Ord for FrontierState {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse the natural ordering so the
        // state with the smallest (turn, priority, sequence) pops first.
        other
            .turn
            .cmp(&self.turn)
            .then_with(|| other.priority.cmp(&self.priority))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches for a feasible space-time path from `start` to `end` for one
/// drone, respecting every reservation already committed by earlier drones.
/// Returns `None` when the frontier empties without reaching `end` (§4.4);
/// this is the expected, non-error "unplaceable drone" outcome.
pub fn search_path(
    registry: &AdjacencyRegistry,
    reservations: &ReservationTable,
    network: &Network,
) -> Option<Path> {
    let start = network.start_id();
    let end = network.end_id();

    // The spec's frontier has no explicit horizon: a wait is always legal at
    // an exempt endpoint, so a hub made permanently unreachable (e.g. a
    // zero-capacity interior hub on the only route, §9's open question)
    // would otherwise let the frontier grow forever instead of draining.
    // Bound turns generously relative to the network size and fleet size so
    // the search always terminates while never cutting off a path that a
    // fleet this size could plausibly need.
    let horizon = network.hub_count() as u32 * (network.nb_drones() + 2) + 32;

    let mut sequence: u64 = 0;
    let mut heap = BinaryHeap::new();
    heap.push(FrontierState {
        turn: 0,
        priority: 0,
        hub: start,
        sequence,
        path: Vec::new(),
    });

    let mut visited: HashSet<(HubId, u32)> = HashSet::new();

    while let Some(state) = heap.pop() {
        if state.hub == end {
            return Some(state.path);
        }
        if !visited.insert((state.hub, state.turn)) {
            continue;
        }
        if state.turn >= horizon {
            continue;
        }

        for mv in registry.outgoing(state.hub) {
            let t_arr = state.turn + mv.cost;
            let endpoint = network.is_endpoint(mv.to);
            let node_ok = reservations.available(
                ResourceKey::Hub(mv.to),
                t_arr,
                network.hub(mv.to).max_drones,
                endpoint,
            );
            let edge_ok = reservations.available(
                ResourceKey::edge(state.hub, mv.to),
                state.turn,
                mv.edge_capacity,
                false,
            );
            if node_ok && edge_ok {
                let priority_delta = if network.hub(mv.to).zone == Zone::Priority {
                    -1
                } else {
                    0
                };
                let mut path = state.path.clone();
                path.push(Stamp {
                    hub: mv.to,
                    turn: t_arr,
                });
                sequence += 1;
                heap.push(FrontierState {
                    turn: t_arr,
                    priority: state.priority + priority_delta,
                    hub: mv.to,
                    sequence,
                    path,
                });
            }
        }

        let wait_ok = reservations.available(
            ResourceKey::Hub(state.hub),
            state.turn + 1,
            network.hub(state.hub).max_drones,
            network.is_endpoint(state.hub),
        );
        if wait_ok {
            let mut path = state.path.clone();
            path.push(Stamp {
                hub: state.hub,
                turn: state.turn + 1,
            });
            sequence += 1;
            heap.push(FrontierState {
                turn: state.turn + 1,
                priority: state.priority,
                hub: state.hub,
                sequence,
                path,
            });
        }
    }

    None
}

//! Timeline projector (SPEC_FULL.md §4.5): folds the per-drone path map into
//! a per-turn occupancy view, grounded on the teacher's
//! `initialize_network_graph` fold-over-records-into-a-map shape.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::path::{consecutive_pairs, DroneId, Path};
use crate::scheduler::Schedule;
use crate::topology::model::{HubId, Network};

/// A reservation-table-shaped key, but keyed by hub/edge *label* rather than
/// `HubId`, since the timeline is the serializable, human-facing view of the
/// schedule (§3, `Timeline`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum TimelineKey {
    Hub(String),
    Edge(String),
}

/// `turn -> key -> [drone-ids]` (§3).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timeline {
    pub turns: BTreeMap<u32, BTreeMap<TimelineKey, Vec<DroneId>>>,
}

impl Timeline {
    pub fn max_turn(&self) -> u32 {
        self.turns.keys().next_back().copied().unwrap_or(0)
    }

    fn entry(&mut self, turn: u32, key: TimelineKey) -> &mut Vec<DroneId> {
        self.turns.entry(turn).or_default().entry(key).or_default()
    }

    fn record(&mut self, turn: u32, key: TimelineKey, drone: DroneId) {
        self.entry(turn, key).push(drone);
    }
}

fn hub_key(network: &Network, id: HubId) -> TimelineKey {
    TimelineKey::Hub(network.hub(id).name.clone())
}

fn edge_key(network: &Network, a: HubId, b: HubId) -> TimelineKey {
    TimelineKey::Edge(network.edge_label(a, b))
}

fn project_one(timeline: &mut Timeline, network: &Network, drone: DroneId, path: &Path) {
    // Turn 0 is always the start hub, regardless of whether the path's own
    // first move is a wait or a traversal (§4.5 initial-condition override).
    timeline.record(0, hub_key(network, network.start_id()), drone);

    for (prev, current) in consecutive_pairs(network.start_id(), path) {
        timeline.record(current.turn, hub_key(network, current.hub), drone);

        if prev.hub != current.hub && current.turn > prev.turn + 1 {
            let key = edge_key(network, prev.hub, current.hub);
            for t in (prev.turn + 1)..current.turn {
                timeline.record(t, key.clone(), drone);
            }
        }
    }
}

/// Projects a full schedule into a [`Timeline`] covering turns `0..=T_max`.
pub fn project(network: &Network, schedule: &Schedule) -> Timeline {
    let mut timeline = Timeline::default();
    for (&drone, path) in schedule {
        project_one(&mut timeline, network, drone, path);
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler;
    use crate::topology;

    fn network_from(input: &str) -> Network {
        topology::load("map.txt", input).expect("valid topology")
    }

    #[test]
    fn turn_zero_always_places_drone_at_start() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0\nend_hub: E 2 0\nhub: R 1 0 [zone=restricted]\nconnection: S-R\nconnection: R-E\n",
        );
        let schedule = scheduler::schedule(&network);
        let timeline = project(&network, &schedule);
        let turn0 = &timeline.turns[&0];
        let s_key = TimelineKey::Hub("S".to_string());
        assert_eq!(turn0[&s_key], vec![1]);
    }

    #[test]
    fn multi_turn_edge_materializes_in_flight_occupancy() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0\nend_hub: E 2 0\nhub: R 1 0 [zone=restricted]\nconnection: S-R\nconnection: R-E\n",
        );
        let schedule = scheduler::schedule(&network);
        let timeline = project(&network, &schedule);
        // S -> R costs 2 turns (restricted): drone enters the edge at turn 0,
        // arrives at turn 2, so turn 1 shows it in flight on S-R.
        let edge_key = TimelineKey::Edge("R-S".to_string());
        let turn1 = &timeline.turns[&1];
        assert_eq!(turn1.get(&edge_key), Some(&vec![1]));
    }

    #[test]
    fn single_turn_moves_leave_no_in_flight_entries() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0\nend_hub: E 1 0\nconnection: S-E\n",
        );
        let schedule = scheduler::schedule(&network);
        let timeline = project(&network, &schedule);
        assert_eq!(timeline.max_turn(), 1);
        let e_key = TimelineKey::Hub("E".to_string());
        assert_eq!(timeline.turns[&1][&e_key], vec![1]);
    }
}

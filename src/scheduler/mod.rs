//! Scheduler core (SPEC_FULL.md §4.3, §4.4): builds the adjacency registry,
//! then solves drones one at a time against a shared reservation table,
//! committing each accepted path before the next drone's search begins.

pub mod registry;
pub mod reservation;
pub mod search;

use std::collections::BTreeMap;

use crate::path::{consecutive_pairs, DroneId, Path};
use crate::topology::model::Network;

use registry::AdjacencyRegistry;
use reservation::{ReservationTable, ResourceKey};

/// The outcome of a schedule run: every drone that found a path, keyed by
/// its 1-based id. Drones with no feasible path are simply absent (§4.4).
pub type Schedule = BTreeMap<DroneId, Path>;

fn commit(reservations: &mut ReservationTable, network: &Network, drone: DroneId, path: &Path) {
    for (prev, current) in consecutive_pairs(network.start_id(), path) {
        reservations.reserve(ResourceKey::Hub(prev.hub), prev.turn, drone);
        if prev.hub != current.hub {
            reservations.reserve(
                ResourceKey::edge(prev.hub, current.hub),
                prev.turn,
                drone,
            );
        }
    }
}

/// Runs the full greedy, sequential scheduler over every drone in the fleet
/// (§5). Drone ordering is load-bearing for reproducibility: this function
/// never parallelizes the per-drone search.
pub fn schedule(network: &Network) -> Schedule {
    let registry = AdjacencyRegistry::build(network);
    let mut reservations = ReservationTable::new();
    let mut paths = Schedule::new();

    for drone in 1..=network.nb_drones() {
        match search::search_path(&registry, &reservations, network) {
            Some(path) => {
                log::debug!(
                    "drone {drone} placed: {} stamps, arrives at turn {}",
                    path.len(),
                    path.last().map_or(0, |s| s.turn)
                );
                commit(&mut reservations, network, drone, &path);
                paths.insert(drone, path);
            }
            None => {
                log::warn!("drone {drone} has no feasible path; omitted from schedule");
            }
        }
    }

    log::info!(
        "scheduled {} of {} drones",
        paths.len(),
        network.nb_drones()
    );

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology;

    fn network_from(input: &str) -> Network {
        topology::load("map.txt", input).expect("valid topology")
    }

    #[test]
    fn scenario_a_trivial_single_hop() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0 [max_drones=1]\nend_hub: E 1 0 [max_drones=1]\nconnection: S-E\n",
        );
        let schedule = schedule(&network);
        let path = schedule.get(&1).expect("drone 1 is placed");
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].turn, 1);
        assert_eq!(path[0].hub, network.end_id());
    }

    #[test]
    fn scenario_b_capacity_one_funnel_staggers_arrivals() {
        let network = network_from(concat!(
            "nb_drones: 3\n",
            "start_hub: S 0 0\n",
            "end_hub: E 1 0\n",
            "connection: S-E [max_link_capacity=1]\n",
        ));
        let schedule = schedule(&network);
        assert_eq!(schedule.len(), 3);
        for drone in 1..=3u32 {
            let path = &schedule[&drone];
            let arrival = path.last().unwrap().turn;
            assert_eq!(arrival, drone);
        }
    }

    #[test]
    fn scenario_c_prefers_normal_over_restricted() {
        let network = network_from(concat!(
            "nb_drones: 1\n",
            "start_hub: S 0 0\n",
            "end_hub: E 4 0\n",
            "hub: A 1 0 [zone=normal]\n",
            "hub: B 1 1 [zone=restricted]\n",
            "connection: S-A\n",
            "connection: A-E\n",
            "connection: S-B\n",
            "connection: B-E\n",
        ));
        let schedule = schedule(&network);
        let path = &schedule[&1];
        let a = network.hub_id("A").unwrap();
        assert!(path.iter().any(|s| s.hub == a));
        assert_eq!(path.last().unwrap().turn, 2);
    }

    #[test]
    fn scenario_d_priority_tiebreak() {
        let network = network_from(concat!(
            "nb_drones: 1\n",
            "start_hub: S 0 0\n",
            "end_hub: E 4 0\n",
            "hub: A 1 0 [zone=normal]\n",
            "hub: P 1 1 [zone=priority]\n",
            "connection: S-A\n",
            "connection: A-E\n",
            "connection: S-P\n",
            "connection: P-E\n",
        ));
        let schedule = schedule(&network);
        let path = &schedule[&1];
        let p = network.hub_id("P").unwrap();
        assert!(path.iter().any(|s| s.hub == p), "priority path should win the tiebreak");
    }

    #[test]
    fn scenario_e_routes_around_blocked_hub() {
        let network = network_from(concat!(
            "nb_drones: 1\n",
            "start_hub: S 0 0\n",
            "end_hub: E 4 0\n",
            "hub: X 1 0 [zone=blocked]\n",
            "hub: A 1 1 [zone=normal]\n",
            "connection: S-X\n",
            "connection: X-E\n",
            "connection: S-A\n",
            "connection: A-E\n",
        ));
        let schedule = schedule(&network);
        let path = &schedule[&1];
        let x = network.hub_id("X").unwrap();
        assert!(!path.iter().any(|s| s.hub == x));
    }

    #[test]
    fn scenario_f_unplaceable_drone_is_omitted_not_an_error() {
        let network = network_from(concat!(
            "nb_drones: 2\n",
            "start_hub: S 0 0\n",
            "end_hub: E 2 0\n",
            "hub: G 1 0 [max_drones=0]\n",
            "connection: S-G\n",
            "connection: G-E\n",
        ));
        let schedule = schedule(&network);
        assert!(schedule.get(&1).is_none());
        assert!(schedule.get(&2).is_none());
    }

    #[test]
    fn reservation_bounds_hold_across_fleet() {
        let network = network_from(concat!(
            "nb_drones: 4\n",
            "start_hub: S 0 0\n",
            "end_hub: E 2 0\n",
            "hub: M 1 0 [max_drones=1]\n",
            "connection: S-M\n",
            "connection: M-E [max_link_capacity=1]\n",
        ));
        let schedule = schedule(&network);
        let m = network.hub_id("M").unwrap();
        let mut occupancy: BTreeMap<u32, u32> = BTreeMap::new();
        for path in schedule.values() {
            for stamp in path {
                if stamp.hub == m {
                    *occupancy.entry(stamp.turn).or_insert(0) += 1;
                }
            }
        }
        assert!(occupancy.values().all(|&count| count <= 1));
    }
}

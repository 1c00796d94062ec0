//! Text renderer (SPEC_FULL.md §4.6): the canonical machine-checkable
//! `<drone>-<hub>` transition stream, grounded on the teacher's disciplined
//! `Display`-over-state reporting style.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::path::{consecutive_pairs, DroneId};
use crate::scheduler::Schedule;
use crate::topology::model::Network;

/// Renders one line per turn `1..=T_max`: a space-separated list of
/// `<drone>-<hub>` tokens, one per drone whose location actually changed on
/// that turn (waits and mid-edge turns emit nothing for that drone). A turn
/// with no transitions at all renders as a blank line (§6 stdout contract).
pub fn render(network: &Network, schedule: &Schedule) -> String {
    let mut transitions: BTreeMap<u32, Vec<(DroneId, String)>> = BTreeMap::new();
    let mut max_turn = 0u32;

    for (&drone, path) in schedule {
        for (prev, current) in consecutive_pairs(network.start_id(), path) {
            max_turn = max_turn.max(current.turn);
            if prev.hub != current.hub {
                let hub_name = network.hub(current.hub).name.clone();
                transitions
                    .entry(current.turn)
                    .or_default()
                    .push((drone, hub_name));
            }
        }
    }

    let mut out = String::new();
    for turn in 1..=max_turn {
        if let Some(tokens) = transitions.get(&turn) {
            let mut sorted = tokens.clone();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            let rendered: Vec<String> = sorted
                .iter()
                .map(|(drone, hub)| format!("D{drone}-{hub}"))
                .collect();
            writeln!(out, "{}", rendered.join(" ")).expect("writing to a String never fails");
        } else {
            writeln!(out).expect("writing to a String never fails");
        }
    }
    out
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
    fn scenario_a_renders_single_line() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0\nend_hub: E 1 0\nconnection: S-E\n",
        );
        let schedule = scheduler::schedule(&network);
        let rendered = render(&network, &schedule);
        assert_eq!(rendered, "D1-E\n");
    }

    #[test]
    fn waits_emit_no_token_but_still_occupy_a_line() {
        let network = network_from(concat!(
            "nb_drones: 2\n",
            "start_hub: S 0 0\n",
            "end_hub: E 1 0\n",
            "connection: S-E [max_link_capacity=1]\n",
        ));
        let schedule = scheduler::schedule(&network);
        let rendered = render(&network, &schedule);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "D1-E");
        assert_eq!(lines[1], "D2-E");
    }

    #[test]
    fn restricted_transit_has_no_token_on_the_in_flight_turn() {
        let network = network_from(
            "nb_drones: 1\nstart_hub: S 0 0\nend_hub: E 2 0\nhub: R 1 0 [zone=restricted]\nconnection: S-R\nconnection: R-E\n",
        );
        let schedule = scheduler::schedule(&network);
        let rendered = render(&network, &schedule);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "D1-R");
        assert_eq!(lines[2], "D1-E");
    }
}

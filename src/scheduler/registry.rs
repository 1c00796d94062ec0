//! Adjacency registry: `hub -> outgoing moves` (SPEC_FULL.md §4.3).

use std::collections::HashMap;

use crate::topology::model::{HubId, Network, Zone};

/// One outgoing move from a hub, already pruned of `blocked` targets.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub to: HubId,
    pub cost: u32,
    pub edge_capacity: u32,
}

/// `hub -> Vec<Move>`, built once per schedule run from the validated
/// network's graph. A connection is omitted in both directions when either
/// endpoint's zone is `blocked` (§4.3).
pub struct AdjacencyRegistry {
    moves: HashMap<HubId, Vec<Move>>,
}

impl AdjacencyRegistry {
    pub fn build(network: &Network) -> Self {
        let mut moves: HashMap<HubId, Vec<Move>> = HashMap::new();
        for id in 0..network.hub_count() {
            let id = petgraph::graph::NodeIndex::new(id);
            if network.hub(id).zone == Zone::Blocked {
                continue;
            }
            let entries = network
                .neighbors(id)
                .map(|(to, connection)| Move {
                    to,
                    cost: network
                        .hub(to)
                        .zone
                        .traversal_cost()
                        .expect("neighbors() already excludes blocked targets"),
                    edge_capacity: connection.max_link_capacity,
                })
                .collect();
            moves.insert(id, entries);
        }
        Self { moves }
    }

    pub fn outgoing(&self, hub: HubId) -> &[Move] {
        self.moves.get(&hub).map_or(&[], Vec::as_slice)
    }
}

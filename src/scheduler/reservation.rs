//! Reservation table (SPEC_FULL.md §3): future-state occupancy, keyed by
//! hub or canonical edge and by turn. Owned exclusively by the scheduler and
//! mutated only at commit time (§5); search reads it but never writes it.

use std::collections::HashMap;

use crate::path::DroneId;
use crate::topology::model::HubId;

/// A reservation-table key: either a single hub, or an edge identified by
/// its two (index-order canonicalized) endpoints. Per the design note in
/// SPEC_FULL.md §9, this tagged union replaces stringly-typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Hub(HubId),
    Edge(HubId, HubId),
}

impl ResourceKey {
    pub fn edge(a: HubId, b: HubId) -> Self {
        if a <= b {
            ResourceKey::Edge(a, b)
        } else {
            ResourceKey::Edge(b, a)
        }
    }
}

#[derive(Debug, Default)]
pub struct ReservationTable {
    occupants: HashMap<(ResourceKey, u32), Vec<DroneId>>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupants(&self, key: ResourceKey, turn: u32) -> &[DroneId] {
        self.occupants
            .get(&(key, turn))
            .map_or(&[], Vec::as_slice)
    }

    /// True if reserving one more drone-id at `(key, turn)` would stay within
    /// `capacity`, or if the key is exempt (start/end hubs, §3).
    pub fn available(&self, key: ResourceKey, turn: u32, capacity: u32, exempt: bool) -> bool {
        exempt || (self.occupants(key, turn).len() as u32) < capacity
    }

    pub fn reserve(&mut self, key: ResourceKey, turn: u32, drone: DroneId) {
        self.occupants.entry((key, turn)).or_default().push(drone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::NodeIndex;

    fn hub(i: u32) -> HubId {
        NodeIndex::new(i as usize)
    }

    #[test]
    fn edge_key_is_order_independent() {
        assert_eq!(ResourceKey::edge(hub(1), hub(2)), ResourceKey::edge(hub(2), hub(1)));
    }

    #[test]
    fn available_respects_capacity() {
        let mut table = ReservationTable::new();
        let key = ResourceKey::Hub(hub(0));
        assert!(table.available(key, 0, 1, false));
        table.reserve(key, 0, 1);
        assert!(!table.available(key, 0, 1, false));
        assert!(table.available(key, 0, 2, false));
    }

    #[test]
    fn exempt_key_is_always_available() {
        let mut table = ReservationTable::new();
        let key = ResourceKey::Hub(hub(0));
        for drone in 0..10 {
            table.reserve(key, 0, drone);
        }
        assert!(table.available(key, 0, 0, true));
    }
}

//! Validated network model (SPEC_FULL.md §3, §4.2).
//!
//! Aggregates the parser's raw records into a [`Network`]: hub coordinates
//! interned as graph node indices, connections resolved and deduplicated,
//! every cross-entity invariant from §3 checked before the scheduler ever
//! sees the graph.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::Diagnostic;
use crate::palette;
use crate::topology::parser::{HubKind, ParsedTopology, RawHub};

/// A hub's position in the scheduler's graph. Stable for the lifetime of a
/// `Network`; never re-used across networks.
pub type HubId = NodeIndex<u32>;

/// A hub classification influencing traversal cost and search preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Normal,
    Blocked,
    Restricted,
    Priority,
}

impl Zone {
    /// The number of turns a move into a hub of this zone costs (§4.3).
    /// `None` for `Blocked`: such a hub is never a valid move target.
    pub fn traversal_cost(self) -> Option<u32> {
        match self {
            Zone::Normal | Zone::Priority => Some(1),
            Zone::Restricted => Some(2),
            Zone::Blocked => None,
        }
    }
}

impl FromStr for Zone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Zone::Normal),
            "blocked" => Ok(Zone::Blocked),
            "restricted" => Ok(Zone::Restricted),
            "priority" => Ok(Zone::Priority),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Zone::Normal => "normal",
            Zone::Blocked => "blocked",
            Zone::Restricted => "restricted",
            Zone::Priority => "priority",
        };
        write!(f, "{s}")
    }
}

/// A hub (node) in the validated network.
#[derive(Debug, Clone, Serialize)]
pub struct Hub {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub zone: Zone,
    pub color: Option<String>,
    pub max_drones: u32,
}

/// A resolved, undirected connection between two hubs.
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub max_link_capacity: u32,
}

/// The validated network aggregate (SPEC_FULL.md §3).
///
/// Backed by a `petgraph::UnGraph` so the adjacency walk the scheduler needs
/// (§4.3) and the endpoint-resolution / self-loop / duplicate-edge checks
/// this module performs (§4.2) share one graph structure.
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    graph: UnGraph<Hub, Connection>,
    #[serde(skip)]
    by_name: HashMap<String, HubId>,
    start: HubId,
    end: HubId,
    nb_drones: u32,
}

impl Network {
    pub fn nb_drones(&self) -> u32 {
        self.nb_drones
    }

    pub fn start_id(&self) -> HubId {
        self.start
    }

    pub fn end_id(&self) -> HubId {
        self.end
    }

    pub fn hub(&self, id: HubId) -> &Hub {
        &self.graph[id]
    }

    pub fn hub_id(&self, name: &str) -> Option<HubId> {
        self.by_name.get(name).copied()
    }

    /// The start and end hubs are capacity-exempt (§3, "endpoint exemption").
    pub fn is_endpoint(&self, id: HubId) -> bool {
        id == self.start || id == self.end
    }

    /// The canonical `A-B` label (A < B lexicographically by name), used as
    /// the reservation-table / timeline key for an edge (§3).
    pub fn edge_label(&self, a: HubId, b: HubId) -> String {
        let (a_name, b_name) = (&self.hub(a).name, &self.hub(b).name);
        if a_name <= b_name {
            format!("{a_name}-{b_name}")
        } else {
            format!("{b_name}-{a_name}")
        }
    }

    /// Every hub adjacent to `id`, together with the connection data,
    /// excluding edges where either endpoint is `blocked` (§4.3).
    pub fn neighbors(&self, id: HubId) -> impl Iterator<Item = (HubId, &Connection)> + '_ {
        self.graph.edges(id).filter_map(move |edge| {
            let other = if edge.source() == id {
                edge.target()
            } else {
                edge.source()
            };
            if self.hub(id).zone == Zone::Blocked || self.hub(other).zone == Zone::Blocked {
                None
            } else {
                Some((other, edge.weight()))
            }
        })
    }

    pub fn hub_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn coerce_u32(
    file: &str,
    line: usize,
    text: &str,
    field: &'static str,
    meta: &HashMap<String, String>,
    key: &str,
    default: u32,
    diagnostics: &mut Vec<Diagnostic>,
) -> u32 {
    match meta.get(key) {
        None => default,
        Some(raw) => match raw.parse::<i64>() {
            Ok(v) if v >= 0 => v as u32,
            _ => {
                diagnostics.push(Diagnostic::InvalidInteger {
                    file: file.to_string(),
                    line,
                    text: text.to_string(),
                    field,
                    value: raw.clone(),
                });
                default
            }
        },
    }
}

fn coerce_zone(raw: &RawHub, diagnostics: &mut Vec<Diagnostic>) -> Zone {
    match raw.meta.get("zone") {
        None => Zone::Normal,
        Some(value) => Zone::from_str(value).unwrap_or_else(|_| {
            diagnostics.push(Diagnostic::InvalidZone {
                file: raw.file.clone(),
                line: raw.line,
                text: raw.text.clone(),
                value: value.clone(),
            });
            Zone::Normal
        }),
    }
}

fn coerce_hub(raw: &RawHub, diagnostics: &mut Vec<Diagnostic>) -> Hub {
    let zone = coerce_zone(raw, diagnostics);
    let max_drones = coerce_u32(
        &raw.file,
        raw.line,
        &raw.text,
        "max_drones",
        &raw.meta,
        "max_drones",
        1,
        diagnostics,
    );
    let color = match raw.meta.get("color") {
        None => None,
        Some(name) => {
            let resolved = palette::resolve(Some(name));
            if resolved.is_none() {
                log::debug!(
                    "{}:{}: color {name:?} on hub {:?} is not in the palette; downgrading to none",
                    raw.file,
                    raw.line,
                    raw.name
                );
            }
            resolved
        }
    };
    Hub {
        name: raw.name.clone(),
        x: raw.x,
        y: raw.y,
        zone,
        color,
        max_drones,
    }
}

/// Builds and validates a [`Network`] from the parser's output (§4.2).
///
/// Every invariant in §3 is checked; all violations are accumulated and
/// returned together rather than stopping at the first one found.
pub fn build(parsed: ParsedTopology) -> Result<Network, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    if parsed.nb_drones < 1 {
        diagnostics.push(Diagnostic::InvalidDroneCount {
            file: parsed.file.clone(),
            value: parsed.nb_drones,
        });
    }

    if parsed.start.name == parsed.end.name {
        diagnostics.push(Diagnostic::StartEndNameCollision {
            file: parsed.file.clone(),
            name: parsed.start.name.clone(),
        });
    }
    if parsed.start.x == parsed.end.x && parsed.start.y == parsed.end.y {
        diagnostics.push(Diagnostic::StartEndCoordinateCollision {
            file: parsed.file.clone(),
            x: parsed.start.x,
            y: parsed.start.y,
        });
    }

    let all_raw: Vec<&RawHub> = std::iter::once(&parsed.start)
        .chain(std::iter::once(&parsed.end))
        .chain(parsed.hubs.iter())
        .collect();

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for raw in &all_raw {
        *name_counts.entry(raw.name.as_str()).or_insert(0) += 1;
    }
    let mut reported_dup_names: HashSet<&str> = HashSet::new();
    for raw in &all_raw {
        if name_counts[raw.name.as_str()] > 1 && reported_dup_names.insert(raw.name.as_str()) {
            diagnostics.push(Diagnostic::DuplicateHubName {
                file: parsed.file.clone(),
                name: raw.name.clone(),
            });
        }
    }

    let mut coord_groups: HashMap<(i64, i64), Vec<&str>> = HashMap::new();
    for raw in &all_raw {
        coord_groups
            .entry((raw.x, raw.y))
            .or_default()
            .push(raw.name.as_str());
    }
    for ((x, y), names) in &coord_groups {
        if names.len() > 1 {
            diagnostics.push(Diagnostic::DuplicateHubCoordinate {
                file: parsed.file.clone(),
                x: *x,
                y: *y,
                names: names.iter().map(|s| s.to_string()).collect(),
            });
        }
    }

    let mut graph: UnGraph<Hub, Connection> = UnGraph::new_undirected();
    let mut by_name: HashMap<String, HubId> = HashMap::new();
    for raw in &all_raw {
        // Duplicate names were already reported above; keep the first
        // occurrence so the rest of validation has something to resolve
        // connection endpoints against.
        if by_name.contains_key(&raw.name) {
            continue;
        }
        let hub = coerce_hub(raw, &mut diagnostics);
        let id = graph.add_node(hub);
        by_name.insert(raw.name.clone(), id);
    }

    let start_id = by_name[&parsed.start.name];
    let end_id = by_name[&parsed.end.name];

    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    for raw in &parsed.connections {
        let a_id = by_name.get(&raw.a).copied();
        let b_id = by_name.get(&raw.b).copied();
        if a_id.is_none() {
            diagnostics.push(Diagnostic::UnknownConnectionEndpoint {
                file: raw.file.clone(),
                line: raw.line,
                text: raw.text.clone(),
                name: raw.a.clone(),
            });
        }
        if b_id.is_none() {
            diagnostics.push(Diagnostic::UnknownConnectionEndpoint {
                file: raw.file.clone(),
                line: raw.line,
                text: raw.text.clone(),
                name: raw.b.clone(),
            });
        }
        let (Some(a_id), Some(b_id)) = (a_id, b_id) else {
            continue;
        };
        if raw.a == raw.b {
            diagnostics.push(Diagnostic::SelfLoopConnection {
                file: raw.file.clone(),
                line: raw.line,
                text: raw.text.clone(),
                name: raw.a.clone(),
            });
            continue;
        }
        let canonical = if raw.a <= raw.b {
            (raw.a.clone(), raw.b.clone())
        } else {
            (raw.b.clone(), raw.a.clone())
        };
        if !seen_pairs.insert(canonical.clone()) {
            diagnostics.push(Diagnostic::DuplicateConnection {
                file: raw.file.clone(),
                a: canonical.0,
                b: canonical.1,
            });
            continue;
        }
        let max_link_capacity = coerce_u32(
            &raw.file,
            raw.line,
            &raw.text,
            "max_link_capacity",
            &raw.meta,
            "max_link_capacity",
            1,
            &mut diagnostics,
        );
        graph.add_edge(a_id, b_id, Connection { max_link_capacity });
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    Ok(Network {
        graph,
        by_name,
        start: start_id,
        end: end_id,
        nb_drones: parsed.nb_drones as u32,
    })
}

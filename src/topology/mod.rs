//! Topology parsing and validation (SPEC_FULL.md §4.1, §4.2).

pub mod model;
pub mod parser;

use crate::error::Diagnostic;

/// Reads and validates a topology file end to end: parse (§4.1) then build
/// and cross-validate the [`model::Network`] (§4.2). Fails atomically: no
/// partial model is ever returned (§1, §7). `file` is the source file name,
/// carried into every diagnostic so it renders as `file:line: message`.
pub fn load(file: &str, input: &str) -> Result<model::Network, Vec<Diagnostic>> {
    let parsed = parser::parse(file, input)?;
    model::build(parsed)
}

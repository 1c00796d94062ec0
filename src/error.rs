//! Accumulated diagnostics for the parse and validate phases (SPEC_FULL.md §10).
//!
//! Every fallible phase in this crate returns `Result<T, Vec<Diagnostic>>` rather
//! than bailing on the first problem: callers collect every `Diagnostic` a phase
//! can produce and report them together.

use thiserror::Error;

/// A single, renderable problem found while parsing or validating a topology file.
///
/// Every variant carries the source file name; variants tied to one physical
/// line also carry that line's 1-based number and raw trimmed text, so a
/// diagnostic renders as `map.txt:12: unknown metadata key 'zome'` (§4.1).
/// Variants describing a cross-record invariant (e.g. two hubs sharing a
/// name) carry the file name alone, since no single line owns the problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("{file}:{line}: unrecognized line: {text:?}")]
    UnmatchedLine {
        file: String,
        line: usize,
        text: String,
    },

    #[error("{file}:{line}: the first non-comment line must be 'nb_drones: <n>': {text:?}")]
    FirstLineNotNbDrones {
        file: String,
        line: usize,
        text: String,
    },

    #[error("{file}: file contains no 'nb_drones' record")]
    MissingNbDrones { file: String },

    #[error("{file}:{line}: duplicate 'nb_drones' record: {text:?}")]
    DuplicateNbDrones {
        file: String,
        line: usize,
        text: String,
    },

    #[error("{file}: file contains no 'start_hub' record")]
    MissingStartHub { file: String },

    #[error("{file}:{line}: duplicate 'start_hub' record: {text:?}")]
    DuplicateStartHub {
        file: String,
        line: usize,
        text: String,
    },

    #[error("{file}: file contains no 'end_hub' record")]
    MissingEndHub { file: String },

    #[error("{file}:{line}: duplicate 'end_hub' record: {text:?}")]
    DuplicateEndHub {
        file: String,
        line: usize,
        text: String,
    },

    #[error("{file}: the topology file is empty")]
    EmptyFile { file: String },

    #[error("{file}:{line}: hub name {name:?} must not contain whitespace or '-': {text:?}")]
    InvalidHubName {
        file: String,
        line: usize,
        text: String,
        name: String,
    },

    #[error("{file}:{line}: unknown metadata key {key:?}: {text:?}")]
    UnknownMetadataKey {
        file: String,
        line: usize,
        text: String,
        key: String,
    },

    #[error("{file}:{line}: malformed metadata pair {token:?}: {text:?}")]
    MalformedMetadataPair {
        file: String,
        line: usize,
        text: String,
        token: String,
    },

    #[error("{file}:{line}: duplicate metadata key {key:?}: {text:?}")]
    DuplicateMetadataKey {
        file: String,
        line: usize,
        text: String,
        key: String,
    },

    #[error("{file}:{line}: field {field} must be a non-negative integer, got {value:?}: {text:?}")]
    InvalidInteger {
        file: String,
        line: usize,
        text: String,
        field: &'static str,
        value: String,
    },

    #[error("{file}:{line}: unknown zone {value:?}: {text:?}")]
    InvalidZone {
        file: String,
        line: usize,
        text: String,
        value: String,
    },

    #[error("{file}: duplicate hub name {name:?}")]
    DuplicateHubName { file: String, name: String },

    #[error("{file}: duplicate hub coordinate ({x}, {y}) shared by {names:?}")]
    DuplicateHubCoordinate {
        file: String,
        x: i64,
        y: i64,
        names: Vec<String>,
    },

    #[error("{file}:{line}: connection endpoint {name:?} is not a known hub: {text:?}")]
    UnknownConnectionEndpoint {
        file: String,
        line: usize,
        text: String,
        name: String,
    },

    #[error("{file}:{line}: connection {name:?} is a self-loop: {text:?}")]
    SelfLoopConnection {
        file: String,
        line: usize,
        text: String,
        name: String,
    },

    #[error("{file}: duplicate connection between {a:?} and {b:?}")]
    DuplicateConnection { file: String, a: String, b: String },

    #[error("{file}: start_hub and end_hub must not share a name ({name:?})")]
    StartEndNameCollision { file: String, name: String },

    #[error("{file}: start_hub and end_hub must not share coordinates ({x}, {y})")]
    StartEndCoordinateCollision { file: String, x: i64, y: i64 },

    #[error("{file}: nb_drones must be at least 1, got {value}")]
    InvalidDroneCount { file: String, value: i64 },
}

/// Renders a batch of diagnostics the way the driver writes them to stderr:
/// one per line, in the order they were found.
pub fn render_all(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-level error returned by the driver binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", render_all(.0))]
    Diagnostics(Vec<Diagnostic>),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<Diagnostic>> for AppError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        AppError::Diagnostics(diagnostics)
    }
}

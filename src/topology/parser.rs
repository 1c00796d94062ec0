//! Line-oriented topology file parser (SPEC_FULL.md §4.1).
//!
//! A single-pass syntactic gate: every non-comment, non-blank line must match
//! exactly one of three record shapes. Every problem found is accumulated
//! into a `Vec<Diagnostic>` rather than raising on the first bad line, so the
//! caller sees the whole set of mistakes at once.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::error::Diagnostic;

static RE_NB_DRONES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^nb_drones:\s*(?P<count>-?\d+)\s*$").unwrap());

static RE_HUB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<kind>start_hub|end_hub|hub):\s*(?P<name>\S+)\s+(?P<x>\d+)\s+(?P<y>\d+)\s*(?:\[(?P<meta>.*)\])?\s*$",
    )
    .unwrap()
});

static RE_CONNECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^connection:\s*(?P<a>[^\s\-\[\]]+)-(?P<b>[^\s\-\[\]]+)\s*(?:\[(?P<meta>.*)\])?\s*$")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubKind {
    Start,
    End,
    Interior,
}

/// A hub record as read off the page, before zone/color/capacity coercion.
/// Carries its source file and raw trimmed line text so later diagnostics
/// (raised while coercing `zone`/`max_drones` in the validator) can still
/// report `file:line: message` (§4.1, §4.2).
#[derive(Debug, Clone)]
pub struct RawHub {
    pub file: String,
    pub line: usize,
    pub text: String,
    pub kind: HubKind,
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub meta: HashMap<String, String>,
}

/// A connection record as read off the page, before endpoint resolution.
#[derive(Debug, Clone)]
pub struct RawConnection {
    pub file: String,
    pub line: usize,
    pub text: String,
    pub a: String,
    pub b: String,
    pub meta: HashMap<String, String>,
}

/// The parser's output: one bag of typed records per §4.1, not yet validated
/// against each other (that is the model/validator's job, §4.2).
#[derive(Debug, Clone)]
pub struct ParsedTopology {
    pub file: String,
    pub nb_drones: i64,
    pub start: RawHub,
    pub end: RawHub,
    pub hubs: Vec<RawHub>,
    pub connections: Vec<RawConnection>,
}

const HUB_META_KEYS: &[&str] = &["zone", "color", "max_drones"];
const CONNECTION_META_KEYS: &[&str] = &["max_link_capacity"];

/// Parses `key=value key=value` metadata, accumulating diagnostics for
/// unknown keys, malformed pairs, and duplicate keys within one record.
fn parse_metadata(
    file: &str,
    line: usize,
    text: &str,
    raw: Option<&str>,
    allowed_keys: &[&str],
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<String, String> {
    let mut meta = HashMap::new();
    let Some(raw) = raw else {
        return meta;
    };
    for token in raw.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => {
                if !allowed_keys.contains(&key) {
                    diagnostics.push(Diagnostic::UnknownMetadataKey {
                        file: file.to_string(),
                        line,
                        text: text.to_string(),
                        key: key.to_string(),
                    });
                    continue;
                }
                if meta.insert(key.to_string(), value.to_string()).is_some() {
                    diagnostics.push(Diagnostic::DuplicateMetadataKey {
                        file: file.to_string(),
                        line,
                        text: text.to_string(),
                        key: key.to_string(),
                    });
                }
            }
            _ => diagnostics.push(Diagnostic::MalformedMetadataPair {
                file: file.to_string(),
                line,
                text: text.to_string(),
                token: token.to_string(),
            }),
        }
    }
    meta
}

fn validate_hub_name(
    file: &str,
    line: usize,
    text: &str,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if name.is_empty() || name.chars().any(char::is_whitespace) || name.contains('-') {
        diagnostics.push(Diagnostic::InvalidHubName {
            file: file.to_string(),
            line,
            text: text.to_string(),
            name: name.to_string(),
        });
    }
}

/// Parses the full text of a topology file into a [`ParsedTopology`].
///
/// `file` is the source file name, carried into every diagnostic so it can
/// render as `file:line: message` (§4.1). Returns every accumulated
/// [`Diagnostic`] on failure; parsing never emits a partial model.
pub fn parse(file: &str, input: &str) -> Result<ParsedTopology, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    let significant_lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(idx, text)| (idx + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .collect();

    if significant_lines.is_empty() {
        return Err(vec![Diagnostic::EmptyFile {
            file: file.to_string(),
        }]);
    }

    let mut nb_drones: Option<(usize, i64)> = None;
    let mut start: Option<RawHub> = None;
    let mut end: Option<RawHub> = None;
    let mut hubs = Vec::new();
    let mut connections = Vec::new();

    for (position, &(line, text)) in significant_lines.iter().enumerate() {
        if let Some(caps) = RE_NB_DRONES.captures(text) {
            if position != 0 {
                diagnostics.push(Diagnostic::FirstLineNotNbDrones {
                    file: file.to_string(),
                    line,
                    text: text.to_string(),
                });
            }
            let count: i64 = caps["count"].parse().unwrap_or(-1);
            if nb_drones.is_some() {
                diagnostics.push(Diagnostic::DuplicateNbDrones {
                    file: file.to_string(),
                    line,
                    text: text.to_string(),
                });
            } else {
                nb_drones = Some((line, count));
            }
            continue;
        }

        if position == 0 {
            diagnostics.push(Diagnostic::FirstLineNotNbDrones {
                file: file.to_string(),
                line,
                text: text.to_string(),
            });
        }

        if let Some(caps) = RE_HUB.captures(text) {
            let kind = match &caps["kind"] {
                "start_hub" => HubKind::Start,
                "end_hub" => HubKind::End,
                _ => HubKind::Interior,
            };
            let name = caps["name"].to_string();
            validate_hub_name(file, line, text, &name, &mut diagnostics);
            let x: i64 = caps["x"].parse().unwrap_or(0);
            let y: i64 = caps["y"].parse().unwrap_or(0);
            let meta = parse_metadata(
                file,
                line,
                text,
                caps.name("meta").map(|m| m.as_str()),
                HUB_META_KEYS,
                &mut diagnostics,
            );
            let hub = RawHub {
                file: file.to_string(),
                line,
                text: text.to_string(),
                kind,
                name,
                x,
                y,
                meta,
            };
            match kind {
                HubKind::Start => {
                    if start.is_some() {
                        diagnostics.push(Diagnostic::DuplicateStartHub {
                            file: file.to_string(),
                            line,
                            text: text.to_string(),
                        });
                    } else {
                        start = Some(hub);
                    }
                }
                HubKind::End => {
                    if end.is_some() {
                        diagnostics.push(Diagnostic::DuplicateEndHub {
                            file: file.to_string(),
                            line,
                            text: text.to_string(),
                        });
                    } else {
                        end = Some(hub);
                    }
                }
                HubKind::Interior => hubs.push(hub),
            }
            continue;
        }

        if let Some(caps) = RE_CONNECTION.captures(text) {
            let a = caps["a"].to_string();
            let b = caps["b"].to_string();
            let meta = parse_metadata(
                file,
                line,
                text,
                caps.name("meta").map(|m| m.as_str()),
                CONNECTION_META_KEYS,
                &mut diagnostics,
            );
            connections.push(RawConnection {
                file: file.to_string(),
                line,
                text: text.to_string(),
                a,
                b,
                meta,
            });
            continue;
        }

        diagnostics.push(Diagnostic::UnmatchedLine {
            file: file.to_string(),
            line,
            text: text.to_string(),
        });
    }

    let nb_drones = match nb_drones {
        Some((_, count)) => count,
        None => {
            diagnostics.push(Diagnostic::MissingNbDrones {
                file: file.to_string(),
            });
            0
        }
    };
    let start = start.or_else(|| {
        diagnostics.push(Diagnostic::MissingStartHub {
            file: file.to_string(),
        });
        None
    });
    let end = end.or_else(|| {
        diagnostics.push(Diagnostic::MissingEndHub {
            file: file.to_string(),
        });
        None
    });

    if !diagnostics.is_empty() || start.is_none() || end.is_none() {
        return Err(diagnostics);
    }

    Ok(ParsedTopology {
        file: file.to_string(),
        nb_drones,
        start: start.unwrap(),
        end: end.unwrap(),
        hubs,
        connections,
    })
}

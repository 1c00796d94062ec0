//! Static color palette: name -> (ANSI code, 8-bit RGB, hex string).
//!
//! Pure data (SPEC_FULL.md §2, item 1). A hub's `color` field is a key into
//! this table; an unknown key is silently downgraded to "no color" rather
//! than rejected (§4.2) since color is purely cosmetic.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The three parallel representations a renderer might want for a named color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub ansi: u8,
    pub rgb: (u8, u8, u8),
    pub hex: &'static str,
}

static PALETTE: Lazy<HashMap<&'static str, ColorEntry>> = Lazy::new(|| {
    let entries: &[(&str, u8, (u8, u8, u8), &str)] = &[
        ("black", 30, (0, 0, 0), "#000000"),
        ("red", 31, (222, 56, 43), "#DE382B"),
        ("green", 32, (57, 181, 74), "#39B54A"),
        ("yellow", 33, (255, 199, 6), "#FFC706"),
        ("blue", 34, (0, 111, 184), "#006FB8"),
        ("magenta", 35, (118, 38, 113), "#762671"),
        ("cyan", 36, (44, 181, 233), "#2CB5E9"),
        ("white", 37, (204, 204, 204), "#CCCCCC"),
        ("orange", 91, (255, 135, 0), "#FF8700"),
        ("gray", 90, (128, 128, 128), "#808080"),
    ];
    entries
        .iter()
        .map(|&(name, ansi, rgb, hex)| (name, ColorEntry { ansi, rgb, hex }))
        .collect()
});

/// Looks up a color name in the static palette.
pub fn lookup(name: &str) -> Option<ColorEntry> {
    PALETTE.get(name).copied()
}

/// Returns `Some(name)` unchanged if it is a known palette key, else `None`
/// (the "silent downgrade" rule from §4.2).
pub fn resolve(name: Option<&str>) -> Option<String> {
    let name = name?;
    PALETTE.contains_key(name).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_color_resolves() {
        assert_eq!(resolve(Some("green")), Some("green".to_string()));
    }

    #[test]
    fn unknown_color_downgrades_silently() {
        assert_eq!(resolve(Some("chartreuse")), None);
    }

    #[test]
    fn missing_color_stays_missing() {
        assert_eq!(resolve(None), None);
    }

    #[test]
    fn lookup_returns_all_three_representations() {
        let entry = lookup("red").expect("red is a known color");
        assert_eq!(entry.ansi, 31);
        assert_eq!(entry.rgb, (222, 56, 43));
        assert_eq!(entry.hex, "#DE382B");
    }
}

//! Pantone reference table and nearest-neighbour color matching.
//!
//! Used as the deterministic fallback when the vision model is unavailable
//! or returns something unparseable.

use serde::{Deserialize, Serialize};

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, upper-case.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// A reference Pantone swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PantoneSwatch {
    pub code: &'static str,
    pub name: &'static str,
    pub rgb: Rgb,
}

/// Reference swatches used for fallback matching.
pub const PANTONE_REFERENCE: &[PantoneSwatch] = &[
    PantoneSwatch { code: "11-0601 TCX", name: "Bright White", rgb: Rgb::new(244, 245, 240) },
    PantoneSwatch { code: "19-4005 TCX", name: "Jet Black", rgb: Rgb::new(45, 44, 47) },
    PantoneSwatch { code: "19-4052 TCX", name: "Classic Blue", rgb: Rgb::new(15, 76, 129) },
    PantoneSwatch { code: "18-1664 TCX", name: "Fiery Red", rgb: Rgb::new(210, 56, 44) },
    PantoneSwatch { code: "13-0647 TCX", name: "Illuminating", rgb: Rgb::new(245, 223, 77) },
    PantoneSwatch { code: "17-5104 TCX", name: "Ultimate Gray", rgb: Rgb::new(147, 149, 151) },
    PantoneSwatch { code: "15-5519 TCX", name: "Turquoise", rgb: Rgb::new(69, 181, 170) },
    PantoneSwatch { code: "18-3838 TCX", name: "Ultra Violet", rgb: Rgb::new(95, 75, 139) },
    PantoneSwatch { code: "16-1546 TCX", name: "Living Coral", rgb: Rgb::new(255, 111, 97) },
    PantoneSwatch { code: "15-0343 TCX", name: "Greenery", rgb: Rgb::new(136, 176, 75) },
];

/// A single Pantone suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantoneCandidate {
    pub code: String,
    pub name: String,
}

impl From<&PantoneSwatch> for PantoneCandidate {
    fn from(swatch: &PantoneSwatch) -> Self {
        Self {
            code: swatch.code.to_string(),
            name: swatch.name.to_string(),
        }
    }
}

/// A best match plus alternates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantoneSuggestion {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub alternates: Vec<PantoneCandidate>,
}

/// Reference swatches ordered by distance to `rgb`, nearest first.
///
/// Equal distances keep table order.
pub fn rank_by_distance(rgb: Rgb) -> Vec<&'static PantoneSwatch> {
    let mut ranked: Vec<&PantoneSwatch> = PANTONE_REFERENCE.iter().collect();
    ranked.sort_by_key(|s| s.rgb.distance_sq(rgb));
    ranked
}

/// Nearest reference swatch as the best match, the next two as alternates.
pub fn nearest_pantone(rgb: Rgb) -> PantoneSuggestion {
    let ranked = rank_by_distance(rgb);
    let best = ranked[0];
    PantoneSuggestion {
        code: best.code.to_string(),
        name: best.name.to_string(),
        alternates: ranked[1..3].iter().map(|s| PantoneCandidate::from(*s)).collect(),
    }
}

/// Parse a model reply into a suggestion, tolerating surrounding prose or
/// Markdown code fences. Returns `None` when no usable JSON object exists.
pub fn parse_pantone_reply(text: &str) -> Option<PantoneSuggestion> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let suggestion: PantoneSuggestion = serde_json::from_str(&text[start..=end]).ok()?;
    if suggestion.code.trim().is_empty() {
        return None;
    }
    Some(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_has_ten_entries() {
        assert_eq!(PANTONE_REFERENCE.len(), 10);
    }

    #[test]
    fn exact_reference_color_matches_itself() {
        for swatch in PANTONE_REFERENCE {
            let suggestion = nearest_pantone(swatch.rgb);
            assert_eq!(suggestion.code, swatch.code);
            assert_eq!(suggestion.alternates.len(), 2);
            assert!(suggestion.alternates.iter().all(|a| a.code != swatch.code));
        }
    }

    #[test]
    fn near_black_matches_jet_black() {
        assert_eq!(nearest_pantone(Rgb::new(10, 10, 12)).name, "Jet Black");
    }

    #[test]
    fn hex_is_upper_case_padded() {
        assert_eq!(Rgb::new(15, 76, 129).to_hex(), "#0F4C81");
    }

    #[test]
    fn distance_is_squared() {
        assert_eq!(Rgb::new(0, 0, 0).distance_sq(Rgb::new(3, 4, 0)), 25);
    }

    #[test]
    fn reply_inside_code_fence_parsed() {
        let reply = "```json\n{\"code\":\"19-4052 TCX\",\"name\":\"Classic Blue\",\"alternates\":[{\"code\":\"19-3953 TCX\",\"name\":\"Sodalite Blue\"}]}\n```";
        let s = parse_pantone_reply(reply).unwrap();
        assert_eq!(s.code, "19-4052 TCX");
        assert_eq!(s.alternates.len(), 1);
    }

    #[test]
    fn unparseable_reply_rejected() {
        assert!(parse_pantone_reply("I cannot identify this color.").is_none());
        assert!(parse_pantone_reply("{\"code\": \"\", \"name\": \"x\"}").is_none());
        assert!(parse_pantone_reply("} nonsense {").is_none());
    }
}

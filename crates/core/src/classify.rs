//! Garment attribute vocabularies and the heuristics that map free-form
//! material and color data onto them.
//!
//! Both heuristics always produce a value: an unrecognised material list
//! falls back to the first canonical fiber, and an unrecognised color blob
//! falls back to [`ColorDepth::Medium`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Garment category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentCategory {
    Baby,
    Knit,
    Midwear,
}

impl GarmentCategory {
    pub const ALL: [GarmentCategory; 3] = [Self::Baby, Self::Knit, Self::Midwear];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baby => "baby",
            Self::Knit => "knit",
            Self::Midwear => "midwear",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown garment category '{value}'")))
    }
}

// ---------------------------------------------------------------------------
// Fiber type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiberType {
    Cotton,
    Polyester,
    Wool,
    Silk,
    Linen,
    Nylon,
    Viscose,
    Elastane,
    Acrylic,
    Cashmere,
}

impl FiberType {
    /// Canonical fiber order. The first entry is the detection fallback.
    pub const ALL: [FiberType; 10] = [
        Self::Cotton,
        Self::Polyester,
        Self::Wool,
        Self::Silk,
        Self::Linen,
        Self::Nylon,
        Self::Viscose,
        Self::Elastane,
        Self::Acrylic,
        Self::Cashmere,
    ];

    /// Lower-case identifier, identical to the serde representation.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cotton => "cotton",
            Self::Polyester => "polyester",
            Self::Wool => "wool",
            Self::Silk => "silk",
            Self::Linen => "linen",
            Self::Nylon => "nylon",
            Self::Viscose => "viscose",
            Self::Elastane => "elastane",
            Self::Acrylic => "acrylic",
            Self::Cashmere => "cashmere",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cotton => "Cotton",
            Self::Polyester => "Polyester",
            Self::Wool => "Wool",
            Self::Silk => "Silk",
            Self::Linen => "Linen",
            Self::Nylon => "Nylon",
            Self::Viscose => "Viscose",
            Self::Elastane => "Elastane (Spandex)",
            Self::Acrylic => "Acrylic",
            Self::Cashmere => "Cashmere",
        }
    }

    /// Animal fibers that need gentle washing and professional care.
    pub fn is_protein(self) -> bool {
        matches!(self, Self::Wool | Self::Silk | Self::Cashmere)
    }

    pub fn is_synthetic(self) -> bool {
        matches!(
            self,
            Self::Polyester | Self::Nylon | Self::Acrylic | Self::Elastane
        )
    }

    pub fn is_plant(self) -> bool {
        matches!(self, Self::Cotton | Self::Linen)
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|f| f.id() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown fiber type '{value}'")))
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processing {
    Print,
    Embroidery,
    GarmentDye,
    EnzymeWash,
    StoneWash,
    Coating,
    Brushing,
    Pleating,
}

impl Processing {
    pub const ALL: [Processing; 8] = [
        Self::Print,
        Self::Embroidery,
        Self::GarmentDye,
        Self::EnzymeWash,
        Self::StoneWash,
        Self::Coating,
        Self::Brushing,
        Self::Pleating,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Embroidery => "embroidery",
            Self::GarmentDye => "garment_dye",
            Self::EnzymeWash => "enzyme_wash",
            Self::StoneWash => "stone_wash",
            Self::Coating => "coating",
            Self::Brushing => "brushing",
            Self::Pleating => "pleating",
        }
    }

    /// Treatments that sit on the fabric surface and degrade under heat.
    pub fn is_surface(self) -> bool {
        matches!(self, Self::Print | Self::Coating | Self::Embroidery)
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown processing '{value}'")))
    }
}

// ---------------------------------------------------------------------------
// Color depth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorDepth {
    White,
    Medium,
    Dark,
}

impl ColorDepth {
    pub const ALL: [ColorDepth; 3] = [Self::White, Self::Medium, Self::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown color depth '{value}'")))
    }
}

// ---------------------------------------------------------------------------
// Care method
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareMethod {
    MachineWash,
    HandWash,
    DryClean,
}

impl CareMethod {
    pub const ALL: [CareMethod; 3] = [Self::MachineWash, Self::HandWash, Self::DryClean];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MachineWash => "machine_wash",
            Self::HandWash => "hand_wash",
            Self::DryClean => "dry_clean",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == value)
            .ok_or_else(|| CoreError::Validation(format!("Unknown care method '{value}'")))
    }
}

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

const WHITE_TOKENS: &[&str] = &["white", "ecru"];
const DARK_TOKENS: &[&str] = &["black", "navy", "dark"];

/// Detect recognised fibers in a list of free-text material names.
///
/// Each name is matched case-insensitively against every fiber's identifier
/// and display label. Results follow [`FiberType::ALL`] order without
/// duplicates. When nothing matches the result is exactly `[Cotton]`.
pub fn detect_fibers<S: AsRef<str>>(material_names: &[S]) -> Vec<FiberType> {
    let lowered: Vec<String> = material_names
        .iter()
        .map(|n| n.as_ref().to_lowercase())
        .collect();

    let detected: Vec<FiberType> = FiberType::ALL
        .into_iter()
        .filter(|fiber| {
            let id = fiber.id();
            let label = fiber.label().to_lowercase();
            lowered
                .iter()
                .any(|name| name.contains(id) || name.contains(&label))
        })
        .collect();

    if detected.is_empty() {
        vec![FiberType::ALL[0]]
    } else {
        detected
    }
}

/// Classify the depth of a color from an arbitrary JSON blob.
///
/// The blob is stringified and lower-cased; `white`/`ecru` wins over
/// `black`/`navy`/`dark`, and anything else is medium.
pub fn classify_color_depth(colors: &serde_json::Value) -> ColorDepth {
    let text = colors.to_string().to_lowercase();
    if WHITE_TOKENS.iter().any(|t| text.contains(t)) {
        ColorDepth::White
    } else if DARK_TOKENS.iter().any(|t| text.contains(t)) {
        ColorDepth::Dark
    } else {
        ColorDepth::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vocabularies_parse_their_own_identifiers() {
        for c in GarmentCategory::ALL {
            assert_eq!(GarmentCategory::parse(c.as_str()).unwrap(), c);
        }
        for m in CareMethod::ALL {
            assert_eq!(CareMethod::parse(m.as_str()).unwrap(), m);
        }
        assert_eq!(ColorDepth::parse("dark").unwrap(), ColorDepth::Dark);
        assert!(GarmentCategory::parse("outerwear").is_err());
    }

    #[test]
    fn unknown_material_falls_back_to_cotton() {
        assert_eq!(detect_fibers(&["mystery blend"]), vec![FiberType::Cotton]);
    }

    #[test]
    fn empty_material_list_falls_back_to_cotton() {
        let names: [&str; 0] = [];
        assert_eq!(detect_fibers(&names), vec![FiberType::Cotton]);
    }

    #[test]
    fn fibers_detected_case_insensitively_in_canonical_order() {
        let fibers = detect_fibers(&["95% VISCOSE 5% elastane", "Organic COTTON jersey"]);
        assert_eq!(
            fibers,
            vec![FiberType::Cotton, FiberType::Viscose, FiberType::Elastane]
        );
    }

    #[test]
    fn fiber_label_matches_as_well_as_id() {
        let fibers = detect_fibers(&["Elastane (Spandex) blend"]);
        assert_eq!(fibers, vec![FiberType::Elastane]);
    }

    #[test]
    fn repeated_fiber_reported_once() {
        let fibers = detect_fibers(&["wool", "merino wool", "boiled wool"]);
        assert_eq!(fibers, vec![FiberType::Wool]);
    }

    #[test]
    fn white_detected_inside_nested_json() {
        let blob = json!([{ "name": "Color A", "meta": { "family": "Off-WHITE" } }]);
        assert_eq!(classify_color_depth(&blob), ColorDepth::White);
    }

    #[test]
    fn ecru_counts_as_white() {
        assert_eq!(classify_color_depth(&json!("Ecru melange")), ColorDepth::White);
    }

    #[test]
    fn dark_tokens_classify_as_dark() {
        for name in ["Black", "NAVY blue", "dark olive"] {
            assert_eq!(classify_color_depth(&json!({ "name": name })), ColorDepth::Dark);
        }
    }

    #[test]
    fn white_takes_precedence_over_dark() {
        let blob = json!(["black", "white"]);
        assert_eq!(classify_color_depth(&blob), ColorDepth::White);
    }

    #[test]
    fn other_colors_are_medium() {
        assert_eq!(classify_color_depth(&json!({ "name": "Sage" })), ColorDepth::Medium);
        assert_eq!(classify_color_depth(&serde_json::Value::Null), ColorDepth::Medium);
    }

    #[test]
    fn fiber_parse_round_trips_ids() {
        for fiber in FiberType::ALL {
            assert_eq!(FiberType::parse(fiber.id()).unwrap(), fiber);
        }
        assert!(FiberType::parse("kevlar").is_err());
    }

    #[test]
    fn processing_serde_uses_snake_case() {
        let value = serde_json::to_value(Processing::GarmentDye).unwrap();
        assert_eq!(value, json!("garment_dye"));
    }
}

//! Care-label and inspection-checklist derivation.
//!
//! Pure functions over a [`GarmentSpec`]. Identical input always yields
//! identical, identically ordered output.

use serde::{Deserialize, Serialize};

use crate::classify::{CareMethod, ColorDepth, FiberType, GarmentCategory, Processing};

/// The attributes of a garment that drive its care label and checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentSpec {
    pub category: GarmentCategory,
    pub fibers: Vec<FiberType>,
    #[serde(default)]
    pub processings: Vec<Processing>,
    pub color: ColorDepth,
    pub care_method: CareMethod,
}

impl GarmentSpec {
    fn has_fiber(&self, fiber: FiberType) -> bool {
        self.fibers.contains(&fiber)
    }

    fn any_fiber(&self, pred: impl Fn(FiberType) -> bool) -> bool {
        self.fibers.iter().copied().any(pred)
    }

    fn has_processing(&self, processing: Processing) -> bool {
        self.processings.contains(&processing)
    }
}

// ---------------------------------------------------------------------------
// Care symbols
// ---------------------------------------------------------------------------

pub const CARE_WASHING: &str = "washing";
pub const CARE_BLEACHING: &str = "bleaching";
pub const CARE_DRYING: &str = "drying";
pub const CARE_IRONING: &str = "ironing";
pub const CARE_PROFESSIONAL: &str = "professional";

/// Care categories in label order. Every derivation emits one symbol each.
pub const CARE_CATEGORIES: &[&str] = &[
    CARE_WASHING,
    CARE_BLEACHING,
    CARE_DRYING,
    CARE_IRONING,
    CARE_PROFESSIONAL,
];

/// The closed set of care symbols the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareSymbolCode {
    Wash40,
    Wash30,
    Wash30Gentle,
    HandWash,
    DoNotWash,
    AnyBleach,
    NonChlorineBleach,
    DoNotBleach,
    TumbleDryNormal,
    TumbleDryLow,
    LineDry,
    DryFlat,
    IronHigh,
    IronMedium,
    IronLow,
    DryCleanAnySolvent,
    DryCleanGentle,
    DoNotDryClean,
}

impl CareSymbolCode {
    pub fn code(self) -> &'static str {
        match self {
            Self::Wash40 => "W40",
            Self::Wash30 => "W30",
            Self::Wash30Gentle => "W30G",
            Self::HandWash => "WH",
            Self::DoNotWash => "WN",
            Self::AnyBleach => "BA",
            Self::NonChlorineBleach => "BO",
            Self::DoNotBleach => "BN",
            Self::TumbleDryNormal => "TD2",
            Self::TumbleDryLow => "TD1",
            Self::LineDry => "DL",
            Self::DryFlat => "DF",
            Self::IronHigh => "I3",
            Self::IronMedium => "I2",
            Self::IronLow => "I1",
            Self::DryCleanAnySolvent => "P",
            Self::DryCleanGentle => "F",
            Self::DoNotDryClean => "DCN",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::Wash40 | Self::Wash30 | Self::Wash30Gentle | Self::HandWash | Self::DoNotWash => {
                CARE_WASHING
            }
            Self::AnyBleach | Self::NonChlorineBleach | Self::DoNotBleach => CARE_BLEACHING,
            Self::TumbleDryNormal | Self::TumbleDryLow | Self::LineDry | Self::DryFlat => {
                CARE_DRYING
            }
            Self::IronHigh | Self::IronMedium | Self::IronLow => CARE_IRONING,
            Self::DryCleanAnySolvent | Self::DryCleanGentle | Self::DoNotDryClean => {
                CARE_PROFESSIONAL
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wash40 => "Machine wash 40°C",
            Self::Wash30 => "Machine wash 30°C",
            Self::Wash30Gentle => "Machine wash 30°C, gentle",
            Self::HandWash => "Hand wash",
            Self::DoNotWash => "Do not wash",
            Self::AnyBleach => "Any bleach",
            Self::NonChlorineBleach => "Non-chlorine bleach only",
            Self::DoNotBleach => "Do not bleach",
            Self::TumbleDryNormal => "Tumble dry, normal",
            Self::TumbleDryLow => "Tumble dry, low",
            Self::LineDry => "Line dry",
            Self::DryFlat => "Dry flat",
            Self::IronHigh => "Iron, high",
            Self::IronMedium => "Iron, medium",
            Self::IronLow => "Iron, low",
            Self::DryCleanAnySolvent => "Professional dry clean (P)",
            Self::DryCleanGentle => "Professional dry clean (F)",
            Self::DoNotDryClean => "Do not dry clean",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Wash40 => "Machine wash at or below 40°C on a normal cycle",
            Self::Wash30 => "Machine wash at or below 30°C on a normal cycle",
            Self::Wash30Gentle => "Machine wash at or below 30°C on a gentle, low-spin cycle",
            Self::HandWash => "Hand wash only at or below 40°C",
            Self::DoNotWash => "Do not wash in water",
            Self::AnyBleach => "Any bleaching agent may be used",
            Self::NonChlorineBleach => "Only oxygen or non-chlorine bleach may be used",
            Self::DoNotBleach => "Do not use any bleaching agent",
            Self::TumbleDryNormal => "Tumble dry at normal temperature (max 80°C exhaust)",
            Self::TumbleDryLow => "Tumble dry at reduced temperature (max 60°C exhaust)",
            Self::LineDry => "Do not tumble dry; hang on a line to dry",
            Self::DryFlat => "Do not tumble dry; lay flat to dry",
            Self::IronHigh => "Iron at a maximum sole-plate temperature of 200°C",
            Self::IronMedium => "Iron at a maximum sole-plate temperature of 150°C",
            Self::IronLow => "Iron at a maximum sole-plate temperature of 110°C without steam",
            Self::DryCleanAnySolvent => "Professional dry cleaning in tetrachloroethene or hydrocarbons",
            Self::DryCleanGentle => "Professional dry cleaning in hydrocarbons, gentle process",
            Self::DoNotDryClean => "Do not dry clean",
        }
    }
}

/// A single derived care-label symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareSymbol {
    pub category: &'static str,
    pub symbol_code: &'static str,
    pub symbol_name: &'static str,
    pub description: &'static str,
}

impl From<CareSymbolCode> for CareSymbol {
    fn from(code: CareSymbolCode) -> Self {
        Self {
            category: code.category(),
            symbol_code: code.code(),
            symbol_name: code.name(),
            description: code.description(),
        }
    }
}

/// Derive one care symbol per category, in [`CARE_CATEGORIES`] order.
pub fn derive_care_symbols(spec: &GarmentSpec) -> Vec<CareSymbol> {
    [
        washing_symbol(spec),
        bleaching_symbol(spec),
        drying_symbol(spec),
        ironing_symbol(spec),
        professional_symbol(spec),
    ]
    .into_iter()
    .map(CareSymbol::from)
    .collect()
}

fn washing_symbol(spec: &GarmentSpec) -> CareSymbolCode {
    match spec.care_method {
        CareMethod::DryClean => CareSymbolCode::DoNotWash,
        CareMethod::HandWash => CareSymbolCode::HandWash,
        CareMethod::MachineWash => {
            if spec.any_fiber(FiberType::is_protein) {
                CareSymbolCode::Wash30Gentle
            } else if spec.any_fiber(|f| {
                matches!(
                    f,
                    FiberType::Viscose | FiberType::Elastane | FiberType::Acrylic
                )
            }) || spec.processings.iter().any(|p| p.is_surface())
                || spec.color == ColorDepth::Dark
                || spec.category == GarmentCategory::Knit
            {
                CareSymbolCode::Wash30
            } else {
                CareSymbolCode::Wash40
            }
        }
    }
}

fn bleaching_symbol(spec: &GarmentSpec) -> CareSymbolCode {
    if spec.color != ColorDepth::White {
        return CareSymbolCode::DoNotBleach;
    }
    let plant_only = !spec.fibers.is_empty() && spec.fibers.iter().all(|f| f.is_plant());
    let colored_finish =
        spec.has_processing(Processing::Print) || spec.has_processing(Processing::GarmentDye);
    if plant_only && !colored_finish {
        CareSymbolCode::AnyBleach
    } else {
        CareSymbolCode::NonChlorineBleach
    }
}

fn drying_symbol(spec: &GarmentSpec) -> CareSymbolCode {
    if spec.category == GarmentCategory::Knit
        || spec.has_fiber(FiberType::Wool)
        || spec.has_fiber(FiberType::Cashmere)
    {
        CareSymbolCode::DryFlat
    } else if spec.has_fiber(FiberType::Elastane)
        || spec.has_processing(Processing::Coating)
        || spec.has_processing(Processing::Print)
        || spec.has_processing(Processing::Pleating)
    {
        CareSymbolCode::LineDry
    } else if spec.any_fiber(FiberType::is_synthetic) {
        CareSymbolCode::TumbleDryLow
    } else {
        CareSymbolCode::TumbleDryNormal
    }
}

fn ironing_symbol(spec: &GarmentSpec) -> CareSymbolCode {
    let base = if spec.any_fiber(FiberType::is_synthetic) {
        CareSymbolCode::IronLow
    } else if spec.any_fiber(|f| {
        matches!(
            f,
            FiberType::Wool | FiberType::Silk | FiberType::Viscose | FiberType::Cashmere
        )
    }) {
        CareSymbolCode::IronMedium
    } else {
        CareSymbolCode::IronHigh
    };

    if spec.has_processing(Processing::Pleating) || spec.has_processing(Processing::Coating) {
        match base {
            CareSymbolCode::IronHigh => CareSymbolCode::IronMedium,
            _ => CareSymbolCode::IronLow,
        }
    } else {
        base
    }
}

fn professional_symbol(spec: &GarmentSpec) -> CareSymbolCode {
    if spec.has_processing(Processing::Coating) {
        CareSymbolCode::DoNotDryClean
    } else if spec.care_method == CareMethod::DryClean || spec.any_fiber(FiberType::is_protein) {
        CareSymbolCode::DryCleanAnySolvent
    } else {
        CareSymbolCode::DryCleanGentle
    }
}

// ---------------------------------------------------------------------------
// Care notes
// ---------------------------------------------------------------------------

/// Derive free-text care notes that accompany the symbols.
///
/// Notes are emitted in a fixed rule order and never repeat.
pub fn derive_care_notes(spec: &GarmentSpec) -> Vec<String> {
    let mut notes: Vec<&'static str> = Vec::new();
    let mut push = |note: &'static str| {
        if !notes.contains(&note) {
            notes.push(note);
        }
    };

    if spec.has_processing(Processing::Print) || spec.has_processing(Processing::Embroidery) {
        push("Wash and iron inside out");
    }
    match spec.color {
        ColorDepth::Dark => push("Wash with similar colors"),
        ColorDepth::White => push("Wash separately from colored garments"),
        ColorDepth::Medium => {}
    }
    if spec.has_processing(Processing::GarmentDye) {
        push("Color may bleed; wash separately for the first washes");
    }
    if spec.category == GarmentCategory::Baby {
        push("Wash before first use");
    }
    if spec.has_fiber(FiberType::Elastane) {
        push("Do not use fabric softener");
    }
    if spec.has_fiber(FiberType::Wool) || spec.has_fiber(FiberType::Cashmere) {
        push("Reshape while damp and dry away from direct heat");
    }
    if spec.has_fiber(FiberType::Silk) {
        push("Do not wring or twist");
    }
    if spec.has_processing(Processing::Coating) {
        push("Do not wring or twist");
    }
    if spec.has_processing(Processing::Brushing) {
        push("Brushed surface may pill; wash with similar fabrics");
    }
    if spec.has_processing(Processing::StoneWash) || spec.has_processing(Processing::EnzymeWash) {
        push("Shade variation is a characteristic of the wash process");
    }
    if spec.has_processing(Processing::Pleating) {
        push("Hang to dry to preserve pleats");
    }

    notes.into_iter().map(String::from).collect()
}

// ---------------------------------------------------------------------------
// Inspection items
// ---------------------------------------------------------------------------

/// A drafted checklist item with its default acceptance standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionItemDraft {
    pub category: &'static str,
    pub item_name: &'static str,
    pub standard: &'static str,
    pub is_ai_generated: bool,
}

type ItemRow = (&'static str, &'static str, &'static str);

const GENERAL_ITEMS: &[ItemRow] = &[
    ("measurement", "Measurements", "Within size-chart tolerance (±1 cm body, ±0.5 cm small points)"),
    ("construction", "Seam quality", "No open seams or slippage; stitch density as specified"),
    ("labeling", "Labeling", "Care, fiber content and size labels present, legible and correctly placed"),
    ("appearance", "Appearance", "No stains, holes, shading or loose threads"),
];

const BABY_ITEMS: &[ItemRow] = &[
    ("safety", "Small parts pull test", "Buttons, snaps and trims withstand 90 N pull without detaching"),
    ("safety", "Nickel-free trims", "Metal trims comply with nickel release limits"),
    ("safety", "Drawstrings", "No drawstrings or cords in the hood and neck area"),
    ("safety", "Sharp edges and points", "No sharp edges or points on trims or closures"),
];

const KNIT_ITEMS: &[ItemRow] = &[
    ("performance", "Dimensional stability", "Shrinkage within ±5% after washing"),
    ("performance", "Spirality", "Side-seam twist within 5% after washing"),
    ("performance", "Pilling", "Pilling grade 3-4 or better"),
];

const MIDWEAR_ITEMS: &[ItemRow] = &[
    ("construction", "Closure function", "Zippers and closures operate smoothly over 10 cycles"),
    ("construction", "Lining fit", "Lining free from puckering and does not extend beyond shell"),
    ("performance", "Interlining bonding", "No bubbling or delamination after washing"),
];

fn fiber_items(fiber: FiberType) -> &'static [ItemRow] {
    match fiber {
        FiberType::Cotton => &[(
            "performance",
            "Dimensional stability",
            "Shrinkage within ±5% after washing",
        )],
        FiberType::Polyester | FiberType::Nylon | FiberType::Acrylic => {
            &[("performance", "Pilling", "Pilling grade 3-4 or better")]
        }
        FiberType::Wool | FiberType::Cashmere => &[(
            "performance",
            "Felting shrinkage",
            "Area shrinkage at most 8% after label-care washing",
        )],
        FiberType::Silk => &[(
            "construction",
            "Seam slippage",
            "Seam opening at most 6 mm under 60 N load",
        )],
        FiberType::Linen => &[(
            "appearance",
            "Crease recovery",
            "Creases recover to an acceptable appearance after hanging",
        )],
        FiberType::Viscose => &[(
            "performance",
            "Wet shrinkage",
            "Shrinkage within ±3% after washing",
        )],
        FiberType::Elastane => &[(
            "performance",
            "Stretch recovery",
            "Recovery of at least 90% after 30 s extension",
        )],
    }
}

fn processing_items(processing: Processing) -> &'static [ItemRow] {
    match processing {
        Processing::Print => &[(
            "performance",
            "Print adhesion",
            "No cracking or peeling after 5 washes",
        )],
        Processing::Embroidery => &[(
            "appearance",
            "Embroidery finish",
            "No loose threads or puckering; backing neatly trimmed",
        )],
        Processing::GarmentDye => &[(
            "color",
            "Shade consistency",
            "Shade within approved lab-dip tolerance across the lot",
        )],
        Processing::EnzymeWash | Processing::StoneWash => &[(
            "appearance",
            "Wash effect consistency",
            "Wash effect matches approved standard; no holes or weak spots",
        )],
        Processing::Coating => &[(
            "performance",
            "Coating adhesion",
            "No peeling or delamination after washing",
        )],
        Processing::Brushing => &[(
            "appearance",
            "Brushed surface",
            "Even nap without bald patches",
        )],
        Processing::Pleating => &[(
            "performance",
            "Pleat retention",
            "Pleats retained after washing at label temperature",
        )],
    }
}

fn color_items(color: ColorDepth) -> &'static [ItemRow] {
    match color {
        ColorDepth::Dark => &[
            ("color", "Color fastness to rubbing", "Dry rubbing grade ≥ 4, wet rubbing grade ≥ 3"),
            ("color", "Color fastness to washing", "Staining grade ≥ 3-4"),
        ],
        ColorDepth::Medium => &[("color", "Color fastness to washing", "Change in shade grade ≥ 4")],
        ColorDepth::White => &[(
            "color",
            "Whiteness",
            "No yellowing or discoloration after washing and storage",
        )],
    }
}

/// Draft the quality-inspection checklist for a garment.
///
/// Order: general checks, category checks, fiber checks (in the garment's
/// fiber order), processing checks, color checks. When two rules produce
/// the same `item_name` the first one wins.
pub fn derive_inspection_items(spec: &GarmentSpec) -> Vec<InspectionItemDraft> {
    let category_items = match spec.category {
        GarmentCategory::Baby => BABY_ITEMS,
        GarmentCategory::Knit => KNIT_ITEMS,
        GarmentCategory::Midwear => MIDWEAR_ITEMS,
    };

    let rows = GENERAL_ITEMS
        .iter()
        .chain(category_items)
        .chain(spec.fibers.iter().flat_map(|f| fiber_items(*f)))
        .chain(spec.processings.iter().flat_map(|p| processing_items(*p)))
        .chain(color_items(spec.color));

    let mut items: Vec<InspectionItemDraft> = Vec::new();
    for &(category, item_name, standard) in rows {
        if items.iter().any(|i| i.item_name == item_name) {
            continue;
        }
        items.push(InspectionItemDraft {
            category,
            item_name,
            standard,
            is_ai_generated: false,
        });
    }
    items
}

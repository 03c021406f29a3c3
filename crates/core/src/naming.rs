//! Product name normalisation.
//!
//! Product names arrive with the division baked in ("Mens Oxford Shirt",
//! "Women's Parka"). The division is tracked in its own column, so the
//! tokens are stripped from the stored name.

use std::sync::LazyLock;

use regex::Regex;

/// Division words removed from product names, matched as whole words.
pub const DIVISION_TOKENS: &[&str] = &[
    "mens", "men's", "men", "womens", "women's", "women", "ladies", "kids", "boys", "girls",
    "unisex",
];

static DIVISION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = DIVISION_TOKENS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(^|\s)({alternation})(\s|$)")).expect("division regex is valid")
});

/// Strip division tokens from a product name and collapse whitespace.
///
/// If stripping would leave nothing, the trimmed original is returned.
///
/// ```
/// use atelier_core::naming::sanitize_product_name;
///
/// assert_eq!(sanitize_product_name("Mens Test Shirt"), "Test Shirt");
/// assert_eq!(sanitize_product_name("  Women's   Parka "), "Parka");
/// ```
pub fn sanitize_product_name(name: &str) -> String {
    // Adjacent tokens share a separator, so replace until stable.
    let mut current = name.to_string();
    loop {
        let next = DIVISION_RE.replace_all(&current, " ").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    let collapsed = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        name.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        collapsed
    }
}

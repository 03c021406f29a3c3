//! Match an uploaded garment photo to a Pantone color.
//!
//! The image is normalised and its mean color computed locally. Gemini is
//! then asked for a Pantone suggestion; if that is not possible for any
//! reason the nearest entry of the local reference table is used instead.

use atelier_core::error::CoreError;
use atelier_core::image_color::ColorSample;
use atelier_core::pantone::{nearest_pantone, parse_pantone_reply, PantoneCandidate, PantoneSuggestion, Rgb};
use serde::Serialize;

use crate::error::IntegrationError;
use crate::gemini::GeminiClient;

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PantoneMatch {
    pub source: MatchSource,
    pub rgb: Rgb,
    pub hex: String,
    pub code: String,
    pub name: String,
    pub alternates: Vec<PantoneCandidate>,
}

fn build_prompt(rgb: Rgb) -> String {
    format!(
        "This image shows a garment or fabric swatch. Its average color is RGB({}, {}, {}) ({}).\n\
         Identify the closest Pantone Fashion, Home + Interiors (TCX) color.\n\
         Respond with strict JSON only, no prose:\n\
         {{\"code\": \"19-4052 TCX\", \"name\": \"Classic Blue\", \
         \"alternates\": [{{\"code\": \"...\", \"name\": \"...\"}}, {{\"code\": \"...\", \"name\": \"...\"}}]}}",
        rgb.r,
        rgb.g,
        rgb.b,
        rgb.to_hex()
    )
}

/// Compute the mean color of `image` and suggest a Pantone match.
///
/// Only an undecodable image is an error. A missing client, an upstream
/// failure or an unparseable reply all produce a fallback match.
pub async fn match_pantone(
    gemini: Option<&GeminiClient>,
    image: &[u8],
) -> Result<PantoneMatch, CoreError> {
    let sample = ColorSample::from_bytes(image)?;
    let rgb = sample.mean_rgb();

    let suggestion = match gemini {
        Some(client) if client.is_configured() => match ask_model(client, &sample, rgb).await {
            Ok(suggestion) => Some(suggestion),
            Err(e) => {
                tracing::warn!(error = %e, "Pantone AI match failed, using reference table");
                None
            }
        },
        _ => None,
    };

    Ok(match suggestion {
        Some(s) => to_match(MatchSource::Ai, rgb, s),
        None => to_match(MatchSource::Fallback, rgb, nearest_pantone(rgb)),
    })
}

async fn ask_model(
    client: &GeminiClient,
    sample: &ColorSample,
    rgb: Rgb,
) -> Result<PantoneSuggestion, IntegrationError> {
    let png = sample
        .to_png()
        .map_err(|e| IntegrationError::Parse(e.to_string()))?;
    let reply = client
        .generate_with_image(&build_prompt(rgb), "image/png", &png)
        .await?;
    parse_pantone_reply(&reply)
        .ok_or_else(|| IntegrationError::Parse("reply has no Pantone JSON object".to_string()))
}

fn to_match(source: MatchSource, rgb: Rgb, suggestion: PantoneSuggestion) -> PantoneMatch {
    PantoneMatch {
        source,
        rgb,
        hex: rgb.to_hex(),
        code: suggestion.code,
        name: suggestion.name,
        alternates: suggestion.alternates,
    }
}

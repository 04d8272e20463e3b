//! Result Assembler — merges the styling analysis and the optional
//! synthesized image into one display-ready result.
//!
//! When no image came back, the result carries the layers for the fallback
//! composition (garment base, face as circular inset, "unavailable" badge)
//! so the view layer can render it without holding on to the inputs.

use serde::Serialize;

use crate::assets::ImageAsset;
use crate::styling::links::ShoppingLinks;
use crate::styling::models::StylingResult;

pub const FALLBACK_BADGE: &str = "Image generation unavailable";
const SYNTHESIZED_LABEL: &str = "AI Generated Try-On";
const FALLBACK_LABEL: &str = "Visual Match Estimate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Composition {
    Synthesized {
        image: ImageAsset,
    },
    Fallback {
        base_layer: ImageAsset,
        inset: ImageAsset,
        badge: &'static str,
    },
}

/// Outcome of one generation. Analysis and visual are always replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnResult {
    pub styling: StylingResult,
    pub composition: Composition,
}

impl TryOnResult {
    pub fn has_synthesized_image(&self) -> bool {
        matches!(self.composition, Composition::Synthesized { .. })
    }
}

pub fn assemble(
    styling: StylingResult,
    generated: Option<ImageAsset>,
    face: &ImageAsset,
    garment: &ImageAsset,
) -> TryOnResult {
    let composition = match generated {
        Some(image) => Composition::Synthesized { image },
        None => Composition::Fallback {
            base_layer: garment.clone(),
            inset: face.clone(),
            badge: FALLBACK_BADGE,
        },
    };
    TryOnResult {
        styling,
        composition,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct OrnamentView {
    pub name: String,
    pub category: String,
    pub reason: String,
    pub search_query: String,
    pub links: ShoppingLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct TryOnView {
    pub has_synthesized_image: bool,
    pub label: &'static str,
    pub composition: Composition,
    pub fit_analysis: String,
    pub color_analysis: String,
    pub color_suggestions: Vec<String>,
    pub ornaments: Vec<OrnamentView>,
}

impl From<&TryOnResult> for TryOnView {
    fn from(result: &TryOnResult) -> Self {
        let has_synthesized_image = result.has_synthesized_image();
        let styling = &result.styling;
        Self {
            has_synthesized_image,
            label: if has_synthesized_image {
                SYNTHESIZED_LABEL
            } else {
                FALLBACK_LABEL
            },
            composition: result.composition.clone(),
            fit_analysis: styling.fit_analysis.clone(),
            color_analysis: styling.color_analysis.clone(),
            color_suggestions: styling.color_suggestions.clone(),
            ornaments: styling
                .ornaments
                .iter()
                .map(|o| OrnamentView {
                    name: o.name.clone(),
                    category: o.kind.clone(),
                    reason: o.reason.clone(),
                    search_query: o.search_query.clone(),
                    links: ShoppingLinks::for_query(&o.search_query),
                })
                .collect(),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body measurements as entered in the form. Kept as text: the model reads
/// them verbatim and nothing here does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    pub height: String,
    pub weight: String,
    pub chest: String,
    pub waist: String,
    pub hips: String,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            height: "175".to_string(),
            weight: "70".to_string(),
            chest: "95".to_string(),
            waist: "80".to_string(),
            hips: "96".to_string(),
        }
    }
}

/// Partial update applied field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementsPatch {
    pub height: Option<String>,
    pub weight: Option<String>,
    pub chest: Option<String>,
    pub waist: Option<String>,
    pub hips: Option<String>,
}

impl Measurements {
    pub fn apply(&mut self, patch: MeasurementsPatch) {
        let fields = [
            (&mut self.height, patch.height),
            (&mut self.weight, patch.weight),
            (&mut self.chest, patch.chest),
            (&mut self.waist, patch.waist),
            (&mut self.hips, patch.hips),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinTone {
    Fair,
    #[default]
    Wheatish,
    Medium,
    Dusky,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Fair,
        SkinTone::Wheatish,
        SkinTone::Medium,
        SkinTone::Dusky,
        SkinTone::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Fair => "Fair",
            SkinTone::Wheatish => "Wheatish",
            SkinTone::Medium => "Medium",
            SkinTone::Dusky => "Dusky",
            SkinTone::Dark => "Dark",
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    #[default]
    Casual,
    Wedding,
    Birthday,
    Formal,
    Party,
    Festival,
    #[serde(rename = "Date Night")]
    DateNight,
    Gym,
    Sports,
    Beach,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "Casual",
            Occasion::Wedding => "Wedding",
            Occasion::Birthday => "Birthday",
            Occasion::Formal => "Formal",
            Occasion::Party => "Party",
            Occasion::Festival => "Festival",
            Occasion::DateNight => "Date Night",
            Occasion::Gym => "Gym",
            Occasion::Sports => "Sports",
            Occasion::Beach => "Beach",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single suggested accessory. `kind` is the model's free-text category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrnamentRecommendation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
    pub search_query: String,
}

/// Structured styling analysis. Every field is required when parsing:
/// a reply missing any of them is treated as unparseable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylingResult {
    pub fit_analysis: String,
    pub color_analysis: String,
    pub color_suggestions: Vec<String>,
    pub ornaments: Vec<OrnamentRecommendation>,
}

pub const FIT_ANALYSIS_UNAVAILABLE: &str = "Could not generate analysis.";
pub const COLOR_ANALYSIS_UNAVAILABLE: &str = "Could not analyze colors.";

impl StylingResult {
    /// The safe result used whenever the analysis cannot be produced.
    pub fn unavailable() -> Self {
        Self {
            fit_analysis: FIT_ANALYSIS_UNAVAILABLE.to_string(),
            color_analysis: COLOR_ANALYSIS_UNAVAILABLE.to_string(),
            color_suggestions: Vec::new(),
            ornaments: Vec::new(),
        }
    }
}

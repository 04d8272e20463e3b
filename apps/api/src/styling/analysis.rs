//! Styling analysis — garment image + body profile → `StylingResult`.

use tracing::{info, warn};

use crate::ai_client::prompts::RAW_JSON_INSTRUCTION;
use crate::ai_client::{generate_json, GenerateContentRequest, GenerativeModel, Part, TEXT_MODEL};
use crate::assets::ImageAsset;
use crate::styling::models::{Measurements, Occasion, SkinTone, StylingResult};
use crate::styling::prompts::{REGIONAL_CONTEXT, STYLING_PROMPT_TEMPLATE};

/// Fills the styling template. Measurements are embedded as their JSON form.
///
/// Measurements are free text, so they are substituted last: placeholder
/// syntax typed into a field must reach the model untouched.
pub fn build_styling_prompt(
    measurements: &Measurements,
    skin_tone: SkinTone,
    occasion: Occasion,
) -> Result<String, serde_json::Error> {
    let measurements_json = serde_json::to_string(measurements)?;

    Ok(STYLING_PROMPT_TEMPLATE
        .replace("{skin_tone}", skin_tone.as_str())
        .replace("{occasion}", occasion.as_str())
        .replace("{regional_context}", REGIONAL_CONTEXT)
        .replace("{raw_json_instruction}", RAW_JSON_INSTRUCTION)
        .replace("{measurements_json}", &measurements_json))
}

/// Requests the styling analysis. Never fails: any transport, credential or
/// parse problem yields `StylingResult::unavailable()`.
pub async fn analyze_styling(
    ai: &dyn GenerativeModel,
    measurements: &Measurements,
    skin_tone: SkinTone,
    occasion: Occasion,
    garment: &ImageAsset,
) -> StylingResult {
    let prompt = match build_styling_prompt(measurements, skin_tone, occasion) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Failed to serialize measurements: {e}");
            return StylingResult::unavailable();
        }
    };

    let request =
        GenerateContentRequest::single_turn(vec![Part::text(prompt), Part::image(garment)]);

    match generate_json::<StylingResult>(ai, TEXT_MODEL, &request).await {
        Ok(result) => {
            info!(
                "Styling analysis ready: {} colour suggestions, {} ornaments",
                result.color_suggestions.len(),
                result.ornaments.len()
            );
            result
        }
        Err(e) => {
            warn!("Styling analysis failed: {e}");
            StylingResult::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_client::testing::ScriptedModel;
    use crate::styling::models::{COLOR_ANALYSIS_UNAVAILABLE, FIT_ANALYSIS_UNAVAILABLE};

    const ANALYSIS_JSON: &str = r#"{
        "fitAnalysis": "The straight kurta balances a 95cm chest and 80cm waist.",
        "colorAnalysis": "Mustard warms a wheatish complexion.",
        "colorSuggestions": ["Emerald", "Maroon", "Ivory"],
        "ornaments": [
            {"name": "Gold Signet Ring", "type": "Ring", "reason": "Echoes the zari border", "searchQuery": "men gold signet ring"},
            {"name": "Kolhapuri Sandals", "type": "Footwear", "reason": "Breathable for Hyderabad heat", "searchQuery": "tan kolhapuri chappal"}
        ]
    }"#;

    fn garment() -> ImageAsset {
        ImageAsset::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0x01])
    }

    fn measurements() -> Measurements {
        Measurements {
            height: "175".to_string(),
            weight: "70".to_string(),
            chest: "95".to_string(),
            waist: "80".to_string(),
            hips: "96".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let prompt =
            build_styling_prompt(&measurements(), SkinTone::Wheatish, Occasion::Casual).unwrap();

        assert!(prompt.contains(
            r#"- Measurements: {"height":"175","weight":"70","chest":"95","waist":"80","hips":"96"}"#
        ));
        assert!(prompt.contains("- Skin Tone: Wheatish"));
        assert!(prompt.contains("- Occasion: Casual"));
        assert!(prompt.contains("suits the Wheatish skin tone"));
        assert!(!prompt.contains("{skin_tone}"));
        assert!(!prompt.contains("{measurements_json}"));
        assert!(!prompt.contains("{raw_json_instruction}"));
    }

    #[test]
    fn test_placeholder_text_in_measurements_is_not_substituted() {
        let mut m = measurements();
        m.height = "{occasion}".to_string();
        m.waist = "{skin_tone} cm".to_string();

        let prompt = build_styling_prompt(&m, SkinTone::Dusky, Occasion::Gym).unwrap();

        assert!(prompt.contains(
            r#"- Measurements: {"height":"{occasion}","weight":"70","chest":"95","waist":"{skin_tone} cm","hips":"96"}"#
        ));
        assert!(prompt.contains("- Occasion: Gym"));
    }

    #[tokio::test]
    async fn test_analysis_sends_prompt_and_garment_image() {
        let ai = ScriptedModel::new().reply_text(TEXT_MODEL, ANALYSIS_JSON);

        let result = analyze_styling(
            &ai,
            &measurements(),
            SkinTone::Wheatish,
            Occasion::Casual,
            &garment(),
        )
        .await;

        assert_eq!(result.color_suggestions, vec!["Emerald", "Maroon", "Ivory"]);
        assert_eq!(result.ornaments[1].kind, "Footwear");

        let requests = ai.requests_for(TEXT_MODEL);
        assert_eq!(requests.len(), 1);
        let parts = &requests[0].contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(parts[0].text.as_deref().unwrap().contains("Occasion: Casual"));
        assert_eq!(parts[1].inline_data.as_ref().unwrap().mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_fenced_reply_parses_like_bare_reply() {
        let fenced = format!("```json\n{ANALYSIS_JSON}\n```");
        let ai = ScriptedModel::new()
            .reply_text(TEXT_MODEL, ANALYSIS_JSON)
            .reply_text(TEXT_MODEL, &fenced);

        let m = measurements();
        let bare = analyze_styling(&ai, &m, SkinTone::Fair, Occasion::Party, &garment()).await;
        let wrapped = analyze_styling(&ai, &m, SkinTone::Fair, Occasion::Party, &garment()).await;

        assert_eq!(bare, wrapped);
        assert_ne!(bare, StylingResult::unavailable());
    }

    #[tokio::test]
    async fn test_unparseable_reply_yields_exact_defaults() {
        let ai = ScriptedModel::new()
            .reply_text(TEXT_MODEL, "Sorry, I can't help with that.")
            .reply_text(TEXT_MODEL, r#"{"fitAnalysis": "Half an answer"}"#);

        for _ in 0..2 {
            let result = analyze_styling(
                &ai,
                &measurements(),
                SkinTone::Dark,
                Occasion::Wedding,
                &garment(),
            )
            .await;
            assert_eq!(result.fit_analysis, FIT_ANALYSIS_UNAVAILABLE);
            assert_eq!(result.color_analysis, COLOR_ANALYSIS_UNAVAILABLE);
            assert!(result.color_suggestions.is_empty());
            assert!(result.ornaments.is_empty());
        }
    }

    #[tokio::test]
    async fn test_transport_failure_yields_defaults() {
        let ai = ScriptedModel::new().fail(TEXT_MODEL);
        let result = analyze_styling(
            &ai,
            &measurements(),
            SkinTone::Medium,
            Occasion::Formal,
            &garment(),
        )
        .await;
        assert_eq!(result, StylingResult::unavailable());
    }
}

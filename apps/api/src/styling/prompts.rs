// Prompt constants for the try-on pipeline.
// Reuses cross-cutting fragments from ai_client::prompts.

/// Every styling recommendation assumes Hyderabad's climate.
pub const REGIONAL_CONTEXT: &str = "Location: Hyderabad (assume warm/tropical weather)";

/// Styling analysis prompt template.
/// Replace: {measurements_json}, {skin_tone}, {occasion}, {regional_context},
///          {raw_json_instruction}
pub const STYLING_PROMPT_TEMPLATE: &str = r#"Act as a high-end fashion stylist in India. Analyze this garment image for a user with:
- Measurements: {measurements_json}
- Skin Tone: {skin_tone}
- Occasion: {occasion}
- {regional_context}

Provide a response in strictly valid JSON format with the following structure:
{
  "fitAnalysis": "Detailed description of how this garment fits the described body shape and if it suits the occasion.",
  "colorAnalysis": "Analyze if the garment color suits the {skin_tone} skin tone.",
  "colorSuggestions": ["List 3 specific colors that would suit this skin tone better or complement the outfit"],
  "ornaments": [
    {
      "name": "Specific item name (e.g., Gold Signet Ring, Silk Tie, Silver Bangles, Ankle Chain, Leather Loafers, Pearl Hair Clip)",
      "type": "Category (e.g., Ring, Tie, Footwear, Hair Accessory, Bangle, Chain)",
      "reason": "Why it matches the outfit",
      "searchQuery": "Specific keywords to find this exact style online"
    }
  ]
}

IMPORTANT: Suggest 6-8 specific ornaments covering these exact categories if relevant:
1. Jewellery (Rings, Chains, Bangles, Necklaces, Bracelets)
2. Accessories (Ties, Pocket Squares, Watches, Bags, Belts)
3. Footwear (Shoes, Sandals, Loafers, Heels, Footwear Accessories like Anklets)
4. Hair Accessories (Clips, Bands, Tiaras, Scrunchies)

{raw_json_instruction}"#;

/// Fixed instruction for try-on image synthesis. Sent with the face image
/// (Image A) followed by the garment image (Image B).
pub const TRY_ON_INSTRUCTION: &str = "Act as a professional AI Image Editor. Perform a Virtual Try-On.

INPUTS:
1. Image A: A person's photo (Face Reference).
2. Image B: A garment photo (Clothing Reference).

TASK:
Generate a high-quality, photorealistic image of the person from Image A wearing the garment from Image B.

CRITICAL REQUIREMENTS:
1. IDENTITY PRESERVATION: The face, hair, skin tone, and head shape in the output MUST be identical to Image A. Do not change the person's identity.
2. OUTFIT TRANSFER: The garment from Image B must be worn naturally by the person, adapting to their pose and body shape.
3. REALISM: Ensure realistic lighting, shadows, and fabric textures.
4. OUTPUT: Return only the generated image.";

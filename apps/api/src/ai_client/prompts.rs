// Shared prompt fragments.
// Each feature that calls the model defines its own prompts alongside it;
// this file holds the pieces more than one of them reuses.

/// Persona line of the chat assistant.
pub const STYLIST_PERSONA: &str = "You are Styllen, an elite fashion styling assistant based in India.";

/// Appended to prompts whose reply is parsed as JSON.
pub const RAW_JSON_INSTRUCTION: &str =
    "Do not include markdown formatting like ```json. Just return the raw JSON string.";

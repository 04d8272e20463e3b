//! Script relay — hands user-entered config or pseudo-code to the model and
//! returns whatever it says. There is no local parsing or execution.

use tracing::warn;

use crate::ai_client::{AiError, GenerateContentRequest, GenerativeModel, Part, TEXT_MODEL};
use crate::assistant::prompts::SCRIPT_PROMPT_TEMPLATE;

pub const NO_OUTPUT: &str = "Script executed successfully with no output.";
pub const RUNTIME_ERROR: &str = "Runtime Error: Failed to execute script via Gemini API.";

pub async fn run_fashion_script(ai: &dyn GenerativeModel, script: &str) -> String {
    let prompt = SCRIPT_PROMPT_TEMPLATE.replace("{script}", script);
    let request = GenerateContentRequest::single_turn(vec![Part::text(prompt)]);

    match ai.generate_text(TEXT_MODEL, &request).await {
        Ok(output) => output,
        Err(AiError::EmptyContent) => NO_OUTPUT.to_string(),
        Err(e) => {
            warn!("Script execution error: {e}");
            RUNTIME_ERROR.to_string()
        }
    }
}

// Virtual try-on pipeline.
// Flow: assets normalized → dispatcher (analysis ∥ synthesis) → assembler → view.
// All model calls go through ai_client; no direct Gemini requests here.

pub mod analysis;
pub mod assembler;
pub mod dispatcher;
pub mod handlers;
pub mod links;
pub mod models;
pub mod prompts;
pub mod session;
pub mod synthesis;

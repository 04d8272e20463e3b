// Conversational paths: the fashion chat and the script relay.
// Both are one-shot, share no state, and always answer with text.

pub mod chat;
pub mod handlers;
pub mod prompts;
pub mod script;

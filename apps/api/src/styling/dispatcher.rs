//! Request Dispatcher — runs the styling analysis and the image synthesis
//! concurrently, waits for both, and hands them to the assembler.
//!
//! Flow: analyze_styling ∥ synthesize_try_on → assemble → TryOnResult.
//! Neither branch can fail the dispatch; each degrades on its own.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::ai_client::GenerativeModel;
use crate::assets::ImageAsset;
use crate::styling::analysis::analyze_styling;
use crate::styling::assembler::{assemble, TryOnResult};
use crate::styling::models::{Measurements, Occasion, SkinTone};
use crate::styling::session::{GenerationTicket, SessionStore};
use crate::styling::synthesis::synthesize_try_on;

/// Everything one generation needs. Only constructible with both assets present.
#[derive(Debug, Clone)]
pub struct TryOnInputs {
    pub face: ImageAsset,
    pub garment: ImageAsset,
    pub measurements: Measurements,
    pub skin_tone: SkinTone,
    pub occasion: Occasion,
}

/// Issues both AI requests concurrently and joins them ("wait for both").
pub async fn dispatch(ai: &dyn GenerativeModel, inputs: &TryOnInputs) -> TryOnResult {
    let (styling, generated) = tokio::join!(
        analyze_styling(
            ai,
            &inputs.measurements,
            inputs.skin_tone,
            inputs.occasion,
            &inputs.garment,
        ),
        synthesize_try_on(ai, &inputs.face, &inputs.garment),
    );

    assemble(styling, generated, &inputs.face, &inputs.garment)
}

/// Runs a session generation to completion and records the result,
/// unless a newer generation superseded it in the meantime.
pub async fn run_generation(
    ai: Arc<dyn GenerativeModel>,
    sessions: SessionStore,
    session_id: Uuid,
    ticket: GenerationTicket,
) {
    let result = dispatch(ai.as_ref(), &ticket.inputs).await;
    let synthesized = result.has_synthesized_image();

    match sessions
        .update(session_id, |s| s.complete_generation(ticket.generation_id, result))
        .await
    {
        Some(true) => info!(
            "Session {} generation {} complete (synthesized image: {})",
            session_id, ticket.generation_id, synthesized
        ),
        Some(false) => debug!(
            "Session {} generation {} superseded; result discarded",
            session_id, ticket.generation_id
        ),
        None => debug!("Session {session_id} closed before generation finished"),
    }
}

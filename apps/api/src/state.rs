use std::sync::Arc;

use crate::ai_client::GenerativeModel;
use crate::assets::AssetNormalizer;
use crate::profile::ProfileStore;
use crate::scripts::ScriptStore;
use crate::styling::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend. `GeminiClient` in production.
    pub ai: Arc<dyn GenerativeModel>,
    pub assets: AssetNormalizer,
    /// Open try-on sessions, one per view. Ephemeral.
    pub sessions: SessionStore,
    pub profile: ProfileStore,
    pub scripts: ScriptStore,
}

impl AppState {
    pub fn new(ai: Arc<dyn GenerativeModel>, assets: AssetNormalizer) -> Self {
        Self {
            ai,
            assets,
            sessions: SessionStore::default(),
            profile: ProfileStore::default(),
            scripts: ScriptStore::default(),
        }
    }
}

pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::assets::handlers as assets;
use crate::assistant::handlers as assistant;
use crate::catalog::handlers as catalog;
use crate::profile::handlers as profile;
use crate::scripts::handlers as scripts;
use crate::state::AppState;
use crate::styling::handlers as try_on;

/// Phone camera photos routinely exceed axum's 2 MB default.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assets
        .route("/api/v1/assets/normalize", post(assets::handle_normalize))
        .route("/api/v1/assets/upload", post(assets::handle_upload))
        // Try-on
        .route("/api/v1/try-on", post(try_on::handle_try_on))
        .route("/api/v1/try-on/sessions", post(try_on::handle_create_session))
        .route(
            "/api/v1/try-on/sessions/:id",
            get(try_on::handle_get_session)
                .patch(try_on::handle_update_session)
                .delete(try_on::handle_delete_session),
        )
        .route(
            "/api/v1/try-on/sessions/:id/assets/:slot",
            put(try_on::handle_set_asset),
        )
        .route(
            "/api/v1/try-on/sessions/:id/assets/:slot/upload",
            post(try_on::handle_upload_asset),
        )
        .route(
            "/api/v1/try-on/sessions/:id/generate",
            post(try_on::handle_generate),
        )
        // Assistant
        .route("/api/v1/chat", post(assistant::handle_chat))
        .route("/api/v1/chat/greeting", get(assistant::handle_chat_greeting))
        .route("/api/v1/scripts/run", post(assistant::handle_run_script))
        // Script workspace
        .route(
            "/api/v1/scripts",
            get(scripts::handle_list_scripts).post(scripts::handle_create_script),
        )
        .route("/api/v1/scripts/import", post(scripts::handle_import_script))
        .route(
            "/api/v1/scripts/:id",
            get(scripts::handle_get_script)
                .put(scripts::handle_update_script)
                .delete(scripts::handle_delete_script),
        )
        .route("/api/v1/scripts/:id/run", post(scripts::handle_run_script_file))
        // Profile & catalog
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route("/api/v1/profile/palette", get(profile::handle_get_palette))
        .route("/api/v1/palettes", get(profile::handle_list_palettes))
        .route("/api/v1/outfits", get(catalog::handle_list_outfits))
        .route("/api/v1/outfits/:id", get(catalog::handle_get_outfit))
        .route("/api/v1/saved-outfits", get(catalog::handle_list_saved_outfits))
        .route("/api/v1/color-shades", get(catalog::handle_list_color_shades))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

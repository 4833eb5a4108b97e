use leptos::prelude::*;

use crate::dto::*;

// AppState structure that will be provided as context (SSR only)
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: PanelSettings,
}

#[server]
pub async fn get_panel_settings_fn() -> Result<PanelSettings, ServerFnError> {
    let app_state = expect_context::<AppState>();
    Ok(app_state.settings)
}

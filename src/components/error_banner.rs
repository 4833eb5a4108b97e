use leptos::prelude::*;

use crate::wallet::PanelState;

/// Latest wallet error or reconnect notice, if any
#[component]
pub fn ErrorBanner(state: RwSignal<PanelState>) -> impl IntoView {
    let error = move || state.with(|s| s.error.clone());

    view! {
        <Show when=move || error().is_some()>
            <div class="error-message">
                <strong>"Error: "</strong>
                {move || error().unwrap_or_default()}
            </div>
        </Show>
    }
}

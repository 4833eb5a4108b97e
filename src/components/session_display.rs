use leptos::prelude::*;

use crate::components::functions::{format_address, format_balance_display, format_chain_id};
use crate::wallet::PanelState;

/// Connect button and the connected account's address, chain and balance
#[component]
pub fn SessionDisplay(
    state: RwSignal<PanelState>,
    /// Native currency symbol shown next to the balance
    currency_symbol: String,
    /// Called when the user asks to connect the wallet
    on_connect: Callback<()>,
    /// Called when the user asks for a fresh balance
    on_refresh: Callback<()>,
) -> impl IntoView {
    let connected = move || state.with(|s| s.session.is_connected());

    view! {
        <div class="panel session-display">
            <button class="btn btn-primary" on:click=move |_| on_connect.run(())>
                "Connect MetaMask"
            </button>

            <div class="session-grid">
                <div class="session-item">
                    <span class="session-label">"Address:"</span>
                    <code class="session-value">
                        {move || state.with(|s| format_address(s.session.address))}
                    </code>
                </div>

                <div class="session-item">
                    <span class="session-label">"Chain ID:"</span>
                    <span class="session-value">
                        {move || state.with(|s| format_chain_id(s.session.chain_id))}
                    </span>
                </div>

                <div class="session-item">
                    <span class="session-label">"Balance:"</span>
                    <span class="session-value balance-total">
                        {move || {
                            state.with(|s| format_balance_display(s.session.balance_wei, &currency_symbol))
                        }}
                    </span>
                    <Show when=connected>
                        <button class="btn btn-small" on:click=move |_| on_refresh.run(())>
                            "Refresh"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

use leptos::prelude::*;

use crate::components::functions::{format_hash, or_empty};
use crate::wallet::controller::STATUS_PENDING;
use crate::wallet::PanelState;

/// Panel for sending native currency to another address
#[component]
pub fn SendPanel(
    state: RwSignal<PanelState>,
    currency_symbol: String,
    /// Called when the user submits the form
    on_send: Callback<()>,
) -> impl IntoView {
    let on_recipient_input = move |ev| {
        let value = event_target_value(&ev);
        state.update(|s| s.draft.recipient = value);
    };

    let on_amount_input = move |ev| {
        let value = event_target_value(&ev);
        state.update(|s| s.draft.amount = value);
    };

    let awaiting_wallet = move || state.with(|s| s.outcome.status == STATUS_PENDING);

    view! {
        <div class="panel send-panel">
            <h2>{format!("Send {currency_symbol} Transaction")}</h2>

            <div class="form-group">
                <label for="recipient">"Recipient"</label>
                <input
                    id="recipient"
                    class="input input-mono"
                    placeholder="Recipient address (0x...)"
                    prop:value=move || state.with(|s| s.draft.recipient.clone())
                    on:input=on_recipient_input
                />
            </div>

            <div class="form-group">
                <label for="amount">{format!("Amount ({currency_symbol})")}</label>
                <input
                    id="amount"
                    class="input"
                    placeholder=format!("Amount in {currency_symbol} (example: 0.0001)")
                    prop:value=move || state.with(|s| s.draft.amount.clone())
                    on:input=on_amount_input
                />
            </div>

            <button class="btn btn-primary" on:click=move |_| on_send.run(())>
                {move || if awaiting_wallet() { "Confirm in wallet..." } else { "Send Transaction" }}
            </button>

            <div class="tx-details">
                <p>
                    <strong>"Tx Hash: "</strong>
                    <code>{move || state.with(|s| format_hash(s.outcome.hash))}</code>
                </p>
                <p>
                    <strong>"Status: "</strong>
                    {move || state.with(|s| or_empty(&s.outcome.status))}
                </p>
            </div>
        </div>
    }
}

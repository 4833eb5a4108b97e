use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{ErrorBanner, SendPanel, SessionDisplay};
use crate::dto::PanelSettings;
use crate::provider::{browser_provider, WalletProvider};
use crate::wallet::{PanelState, WalletController};

/// The wallet the panel was created with, shared by every action and the
/// change listeners.
///
/// Only the browser build holds a handle: the server has no wallet, and its
/// reactive owner may be dropped on another thread than the one that built it.
#[derive(Clone, Copy)]
struct PanelWallet {
    #[cfg(feature = "hydrate")]
    provider: StoredValue<Rc<dyn WalletProvider>, LocalStorage>,
    state: RwSignal<PanelState>,
}

impl PanelWallet {
    fn new(provider: Rc<dyn WalletProvider>, state: RwSignal<PanelState>) -> Self {
        #[cfg(not(feature = "hydrate"))]
        drop(provider);

        Self {
            #[cfg(feature = "hydrate")]
            provider: StoredValue::new_local(provider),
            state,
        }
    }

    fn controller(&self) -> WalletController<RwSignal<PanelState>> {
        #[cfg(feature = "hydrate")]
        let provider = self.provider.get_value();
        #[cfg(not(feature = "hydrate"))]
        let provider = browser_provider();

        WalletController::new(provider, self.state)
    }
}

/// Connect, inspect and send from a MetaMask wallet
#[component]
pub fn WalletPanel(settings: PanelSettings) -> impl IntoView {
    let state = RwSignal::new(PanelState::with_default_amount(settings.default_amount));
    let wallet = PanelWallet::new(browser_provider(), state);

    let connect = Callback::new(move |_| {
        leptos::task::spawn_local(async move {
            let _ = wallet.controller().connect_wallet().await;
        });
    });

    let refresh = Callback::new(move |_| {
        leptos::task::spawn_local(async move {
            let _ = wallet.controller().refresh_balance().await;
        });
    });

    let send = Callback::new(move |_| {
        leptos::task::spawn_local(async move {
            let _ = wallet.controller().send_transaction().await;
        });
    });

    // Account/chain listeners live exactly as long as the panel.
    #[cfg(feature = "hydrate")]
    {
        use crate::wallet::EventSubscription;

        match wallet.controller().subscribe_events() {
            Ok(Some(subscription)) => {
                let subscription = StoredValue::new_local(Some(subscription));
                on_cleanup(move || {
                    if let Some(Some(subscription)) =
                        subscription.try_update_value(|slot| slot.take())
                    {
                        EventSubscription::unsubscribe(subscription);
                    }
                });
            }
            Ok(None) => tracing::warn!("no wallet injected, not listening for changes"),
            Err(err) => tracing::warn!(error = %err, "failed to subscribe to wallet events"),
        }
    }

    view! {
        <div class="wallet-panel">
            <SessionDisplay
                state
                currency_symbol=settings.currency_symbol.clone()
                on_connect=connect
                on_refresh=refresh
            />
            <SendPanel
                state
                currency_symbol=settings.currency_symbol
                on_send=send
            />
            <ErrorBanner state/>
        </div>
    }
}

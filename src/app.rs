use leptos::prelude::*;
use leptos_meta::*;

use crate::components::*;
use crate::dto::PanelSettings;
use crate::server::functions::get_panel_settings_fn;

/// SSR shell: provides the full HTML document structure for server-side rendering.
/// This is called by `leptos_routes_with_context` in initialize.rs.
#[cfg(feature = "ssr")]
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/walletpanel.css"/>
        <Title text="Wallet Connect + Balance + Send Tx"/>
        <HomePage/>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    // The wallet only exists in the browser, so the panel is client-rendered.
    let settings = LocalResource::new(move || async move {
        get_panel_settings_fn().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default panel settings");
            PanelSettings::default()
        })
    });

    view! {
        <div class="container">
            <header class="app-header">
                <h1>"Wallet Connect + Balance + Send Tx"</h1>
                <p class="subtitle">
                    "MetaMask connect, transaction signing, gas + receipt tracking."
                </p>
            </header>

            <main class="app-main">
                <Transition fallback=|| view! { <p>"Loading wallet panel..."</p> }>
                    {move || Suspend::new(async move {
                        let settings = settings.await;
                        let note = settings.network_note.clone();
                        view! {
                            <WalletPanel settings/>
                            <p class="network-note">{note}</p>
                        }
                    })}
                </Transition>
            </main>
        </div>
    }
}

#![recursion_limit = "512"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> walletpanel::errors::Result<()> {
    use leptos::prelude::*;
    use tracing_subscriber::EnvFilter;

    use walletpanel::errors::AppError;
    use walletpanel::initialize::{build_router, Config};
    use walletpanel::server::AppState;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        default_amount = %config.default_amount,
        currency = %config.currency_symbol,
        "Loaded panel settings"
    );

    // Build application state
    let app_state = AppState {
        settings: config.settings(),
    };

    // Get Leptos configuration
    let leptos_options = get_configuration(None)
        .map_err(|e| AppError::Server(format!("Failed to load Leptos configuration: {e}")))?
        .leptos_options;

    let addr = leptos_options.site_addr;

    // Build the application router
    let app = build_router(app_state, leptos_options);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{addr}");
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /api/settings");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Client-side entry is `walletpanel::hydrate`.
}

use crate::app::{shell, App};
use crate::dto::{PanelSettings, DEFAULT_CURRENCY_SYMBOL, DEFAULT_NETWORK_NOTE};
use crate::errors::{AppError, Result as AppResult};
use crate::server::{api, AppState};
use crate::wallet::state::DEFAULT_AMOUNT;
use crate::wallet::units::parse_ether;

use axum::routing::get;
use axum::Router;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, LeptosRoutes};
use tower_http::cors::{Any, CorsLayer};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub default_amount: String,
    pub currency_symbol: String,
    pub network_note: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Result<String, std::env::VarError>,
    ) -> AppResult<Self> {
        let default_amount = read_env_or(&lookup, "PANEL_DEFAULT_AMOUNT", DEFAULT_AMOUNT)?;
        parse_ether(&default_amount).map_err(|e| AppError::InvalidConfig {
            name: "PANEL_DEFAULT_AMOUNT".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Config {
            default_amount,
            currency_symbol: read_env_or(&lookup, "PANEL_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL)?,
            network_note: read_env_or(&lookup, "PANEL_NETWORK_NOTE", DEFAULT_NETWORK_NOTE)?,
        })
    }

    pub fn settings(&self) -> PanelSettings {
        PanelSettings {
            default_amount: self.default_amount.clone(),
            currency_symbol: self.currency_symbol.clone(),
            network_note: self.network_note.clone(),
        }
    }
}

fn read_env_or(
    lookup: &impl Fn(&str) -> Result<String, std::env::VarError>,
    name: &str,
    default: &str,
) -> AppResult<String> {
    match lookup(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                Err(AppError::EmptyEnv(name.to_string()))
            } else {
                Ok(trimmed)
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(_)) => Err(AppError::InvalidEnv(name.to_string())),
    }
}

/// Build the full Axum router (API + Leptos SSR)
pub fn build_router(app_state: AppState, leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(App);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route("/settings", get(api::get_settings))
        .with_state(app_state.clone());

    Router::new()
        .nest("/api", api_router)
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            move || provide_context(app_state.clone()),
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler::<LeptosOptions, _>(
            shell,
        ))
        .layer(cors)
        .with_state(leptos_options)
}

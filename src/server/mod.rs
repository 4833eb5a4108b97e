// Server functions module is always available (contains #[server] macros)
pub mod functions;

// Server-only modules
#[cfg(feature = "ssr")]
pub mod api;

#[cfg(feature = "ssr")]
pub use functions::AppState;

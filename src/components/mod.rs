pub mod error_banner;
pub mod functions;
pub mod send_panel;
pub mod session_display;
pub mod wallet_panel;

// Re-export components
pub use error_banner::ErrorBanner;
pub use send_panel::SendPanel;
pub use session_display::SessionDisplay;
pub use wallet_panel::WalletPanel;

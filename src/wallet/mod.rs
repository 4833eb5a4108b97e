pub mod controller;
pub mod state;
pub mod units;

pub use controller::{EventSubscription, WalletController};
pub use state::{PanelState, PanelStore, TransactionDraft, TransactionOutcome, WalletSession};

//! Typed contract for the browser-injected wallet (EIP-1193).
//!
//! The panel never touches `window.ethereum` directly: it is handed a
//! [`WalletProvider`] and only calls the methods listed here, which keeps the
//! wallet flows testable with a scripted provider.

use std::rc::Rc;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::errors::WalletError;

#[cfg(target_arch = "wasm32")]
pub mod eip1193;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(target_arch = "wasm32")]
pub use eip1193::Eip1193Provider;

/// EIP-1193 error code for "the user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Provider-side failure as reported by the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("provider error"))]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code,
            message: (!message.is_empty()).then_some(message),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }

    /// Surfaces the wallet's own message, or `fallback` when it gave none.
    pub fn into_wallet_error(self, fallback: WalletError) -> WalletError {
        match self.message {
            Some(message) => WalletError::Provider(message),
            None => fallback,
        }
    }
}

/// Notification channels exposed by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEvent {
    AccountsChanged,
    ChainChanged,
}

impl ProviderEvent {
    pub const ALL: [ProviderEvent; 2] = [ProviderEvent::AccountsChanged, ProviderEvent::ChainChanged];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged => "accountsChanged",
            ProviderEvent::ChainChanged => "chainChanged",
        }
    }

    /// Notice shown once the session has been dropped because of this event.
    pub fn reconnect_notice(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged => "Account changed. Please reconnect.",
            ProviderEvent::ChainChanged => "Network changed. Please reconnect.",
        }
    }
}

pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Registration handle returned by [`WalletProvider::on`].
///
/// The listener is removed exactly once: on [`Subscription::unsubscribe`] or
/// when the handle is dropped, whichever comes first.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Native-currency transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub block_number: u64,
    pub gas_used: u64,
}

/// A transfer the wallet has accepted and broadcast.
#[async_trait(?Send)]
pub trait PendingTransfer {
    fn hash(&self) -> TxHash;

    /// Resolves once the transaction is included in a block.
    async fn wait(&self) -> Result<TransactionReceipt, ProviderError>;
}

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Whether a wallet is actually injected into the page.
    fn is_available(&self) -> bool;

    /// Prompts the user to authorise the page; may stay pending until they answer.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Currently selected account.
    async fn signer_address(&self) -> Result<Address, ProviderError>;

    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Balance in wei.
    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError>;

    async fn send_transaction(
        &self,
        request: TransferRequest,
    ) -> Result<Box<dyn PendingTransfer>, ProviderError>;

    fn on(&self, event: ProviderEvent, handler: EventHandler)
        -> Result<Subscription, ProviderError>;
}

/// Stand-in used where no browser wallet can exist (server-side rendering,
/// native builds).
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Detached {
    fn unavailable() -> ProviderError {
        ProviderError::message(WalletError::ProviderUnavailable.to_string())
    }
}

#[async_trait(?Send)]
impl WalletProvider for Detached {
    fn is_available(&self) -> bool {
        false
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Err(Self::unavailable())
    }

    async fn signer_address(&self) -> Result<Address, ProviderError> {
        Err(Self::unavailable())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Err(Self::unavailable())
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, ProviderError> {
        Err(Self::unavailable())
    }

    async fn send_transaction(
        &self,
        _request: TransferRequest,
    ) -> Result<Box<dyn PendingTransfer>, ProviderError> {
        Err(Self::unavailable())
    }

    fn on(
        &self,
        _event: ProviderEvent,
        _handler: EventHandler,
    ) -> Result<Subscription, ProviderError> {
        Err(Self::unavailable())
    }
}

/// The wallet injected into the current page, if this build can have one.
pub fn browser_provider() -> Rc<dyn WalletProvider> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(Eip1193Provider::detect())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(Detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscription_releases_once() {
        let released = Rc::new(Cell::new(0));
        let counter = released.clone();
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));

        subscription.unsubscribe();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn subscription_releases_on_drop() {
        let released = Rc::new(Cell::new(0));
        {
            let counter = released.clone();
            let _subscription = Subscription::new(move || counter.set(counter.get() + 1));
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn provider_error_falls_back_without_message() {
        let err = ProviderError::new(Some(-32603), "");
        assert_eq!(err.message, None);
        assert_eq!(
            err.into_wallet_error(WalletError::SendFailed),
            WalletError::SendFailed
        );

        let err = ProviderError::message("insufficient funds");
        assert_eq!(
            err.into_wallet_error(WalletError::SendFailed).to_string(),
            "insufficient funds"
        );
    }

    #[test]
    fn user_rejection_code() {
        assert!(ProviderError::new(Some(4001), "User denied").is_user_rejection());
        assert!(!ProviderError::new(Some(4100), "Unauthorized").is_user_rejection());
        assert!(!ProviderError::message("User denied").is_user_rejection());
    }

    #[test]
    fn event_names() {
        assert_eq!(ProviderEvent::AccountsChanged.as_str(), "accountsChanged");
        assert_eq!(ProviderEvent::ChainChanged.as_str(), "chainChanged");
    }

    #[test]
    fn provider_error_display() {
        assert_eq!(
            ProviderError::new(Some(4001), "User denied").to_string(),
            "User denied"
        );
        assert_eq!(ProviderError::default().to_string(), "provider error");
    }

    #[test]
    fn detached_is_unavailable() {
        assert!(!Detached.is_available());
        assert!(!browser_provider().is_available());
    }
}

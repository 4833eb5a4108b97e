use std::rc::Rc;

use alloy_primitives::U256;

use crate::errors::WalletError;
use crate::provider::{
    EventHandler, ProviderError, ProviderEvent, Subscription, TransferRequest, WalletProvider,
};
use crate::wallet::state::{PanelStore, WalletSession};
use crate::wallet::units::{format_ether, parse_address, parse_ether};

pub const STATUS_PENDING: &str = "Sending transaction... (confirm in MetaMask)";
pub const STATUS_SENT: &str = "Transaction sent! Waiting for confirmation...";

pub fn confirmed_status(block_number: u64, gas_used: u64) -> String {
    format!("Confirmed ✅ | Block: {block_number} | Gas Used: {gas_used}")
}

/// Drives the wallet flows of the panel and records their progress in `S`.
///
/// Every operation clears the previous error when it starts and, on failure,
/// stores the user-facing message before returning the error to the caller.
pub struct WalletController<S> {
    provider: Rc<dyn WalletProvider>,
    store: S,
}

impl<S: Clone> Clone for WalletController<S> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            store: self.store.clone(),
        }
    }
}

impl<S> WalletController<S>
where
    S: PanelStore + Clone + 'static,
{
    pub fn new(provider: Rc<dyn WalletProvider>, store: S) -> Self {
        Self { provider, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ask the wallet for account access and load address, chain and balance.
    pub async fn connect_wallet(&self) -> Result<WalletSession, WalletError> {
        self.store.apply(|state| {
            state.error = None;
            state.outcome.hash = None;
            state.outcome.status.clear();
        });

        let result = self.try_connect().await;
        self.record(result)
    }

    async fn try_connect(&self) -> Result<WalletSession, WalletError> {
        self.ensure_available()?;

        let provider = &self.provider;
        let fail = |err: ProviderError| err.into_wallet_error(WalletError::ConnectFailed);

        provider.request_accounts().await.map_err(fail)?;

        let address = provider.signer_address().await.map_err(fail)?;
        let chain_id = provider.chain_id().await.map_err(fail)?;
        let balance = provider.get_balance(address).await.map_err(fail)?;

        // Only a complete read connects the panel.
        let session = WalletSession {
            address: Some(address),
            chain_id: Some(chain_id),
            balance_wei: Some(balance),
        };
        self.store.apply(|state| state.session = session.clone());

        tracing::info!(%address, chain_id, balance = %format_ether(balance), "wallet connected");
        Ok(session)
    }

    /// Re-read the balance of whichever account the wallet currently exposes.
    pub async fn refresh_balance(&self) -> Result<U256, WalletError> {
        self.store.apply(|state| state.error = None);

        let result = self.try_refresh_balance().await;
        self.record(result)
    }

    async fn try_refresh_balance(&self) -> Result<U256, WalletError> {
        self.ensure_available()?;

        let fail = |err: ProviderError| err.into_wallet_error(WalletError::RefreshFailed);
        let address = self.provider.signer_address().await.map_err(fail)?;
        let balance = self.provider.get_balance(address).await.map_err(fail)?;

        self.store
            .apply(|state| state.session.balance_wei = Some(balance));
        tracing::debug!(%address, %balance, "balance refreshed");
        Ok(balance)
    }

    /// Validate the draft, submit the transfer and follow it to one confirmation.
    ///
    /// The balance is refreshed once after the confirmation arrives.
    pub async fn send_transaction(&self) -> Result<(), WalletError> {
        self.store.apply(|state| {
            state.error = None;
            state.outcome.clear();
        });

        let result = self.try_send().await;
        self.record(result)
    }

    async fn try_send(&self) -> Result<(), WalletError> {
        self.ensure_available()?;

        let request = self.validated_request()?;
        self.store
            .apply(|state| state.outcome.status = STATUS_PENDING.to_string());

        let pending = match self.provider.send_transaction(request).await {
            Ok(pending) => pending,
            Err(err) => {
                // Nothing is waiting on the wallet any more.
                self.store.apply(|state| state.outcome.status.clear());
                return Err(send_failure(err));
            }
        };

        let hash = pending.hash();
        tracing::info!(%hash, to = %request.to, value = %request.value, "transaction submitted");
        self.store.apply(|state| {
            state.outcome.hash = Some(hash);
            state.outcome.status = STATUS_SENT.to_string();
        });

        let receipt = pending.wait().await.map_err(send_failure)?;
        tracing::info!(
            %hash,
            block = receipt.block_number,
            gas_used = receipt.gas_used,
            "transaction confirmed"
        );
        self.store.apply(|state| {
            state.outcome.block_number = Some(receipt.block_number);
            state.outcome.gas_used = Some(receipt.gas_used);
            state.outcome.status = confirmed_status(receipt.block_number, receipt.gas_used);
        });

        // A failed refresh reports its own error; the transfer itself succeeded.
        let _ = self.refresh_balance().await;
        Ok(())
    }

    fn validated_request(&self) -> Result<TransferRequest, WalletError> {
        let state = self.store.snapshot();
        if !state.session.is_connected() {
            return Err(WalletError::NotConnected);
        }

        let to = parse_address(&state.draft.recipient)?;
        let value = parse_ether(&state.draft.amount)?;
        Ok(TransferRequest { to, value })
    }

    /// Listen for account and chain changes; either one drops the session.
    ///
    /// Returns `Ok(None)` when there is no wallet to listen to. The listeners
    /// stay registered until the returned guard is dropped.
    pub fn subscribe_events(&self) -> Result<Option<EventSubscription>, WalletError> {
        if !self.provider.is_available() {
            return Ok(None);
        }

        let store = self.store.clone();
        let handler: EventHandler = Rc::new(move |event: ProviderEvent| {
            tracing::info!(event = event.as_str(), "wallet changed, dropping session");
            store.apply(|state| {
                state.session.clear();
                state.outcome.clear();
                state.error = Some(event.reconnect_notice().to_string());
            });
        });

        let subscriptions = ProviderEvent::ALL
            .into_iter()
            .map(|event| self.provider.on(event, handler.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.into_wallet_error(WalletError::ConnectFailed))?;

        Ok(Some(EventSubscription { subscriptions }))
    }

    fn ensure_available(&self) -> Result<(), WalletError> {
        if self.provider.is_available() {
            Ok(())
        } else {
            Err(WalletError::ProviderUnavailable)
        }
    }

    fn record<T>(&self, result: Result<T, WalletError>) -> Result<T, WalletError> {
        if let Err(err) = &result {
            tracing::warn!(error = %err, "wallet operation failed");
            let message = err.to_string();
            self.store.apply(|state| state.error = Some(message));
        }
        result
    }
}

fn send_failure(err: ProviderError) -> WalletError {
    if err.is_user_rejection() {
        WalletError::UserRejected
    } else {
        err.into_wallet_error(WalletError::SendFailed)
    }
}

/// Keeps the account/chain listeners registered; dropping it removes them.
#[derive(Debug)]
#[must_use = "dropping an EventSubscription removes the listeners"]
pub struct EventSubscription {
    subscriptions: Vec<Subscription>,
}

impl EventSubscription {
    pub fn unsubscribe(self) {
        for subscription in self.subscriptions {
            subscription.unsubscribe();
        }
    }
}

//! Scripted provider for the controller tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::{
    EventHandler, PendingTransfer, ProviderError, ProviderEvent, Subscription, TransactionReceipt,
    TransferRequest, WalletProvider,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    RequestAccounts,
    SignerAddress,
    ChainId,
    GetBalance(Address),
    SendTransaction(TransferRequest),
    Wait(TxHash),
    On(ProviderEvent),
    RemoveListener(ProviderEvent),
}

/// Reads back whatever the test wants to see at a given point of a flow.
type Observer = Rc<dyn Fn() -> String>;

pub(crate) struct MockProvider {
    pub(crate) available: bool,
    pub(crate) account: Address,
    pub(crate) chain_id: u64,
    pub(crate) balance: RefCell<U256>,
    pub(crate) request_accounts_error: Option<ProviderError>,
    pub(crate) chain_id_error: Option<ProviderError>,
    pub(crate) balance_error: Option<ProviderError>,
    pub(crate) send_error: Option<ProviderError>,
    pub(crate) wait_result: Result<TransactionReceipt, ProviderError>,
    pub(crate) hash: TxHash,
    calls: Rc<RefCell<Vec<Call>>>,
    listeners: Rc<RefCell<HashMap<ProviderEvent, Vec<EventHandler>>>>,
    observer: RefCell<Option<Observer>>,
    observed: Rc<RefCell<Vec<String>>>,
}

impl MockProvider {
    pub(crate) fn account() -> Address {
        Address::repeat_byte(0x11)
    }

    pub(crate) fn new() -> Self {
        Self {
            available: true,
            account: Self::account(),
            chain_id: 11_155_111,
            balance: RefCell::new(U256::from(2_000_000_000_000_000_000u128)),
            request_accounts_error: None,
            chain_id_error: None,
            balance_error: None,
            send_error: None,
            wait_result: Ok(TransactionReceipt {
                block_number: 6_543_210,
                gas_used: 21_000,
            }),
            hash: TxHash::repeat_byte(0xab),
            calls: Rc::default(),
            listeners: Rc::default(),
            observer: RefCell::new(None),
            observed: Rc::default(),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub(crate) fn listener_count(&self, event: ProviderEvent) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }

    /// Delivers `event` to every registered listener, like the wallet would.
    pub(crate) fn emit(&self, event: ProviderEvent) {
        let handlers = self
            .listeners
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler(event);
        }
    }

    /// Calls `observer` when a transfer is submitted and again when it is awaited.
    pub(crate) fn observe(&self, observer: impl Fn() -> String + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub(crate) fn observed(&self) -> Vec<String> {
        self.observed.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record(Call::RequestAccounts);
        match &self.request_accounts_error {
            Some(err) => Err(err.clone()),
            None => Ok(vec![self.account]),
        }
    }

    async fn signer_address(&self) -> Result<Address, ProviderError> {
        self.record(Call::SignerAddress);
        Ok(self.account)
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        self.record(Call::ChainId);
        match &self.chain_id_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.chain_id),
        }
    }

    async fn get_balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.record(Call::GetBalance(address));
        match &self.balance_error {
            Some(err) => Err(err.clone()),
            None => Ok(*self.balance.borrow()),
        }
    }

    async fn send_transaction(
        &self,
        request: TransferRequest,
    ) -> Result<Box<dyn PendingTransfer>, ProviderError> {
        self.record(Call::SendTransaction(request));
        let observer = self.observer.borrow().clone();
        if let Some(observer) = &observer {
            self.observed.borrow_mut().push(observer());
        }
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }
        Ok(Box::new(MockPending {
            hash: self.hash,
            result: self.wait_result.clone(),
            calls: self.calls.clone(),
            observer,
            observed: self.observed.clone(),
        }))
    }

    fn on(
        &self,
        event: ProviderEvent,
        handler: EventHandler,
    ) -> Result<Subscription, ProviderError> {
        self.record(Call::On(event));
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(handler.clone());

        let listeners = self.listeners.clone();
        let calls = self.calls.clone();
        Ok(Subscription::new(move || {
            calls.borrow_mut().push(Call::RemoveListener(event));
            if let Some(registered) = listeners.borrow_mut().get_mut(&event) {
                registered.retain(|existing| !Rc::ptr_eq(existing, &handler));
            }
        }))
    }
}

struct MockPending {
    hash: TxHash,
    result: Result<TransactionReceipt, ProviderError>,
    calls: Rc<RefCell<Vec<Call>>>,
    observer: Option<Observer>,
    observed: Rc<RefCell<Vec<String>>>,
}

#[async_trait(?Send)]
impl PendingTransfer for MockPending {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(&self) -> Result<TransactionReceipt, ProviderError> {
        self.calls.borrow_mut().push(Call::Wait(self.hash));
        if let Some(observer) = &self.observer {
            self.observed.borrow_mut().push(observer());
        }
        self.result.clone()
    }
}

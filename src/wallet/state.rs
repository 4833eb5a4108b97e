use std::cell::RefCell;
use std::rc::Rc;

use alloy_primitives::{Address, TxHash, U256};
use leptos::prelude::*;

/// Amount prefilled in the send form.
pub const DEFAULT_AMOUNT: &str = "0.0001";

/// The connected account as last read from the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
    pub balance_wei: Option<U256>,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Send form contents, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub recipient: String,
    pub amount: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            amount: DEFAULT_AMOUNT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub hash: Option<TxHash>,
    pub status: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
}

impl TransactionOutcome {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the wallet panel displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub session: WalletSession,
    pub draft: TransactionDraft,
    pub outcome: TransactionOutcome,
    /// Latest failure or notice; replaced, never accumulated.
    pub error: Option<String>,
}

impl PanelState {
    pub fn with_default_amount(amount: impl Into<String>) -> Self {
        Self {
            draft: TransactionDraft {
                amount: amount.into(),
                ..TransactionDraft::default()
            },
            ..Self::default()
        }
    }
}

/// Where the wallet operations write their progress.
///
/// Writes are applied immediately; no borrow is held across an await point,
/// so overlapping operations interleave with last-write-wins semantics.
pub trait PanelStore {
    fn apply(&self, f: impl FnOnce(&mut PanelState));

    fn snapshot(&self) -> PanelState;
}

impl PanelStore for RwSignal<PanelState> {
    fn apply(&self, f: impl FnOnce(&mut PanelState)) {
        self.update(f);
    }

    fn snapshot(&self) -> PanelState {
        self.get_untracked()
    }
}

impl PanelStore for Rc<RefCell<PanelState>> {
    fn apply(&self, f: impl FnOnce(&mut PanelState)) {
        f(&mut self.borrow_mut());
    }

    fn snapshot(&self) -> PanelState {
        self.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_to_small_amount() {
        let state = PanelState::default();
        assert_eq!(state.draft.amount, "0.0001");
        assert!(state.draft.recipient.is_empty());
        assert!(!state.session.is_connected());
    }

    #[test]
    fn configured_default_amount() {
        let state = PanelState::with_default_amount("0.01");
        assert_eq!(state.draft.amount, "0.01");
        assert_eq!(state.outcome, TransactionOutcome::default());
    }

    #[test]
    fn shared_store_applies_in_place() {
        let store = Rc::new(RefCell::new(PanelState::default()));
        let other = store.clone();

        store.apply(|state| state.session.chain_id = Some(1));
        other.apply(|state| state.error = Some("boom".to_string()));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.session.chain_id, Some(1));
        assert_eq!(snapshot.error.as_deref(), Some("boom"));
    }

    #[test]
    fn clearing_session_disconnects() {
        let mut session = WalletSession {
            address: Some(Address::repeat_byte(1)),
            chain_id: Some(1),
            balance_wei: Some(U256::from(1u8)),
        };
        assert!(session.is_connected());
        session.clear();
        assert_eq!(session, WalletSession::default());
    }
}

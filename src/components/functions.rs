//! Formatting helpers shared by the panel components.

use alloy_primitives::{Address, TxHash, U256};

use crate::wallet::units::format_balance;

/// Fractional digits shown for balances.
pub(crate) const BALANCE_DISPLAY_DECIMALS: usize = 6;

/// Placeholder for values that are not known yet.
pub(crate) const EMPTY: &str = "-";

pub(crate) fn format_address(address: Option<Address>) -> String {
    address.map_or_else(|| EMPTY.to_string(), |address| address.to_checksum(None))
}

pub(crate) fn format_chain_id(chain_id: Option<u64>) -> String {
    chain_id.map_or_else(|| EMPTY.to_string(), |id| id.to_string())
}

/// Balance rounded for display, e.g. `"0.123457 ETH"`.
pub(crate) fn format_balance_display(balance_wei: Option<U256>, symbol: &str) -> String {
    match balance_wei {
        Some(wei) => format!("{} {symbol}", format_balance(wei, BALANCE_DISPLAY_DECIMALS)),
        None => EMPTY.to_string(),
    }
}

pub(crate) fn format_hash(hash: Option<TxHash>) -> String {
    hash.map_or_else(|| EMPTY.to_string(), |hash| hash.to_string())
}

pub(crate) fn or_empty(text: &str) -> String {
    if text.is_empty() {
        EMPTY.to_string()
    } else {
        text.to_string()
    }
}

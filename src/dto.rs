use serde::{Deserialize, Serialize};

use crate::wallet::state::DEFAULT_AMOUNT;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "ETH";
pub const DEFAULT_NETWORK_NOTE: &str =
    "Use Sepolia/Amoy Testnet with some faucet ETH/MATIC for testing.";

// ===== Settings DTOs =====

/// Display settings the server hands to the wallet panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Amount prefilled in the send form, in ether.
    pub default_amount: String,
    pub currency_symbol: String,
    pub network_note: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_amount: DEFAULT_AMOUNT.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            network_note: DEFAULT_NETWORK_NOTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_serialize_with_snake_case_fields() {
        let json = serde_json::to_value(PanelSettings::default()).unwrap();
        assert_eq!(json["default_amount"], "0.0001");
        assert_eq!(json["currency_symbol"], "ETH");

        let back: PanelSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, PanelSettings::default());
    }
}

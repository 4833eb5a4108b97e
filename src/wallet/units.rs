//! Address and ether amount handling for the send form and the balance view.

use std::str::FromStr;

use alloy_primitives::{Address, U256};

use crate::errors::WalletError;

/// Decimals of the native currency (wei per ether = 10^18).
pub const ETHER_DECIMALS: usize = 18;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Parse a recipient address.
///
/// Accepts 40 hex digits with an optional `0x` prefix. All-lowercase and
/// all-uppercase digits are taken as-is; mixed case must carry a valid EIP-55
/// checksum.
pub fn parse_address(input: &str) -> Result<Address, WalletError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mixed_case = body.chars().any(|c| c.is_ascii_lowercase())
        && body.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if mixed_case {
        Address::parse_checksummed(format!("0x{body}"), None).ok()
    } else {
        Address::from_str(body).ok()
    };
    parsed.ok_or(WalletError::InvalidRecipient)
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Convert a decimal ether amount (e.g. `"0.0001"`) to wei.
///
/// The amount must be a plain unsigned decimal with at most 18 fractional
/// digits and strictly greater than zero.
pub fn parse_ether(input: &str) -> Result<U256, WalletError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidAmount);
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(WalletError::InvalidAmount);
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(WalletError::InvalidAmount);
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(WalletError::InvalidAmount);
    }

    // Right-pad the fraction so `whole ++ fraction` is the amount in wei.
    let mut digits = String::with_capacity(whole.len() + ETHER_DECIMALS);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(ETHER_DECIMALS - fraction.len()));

    let wei = U256::from_str_radix(&digits, 10).map_err(|_| WalletError::InvalidAmount)?;
    if wei.is_zero() {
        return Err(WalletError::InvalidAmount);
    }

    Ok(wei)
}

/// Exact decimal ether representation of `wei` (`"1.5"`, `"0.0001"`, `"2.0"`).
pub fn format_ether(wei: U256) -> String {
    let (whole, fraction) = split_wei(wei);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Ether amount rounded half-up to `decimals` fractional digits.
pub fn format_balance(wei: U256, decimals: usize) -> String {
    let decimals = decimals.min(ETHER_DECIMALS);
    let unit = U256::from(10u8).pow(U256::from(ETHER_DECIMALS - decimals));
    let half = unit / U256::from(2u8);
    let rounded = wei.saturating_add(half) / unit * unit;

    let (whole, fraction) = split_wei(rounded);
    if decimals == 0 {
        whole
    } else {
        format!("{whole}.{}", &fraction[..decimals])
    }
}

/// Whole ether and the 18-digit zero-padded fractional part.
fn split_wei(wei: U256) -> (String, String) {
    let unit = U256::from(10u8).pow(U256::from(ETHER_DECIMALS));
    let whole = wei / unit;
    let fraction = wei % unit;
    (
        whole.to_string(),
        format!("{:0>width$}", fraction.to_string(), width = ETHER_DECIMALS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn accepts_checksummed_and_single_case_addresses() {
        let expected = parse_address(CHECKSUMMED).unwrap();
        assert_eq!(parse_address(&CHECKSUMMED.to_lowercase()).unwrap(), expected);
        assert_eq!(
            parse_address(&format!("0x{}", CHECKSUMMED[2..].to_uppercase())).unwrap(),
            expected
        );
        assert_eq!(parse_address(&CHECKSUMMED[2..]).unwrap(), expected);
    }

    #[test]
    fn rejects_bad_checksum() {
        let broken = CHECKSUMMED.replace("aA", "Aa");
        assert_eq!(parse_address(&broken), Err(WalletError::InvalidRecipient));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in [
            "",
            "0x",
            "0x1234",
            "hello",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaeg",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed00",
        ] {
            assert_eq!(
                parse_address(input),
                Err(WalletError::InvalidRecipient),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn parses_ether_amounts() {
        assert_eq!(
            parse_ether("0.0001").unwrap(),
            U256::from(100_000_000_000_000u64)
        );
        assert_eq!(
            parse_ether("1").unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(
            parse_ether("1.5").unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_ether(".5").unwrap(), U256::from(500_000_000_000_000_000u128));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), U256::from(1u8));
    }

    #[test]
    fn rejects_non_positive_or_malformed_amounts() {
        for input in [
            "", "0", "0.0", "-1", "+1", "abc", "1e18", "1.2.3", ".", "0.0000000000000000001", " ",
        ] {
            assert_eq!(
                parse_ether(input),
                Err(WalletError::InvalidAmount),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_ether() {
        assert_eq!(format_ether(U256::ZERO), "0.0");
        assert_eq!(format_ether(U256::from(100_000_000_000_000u64)), "0.0001");
        assert_eq!(
            format_ether(U256::from(2_000_000_000_000_000_000u128)),
            "2.0"
        );
        assert_eq!(format_ether(U256::from(1u8)), "0.000000000000000001");
    }

    #[test]
    fn formats_balance_with_rounding() {
        let wei = U256::from(1_234_567_890_000_000_000u128);
        assert_eq!(format_balance(wei, 6), "1.234568");
        assert_eq!(format_balance(wei, 0), "1");
        assert_eq!(format_balance(U256::ZERO, 6), "0.000000");
        assert_eq!(format_balance(U256::from(499_999_999_999u64), 6), "0.000000");
        assert_eq!(format_balance(U256::from(500_000_000_000u64), 6), "0.000001");
    }
}

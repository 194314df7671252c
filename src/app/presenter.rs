//! Presentation mapping from canonical errors to user-facing strings.

use crate::domain::{CanonicalError, ErrorCode};

/// Map a canonical error to the final string shown to the user.
///
/// One fixed template per code. Only `SimulationFailed` and `ContractError`
/// interpolate the preserved failure text; every other template is static.
/// `Unknown` falls back to the stored message, or the generic string when
/// the record carries none.
#[must_use]
pub fn user_message(error: &CanonicalError) -> String {
    match error.code {
        ErrorCode::WalletNotFound => {
            "Freighter wallet not found. Please install the Freighter browser extension."
                .to_string()
        }
        ErrorCode::UserRejected => "Transaction was rejected by the user.".to_string(),
        ErrorCode::NetworkMismatch => {
            "Network mismatch. Please switch to the correct Stellar network in Freighter."
                .to_string()
        }
        ErrorCode::InsufficientFunds => {
            "Insufficient XLM balance. Please fund your account on the Stellar testnet."
                .to_string()
        }
        ErrorCode::SimulationFailed => {
            format!("Contract simulation failed: {}", error.message)
        }
        ErrorCode::ContractError => format!("Contract error: {}", error.message),
        ErrorCode::TxFailed => "Transaction failed on-chain.".to_string(),
        ErrorCode::NotConnected => {
            "Wallet not connected. Please connect your Freighter wallet.".to_string()
        }
        ErrorCode::Unknown => {
            if error.message.is_empty() {
                "An unexpected error occurred.".to_string()
            } else {
                error.message.clone()
            }
        }
    }
}

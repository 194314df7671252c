//! Stellar strkey address validation.

use stellar_strkey::ed25519::PublicKey;

use crate::domain::AddressValidator;

/// Address validator accepting exactly the ed25519 public-key strkey form
/// (`G...`). Seeds, muxed accounts, and contract addresses are rejected:
/// campaign accounts are plain account keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrkeyAddressValidator;

impl StrkeyAddressValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AddressValidator for StrkeyAddressValidator {
    fn is_valid_public_address(&self, value: &str) -> bool {
        PublicKey::from_string(value).is_ok()
    }
}

//! Mock implementations for testing.

use std::collections::HashSet;

use crate::domain::AddressValidator;

/// Mock address validator with configurable accept/reject behavior
#[derive(Debug, Clone, Default)]
pub struct MockAddressValidator {
    reject_all: bool,
    rejected: HashSet<String>,
}

impl MockAddressValidator {
    /// Validator that accepts every candidate address
    #[must_use]
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Validator that rejects every candidate address
    #[must_use]
    pub fn reject_all() -> Self {
        Self {
            reject_all: true,
            rejected: HashSet::new(),
        }
    }

    /// Validator that rejects only the listed addresses
    #[must_use]
    pub fn rejecting<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reject_all: false,
            rejected: addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl AddressValidator for MockAddressValidator {
    fn is_valid_public_address(&self, value: &str) -> bool {
        !self.reject_all && !self.rejected.contains(value)
    }
}

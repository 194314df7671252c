//! Failure classification against an ordered signature table.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{CanonicalError, ErrorCode, Failure};

/// Canonical message for `UserRejected`
pub const USER_REJECTED_MESSAGE: &str = "User rejected the transaction";
/// Canonical message for `NetworkMismatch`
pub const NETWORK_MISMATCH_MESSAGE: &str =
    "Wrong network. Please switch to the correct Stellar network in Freighter.";
/// Canonical message for `InsufficientFunds`
pub const INSUFFICIENT_FUNDS_MESSAGE: &str = "Insufficient XLM balance for this transaction.";
/// Generic message for `Unknown`
pub const UNKNOWN_MESSAGE: &str = "An unexpected error occurred.";

/// How a matched signature sources the canonical message
#[derive(Debug, Clone, Copy)]
enum MessagePolicy {
    /// Keep the original failure text
    Preserve,
    /// Replace the original text with a fixed canonical string
    Fixed(&'static str),
}

/// One row of the signature table
struct Signature {
    needles: &'static [&'static str],
    code: ErrorCode,
    policy: MessagePolicy,
}

/// Ordered signature table, matched top to bottom against the lower-cased
/// failure text. Order is load-bearing: later rows match supersets of the
/// vocabulary of earlier ones ("error" also appears in "network error"), so
/// the first match wins and reordering changes classifications.
const SIGNATURES: &[Signature] = &[
    Signature {
        needles: &["not found", "freighter"],
        code: ErrorCode::WalletNotFound,
        policy: MessagePolicy::Preserve,
    },
    Signature {
        needles: &["rejected", "cancel"],
        code: ErrorCode::UserRejected,
        policy: MessagePolicy::Fixed(USER_REJECTED_MESSAGE),
    },
    Signature {
        needles: &["network", "passphrase"],
        code: ErrorCode::NetworkMismatch,
        policy: MessagePolicy::Fixed(NETWORK_MISMATCH_MESSAGE),
    },
    Signature {
        needles: &["insufficient", "balance"],
        code: ErrorCode::InsufficientFunds,
        policy: MessagePolicy::Fixed(INSUFFICIENT_FUNDS_MESSAGE),
    },
    Signature {
        needles: &["simulation"],
        code: ErrorCode::SimulationFailed,
        policy: MessagePolicy::Preserve,
    },
    Signature {
        needles: &["failed", "error"],
        code: ErrorCode::ContractError,
        policy: MessagePolicy::Preserve,
    },
];

/// Classify an arbitrary failure into the closed taxonomy.
///
/// Total over every input: failures without message text and messages no
/// signature matches both resolve to `Unknown` with the generic message.
/// The original cause is retained on the result regardless of branch.
pub fn classify(failure: impl Into<Failure>) -> CanonicalError {
    let (message, cause) = failure.into().into_parts();

    let Some(message) = message else {
        debug!(code = %ErrorCode::Unknown, "Classified failure without message text");
        return canonical(ErrorCode::Unknown, UNKNOWN_MESSAGE.to_string(), cause);
    };

    let lowered = message.to_lowercase();
    for signature in SIGNATURES {
        if signature
            .needles
            .iter()
            .any(|needle| lowered.contains(needle))
        {
            let surfaced = match signature.policy {
                MessagePolicy::Preserve => message,
                MessagePolicy::Fixed(fixed) => fixed.to_string(),
            };
            debug!(code = %signature.code, "Classified failure");
            return canonical(signature.code, surfaced, cause);
        }
    }

    debug!(code = %ErrorCode::Unknown, "No signature matched");
    canonical(ErrorCode::Unknown, UNKNOWN_MESSAGE.to_string(), cause)
}

fn canonical(
    code: ErrorCode,
    message: String,
    cause: Option<Arc<anyhow::Error>>,
) -> CanonicalError {
    CanonicalError {
        code,
        message,
        cause,
    }
}

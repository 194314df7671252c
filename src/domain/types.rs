//! Domain types for the validation and classification engines.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed classification taxonomy for wallet and network failures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Freighter extension not installed or unreachable
    WalletNotFound,
    /// User declined the signing prompt
    UserRejected,
    /// Wallet is on a different Stellar network than the application
    NetworkMismatch,
    /// Account balance cannot cover the operation
    InsufficientFunds,
    /// Contract invocation failed
    ContractError,
    /// Transaction simulation rejected before submission
    SimulationFailed,
    /// Reserved terminal state: transaction failed on-chain
    TxFailed,
    /// Reserved terminal state: no wallet connection established
    NotConnected,
    /// Catch-all for failures no signature matches
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WalletNotFound => "WALLET_NOT_FOUND",
            Self::UserRejected => "USER_REJECTED",
            Self::NetworkMismatch => "NETWORK_MISMATCH",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::ContractError => "CONTRACT_ERROR",
            Self::SimulationFailed => "SIMULATION_FAILED",
            Self::TxFailed => "TX_FAILED",
            Self::NotConnected => "NOT_CONNECTED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WALLET_NOT_FOUND" => Ok(Self::WalletNotFound),
            "USER_REJECTED" => Ok(Self::UserRejected),
            "NETWORK_MISMATCH" => Ok(Self::NetworkMismatch),
            "INSUFFICIENT_FUNDS" => Ok(Self::InsufficientFunds),
            "CONTRACT_ERROR" => Ok(Self::ContractError),
            "SIMULATION_FAILED" => Ok(Self::SimulationFailed),
            "TX_FAILED" => Ok(Self::TxFailed),
            "NOT_CONNECTED" => Ok(Self::NotConnected),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(format!("Invalid error code: {}", s)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical error record produced by the classifier.
///
/// The `cause` is a non-owning reference to the original failure, retained
/// for diagnostics only; it is never re-thrown or mutated.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalError {
    /// Classification outcome
    pub code: ErrorCode,
    /// Message surfaced with the code (canonical or preserved, per signature)
    pub message: String,
    /// Original failure, kept out of serialized output
    #[serde(skip)]
    pub cause: Option<Arc<anyhow::Error>>,
}

impl CanonicalError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(
        code: ErrorCode,
        message: impl Into<String>,
        cause: Arc<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            cause: Some(cause),
        }
    }
}

impl fmt::Display for CanonicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for CanonicalError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let cause = self.cause.as_deref()?;
        let err: &(dyn StdError + Send + Sync + 'static) = cause.as_ref();
        Some(err)
    }
}

/// Normalized failure input for the classifier.
///
/// Wraps whatever a wallet, network, or contract call produced: a full error
/// chain, a bare message, or a value exposing no usable text at all.
#[derive(Debug, Clone)]
pub struct Failure {
    message: Option<String>,
    cause: Option<Arc<anyhow::Error>>,
}

impl Failure {
    /// A failure exposing no message text; always classifies as `Unknown`.
    #[must_use]
    pub fn opaque() -> Self {
        Self {
            message: None,
            cause: None,
        }
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<Arc<anyhow::Error>>) {
        (self.message, self.cause)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Self {
            message: Some(err.to_string()),
            cause: Some(Arc::new(err)),
        }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self {
            cause: Some(Arc::new(anyhow::anyhow!(message.clone()))),
            message: Some(message),
        }
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<serde_json::Value> for Failure {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::from(s),
            // Numbers, booleans, nulls, and compound values expose no message
            other => Self {
                message: None,
                cause: Some(Arc::new(anyhow::anyhow!("unclassifiable value: {}", other))),
            },
        }
    }
}

/// A single field violation produced by the request validator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ValidationError {
    /// Name of the offending field
    #[schema(example = "amount_stroops")]
    pub field: String,
    /// Human-readable description of the violation
    #[schema(example = "amount_stroops must be at least 1")]
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Wire payload for a rejected request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationRejection {
    /// Fixed rejection marker
    #[schema(example = "Validation failed")]
    pub error: String,
    /// Every violation found, in schema declaration order
    pub details: Vec<ValidationError>,
}

impl ValidationRejection {
    #[must_use]
    pub fn new(details: Vec<ValidationError>) -> Self {
        Self {
            error: "Validation failed".to_string(),
            details,
        }
    }
}

/// Wire payload for non-validation rejections
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error description
    #[schema(example = "Invalid JSON body")]
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Wire payload for a classified wallet or network failure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalletErrorResponse {
    /// Classification code
    pub code: ErrorCode,
    /// User-facing message from the presentation mapper
    #[schema(
        example = "Insufficient XLM balance. Please fund your account on the Stellar testnet."
    )]
    pub message: String,
}

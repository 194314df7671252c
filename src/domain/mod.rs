//! Domain layer containing core types, rules, traits, and error definitions.

pub mod error;
pub mod rules;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use rules::{FieldRule, RuleKind, Surface, ValidationSchema};
pub use traits::AddressValidator;
pub use types::{
    CanonicalError, ErrorCode, ErrorResponse, Failure, ValidationError, ValidationRejection,
    WalletErrorResponse,
};

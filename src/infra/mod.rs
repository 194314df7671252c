//! Infrastructure layer implementations.

pub mod stellar;

pub use stellar::StrkeyAddressValidator;

//! Error handling for the scorebook engines and service layer.

pub mod domain;
pub mod error_code;
pub mod store;

pub use domain::DomainError;
pub use error_code::ErrorCode;
pub use store::StoreError;

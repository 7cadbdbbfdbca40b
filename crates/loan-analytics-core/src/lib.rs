pub mod annuity;
pub mod error;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "balloon")]
pub mod balloon;

pub use error::LoanAnalyticsError;
pub use types::*;

/// Standard result type for all loan-analytics operations
pub type LoanAnalyticsResult<T> = Result<T, LoanAnalyticsError>;

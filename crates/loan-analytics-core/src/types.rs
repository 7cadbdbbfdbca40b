use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Repayment profile of a fixed-rate installment loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationType {
    /// Level payments retiring principal and interest over the full term.
    #[default]
    Standard,
    /// Periodic payments cover accrued interest only; principal is due in
    /// full at maturity (bullet repayment).
    InterestOnly,
}

/// A single period in an amortization schedule.
///
/// Monetary fields are rounded to cents at emission using round-half-to-even
/// (`Decimal::round_dp`). The running balance used for subsequent interest
/// accrual is *not* rounded; only the emitted figures are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based period number.
    pub period: u32,
    /// Total payment made this period.
    pub payment: Money,
    /// Portion of the payment applied to principal.
    pub principal: Money,
    /// Portion of the payment covering accrued interest.
    pub interest: Money,
    /// Outstanding balance after this payment. Never negative.
    pub balance: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

//! Amortization schedules for fixed-rate installment loans.
//!
//! Derives the level payment from principal, rate, and term, then walks the
//! schedule period by period, splitting each payment between interest and
//! principal against a declining balance. All math uses
//! `rust_decimal::Decimal`; rows are rounded to cents at emission while the
//! running balance stays unrounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::error::LoanAnalyticsError;
use crate::types::{with_metadata, AmortizationType, ComputationOutput, Money, PaymentRecord, Rate};
use crate::LoanAnalyticsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate installment loan. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed. Must be positive.
    pub principal: Money,
    /// Annual interest rate as a decimal fraction (0.076 = 7.6%).
    pub annual_rate: Rate,
    /// Loan term in years.
    pub term_years: u32,
    /// Compounding/payment frequency (12 = monthly).
    pub payments_per_year: u32,
    /// Repayment profile.
    pub amortization_type: AmortizationType,
}

impl LoanTerms {
    /// Standard monthly-pay amortizing loan.
    pub fn monthly(principal: Money, annual_rate: Rate, term_years: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate,
            term_years,
            payments_per_year: 12,
            amortization_type: AmortizationType::Standard,
        }
    }

    /// Interest rate per payment period.
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate / Decimal::from(self.payments_per_year)
    }

    /// Total number of payment periods over the full term.
    pub fn total_periods(&self) -> u32 {
        self.term_years * self.payments_per_year
    }
}

/// Full amortization schedule with summary aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// Level payment per regular period (unrounded).
    pub level_payment: Money,
    /// One row per period, in order.
    pub records: Vec<PaymentRecord>,
    /// Sum of the rounded interest portions across all periods.
    pub total_interest: Money,
    /// Sum of the rounded principal portions across all periods.
    pub total_principal: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Level payment for the given loan terms (unrounded).
///
/// Interest-only loans pay accrued interest each period; zero-rate loans
/// amortize straight-line; otherwise the standard annuity formula applies.
pub fn compute_payment(terms: &LoanTerms) -> LoanAnalyticsResult<Money> {
    validate_terms(terms)?;

    match terms.amortization_type {
        AmortizationType::InterestOnly => Ok(annuity::interest_only_payment(
            terms.principal,
            terms.periodic_rate(),
        )),
        AmortizationType::Standard => {
            annuity::level_payment(terms.principal, terms.periodic_rate(), terms.total_periods())
        }
    }
}

/// Generate the full period-by-period amortization schedule.
///
/// Each row's monetary fields are rounded to cents (round-half-to-even); the
/// running balance carried between periods is not rounded. The final row
/// always lands on a balance of exactly 0.00: standard loans clamp the last
/// principal portion to the remaining balance and recompute that period's
/// payment, interest-only loans return the full principal at maturity.
pub fn generate_schedule(
    terms: &LoanTerms,
) -> LoanAnalyticsResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let level_payment = compute_payment(terms)?;
    let total_periods = terms.total_periods();
    let periodic_rate = terms.periodic_rate();

    if terms.amortization_type == AmortizationType::InterestOnly {
        warnings.push(format!(
            "Interest-only loan: principal of {} is due in full at maturity",
            terms.principal
        ));
    }

    let mut records: Vec<PaymentRecord> = Vec::with_capacity(total_periods as usize);
    let mut balance = terms.principal;
    let mut payment = level_payment;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for period in 1..=total_periods {
        let interest = balance * periodic_rate;

        let principal_portion = match terms.amortization_type {
            AmortizationType::InterestOnly => {
                // Bullet repayment: nothing amortizes until the final period
                if period == total_periods {
                    balance
                } else {
                    Decimal::ZERO
                }
            }
            AmortizationType::Standard => {
                let mut portion = payment - interest;
                if portion > balance {
                    // Final-period adjustment: retire exactly the remaining
                    // balance and recompute the payment from the clamped value
                    portion = balance;
                    payment = interest + portion;
                }
                portion
            }
        };

        balance -= principal_portion;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        let rounded_interest = interest.round_dp(2);
        let rounded_principal = principal_portion.round_dp(2);
        total_interest += rounded_interest;
        total_principal += rounded_principal;

        records.push(PaymentRecord {
            period,
            payment: payment.round_dp(2),
            principal: rounded_principal,
            interest: rounded_interest,
            balance: balance.round_dp(2),
        });

        if balance.is_zero() {
            break;
        }
    }

    if total_interest > terms.principal {
        warnings.push(format!(
            "Total interest of {total_interest} exceeds the original principal"
        ));
    }

    let output = AmortizationOutput {
        level_payment,
        records,
        total_interest,
        total_principal,
    };

    Ok(with_metadata(
        "fixed_rate_amortization",
        terms,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(terms: &LoanTerms) -> LoanAnalyticsResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if terms.annual_rate < Decimal::ZERO {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if terms.term_years == 0 {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least one year".into(),
        });
    }
    if terms.payments_per_year == 0 {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "payments_per_year".into(),
            reason: "Payment frequency must be > 0".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Balloon loans: payments sized on a long nominal amortization term, with
//! the remaining principal called due in full at an earlier balloon date.
//!
//! Offers both a closed-form remaining-balance calculation (when only the
//! balloon figure is needed) and a full period-by-period schedule ending in
//! the synthetic balloon payment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity;
use crate::error::LoanAnalyticsError;
use crate::types::{with_metadata, ComputationOutput, Money, PaymentRecord, Rate};
use crate::LoanAnalyticsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a balloon-payment loan (e.g. a 30-year amortization called due
/// at year 15).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalloonLoanInput {
    /// Amount borrowed. Must be positive.
    pub principal: Money,
    /// Annual interest rate as a decimal fraction.
    pub annual_rate: Rate,
    /// Nominal amortization term in years; the level payment is sized on
    /// this term.
    pub term_years: u32,
    /// Year at which the remaining balance is called due. Must fall strictly
    /// inside the nominal term.
    pub balloon_years: u32,
    /// Compounding/payment frequency (12 = monthly).
    pub payments_per_year: u32,
}

/// Balloon loan schedule with summary figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalloonLoanOutput {
    /// Level payment per regular period (unrounded), sized on the full
    /// nominal term.
    pub level_payment: Money,
    /// Regular periods 1..=n plus the synthetic balloon record at n+1.
    pub records: Vec<PaymentRecord>,
    /// Principal outstanding at the balloon date (the balloon principal).
    pub balloon_balance: Money,
    /// Final lump sum: balloon principal plus one period's interest.
    pub balloon_payment: Money,
    /// Sum of the rounded interest portions, including the final period.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Closed-form balloon balance: level payment on the full nominal term, then
/// the present value of the payments still owed after `periods_paid`.
///
/// Returns `(balloon_balance, payment)`, both rounded to cents. Avoids
/// iterating the schedule when only the final balance is needed. A zero rate
/// degenerates to straight-line amortization, consistent with the schedule
/// generator's zero-rate branch.
pub fn compute_balloon_balance(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    payments_per_year: u32,
    periods_paid: u32,
) -> LoanAnalyticsResult<(Money, Money)> {
    validate_loan(principal, annual_rate, term_years, payments_per_year)?;

    let total_periods = term_years * payments_per_year;
    if periods_paid > total_periods {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "periods_paid".into(),
            reason: format!(
                "Periods paid ({periods_paid}) exceeds the nominal term ({total_periods} periods)"
            ),
        });
    }

    let periodic_rate = annual_rate / Decimal::from(payments_per_year);
    let payment = annuity::level_payment(principal, periodic_rate, total_periods)?;
    let balance =
        annuity::outstanding_balance(payment, periodic_rate, total_periods - periods_paid)?;

    Ok((balance.round_dp(2), payment.round_dp(2)))
}

/// Generate the schedule of a balloon loan: n regular periods at the
/// nominal-term level payment, then one synthetic final record retiring the
/// remaining balance plus its accrued interest in a single lump sum.
pub fn generate_balloon_schedule(
    input: &BalloonLoanInput,
) -> LoanAnalyticsResult<ComputationOutput<BalloonLoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.payments_per_year,
    )?;
    if input.balloon_years == 0 || input.balloon_years >= input.term_years {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "balloon_years".into(),
            reason: "Balloon date must fall strictly inside the nominal term".into(),
        });
    }

    let periodic_rate = input.annual_rate / Decimal::from(input.payments_per_year);
    let total_periods = input.term_years * input.payments_per_year;
    let balloon_periods = input.balloon_years * input.payments_per_year;

    let payment = annuity::level_payment(input.principal, periodic_rate, total_periods)?;

    let mut records: Vec<PaymentRecord> = Vec::with_capacity(balloon_periods as usize + 1);
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;

    // Regular periods carry the nominal-term payment unchanged; the loan is
    // nowhere near retired, so no clamping applies here
    for period in 1..=balloon_periods {
        let interest = balance * periodic_rate;
        let principal_portion = payment - interest;
        balance -= principal_portion;

        let rounded_interest = interest.round_dp(2);
        total_interest += rounded_interest;

        records.push(PaymentRecord {
            period,
            payment: payment.round_dp(2),
            principal: principal_portion.round_dp(2),
            interest: rounded_interest,
            balance: balance.round_dp(2),
        });
    }

    // Synthetic balloon record: the borrower pays off the entire remaining
    // principal plus one final period's interest in a single lump sum
    let final_interest = balance * periodic_rate;
    let final_payment = balance + final_interest;
    let balloon_balance = balance.round_dp(2);
    let balloon_payment = final_payment.round_dp(2);
    let rounded_final_interest = final_interest.round_dp(2);
    total_interest += rounded_final_interest;

    records.push(PaymentRecord {
        period: balloon_periods + 1,
        payment: balloon_payment,
        principal: balloon_balance,
        interest: rounded_final_interest,
        balance: dec!(0.00),
    });

    warnings.push(format!(
        "Balloon payment of {balloon_payment} due at period {}",
        balloon_periods + 1
    ));

    let output = BalloonLoanOutput {
        level_payment: payment,
        records,
        balloon_balance,
        balloon_payment,
        total_interest,
    };

    Ok(with_metadata(
        "balloon_payment_loan",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_loan(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
    payments_per_year: u32,
) -> LoanAnalyticsResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if term_years == 0 {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least one year".into(),
        });
    }
    if payments_per_year == 0 {
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

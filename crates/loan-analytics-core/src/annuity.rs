//! Closed-form annuity math shared by the schedule generators.
//!
//! All functions return unrounded `Decimal` values; rounding to cents happens
//! only when schedule rows are emitted.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanAnalyticsError;
use crate::types::{Money, Rate};
use crate::LoanAnalyticsResult;

/// Level payment retiring `principal` over `total_periods` equal periods:
/// P * r / (1 - (1+r)^-n).
///
/// A zero periodic rate falls back to straight-line division, which is the
/// limit of the annuity formula as r -> 0.
pub fn level_payment(
    principal: Money,
    periodic_rate: Rate,
    total_periods: u32,
) -> LoanAnalyticsResult<Money> {
    if total_periods == 0 {
        return Err(LoanAnalyticsError::InvalidInput {
            field: "total_periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(total_periods));
    }

    let one_plus_r = Decimal::ONE + periodic_rate;
    let factor = one_plus_r.powd(Decimal::from(total_periods));

    if factor.is_zero() {
        return Err(LoanAnalyticsError::DivisionByZero {
            context: "level payment compounding factor".into(),
        });
    }

    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / periodic_rate;

    if annuity_factor.is_zero() {
        return Err(LoanAnalyticsError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    Ok(principal / annuity_factor)
}

/// Payment on an interest-only loan: accrued interest per period, no
/// amortization of principal.
pub fn interest_only_payment(principal: Money, periodic_rate: Rate) -> Money {
    principal * periodic_rate
}

/// Outstanding balance once `periods_remaining` payments of `payment` are
/// still owed: the present value of the remaining payments,
/// payment * (1 - (1+r)^-k) / r.
///
/// With a zero rate this degenerates to payment * k, which matches the
/// straight-line branch of [`level_payment`].
pub fn outstanding_balance(
    payment: Money,
    periodic_rate: Rate,
    periods_remaining: u32,
) -> LoanAnalyticsResult<Money> {
    if periodic_rate.is_zero() {
        return Ok(payment * Decimal::from(periods_remaining));
    }

    let one_plus_r = Decimal::ONE + periodic_rate;
    let factor = one_plus_r.powd(Decimal::from(periods_remaining));

    if factor.is_zero() {
        return Err(LoanAnalyticsError::DivisionByZero {
            context: "outstanding balance compounding factor".into(),
        });
    }

    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / periodic_rate)
}

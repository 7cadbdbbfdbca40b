#![cfg(feature = "amortization")]

use loan_analytics_core::amortization::{compute_payment, generate_schedule, LoanTerms};
use loan_analytics_core::types::AmortizationType;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Standard amortization
// ===========================================================================

#[test]
fn test_three_year_mortgage_reference_schedule() {
    // 1,000,000 at 7.6% over 3 years, monthly payments
    // Payment = P*r / (1 - (1+r)^-36) with r = 0.076/12 ≈ 31,152.17
    let terms = LoanTerms::monthly(dec!(1000000), dec!(0.076), 3);
    let result = generate_schedule(&terms).unwrap();
    let out = &result.result;

    assert_eq!(out.records.len(), 36);

    // Period 1: interest = 1,000,000 * 0.076/12 = 6,333.33
    let first = &out.records[0];
    assert_eq!(first.interest, dec!(6333.33));
    assert_eq!(first.payment, dec!(31152.17));
    assert_eq!(first.balance, dec!(975181.17));

    // Schedule retires the loan exactly
    let last = &out.records[35];
    assert_eq!(last.balance, dec!(0.00));

    // Every period: payment = principal + interest (on the rounded figures,
    // up to a cent of rounding slack)
    for record in &out.records {
        let recombined = record.principal + record.interest;
        assert!(
            (record.payment - recombined).abs() <= dec!(0.01),
            "period {} payment {} != principal {} + interest {}",
            record.period,
            record.payment,
            record.principal,
            record.interest
        );
    }
}

#[test]
fn test_principal_conservation_across_terms() {
    // Sum of principal portions returns the original principal within
    // 0.01 per period of cumulative rounding tolerance
    for (principal, rate, years) in [
        (dec!(1000000), dec!(0.076), 3u32),
        (dec!(250000), dec!(0.045), 15),
        (dec!(750000), dec!(0.0899), 30),
    ] {
        let terms = LoanTerms::monthly(principal, rate, years);
        let out = generate_schedule(&terms).unwrap().result;
        let tolerance = dec!(0.01) * Decimal::from(terms.total_periods());
        assert!(
            (out.total_principal - principal).abs() <= tolerance,
            "principal {} leaked to {} over {} years",
            principal,
            out.total_principal,
            years
        );
    }
}

#[test]
fn test_balance_monotonically_non_increasing() {
    let terms = LoanTerms::monthly(dec!(750000), dec!(0.0899), 30);
    let out = generate_schedule(&terms).unwrap().result;

    let mut previous = terms.principal;
    for record in &out.records {
        assert!(record.balance <= previous);
        assert!(record.balance >= Decimal::ZERO);
        previous = record.balance;
    }
    assert_eq!(out.records.last().unwrap().balance, dec!(0.00));
}

#[test]
fn test_zero_rate_straight_line() {
    // compute_payment with a zero rate is exactly principal / total_periods
    let terms = LoanTerms::monthly(dec!(36000), Decimal::ZERO, 3);
    assert_eq!(compute_payment(&terms).unwrap(), dec!(1000));

    let out = generate_schedule(&terms).unwrap().result;
    assert_eq!(out.records.len(), 36);
    assert_eq!(out.total_interest, dec!(0.00));
    assert_eq!(out.records[35].balance, dec!(0.00));
}

#[test]
fn test_quarterly_payment_frequency() {
    let terms = LoanTerms {
        principal: dec!(100000),
        annual_rate: dec!(0.08),
        term_years: 10,
        payments_per_year: 4,
        amortization_type: AmortizationType::Standard,
    };
    let out = generate_schedule(&terms).unwrap().result;

    assert_eq!(out.records.len(), 40);
    // Period 1 interest = 100,000 * 0.02
    assert_eq!(out.records[0].interest, dec!(2000.00));
    assert_eq!(out.records[39].balance, dec!(0.00));
}

// ===========================================================================
// Interest-only
// ===========================================================================

#[test]
fn test_interest_only_principal_deferred_to_maturity() {
    let terms = LoanTerms {
        principal: dec!(500000),
        annual_rate: dec!(0.06),
        term_years: 5,
        payments_per_year: 12,
        amortization_type: AmortizationType::InterestOnly,
    };
    let out = generate_schedule(&terms).unwrap().result;

    assert_eq!(out.records.len(), 60);
    for record in &out.records[..59] {
        assert_eq!(record.principal, dec!(0.00));
        assert_eq!(record.balance, dec!(500000.00));
    }
    let last = &out.records[59];
    assert_eq!(last.principal, dec!(500000.00));
    assert_eq!(last.balance, dec!(0.00));
    assert_eq!(out.total_principal, dec!(500000.00));
}

// ===========================================================================
// Purity / envelope
// ===========================================================================

#[test]
fn test_identical_terms_give_identical_schedules() {
    let terms = LoanTerms::monthly(dec!(325000), dec!(0.0525), 20);
    let a = generate_schedule(&terms).unwrap().result;
    let b = generate_schedule(&terms).unwrap().result;
    assert_eq!(a.records, b.records);
    assert_eq!(a.total_interest, b.total_interest);
}

#[test]
fn test_output_envelope_serializes() {
    let terms = LoanTerms::monthly(dec!(1000000), dec!(0.076), 3);
    let result = generate_schedule(&terms).unwrap();

    assert_eq!(result.methodology, "fixed_rate_amortization");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["assumptions"]["term_years"], 3);
    assert_eq!(json["result"]["records"][0]["interest"], "6333.33");
}

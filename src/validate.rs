//! Checks on raw form input before it reaches a calculator.
//!
//! Validation never fails: every problem found is collected into a
//! [`ValidationResult`] keyed by field name.

use std::collections::BTreeMap;

pub const LOAN_AMOUNT: &str = "loanAmount";
pub const INTEREST_RATE: &str = "interestRate";
pub const TENURE: &str = "tenure";

const MAX_LOAN_AMOUNT: f64 = 1e9;
const MAX_INTEREST_RATE: f64 = 100.;
const MAX_TENURE_MONTHS: f64 = 600.;

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, String>,
}

impl ValidationResult {
    /// The message recorded for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

// the parsed value, or a message for a blank or non-numeric field
fn parse_number(raw: &str, label: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is required", label));
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("{} must be a valid number", label)),
    }
}

fn check_loan_amount(raw: &str) -> Result<(), String> {
    let amount = parse_number(raw, "Loan amount")?;
    if amount <= 0. {
        return Err("Loan amount must be greater than 0".to_string());
    }
    if amount > MAX_LOAN_AMOUNT {
        return Err("Loan amount cannot exceed ₹1,00,00,00,000".to_string());
    }
    Ok(())
}

fn check_interest_rate(raw: &str) -> Result<(), String> {
    let rate = parse_number(raw, "Interest rate")?;
    if !(0. ..=MAX_INTEREST_RATE).contains(&rate) {
        return Err("Interest rate must be between 0 and 100".to_string());
    }
    Ok(())
}

fn check_tenure(raw: &str) -> Result<(), String> {
    let tenure = parse_number(raw, "Tenure")?;
    if tenure <= 0. || tenure.fract() != 0. {
        return Err("Tenure must be a positive whole number of months".to_string());
    }
    if tenure > MAX_TENURE_MONTHS {
        return Err("Tenure cannot exceed 600 months".to_string());
    }
    Ok(())
}

/// Validates the three EMI form fields, reporting every failing field.
pub fn validate_emi_inputs(loan_amount: &str, interest_rate: &str, tenure: &str) -> ValidationResult {
    let mut errors = BTreeMap::new();

    let checks: [(&'static str, Result<(), String>); 3] = [
        (LOAN_AMOUNT, check_loan_amount(loan_amount)),
        (INTEREST_RATE, check_interest_rate(interest_rate)),
        (TENURE, check_tenure(tenure)),
    ];
    for (field, check) in checks {
        if let Err(message) = check {
            errors.insert(field, message);
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenureUnit {
    Months,
    Years,
}

/// Converts a tenure between months and years.
pub fn convert_tenure(value: f64, from: TenureUnit, to: TenureUnit) -> f64 {
    match (from, to) {
        (TenureUnit::Years, TenureUnit::Months) => value * 12.,
        (TenureUnit::Months, TenureUnit::Years) => value / 12.,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_valid_inputs() {
        let result = validate_emi_inputs("1000000", "8.5", "240");
        assert!(result.is_valid);
        assert!(result.errors.is_empty());

        assert!(validate_emi_inputs(" 500000 ", "0", "1").is_valid);
        assert!(validate_emi_inputs("1000000000", "100", "600").is_valid);
    }

    #[test]
    fn test_zero_loan_amount() {
        let result = validate_emi_inputs("0", "8.5", "12");

        assert!(!result.is_valid);
        assert_eq!(
            result.error(LOAN_AMOUNT),
            Some("Loan amount must be greater than 0")
        );
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_rate_above_100() {
        let result = validate_emi_inputs("100000", "101", "12");

        assert!(!result.is_valid);
        assert!(result.error(INTEREST_RATE).is_some());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_fractional_tenure() {
        let result = validate_emi_inputs("100000", "8.5", "12.5");

        assert!(!result.is_valid);
        assert!(result.error(TENURE).is_some());
    }

    #[test]
    fn test_upper_bounds() {
        let result = validate_emi_inputs("1000000001", "-0.5", "601");

        assert!(!result.is_valid);
        assert_eq!(
            result.error(LOAN_AMOUNT),
            Some("Loan amount cannot exceed ₹1,00,00,00,000")
        );
        assert!(result.error(INTEREST_RATE).is_some());
        assert_eq!(result.error(TENURE), Some("Tenure cannot exceed 600 months"));
    }

    #[test]
    fn test_collects_every_error() {
        let result = validate_emi_inputs("", "abc", "   ");

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.error(LOAN_AMOUNT), Some("Loan amount is required"));
        assert_eq!(
            result.error(INTEREST_RATE),
            Some("Interest rate must be a valid number")
        );
        assert_eq!(result.error(TENURE), Some("Tenure is required"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = validate_emi_inputs("inf", "NaN", "-12");

        assert_eq!(result.errors.len(), 3);
        assert_eq!(
            result.error(LOAN_AMOUNT),
            Some("Loan amount must be a valid number")
        );
    }

    #[test]
    fn test_convert_tenure() {
        assert_eq!(convert_tenure(5., TenureUnit::Years, TenureUnit::Months), 60.);
        assert_eq!(convert_tenure(18., TenureUnit::Months, TenureUnit::Years), 1.5);
        assert_eq!(convert_tenure(7., TenureUnit::Months, TenureUnit::Months), 7.);
        assert_eq!(convert_tenure(2.5, TenureUnit::Years, TenureUnit::Years), 2.5);
    }
}

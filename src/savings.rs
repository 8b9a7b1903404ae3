//! Deposit and investment maturity calculators (PPF, FD, RD, SIP).
//!
//! Results are in whole rupees. Interest earned is derived from the rounded
//! maturity and investment, so `maturity_amount == total_investment +
//! interest_earned` always holds exactly.

use std::fmt;

use crate::currency::Rupees;
use crate::round::round_rupee;

/// Maturity breakdown of a savings product.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SavingsResult {
    pub total_investment: f64,
    pub interest_earned: f64,
    pub maturity_amount: f64,
}

impl SavingsResult {
    fn new(total_investment: f64, maturity_amount: f64) -> Self {
        let total_investment = round_rupee(total_investment);
        let maturity_amount = round_rupee(maturity_amount);
        Self {
            total_investment,
            interest_earned: maturity_amount - total_investment,
            maturity_amount,
        }
    }
}

impl fmt::Display for SavingsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invested {}, interest {}, maturity {}",
            Rupees(self.total_investment),
            Rupees(self.interest_earned),
            Rupees(self.maturity_amount)
        )
    }
}

// value of `periods` deposits of 1 at `rate`, paid at period end
fn annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0. {
        periods
    } else {
        ((1. + rate).powf(periods) - 1.) / rate
    }
}

// monthly deposits paid at the start of each month
fn monthly_annuity_due(deposit: f64, annual_rate_percent: f64, months: u32) -> SavingsResult {
    let rate = annual_rate_percent / 12. / 100.;
    let months = f64::from(months);
    let maturity = deposit * annuity_factor(rate, months) * (1. + rate);
    SavingsResult::new(deposit * months, maturity)
}

/// Public Provident Fund: a fixed deposit every year, compounded annually.
pub fn calculate_ppf(annual_deposit: f64, annual_rate_percent: f64, years: u32) -> SavingsResult {
    let rate = annual_rate_percent / 100.;
    let years = f64::from(years);
    let maturity = annual_deposit * annuity_factor(rate, years);
    SavingsResult::new(annual_deposit * years, maturity)
}

/// Fixed deposit: a lump sum compounded quarterly.
pub fn calculate_fd(principal: f64, annual_rate_percent: f64, years: f64) -> SavingsResult {
    let rate = annual_rate_percent / 100.;
    let maturity = principal * (1. + rate / 4.).powf(4. * years);
    SavingsResult::new(principal, maturity)
}

/// Recurring deposit: the same amount at the start of every month.
pub fn calculate_rd(
    monthly_deposit: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> SavingsResult {
    monthly_annuity_due(monthly_deposit, annual_rate_percent, tenure_months)
}

/// Systematic investment plan: monthly investments at an expected annual
/// return, invested at the start of each month.
pub fn calculate_sip(
    monthly_investment: f64,
    expected_return_percent: f64,
    years: u32,
) -> SavingsResult {
    monthly_annuity_due(monthly_investment, expected_return_percent, years * 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn assert_balanced(result: &SavingsResult) {
        assert_eq!(
            result.maturity_amount,
            result.total_investment + result.interest_earned
        );
        for value in [
            result.total_investment,
            result.interest_earned,
            result.maturity_amount,
        ] {
            assert_eq!(value, value.round());
        }
    }

    #[test]
    fn test_ppf() {
        let result = calculate_ppf(50_000., 7.1, 15);

        assert_eq!(result.total_investment, 750_000.);
        assert!(result.interest_earned > 0.);
        assert_eq!(result.maturity_amount, 1_266_172.);
        assert_balanced(&result);
    }

    #[test]
    fn test_ppf_zero_rate() {
        let result = calculate_ppf(1_50_000., 0., 15);

        assert_eq!(result.maturity_amount, 22_50_000.);
        assert_eq!(result.interest_earned, 0.);
    }

    #[test]
    fn test_fd() {
        // 1 lakh for 5 years at 7%, compounded quarterly
        let result = calculate_fd(100_000., 7., 5.);

        assert_eq!(result.total_investment, 100_000.);
        assert_eq!(result.maturity_amount, 141_478.);
        assert_balanced(&result);
    }

    #[test]
    fn test_fd_part_year() {
        let result = calculate_fd(10_000., 8., 0.5);
        assert_eq!(result.maturity_amount, 10_404.);
    }

    #[test]
    fn test_rd() {
        let result = calculate_rd(5000., 6.5, 12);

        assert_eq!(result.total_investment, 60_000.);
        assert_eq!(result.maturity_amount, 62_155.);
        assert_balanced(&result);
    }

    #[test]
    fn test_sip() {
        let result = calculate_sip(10_000., 12., 10);

        assert_eq!(result.total_investment, 12_00_000.);
        assert_eq!(result.maturity_amount, 23_23_391.);
        assert_balanced(&result);
    }

    #[test]
    fn test_sip_matches_rd_over_same_months() {
        assert_eq!(calculate_sip(2500., 9., 3), calculate_rd(2500., 9., 36));
    }

    #[test]
    fn test_monthly_zero_rate() {
        let result = calculate_rd(1000., 0., 24);
        assert_eq!(result.maturity_amount, 24_000.);
        assert_eq!(result.interest_earned, 0.);
    }

    #[test]
    fn test_savings_display() {
        let result = calculate_ppf(50_000., 7.1, 15);
        assert_eq!(
            result.to_string(),
            "invested ₹7,50,000.00, interest ₹5,16,172.00, maturity ₹12,66,172.00"
        );
    }
}

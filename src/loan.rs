use chrono::{Months, NaiveDate};
use log::trace;
use std::fmt;

use crate::currency::Rupees;
use crate::round::round2;

/// Result of an EMI calculation, each field rounded to 2 decimals.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct EmiResult {
    pub emi: f64,
    pub total_interest: f64,
    pub total_amount: f64,
}

impl fmt::Display for EmiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EMI {}, total interest {}, total amount {}",
            Rupees(self.emi),
            Rupees(self.total_interest),
            Rupees(self.total_amount)
        )
    }
}

/// One row of a monthly amortization schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct EmiPayment {
    pub number: u32,
    pub date: NaiveDate,
    pub emi: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub end_balance: f64,
}

impl fmt::Display for EmiPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "emi number {}, date {}, emi {}, principal paid {}, interest paid {}, ending balance {}",
            self.number,
            self.date,
            Rupees(self.emi),
            Rupees(self.principal_paid),
            Rupees(self.interest_paid),
            Rupees(self.end_balance)
        )
    }
}

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12. / 100.
}

// unrounded EMI; callers round once all arithmetic is done
fn raw_emi(principal: f64, rate: f64, tenure_months: u32) -> f64 {
    if rate == 0. {
        return principal / f64::from(tenure_months);
    }
    // P·r / (1 − (1+r)^−n) equals P·r·(1+r)^n / ((1+r)^n − 1) but stays
    // finite when (1+r)^n overflows on very long tenures
    let discount = (1. + rate).powf(-f64::from(tenure_months));
    principal * rate / (1. - discount)
}

/// Calculates the equated monthly instalment for a loan.
///
/// `annual_rate_percent` is a percentage (8.5 means 8.5% a year). A zero rate
/// splits the principal evenly over the tenure. `tenure_months` must be
/// positive; a zero tenure yields non-finite values.
pub fn calculate_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> EmiResult {
    let rate = monthly_rate(annual_rate_percent);
    let emi = raw_emi(principal, rate, tenure_months);

    if rate == 0. {
        return EmiResult {
            emi: round2(emi),
            total_interest: 0.,
            total_amount: round2(principal),
        };
    }

    let total_amount = emi * f64::from(tenure_months);
    EmiResult {
        emi: round2(emi),
        total_interest: round2(total_amount - principal),
        total_amount: round2(total_amount),
    }
}

/// Builds the month-by-month repayment schedule for a loan.
///
/// The first instalment falls on `first_emi_date` and each later one a
/// calendar month after the previous; dates that do not exist in a month
/// (31st, 29th February) clamp to the month end. The last row absorbs any
/// residual so the loan closes at exactly zero.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
    first_emi_date: NaiveDate,
) -> Vec<EmiPayment> {
    let mut schedule = Vec::with_capacity(tenure_months as usize);
    if tenure_months == 0 {
        return schedule;
    }

    let rate = monthly_rate(annual_rate_percent);
    let emi = raw_emi(principal, rate, tenure_months);
    let mut balance = principal;

    for number in 1..=tenure_months {
        let interest = balance * rate;
        let (payment, principal_paid) = if number == tenure_months {
            (balance + interest, balance)
        } else {
            (emi, emi - interest)
        };
        balance -= principal_paid;
        if number == tenure_months {
            balance = 0.;
        }

        let date = emi_date(first_emi_date, number - 1);
        trace!(
            "emi # {}, date {}, interest {}, end bal {}",
            number,
            date,
            interest,
            balance
        );

        schedule.push(EmiPayment {
            number,
            date,
            emi: round2(payment),
            principal_paid: round2(principal_paid),
            interest_paid: round2(interest),
            end_balance: round2(balance),
        });
    }
    schedule
}

// offsetting from the first date keeps a 31st from drifting to the 28th
fn emi_date(first_emi_date: NaiveDate, months_after: u32) -> NaiveDate {
    first_emi_date
        .checked_add_months(Months::new(months_after))
        .unwrap_or(NaiveDate::MAX)
}

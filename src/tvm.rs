//! Time value of money.
//!
//! Every function here solves one unknown of
//!
//! ```text
//! PV·(1+r)^n + PMT·((1+r)^n − 1)/r·t = FV
//! ```
//!
//! where `t` is `1 + r` when payments fall at the start of each period and
//! `1` otherwise. `r` is the rate per period as a decimal and `n` a period
//! count. [`calculate_tvm`] wraps them for annual inputs.
//!
//! `N` and `Rate` have no general closed form. They are found numerically
//! and return `None` when no answer exists, e.g. a zero present value with no
//! payments.

use log::{debug, trace};
use std::{fmt, str::FromStr};

use crate::error::{CalcError, CalcResult};
use crate::round::round2;
use crate::solver::{bisection, newton_raphson_numerical, SolverConfig, DEFAULT_MAX_ITERATIONS};

const PERIOD_BOUNDS: (f64, f64) = (0.01, 1000.);
const PERIOD_TOLERANCE: f64 = 0.01;
const PERIOD_WIDTH_TOLERANCE: f64 = 0.001;

const RATE_BOUNDS: (f64, f64) = (-0.99, 10.);
const RATE_GUESS: f64 = 0.10;
const RATE_STEP: f64 = 1e-5;
const RATE_TOLERANCE: f64 = 1e-5;
const RATE_MIN_SLOPE: f64 = 1e-5;

/// When payments fall within each period.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentTiming {
    /// Ordinary annuity.
    #[default]
    EndOfPeriod,
    /// Annuity due; every payment earns one extra period of interest.
    BeginningOfPeriod,
}

impl PaymentTiming {
    fn factor(self, rate: f64) -> f64 {
        match self {
            PaymentTiming::EndOfPeriod => 1.,
            PaymentTiming::BeginningOfPeriod => 1. + rate,
        }
    }
}

/// Compounding periods per year.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundingFrequency {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> f64 {
        match self {
            CompoundingFrequency::Monthly => 12.,
            CompoundingFrequency::Quarterly => 4.,
            CompoundingFrequency::SemiAnnually => 2.,
            CompoundingFrequency::Annually => 1.,
        }
    }
}

/// Present value that grows to `fv` alongside the payment stream.
pub fn calculate_pv(fv: f64, pmt: f64, rate: f64, periods: f64, timing: PaymentTiming) -> f64 {
    if rate == 0. {
        return fv - pmt * periods;
    }
    let growth = (1. + rate).powf(periods);
    let annuity = (growth - 1.) / rate * timing.factor(rate);
    (fv - pmt * annuity) / growth
}

/// Value after `periods` of compounding `pv` and adding `pmt` each period.
pub fn calculate_fv(pv: f64, pmt: f64, rate: f64, periods: f64, timing: PaymentTiming) -> f64 {
    if rate == 0. {
        return pv + pmt * periods;
    }
    let growth = (1. + rate).powf(periods);
    let annuity = (growth - 1.) / rate * timing.factor(rate);
    pv * growth + pmt * annuity
}

/// Payment per period that takes `pv` to `fv`.
pub fn calculate_pmt(pv: f64, fv: f64, rate: f64, periods: f64, timing: PaymentTiming) -> f64 {
    if rate == 0. {
        return (fv - pv) / periods;
    }
    let growth = (1. + rate).powf(periods);
    let annuity = (growth - 1.) / rate * timing.factor(rate);
    (fv - pv * growth) / annuity
}

/// Number of periods needed to reach `fv`, or `None` if it cannot be reached.
///
/// With both a rate and payments the count is bisected over 0.01 to 1000
/// periods; an unreachable target yields the nearest bound rather than
/// `None`.
pub fn calculate_n(pv: f64, fv: f64, pmt: f64, rate: f64, timing: PaymentTiming) -> Option<f64> {
    if rate == 0. {
        if pmt == 0. {
            return None;
        }
        return finite((fv - pv) / pmt);
    }

    // a rate of -100% or worse has no fractional-period growth
    if 1. + rate <= 0. {
        return None;
    }

    if pmt == 0. {
        let ratio = growth_ratio(pv, fv)?;
        let log_growth = (1. + rate).ln();
        if !log_growth.is_finite() || log_growth == 0. {
            return None;
        }
        return finite(ratio.ln() / log_growth);
    }

    let config = SolverConfig::new(PERIOD_TOLERANCE, DEFAULT_MAX_ITERATIONS)
        .with_width_tolerance(PERIOD_WIDTH_TOLERANCE);
    let result = bisection(
        |n| calculate_fv(pv, pmt, rate, n, timing) - fv,
        PERIOD_BOUNDS.0,
        PERIOD_BOUNDS.1,
        &config,
    );
    trace!(
        "periods {} after {} iterations (residual {})",
        result.root,
        result.iterations,
        result.residual
    );
    finite(result.root)
}

/// Rate per period that takes `pv` to `fv` over `periods`, or `None` if
/// undefined.
///
/// With payments the rate is found by Newton-Raphson from 10%, falling back
/// to bisection over -99% to 1000% where the curve is too flat.
pub fn calculate_rate(
    pv: f64,
    fv: f64,
    pmt: f64,
    periods: f64,
    timing: PaymentTiming,
) -> Option<f64> {
    if periods <= 0. || !periods.is_finite() {
        return None;
    }

    if pmt == 0. {
        let ratio = growth_ratio(pv, fv)?;
        return finite(ratio.powf(1. / periods) - 1.);
    }

    let residual = |rate: f64| calculate_fv(pv, pmt, rate, periods, timing) - fv;
    let config = SolverConfig::new(RATE_TOLERANCE, DEFAULT_MAX_ITERATIONS);

    let result = match newton_raphson_numerical(
        residual,
        RATE_GUESS,
        RATE_BOUNDS,
        RATE_STEP,
        RATE_MIN_SLOPE,
        &config,
    ) {
        Ok(result) => result,
        Err(err) => {
            debug!("rate: {}, bisecting instead", err);
            bisection(residual, RATE_BOUNDS.0, RATE_BOUNDS.1, &config)
        }
    };
    trace!(
        "rate {} after {} iterations (residual {})",
        result.root,
        result.iterations,
        result.residual
    );
    finite(result.root)
}

// |fv / pv|, or None when there is nothing to grow or no positive ratio
fn growth_ratio(pv: f64, fv: f64) -> Option<f64> {
    if pv == 0. {
        return None;
    }
    let ratio = (fv / pv).abs();
    if ratio <= 0. || !ratio.is_finite() {
        return None;
    }
    Some(ratio)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// The unknown [`calculate_tvm`] solves for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TvmVariable {
    #[cfg_attr(feature = "serde", serde(rename = "PV"))]
    Pv,
    #[cfg_attr(feature = "serde", serde(rename = "FV"))]
    Fv,
    #[cfg_attr(feature = "serde", serde(rename = "PMT"))]
    Pmt,
    N,
    Rate,
}

impl fmt::Display for TvmVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TvmVariable::Pv => "PV",
            TvmVariable::Fv => "FV",
            TvmVariable::Pmt => "PMT",
            TvmVariable::N => "N",
            TvmVariable::Rate => "Rate",
        };
        f.write_str(name)
    }
}

impl FromStr for TvmVariable {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PV" => Ok(TvmVariable::Pv),
            "FV" => Ok(TvmVariable::Fv),
            "PMT" => Ok(TvmVariable::Pmt),
            "N" => Ok(TvmVariable::N),
            "RATE" => Ok(TvmVariable::Rate),
            _ => Err(CalcError::UnsupportedVariable(s.to_string())),
        }
    }
}

/// Annual-terms inputs for [`calculate_tvm`]. The field being solved for is
/// ignored.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TvmInputs {
    pub pv: f64,
    pub fv: f64,
    /// Payment per compounding period.
    pub pmt: f64,
    pub years: f64,
    pub annual_rate_percent: f64,
    pub frequency: CompoundingFrequency,
    pub timing: PaymentTiming,
}

/// The solved variable and its value rounded to 2 decimals.
///
/// `value` is `None` when the inputs admit no solution. `N` is reported in
/// years and `Rate` as an annual percentage.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TvmSolution {
    pub variable: TvmVariable,
    pub value: Option<f64>,
}

/// Solves for `variable` (`PV`, `FV`, `PMT`, `N` or `Rate`, any case) from
/// annual inputs.
///
/// The annual rate and year count are converted to per-period terms using
/// `inputs.frequency`.
pub fn calculate_tvm(variable: &str, inputs: &TvmInputs) -> CalcResult<TvmSolution> {
    let variable: TvmVariable = variable.parse()?;

    let per_year = inputs.frequency.periods_per_year();
    let rate = inputs.annual_rate_percent / 100. / per_year;
    let periods = inputs.years * per_year;
    let TvmInputs {
        pv,
        fv,
        pmt,
        timing,
        ..
    } = *inputs;

    let value = match variable {
        TvmVariable::Pv => Some(calculate_pv(fv, pmt, rate, periods, timing)),
        TvmVariable::Fv => Some(calculate_fv(pv, pmt, rate, periods, timing)),
        TvmVariable::Pmt => Some(calculate_pmt(pv, fv, rate, periods, timing)),
        TvmVariable::N => calculate_n(pv, fv, pmt, rate, timing).map(|n| n / per_year),
        TvmVariable::Rate => {
            calculate_rate(pv, fv, pmt, periods, timing).map(|r| r * per_year * 100.)
        }
    };

    Ok(TvmSolution {
        variable,
        value: value.and_then(finite).map(round2),
    })
}

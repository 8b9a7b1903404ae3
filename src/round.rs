//! Rounding shared by the calculators.
//!
//! EMI, GST and TVM results are rounded to paise (2 decimals); the deposit
//! calculators (PPF, FD, RD, SIP) round to whole rupees.

pub(crate) fn round(amt: f64, dec: i32) -> f64 {
    let rounded = (amt * 10_f64.powi(dec)).round() / 10_f64.powi(dec);
    // -0.0 would otherwise print as "-0"
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(amt: f64) -> f64 {
    round(amt, 2)
}

/// Rounds to the nearest whole rupee, half away from zero.
pub fn round_rupee(amt: f64) -> f64 {
    round(amt, 0)
}

#[cfg(test)]
mod tests {
    use super::{round2, round_rupee};

    #[test]
    fn test_round2() {
        assert_eq!(round2(8678.2261), 8678.23);
        assert_eq!(round2(-2.345678), -2.35);
        assert_eq!(round2(0.), 0.);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_round_rupee() {
        assert_eq!(round_rupee(1356.5), 1357.);
        assert_eq!(round_rupee(-1356.5), -1357.);
        assert_eq!(round_rupee(99.49), 99.);
    }
}

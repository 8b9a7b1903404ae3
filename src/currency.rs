//! Indian rupee formatting.
//!
//! Amounts are grouped the South-Asian way: the last three integer digits
//! form one group and everything to the left is grouped in pairs, so one
//! lakh is `₹1,00,000.00` and one crore is `₹1,00,00,000.00`.

use std::fmt;

/// An amount of rupees that displays with Indian digit grouping.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rupees(pub f64);

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = if self.0.is_finite() { self.0 } else { 0. };

        // f64::round is half away from zero, applied to the absolute value;
        // the split stays in f64 so huge amounts keep every digit
        let paise = (amount.abs() * 100.).round();
        let (rupees, fraction) = if paise.is_finite() {
            let fraction = paise % 100.;
            (((paise - fraction) / 100.).round(), fraction)
        } else {
            (amount.abs().round(), 0.)
        };

        let sign = if amount < 0. && (rupees > 0. || fraction > 0.) {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.0}", rupees);
        write!(
            f,
            "{}₹{}.{:02.0}",
            sign,
            group_indian(&digits),
            fraction
        )
    }
}

/// Formats `amount` as an Indian rupee string, e.g. `-₹12,34,567.89`.
pub fn format_inr(amount: f64) -> String {
    Rupees(amount).to_string()
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);

    // a leading odd digit stands alone, the rest of the head goes in pairs
    let lead = head.len() % 2;
    if lead == 1 {
        grouped.push_str(&head[..1]);
    }
    for pair in head.as_bytes()[lead..].chunks(2) {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push(pair[0] as char);
        grouped.push(pair[1] as char);
    }
    grouped.push(',');
    grouped.push_str(last_three);
    grouped
}

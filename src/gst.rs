use std::fmt;

use crate::currency::Rupees;
use crate::round::round2;

/// GST breakdown, each field rounded to 2 decimals.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct GstResult {
    pub net_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
}

impl fmt::Display for GstResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "net {}, GST {}, total {}",
            Rupees(self.net_amount),
            Rupees(self.gst_amount),
            Rupees(self.total_amount)
        )
    }
}

/// Adds GST to a GST-exclusive `amount`, or when `is_add_gst` is false
/// extracts it from a GST-inclusive one.
pub fn calculate_gst(amount: f64, gst_rate_percent: f64, is_add_gst: bool) -> GstResult {
    let rate = gst_rate_percent / 100.;

    let (net_amount, gst_amount, total_amount) = if is_add_gst {
        let gst_amount = amount * rate;
        (amount, gst_amount, amount + gst_amount)
    } else {
        let net_amount = amount / (1. + rate);
        (net_amount, amount - net_amount, amount)
    };

    GstResult {
        net_amount: round2(net_amount),
        gst_amount: round2(gst_amount),
        total_amount: round2(total_amount),
    }
}

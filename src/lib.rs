//! Personal-finance calculators for Indian retail products.
//!
//! Every calculator is a pure function over plain numbers: EMI and loan
//! amortization, a general time-value-of-money solver, PPF/FD/RD/SIP
//! maturity, and GST. Amounts render with [`currency::format_inr`]; raw form
//! input can be checked first with [`validate::validate_emi_inputs`].
//!
//! The crate logs through the `log` facade and installs no logger itself.

pub mod currency;
pub mod error;
pub mod gst;
pub mod loan;
pub mod round;
pub mod savings;
pub mod solver;
pub mod tvm;
pub mod validate;

pub use currency::{format_inr, Rupees};
pub use error::{CalcError, CalcResult};
pub use gst::{calculate_gst, GstResult};
pub use loan::{amortization_schedule, calculate_emi, EmiPayment, EmiResult};
pub use savings::{calculate_fd, calculate_ppf, calculate_rd, calculate_sip, SavingsResult};
pub use tvm::{
    calculate_fv, calculate_n, calculate_pmt, calculate_pv, calculate_rate, calculate_tvm,
    CompoundingFrequency, PaymentTiming, TvmInputs, TvmSolution, TvmVariable,
};
pub use validate::{convert_tenure, validate_emi_inputs, TenureUnit, ValidationResult};

use chrono::NaiveDate;
use fincalc::*;
use log::{info, warn};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let check = validate_emi_inputs("1000000", "8.5", "240");
    if !check.is_valid {
        for (field, message) in &check.errors {
            warn!("{}: {}", field, message);
        }
        return;
    }

    let emi = calculate_emi(1_000_000., 8.5, 240);
    info!("home loan: {}", emi);

    let schedule = amortization_schedule(
        1_000_000.,
        8.5,
        240,
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
    );
    for pmt in schedule.iter().take(3).chain(schedule.last()) {
        println!("{}", pmt);
    }

    info!("PPF: {}", calculate_ppf(150_000., 7.1, 15));
    info!("FD: {}", calculate_fd(500_000., 7., 5.));
    info!("RD: {}", calculate_rd(5_000., 6.5, 24));
    info!("SIP: {}", calculate_sip(10_000., 12., 10));
    info!("GST: {}", calculate_gst(1_180., 18., false));

    let inputs = TvmInputs {
        pv: -100_000.,
        fv: 200_000.,
        annual_rate_percent: 7.,
        frequency: CompoundingFrequency::Annually,
        ..TvmInputs::default()
    };
    match calculate_tvm("N", &inputs) {
        Ok(TvmSolution {
            value: Some(years), ..
        }) => info!("doubling time at 7%: {} years", years),
        Ok(_) => warn!("doubling time cannot be computed"),
        Err(e) => warn!("{}", e),
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<EmiResult>();
    is_normal::<EmiPayment>();
    is_normal::<SavingsResult>();
    is_normal::<GstResult>();
    is_normal::<TvmInputs>();
    is_normal::<TvmSolution>();
    is_normal::<ValidationResult>();
    is_normal::<CalcError>();
}

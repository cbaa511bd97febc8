//! Data used in tests.

use crate::records::ReanalysisBlock;

/// Build a block of `n` hourly time steps starting at `start_hour` hours after the ERA5 epoch.
///
/// The first row always has a 3-4-5 wind.
pub fn make_test_block(start_hour: f64, n: usize) -> ReanalysisBlock {
    let steps = || (0..n).map(|i| i as f64);

    ReanalysisBlock::new()
        .with_source_description(format!("test block starting at {}", start_hour))
        .with_time_axis(steps().map(|i| start_hour + i).collect())
        .with_u_wind(steps().map(|i| 3.0 + 0.5 * i).collect())
        .with_v_wind(steps().map(|i| 4.0 - 0.25 * i).collect())
        .with_temperature(steps().map(|i| 268.0 + 0.3 * i).collect())
        .with_pressure(steps().map(|i| 97_000.0 + 5.0 * i).collect())
}

pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    use std::f64;

    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

//! Wind variables derived from reanalysis wind components.
use crate::{
    error::{InvalidInputError, Result},
    keys::Variable,
};
use itertools::izip;
use metfor::{MetersPSec, Quantity, WindSpdDir, WindUV};

/// Calculate the wind speed in m/s from parallel columns of u and v components in m/s.
pub fn wind_speed(u: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    if u.len() != v.len() {
        return Err(InvalidInputError::LengthMismatch {
            variable: Variable::VWind100,
            expected: u.len(),
            found: v.len(),
        });
    }

    let speeds = izip!(u, v)
        .map(|(&u, &v)| WindUV {
            u: MetersPSec(u),
            v: MetersPSec(v),
        })
        .map(|uv| WindSpdDir::<MetersPSec>::from(uv).speed.unpack())
        .collect();

    Ok(speeds)
}

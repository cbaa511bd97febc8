//! Moist air density as defined by IEC 61400-12.
//!
//! The density is calculated from temperature, pressure and relative humidity with the ideal gas
//! law, correcting the dry air term for the water vapor content of the air:
//!
//! ```text
//! rho = (1 / T) * (P / R_dry - phi * Pw(T) * (1 / R_dry - 1 / R_wv))
//! Pw(T) = 0.0000205 * exp(0.0631846 * T)
//! ```
//!
//! Relative humidity is frequently unavailable in reanalysis point extracts. When it is not
//! supplied a relative humidity of 0.5 is assumed for every sample, and the resulting
//! [`DensitySeries`] remembers that it was assumed.
//!
//! A temperature of exactly 0 K is not guarded against. The result follows IEEE-754 division,
//! which gives `+inf` for a positive numerator and `NaN` when the numerator is also zero.
use crate::{
    error::{InvalidInputError, Result},
    keys::Variable,
};
use itertools::izip;
use std::ops::Deref;

/// Specific gas constant for dry air in J/(kg K).
pub const R_DRY: f64 = 287.05;

/// Specific gas constant for water vapor in J/(kg K).
pub const R_WATER_VAPOR: f64 = 461.5;

/// Relative humidity assumed when none is supplied.
pub const DEFAULT_RELATIVE_HUMIDITY: f64 = 0.5;

/// Where the humidity used in a density calculation came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumiditySource {
    /// Humidity values were supplied with the measurements.
    Measured,
    /// No humidity was supplied, [`DEFAULT_RELATIVE_HUMIDITY`] was used for every sample.
    Assumed,
}

/// Relative humidity input for a density calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Humidity<'a> {
    /// Measured relative humidity (0 - 1), one value per sample.
    Measured(&'a [f64]),
    /// No humidity available, use [`DEFAULT_RELATIVE_HUMIDITY`].
    Unspecified,
}

impl<'a> Humidity<'a> {
    /// Where the humidity values for this input come from.
    pub fn source(&self) -> HumiditySource {
        match self {
            Humidity::Measured(_) => HumiditySource::Measured,
            Humidity::Unspecified => HumiditySource::Assumed,
        }
    }
}

impl<'a> From<Option<&'a [f64]>> for Humidity<'a> {
    fn from(opt: Option<&'a [f64]>) -> Self {
        opt.map(Humidity::Measured).unwrap_or(Humidity::Unspecified)
    }
}

/// Air density values in kg/m³, aligned index for index with the input samples.
#[derive(Clone, Debug, PartialEq)]
pub struct DensitySeries {
    values: Vec<f64>,
    humidity: HumiditySource,
}

impl DensitySeries {
    /// Was the humidity measured or assumed for this series?
    pub fn humidity_source(&self) -> HumiditySource {
        self.humidity
    }

    /// Get the density values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Take the density values out of the series.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Check if every value is finite. Only a temperature of 0 K produces a non-finite density.
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|rho| rho.is_finite())
    }
}

impl Deref for DensitySeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

/// A single measurement of the state of the air.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementSample {
    /// Temperature in Kelvin
    pub temperature: f64,
    /// Pressure in Pascals
    pub pressure: f64,
    /// Relative humidity (0 - 1), if it was measured.
    pub relative_humidity: Option<f64>,
}

impl MeasurementSample {
    /// Create a sample without humidity.
    pub fn new(temperature: f64, pressure: f64) -> Self {
        MeasurementSample {
            temperature,
            pressure,
            relative_humidity: None,
        }
    }

    /// Builder method to add a relative humidity.
    pub fn with_relative_humidity(self, relative_humidity: f64) -> Self {
        MeasurementSample {
            relative_humidity: Some(relative_humidity),
            ..self
        }
    }
}

/// A chronological series of measurements stored as parallel columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementSeries {
    temperature: Vec<f64>,
    pressure: Vec<f64>,
    relative_humidity: Option<Vec<f64>>,
}

impl MeasurementSeries {
    /// Build a series from samples.
    ///
    /// Either every sample has a relative humidity, or none of them do.
    pub fn from_samples(samples: &[MeasurementSample]) -> Result<Self> {
        let has_humidity = samples
            .first()
            .map(|s| s.relative_humidity.is_some())
            .unwrap_or(false);

        if let Some(index) = samples
            .iter()
            .position(|s| s.relative_humidity.is_some() != has_humidity)
        {
            return Err(InvalidInputError::MixedHumidity { index });
        }

        let temperature = samples.iter().map(|s| s.temperature).collect();
        let pressure = samples.iter().map(|s| s.pressure).collect();
        let relative_humidity = if has_humidity {
            Some(
                samples
                    .iter()
                    .filter_map(|s| s.relative_humidity)
                    .collect(),
            )
        } else {
            None
        };

        Ok(MeasurementSeries {
            temperature,
            pressure,
            relative_humidity,
        })
    }

    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    /// Check if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Get the humidity input for this series.
    pub fn humidity(&self) -> Humidity<'_> {
        Humidity::from(self.relative_humidity.as_deref())
    }

    /// Calculate the air density for every sample in the series.
    pub fn air_density(&self) -> Result<DensitySeries> {
        air_density(&self.temperature, &self.pressure, self.humidity())
    }
}

/// The empirical saturation vapor pressure term used by IEC 61400-12, in Pascals.
#[inline]
pub fn saturation_vapor_factor(t_kelvin: f64) -> f64 {
    0.0000205 * (0.0631846 * t_kelvin).exp()
}

#[inline]
fn moist_air_density(t: f64, p: f64, phi: f64) -> f64 {
    let vapor_term = phi * saturation_vapor_factor(t) * (1.0 / R_DRY - 1.0 / R_WATER_VAPOR);
    (1.0 / t) * (p / R_DRY - vapor_term)
}

/// Calculate the air density of a single sample in kg/m³.
pub fn air_density_sample(sample: &MeasurementSample) -> Result<f64> {
    let phi = sample
        .relative_humidity
        .unwrap_or(DEFAULT_RELATIVE_HUMIDITY);

    check_non_negative(Variable::Temperature2m, 0, sample.temperature)?;
    check_non_negative(Variable::SurfacePressure, 0, sample.pressure)?;
    check_non_negative(Variable::RelativeHumidity, 0, phi)?;

    Ok(moist_air_density(sample.temperature, sample.pressure, phi))
}

/// Calculate air density in kg/m³ from temperature (K), pressure (Pa) and relative humidity.
///
/// Values are converted to `f64` before any arithmetic, so integer columns never cause integer
/// division. Any type with a lossless `Into<f64>` is accepted: `f32`, and integers of 32 bits or
/// fewer. 64 bit integers must be converted by the caller. All inputs are validated before
/// anything is calculated: every column must be as long as `temperature` and no value may be
/// negative.
///
/// ```
/// use era5_density::{air_density, Humidity, HumiditySource};
///
/// let rho = air_density(&[250.0], &[90_000.0], Humidity::Measured(&[0.0])).unwrap();
/// assert!((rho[0] - 1.2541).abs() < 1.0e-4);
///
/// let rho = air_density(&[288_i32], &[101_325_i32], Humidity::Unspecified).unwrap();
/// assert_eq!(rho.humidity_source(), HumiditySource::Assumed);
/// ```
pub fn air_density<T, P>(
    temperature: &[T],
    pressure: &[P],
    humidity: Humidity<'_>,
) -> Result<DensitySeries>
where
    T: Copy + Into<f64>,
    P: Copy + Into<f64>,
{
    let len = temperature.len();

    check_length(Variable::SurfacePressure, len, pressure.len())?;
    if let Humidity::Measured(rh) = humidity {
        check_length(Variable::RelativeHumidity, len, rh.len())?;
    }

    check_all_non_negative(Variable::Temperature2m, temperature)?;
    check_all_non_negative(Variable::SurfacePressure, pressure)?;
    if let Humidity::Measured(rh) = humidity {
        check_all_non_negative(Variable::RelativeHumidity, rh)?;
    }

    let temperature = temperature.iter().map(|&t| Into::<f64>::into(t));
    let pressure = pressure.iter().map(|&p| Into::<f64>::into(p));

    let values: Vec<f64> = match humidity {
        Humidity::Measured(rh) => izip!(temperature, pressure, rh)
            .map(|(t, p, &phi)| moist_air_density(t, p, phi))
            .collect(),
        Humidity::Unspecified => izip!(temperature, pressure)
            .map(|(t, p)| moist_air_density(t, p, DEFAULT_RELATIVE_HUMIDITY))
            .collect(),
    };

    Ok(DensitySeries {
        values,
        humidity: humidity.source(),
    })
}

#[inline]
fn check_length(variable: Variable, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(InvalidInputError::LengthMismatch {
            variable,
            expected,
            found,
        })
    }
}

#[inline]
fn check_non_negative(variable: Variable, index: usize, value: f64) -> Result<()> {
    if value < 0.0 {
        Err(InvalidInputError::NegativeValue {
            variable,
            index,
            value,
        })
    } else {
        Ok(())
    }
}

fn check_all_non_negative<V>(variable: Variable, vals: &[V]) -> Result<()>
where
    V: Copy + Into<f64>,
{
    vals.iter()
        .map(|&v| Into::<f64>::into(v))
        .enumerate()
        .try_for_each(|(index, value)| check_non_negative(variable, index, value))
}

#![warn(missing_docs)]
//! Air density and derived wind variables for point extracts of ERA5 reanalysis data.
//!
//! The core of the crate is [`air_density`], the IEC 61400-12 moist air density formula applied
//! to parallel columns of temperature, pressure, and (optionally) relative humidity. Around it
//! are the pieces needed to turn the columns decoded from an ERA5 file into a table: decoding the
//! time axis, deriving the 100 m wind speed, and collecting the rows of consecutive retrievals
//! into a [`RecordSet`].
//!
//! Retrieving the data, reading netCDF files, and writing the table out are left to the caller.

//
// API
//
pub use crate::{
    density::{
        air_density, air_density_sample, saturation_vapor_factor, DensitySeries, Humidity,
        HumiditySource, MeasurementSample, MeasurementSeries, DEFAULT_RELATIVE_HUMIDITY, R_DRY,
        R_WATER_VAPOR,
    },
    error::{InvalidInputError, Result},
    keys::Variable,
    records::{Era5Record, ReanalysisBlock, RecordSet},
    time_axis::{decode_time_axis, era5_datetime, era5_epoch},
    wind::wind_speed,
};

//
// Internal use only
//

// Modules
mod density;
mod error;
mod keys;
mod records;
mod time_axis;
mod wind;

#[cfg(test)]
mod test_data;

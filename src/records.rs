//! Assemble decoded reanalysis columns into a table of records with derived wind speed and air
//! density.
//!
//! A [`ReanalysisBlock`] holds the columns decoded from one retrieval (typically a few years of
//! hourly data for a single grid point). Converting it to records decodes the time axis and adds
//! the derived columns. A [`RecordSet`] collects the records of consecutive blocks in order.
//!
//! ```
//! use era5_density::{ReanalysisBlock, RecordSet, Variable};
//!
//! let block = ReanalysisBlock::new()
//!     .with_source_description("ERA5 2001-2003".to_owned())
//!     .with_time_axis(vec![885_360.0, 885_361.0])
//!     .with_u_wind(vec![3.0, 6.0])
//!     .with_v_wind(vec![4.0, 8.0])
//!     .with_temperature(vec![268.4, 268.1])
//!     .with_pressure(vec![97_210.0, 97_190.0]);
//!
//! let mut records = RecordSet::new();
//! assert_eq!(records.append_block(block).unwrap(), 2);
//! let speed = records.column(Variable::WindSpeed100).unwrap();
//! assert!((speed[0] - 5.0).abs() < 1.0e-12 && (speed[1] - 10.0).abs() < 1.0e-12);
//! ```
use crate::{
    density::{air_density, DensitySeries, Humidity, HumiditySource},
    error::{InvalidInputError, Result},
    keys::Variable,
    time_axis::decode_time_axis,
    wind::wind_speed,
};
use chrono::NaiveDateTime;
use itertools::izip;
use tracing::{debug, warn};

/// Columns decoded from a single reanalysis retrieval.
///
/// Columns are parallel vectors aligned with the time axis. A column that was never set has
/// length 0.
#[derive(Clone, Debug, Default)]
pub struct ReanalysisBlock {
    // Description of the source of the block, e.g. the file it was read from.
    source: Option<String>,

    // Hours since 1900-01-01 00:00:00
    time: Vec<f64>,

    u_wind: Vec<f64>,
    v_wind: Vec<f64>,
    temperature: Vec<f64>,
    pressure: Vec<f64>,
    relative_humidity: Option<Vec<f64>>,
}

macro_rules! make_column_setter {
    ($(#[$attr:meta])* => $name:ident, $field:ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(self, column: Vec<f64>) -> Self {
            Self {$field: column, ..self}
        }
    };
}

impl ReanalysisBlock {
    /// Create a new, empty block. This is a proxy for default with a clearer name.
    #[inline]
    pub fn new() -> Self {
        ReanalysisBlock::default()
    }

    /// Add a source description to this block.
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Retrieve the source description for this block.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_deref()
    }

    make_column_setter!(
        /// Set the time axis, in hours since 1900-01-01 00:00:00.
        => with_time_axis, time
    );
    make_column_setter!(
        /// Set the eastward wind component at 100 m (m/s).
        => with_u_wind, u_wind
    );
    make_column_setter!(
        /// Set the northward wind component at 100 m (m/s).
        => with_v_wind, v_wind
    );
    make_column_setter!(
        /// Set the 2 m temperature (K).
        => with_temperature, temperature
    );
    make_column_setter!(
        /// Set the surface pressure (Pa).
        => with_pressure, pressure
    );

    /// Set the relative humidity (0 - 1). Without it air density is calculated with an assumed
    /// relative humidity.
    #[inline]
    pub fn with_relative_humidity(self, column: Vec<f64>) -> Self {
        Self {
            relative_humidity: Some(column),
            ..self
        }
    }

    /// Number of time steps in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if the block has no time steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Where the humidity for the density column will come from.
    #[inline]
    pub fn humidity(&self) -> Humidity<'_> {
        Humidity::from(self.relative_humidity.as_deref())
    }

    /// Calculate the air density column for this block.
    pub fn air_density(&self) -> Result<DensitySeries> {
        self.check_columns()?;
        air_density(&self.temperature, &self.pressure, self.humidity())
    }

    /// Convert the block into records, one per time step.
    ///
    /// Everything is validated before any record is produced.
    pub fn into_records(self) -> Result<Vec<Era5Record>> {
        let (records, _) = self.build_records()?;
        Ok(records)
    }

    fn check_columns(&self) -> Result<()> {
        let expected = self.time.len();

        let required = [
            (Variable::UWind100, self.u_wind.len()),
            (Variable::VWind100, self.v_wind.len()),
            (Variable::Temperature2m, self.temperature.len()),
            (Variable::SurfacePressure, self.pressure.len()),
        ];

        if expected == 0 {
            return match required.iter().find(|(_, len)| *len > 0) {
                Some(_) => Err(InvalidInputError::MissingVariable(Variable::Time)),
                None => Ok(()),
            };
        }

        let rh = self
            .relative_humidity
            .as_ref()
            .map(|rh| (Variable::RelativeHumidity, rh.len()));

        for (variable, found) in required.iter().cloned().chain(rh) {
            if found == 0 {
                return Err(InvalidInputError::MissingVariable(variable));
            } else if found != expected {
                return Err(InvalidInputError::LengthMismatch {
                    variable,
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }

    fn build_records(self) -> Result<(Vec<Era5Record>, DensitySeries)> {
        self.check_columns()?;

        let density = air_density(&self.temperature, &self.pressure, self.humidity())?;
        let speed = wind_speed(&self.u_wind, &self.v_wind)?;
        let times = decode_time_axis(&self.time)?;

        let rh: Vec<Option<f64>> = match self.relative_humidity {
            Some(ref rh) => rh.iter().cloned().map(Some).collect(),
            None => vec![None; times.len()],
        };

        let records = izip!(
            times,
            &self.u_wind,
            &self.v_wind,
            &self.temperature,
            &self.pressure,
            rh,
            speed,
            density.iter()
        )
        .map(|(datetime, &u, &v, &t, &p, rh, ws, &rho)| Era5Record {
            datetime,
            u_100: u,
            v_100: v,
            t_2m: t,
            surf_pres: p,
            rel_humi: rh,
            ws_100m: ws,
            dens_100m: rho,
        })
        .collect();

        Ok((records, density))
    }
}

/// A single row of the output table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Era5Record {
    /// Valid time
    pub datetime: NaiveDateTime,
    /// Eastward wind component at 100 m (m/s)
    pub u_100: f64,
    /// Northward wind component at 100 m (m/s)
    pub v_100: f64,
    /// Temperature at 2 m (K)
    pub t_2m: f64,
    /// Surface pressure (Pa)
    pub surf_pres: f64,
    /// Relative humidity (0 - 1), if it was supplied.
    pub rel_humi: Option<f64>,
    /// Wind speed at 100 m (m/s)
    pub ws_100m: f64,
    /// Air density (kg/m³)
    pub dens_100m: f64,
}

impl Era5Record {
    /// Get a numeric value from the record by key. Returns `None` for the time, or for a
    /// humidity that was not supplied.
    pub fn get(&self, var: Variable) -> Option<f64> {
        use crate::keys::Variable::*;

        match var {
            Time => None,
            UWind100 => Some(self.u_100),
            VWind100 => Some(self.v_100),
            Temperature2m => Some(self.t_2m),
            SurfacePressure => Some(self.surf_pres),
            RelativeHumidity => self.rel_humi,
            WindSpeed100 => Some(self.ws_100m),
            AirDensity100 => Some(self.dens_100m),
        }
    }
}

/// Records from one or more reanalysis blocks, in the order they were appended.
#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    records: Vec<Era5Record>,
    humidity: Option<HumiditySource>,
}

impl RecordSet {
    /// Create a new, empty record set.
    #[inline]
    pub fn new() -> Self {
        RecordSet::default()
    }

    /// Convert a block to records and append them. Returns the number of rows added.
    ///
    /// If the block is invalid the record set is left unchanged.
    pub fn append_block(&mut self, block: ReanalysisBlock) -> Result<usize> {
        let source = block.source.clone();
        let (records, density) = block.build_records()?;

        if !density.all_finite() {
            warn!(
                source = source.as_deref().unwrap_or("unknown"),
                "air density column contains non-finite values, check for 0 K temperatures"
            );
        }

        let rows = records.len();
        self.extend(records, density.humidity_source());

        debug!(
            source = source.as_deref().unwrap_or("unknown"),
            rows,
            total_rows = self.records.len(),
            "appended reanalysis block"
        );

        Ok(rows)
    }

    /// Append already built records, noting where the humidity for their density came from.
    ///
    /// Appending nothing leaves the humidity source unchanged.
    pub fn extend<I>(&mut self, records: I, humidity: HumiditySource)
    where
        I: IntoIterator<Item = Era5Record>,
    {
        let before = self.records.len();
        self.records.extend(records);

        // Provenance only describes rows that exist.
        if self.records.len() == before {
            return;
        }

        self.humidity = match (self.humidity, humidity) {
            (Some(HumiditySource::Assumed), _) | (_, HumiditySource::Assumed) => {
                Some(HumiditySource::Assumed)
            }
            _ => Some(HumiditySource::Measured),
        };
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the rows.
    #[inline]
    pub fn records(&self) -> &[Era5Record] {
        &self.records
    }

    /// Where the humidity used for the density column came from. If any appended block had no
    /// humidity this is `Assumed`. `None` until something is appended.
    #[inline]
    pub fn humidity_source(&self) -> Option<HumiditySource> {
        self.humidity
    }

    /// Get the valid times of all rows.
    pub fn datetimes(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|rec| rec.datetime).collect()
    }

    /// Get a numeric column. Returns `None` for the time column, or for relative humidity if any
    /// row lacks it.
    pub fn column(&self, var: Variable) -> Option<Vec<f64>> {
        if var == Variable::Time {
            return None;
        }

        self.records.iter().map(|rec| rec.get(var)).collect()
    }
}

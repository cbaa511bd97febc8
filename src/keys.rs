//! Enums used as keys for the columns of a reanalysis record set.

use std::fmt::Display;
use strum_macros::{EnumIter, EnumString};

/// The variables carried through a reanalysis block, from the decoded ERA5 fields to the derived
/// columns.
///
/// Parsing from a string accepts the ERA5 short names used in the netCDF files (`"t2m"`,
/// `"sp"`, ...). Use [`Variable::column_name`] for the header in the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString)]
pub enum Variable {
    /// Valid time of the record.
    #[strum(serialize = "time")]
    Time,
    /// Eastward wind component at 100 m (m/s)
    #[strum(serialize = "u100")]
    UWind100,
    /// Northward wind component at 100 m (m/s)
    #[strum(serialize = "v100")]
    VWind100,
    /// Temperature at 2 m (K)
    #[strum(serialize = "t2m")]
    Temperature2m,
    /// Surface pressure (Pa)
    #[strum(serialize = "sp")]
    SurfacePressure,
    /// Relative humidity (0 - 1)
    #[strum(serialize = "r")]
    RelativeHumidity,
    /// Wind speed at 100 m (m/s), derived from the wind components.
    WindSpeed100,
    /// Air density (kg/m³), derived from temperature, pressure, and humidity.
    AirDensity100,
}

impl Variable {
    /// The column header used for this variable in the record table.
    pub fn column_name(self) -> &'static str {
        use self::Variable::*;

        match self {
            Time => "datetime",
            UWind100 => "u_100",
            VWind100 => "v_100",
            Temperature2m => "t_2m",
            SurfacePressure => "surf_pres",
            RelativeHumidity => "rel_humi",
            WindSpeed100 => "ws_100m",
            AirDensity100 => "dens_100m",
        }
    }

    /// Is this variable derived by this crate rather than read from the reanalysis file?
    pub fn is_derived(self) -> bool {
        matches!(self, Variable::WindSpeed100 | Variable::AirDensity100)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

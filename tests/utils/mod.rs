use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDateTime;
use era5_density::{ReanalysisBlock, Variable};


/// Values computed independently for each row of a test file.
#[derive(Clone, Debug, Default)]
pub struct Expected {
    pub datetime: Vec<NaiveDateTime>,
    pub ws_100m: Vec<f64>,
    pub dens_100m: Vec<f64>,
}

#[allow(unused_macros)] // False alarm
macro_rules! check_file_complete {
    ($test_name:ident, $fname:expr) => {
        #[test]
        fn $test_name() {
            let (inputs, expected) = utils::load_test_columns($fname);

            let required = [
                era5_density::Variable::Time,
                era5_density::Variable::UWind100,
                era5_density::Variable::VWind100,
                era5_density::Variable::Temperature2m,
                era5_density::Variable::SurfacePressure,
            ];

            let n_rows = expected.datetime.len();
            assert!(n_rows > 0, "no rows in {}", $fname);

            for var in required.iter() {
                let col = inputs
                    .get(var)
                    .unwrap_or_else(|| panic!("missing {:?} in {}", var, $fname));
                assert_eq!(col.len(), n_rows, "{:?}", var);
            }

            if let Some(rh) = inputs.get(&era5_density::Variable::RelativeHumidity) {
                assert_eq!(rh.len(), n_rows);
            }

            assert_eq!(expected.ws_100m.len(), n_rows);
            assert_eq!(expected.dens_100m.len(), n_rows);

            // Derived columns must not be in the input section.
            for var in inputs.keys() {
                assert!(!var.is_derived(), "derived column in inputs");
            }
        }
    };
}

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {
            use crate::utils::{self, record_tests};

            #[test]
            fn time_axis() {
                let (block, expected) = utils::load_test_file($fname);
                record_tests::test_time_axis(block, &expected);
            }

            #[test]
            fn wind_speed() {
                let (block, expected) = utils::load_test_file($fname);
                record_tests::test_wind_speed(block, &expected);
            }

            #[test]
            fn air_density() {
                let (block, expected) = utils::load_test_file($fname);
                record_tests::test_air_density(block, &expected);
            }

            #[test]
            fn record_set() {
                let (block, expected) = utils::load_test_file($fname);
                record_tests::test_record_set(block, &expected);
            }
        }
    };
}

/// Parse a test file into its input columns, keyed by variable, and the expected values.
///
/// Lines starting with '#' are comments. The first other line is a header. Header names that
/// parse as ERA5 short names are inputs, the rest are expected values.
pub fn load_test_columns(fname: &str) -> (HashMap<Variable, Vec<f64>>, Expected) {
    let mut location = PathBuf::new();
    location.push("test_data");
    location.push(fname);

    let mut f = File::open(&location).expect(&format!("Error opening file: {:?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:?}", location));

    let mut lines = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header: Vec<&str> = lines
        .next()
        .expect("missing header")
        .split(',')
        .collect();

    let mut inputs: HashMap<Variable, Vec<f64>> = HashMap::new();
    let mut expected = Expected::default();

    for line in lines {
        let tokens: Vec<&str> = line.split(',').collect();
        assert_eq!(tokens.len(), header.len(), "bad line: {}", line);

        for (&name, &token) in header.iter().zip(tokens.iter()) {
            if let Ok(var) = Variable::from_str(name) {
                inputs
                    .entry(var)
                    .or_insert_with(Vec::new)
                    .push(f64::from_str(token).unwrap());
                continue;
            }

            match name {
                "datetime" => expected.datetime.push(
                    NaiveDateTime::parse_from_str(token, "%Y-%m-%d %H:%M:%S").unwrap(),
                ),
                "ws_100m" => expected.ws_100m.push(f64::from_str(token).unwrap()),
                "dens_100m" => expected.dens_100m.push(f64::from_str(token).unwrap()),
                _ => panic!("unknown column {} in {}", name, fname),
            }
        }
    }

    (inputs, expected)
}

pub fn load_test_file(fname: &str) -> (ReanalysisBlock, Expected) {
    let (mut inputs, expected) = load_test_columns(fname);

    let mut take = |var: Variable| inputs.remove(&var).unwrap_or_default();

    let mut block = ReanalysisBlock::new()
        .with_source_description(fname.to_owned())
        .with_time_axis(take(Variable::Time))
        .with_u_wind(take(Variable::UWind100))
        .with_v_wind(take(Variable::VWind100))
        .with_temperature(take(Variable::Temperature2m))
        .with_pressure(take(Variable::SurfacePressure));

    if let Some(rh) = inputs.remove(&Variable::RelativeHumidity) {
        block = block.with_relative_humidity(rh);
    }

    (block, expected)
}

pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    use std::f64;

    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

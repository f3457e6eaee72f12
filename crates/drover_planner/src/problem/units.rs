//! Every quantity handed to the routing engine is an integer in a unit small
//! enough to keep three decimals of the human unit.

pub type Meters = i64;
pub type Seconds = i64;
pub type Grams = i64;
pub type Liters = i64;
/// Tenths of a cent.
pub type MilliEuros = i64;

/// Ratio between every scaled unit and its human unit (m/km, g/kg, L/m3, 0.1ct/EUR).
pub const SCALE: i64 = 1000;

/// Converts a scaled integer into its human unit (km, kg, m3, EUR).
pub fn unscale(value: i64) -> f64 {
    value as f64 / SCALE as f64
}

/// Converts a human unit into its scaled integer, rounding to the nearest unit.
pub fn scale(value: f64) -> i64 {
    (value * SCALE as f64).round() as i64
}

/// Prints a human value the way the reports always have, keeping a trailing
/// `.0` on whole numbers (`8.0`, `0.15`, `1028.571`).
pub fn format_human(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// [`format_human`] of a scaled integer.
pub fn format_unscaled(value: i64) -> String {
    format_human(unscale(value))
}

/// Converts kilometres into metres the way the instance files were produced:
/// `1000 * km` truncated toward zero.
pub fn km_to_meters(km: f64) -> Meters {
    (km * SCALE as f64) as Meters
}

//! Rounding-safe unit scaling
//!
//! Fractional quantities are first fixed to an integer at a fractional
//! scale (hundredths for time, hundred-thousandths for data) with a 0.005
//! bias, and only then multiplied up to the base unit and divided back
//! down. Fixing first absorbs binary representation error (`0.29 * 100`
//! is `28.999...`), so repeated fractional additions do not drift.
//!
//! Intermediate products are 128-bit; results saturate at the `i64` range.

use unitmeter_common::{BYTES_PER_KB, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Fractional scale for time quantities
pub const TIME_FRACTION_SCALE: i64 = 100;

/// Fractional scale for data quantities
pub const DATA_FRACTION_SCALE: i64 = 100_000;

/// Bias added before truncating to the fractional scale
pub const ROUNDING_BIAS: f64 = 0.005;

const KB: i128 = BYTES_PER_KB as i128;

/// Convert `value` units of size `multiplier` into base units.
#[inline]
fn scaled(value: f64, fraction_scale: i64, multiplier: i128) -> i64 {
    // `as` truncates toward zero and saturates (NaN becomes 0)
    let fixed = (value * fraction_scale as f64 + ROUNDING_BIAS) as i64;
    let product = i128::from(fixed) * multiplier / i128::from(fraction_scale);
    i64::try_from(product).unwrap_or(if product < 0 { i64::MIN } else { i64::MAX })
}

/// Minutes to whole seconds
pub fn minutes_to_seconds(minutes: f64) -> i64 {
    scaled(minutes, TIME_FRACTION_SCALE, i128::from(SECONDS_PER_MINUTE))
}

/// Hours to whole seconds
pub fn hours_to_seconds(hours: f64) -> i64 {
    scaled(hours, TIME_FRACTION_SCALE, i128::from(SECONDS_PER_HOUR))
}

/// Kilobytes to whole bytes
pub fn kbytes_to_bytes(kbytes: f64) -> i64 {
    scaled(kbytes, DATA_FRACTION_SCALE, KB)
}

/// Megabytes to whole bytes
pub fn mbytes_to_bytes(mbytes: f64) -> i64 {
    scaled(mbytes, DATA_FRACTION_SCALE, KB * KB)
}

/// Gigabytes to whole bytes
pub fn gbytes_to_bytes(gbytes: f64) -> i64 {
    scaled(gbytes, DATA_FRACTION_SCALE, KB * KB * KB)
}

/// Terabytes to whole bytes
pub fn tbytes_to_bytes(tbytes: f64) -> i64 {
    scaled(tbytes, DATA_FRACTION_SCALE, KB * KB * KB * KB)
}

//! Standard-deviation outlier detection.

use super::statistics::{mean, standard_deviation};
use super::types::OutlierDirection;

/// Direction of a value's deviation when it lies more than
/// `multiplier * std_dev` from `center`.
///
/// A zero (or non-finite) standard deviation flags nothing: when every value
/// is identical there is no outlier.
pub fn outlier_direction(
    value: f64,
    center: f64,
    std_dev: f64,
    multiplier: f64,
) -> Option<OutlierDirection> {
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return None;
    }
    let deviation = value - center;
    if deviation.abs() <= multiplier * std_dev {
        None
    } else if deviation > 0.0 {
        Some(OutlierDirection::Above)
    } else {
        Some(OutlierDirection::Below)
    }
}

/// Outlier direction for each value relative to the set's own mean and
/// population standard deviation.
pub fn detect_outliers(values: &[f64], multiplier: f64) -> Vec<Option<OutlierDirection>> {
    let center = mean(values);
    let std_dev = standard_deviation(values);
    values
        .iter()
        .map(|&v| outlier_direction(v, center, std_dev, multiplier))
        .collect()
}

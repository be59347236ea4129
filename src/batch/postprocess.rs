//! Output post-processing.
use ndarray::Array1;

/// Replace every element by its natural logarithm, in place.
///
/// Applied to the whole vector unconditionally: NaN stays NaN, negative
/// values become NaN and zero becomes −∞.
pub fn log_transform(values: &mut Array1<f64>) {
    values.mapv_inplace(f64::ln);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn log_transform_maps_every_element() {
        let mut values = array![1.0, std::f64::consts::E, 0.0, -2.0, f64::NAN];
        log_transform(&mut values);

        assert_eq!(values[0], 0.0);
        assert!((values[1] - 1.0).abs() < 1e-15);
        assert_eq!(values[2], f64::NEG_INFINITY);
        assert!(values[3].is_nan());
        assert!(values[4].is_nan());
    }
}

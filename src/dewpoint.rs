// dewpoint.rs

use crate::*;

// Magnus formula coefficients
pub const MAGNUS_A: f64 = 17.27;
pub const MAGNUS_B: f64 = 237.7;

/// Dew point in °C from air temperature (°C) and relative humidity (%).
///
/// Humidity must be strictly positive, the formula takes its logarithm.
pub fn dew_point(temperature: f64, humidity: f64) -> BridgeResult<f64> {
    // also catches NaN
    if !(humidity > 0.0) {
        return Err(BridgeError::InvalidInput(format!(
            "humidity must be positive, got {humidity}"
        )));
    }

    let gamma = (MAGNUS_A * temperature) / (MAGNUS_B + temperature) + (humidity / 100.0).ln();
    Ok((MAGNUS_B * gamma) / (MAGNUS_A - gamma))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_degrees_half_humidity() {
        let dp = dew_point(20.0, 50.0).unwrap();
        assert!((dp - 9.26).abs() < 0.05, "got {dp}");
    }

    #[test]
    fn saturated_air_dew_point_equals_temperature() {
        for t in [-20.0, 0.0, 15.5, 35.0] {
            let dp = dew_point(t, 100.0).unwrap();
            assert!((dp - t).abs() < 1e-9, "t={t} dp={dp}");
        }
    }

    #[test]
    fn never_above_temperature() {
        for t in [-30.0, -5.0, 0.0, 7.5, 20.0, 40.0] {
            for h in [0.5, 5.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
                let dp = dew_point(t, h).unwrap();
                assert!(dp <= t + 1e-9, "t={t} h={h} dp={dp}");
            }
        }
    }

    #[test]
    fn monotonic_in_humidity() {
        for t in [-10.0, 5.0, 20.0, 30.0] {
            let mut last = f64::NEG_INFINITY;
            for h in 1..=100 {
                let dp = dew_point(t, h as f64).unwrap();
                assert!(dp >= last, "t={t} h={h}");
                last = dp;
            }
        }
    }

    #[test]
    fn rejects_non_positive_humidity() {
        for h in [0.0, -0.1, -50.0, f64::NAN] {
            assert!(matches!(dew_point(20.0, h), Err(BridgeError::InvalidInput(_))));
        }
    }
}

// EOF

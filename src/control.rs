// control.rs

use crate::*;

pub const DEFAULT_DEWPOINT_PLUS: f64 = 2.0;
pub const DEFAULT_HYSTERESIS: f64 = 3.0;

pub const LABEL_ON: &str = "Heater On";
pub const LABEL_OFF: &str = "Heater Off";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    pub fn dew_point(&self) -> BridgeResult<f64> {
        dew_point(self.temperature, self.humidity)
    }
}

/// Heat is turned on below `dew point + dewpoint_plus`
/// and off above `dew point + dewpoint_plus + hysteresis`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub dewpoint_plus: f64,
    pub hysteresis: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dewpoint_plus: DEFAULT_DEWPOINT_PLUS,
            hysteresis: DEFAULT_HYSTERESIS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Decision {
    pub dew_point: f64,
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub heater_on: bool,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        heater_label(self.heater_on)
    }
}

pub fn heater_label(on: bool) -> &'static str {
    if on {
        LABEL_ON
    } else {
        LABEL_OFF
    }
}

/// Two-level hysteresis around the outdoor dew point.
///
/// Inside the dead band, thresholds included, the previous command is held.
pub fn decide(
    indoor_temp: f64,
    outdoor_temp: f64,
    outdoor_humidity: f64,
    previous: bool,
    thresholds: &Thresholds,
) -> BridgeResult<Decision> {
    let dew_point = dew_point(outdoor_temp, outdoor_humidity)?;
    let low_threshold = dew_point + thresholds.dewpoint_plus;
    let high_threshold = low_threshold + thresholds.hysteresis;

    let heater_on = if indoor_temp < low_threshold {
        true
    } else if indoor_temp > high_threshold {
        false
    } else {
        previous
    };

    Ok(Decision {
        dew_point,
        low_threshold,
        high_threshold,
        heater_on,
    })
}

/// Keeps the last commanded heater state between calls to [`decide`].
#[derive(Clone, Debug)]
pub struct HeaterController {
    thresholds: Thresholds,
    heater_on: bool,
}

impl HeaterController {
    pub fn new(thresholds: Thresholds, heater_on: bool) -> Self {
        Self {
            thresholds,
            heater_on,
        }
    }

    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn update(&mut self, indoor_temp: f64, outdoor: &SensorReading) -> BridgeResult<Decision> {
        let d = decide(
            indoor_temp,
            outdoor.temperature,
            outdoor.humidity,
            self.heater_on,
            &self.thresholds,
        )?;
        self.heater_on = d.heater_on;
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUT_T: f64 = 20.0;
    const OUT_H: f64 = 50.0;

    fn run(indoor: f64, prev: bool) -> Decision {
        decide(indoor, OUT_T, OUT_H, prev, &Thresholds::default()).unwrap()
    }

    #[test]
    fn cold_dome_turns_heater_on() {
        let d = run(10.0, false);
        assert!((d.low_threshold - 11.26).abs() < 0.05);
        assert!(d.heater_on);
        assert_eq!(d.label(), "Heater On");
    }

    #[test]
    fn dead_band_holds_previous() {
        assert!(run(13.0, true).heater_on);
        assert!(!run(13.0, false).heater_on);
    }

    #[test]
    fn warm_dome_turns_heater_off() {
        let d = run(15.0, true);
        assert!((d.high_threshold - 14.26).abs() < 0.05);
        assert!(!d.heater_on);
        assert_eq!(d.label(), "Heater Off");
    }

    #[test]
    fn thresholds_themselves_are_in_dead_band() {
        let d = run(0.0, false);
        let (low, high) = (d.low_threshold, d.high_threshold);
        for prev in [true, false] {
            assert_eq!(run(low, prev).heater_on, prev);
            assert_eq!(run(high, prev).heater_on, prev);
        }
    }

    #[test]
    fn custom_thresholds() {
        let t = Thresholds {
            dewpoint_plus: 0.0,
            hysteresis: 0.5,
        };
        let d = decide(9.0, OUT_T, OUT_H, false, &t).unwrap();
        assert!(d.heater_on);
        let d = decide(9.9, OUT_T, OUT_H, true, &t).unwrap();
        assert!(!d.heater_on);
    }

    #[test]
    fn invalid_humidity_propagates() {
        let r = decide(10.0, OUT_T, 0.0, true, &Thresholds::default());
        assert!(matches!(r, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn controller_hysteresis_sweep() {
        let outdoor = SensorReading::new(OUT_T, OUT_H);
        let mut ctl = HeaterController::new(Thresholds::default(), false);

        // cool down until the heater kicks in
        let mut t = 20.0;
        while !ctl.heater_on() {
            ctl.update(t, &outdoor).unwrap();
            t -= 0.1;
        }
        let high = outdoor.dew_point().unwrap() + DEFAULT_DEWPOINT_PLUS + DEFAULT_HYSTERESIS;

        // warm up again, heater must stay on through the whole band
        let mut t = 5.0;
        while t <= high {
            let d = ctl.update(t, &outdoor).unwrap();
            assert!(d.heater_on, "dropped out at {t}");
            t += 0.1;
        }
        let d = ctl.update(high + 0.01, &outdoor).unwrap();
        assert!(!d.heater_on);
        assert!(!ctl.heater_on());
    }

    #[test]
    fn controller_keeps_state_on_error() {
        let mut ctl = HeaterController::new(Thresholds::default(), true);
        assert!(ctl.update(30.0, &SensorReading::new(20.0, -1.0)).is_err());
        assert!(ctl.heater_on());
    }
}

// EOF

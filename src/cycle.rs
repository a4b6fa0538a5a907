// cycle.rs

use crate::*;

/// Everything one evaluated message produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CycleReport {
    pub indoor: IndoorReading,
    pub outdoor: SensorReading,
    pub decision: Decision,
    pub previous: bool,
}

impl CycleReport {
    pub fn heater_on(&self) -> bool {
        self.decision.heater_on
    }

    pub fn changed(&self) -> bool {
        self.decision.heater_on != self.previous
    }
}

/// Evaluate one delivered message without doing any I/O.
///
/// On error the caller keeps `previous` as the heater command.
pub fn evaluate_cycle(
    indoor: &IndoorReading,
    outdoor: BridgeResult<SensorReading>,
    previous: bool,
    thresholds: &Thresholds,
) -> BridgeResult<CycleReport> {
    let indoor_temp = indoor.require_temperature()?;
    let outdoor = outdoor?;
    let decision = decide(
        indoor_temp,
        outdoor.temperature,
        outdoor.humidity,
        previous,
        thresholds,
    )?;

    Ok(CycleReport {
        indoor: *indoor,
        outdoor,
        decision,
        previous,
    })
}


// EOF

// reading.rs

use crate::*;

/// Indoor sensor payload as published on the bus.
/// Either field may be missing; extra fields are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndoorReading {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl IndoorReading {
    pub fn from_payload(payload: &[u8]) -> BridgeResult<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| BridgeError::MalformedMessage(format!("payload is not utf-8: {e}")))?;
        Ok(serde_json::from_str(text.trim())?)
    }

    /// Temperature is what the controller needs, humidity is only exported.
    pub fn require_temperature(&self) -> BridgeResult<f64> {
        self.temperature
            .ok_or_else(|| BridgeError::MalformedMessage("missing field `temperature`".into()))
    }
}


// EOF

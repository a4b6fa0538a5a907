// metrics.rs

use prometheus_client::{
    encoding::text::encode,
    metrics::{counter::Counter, gauge::Gauge},
    registry::Registry,
};

use crate::*;

pub type FloatGauge = Gauge<f64, AtomicU64>;

#[derive(Debug)]
pub struct BridgeMetrics {
    registry: Registry,
    pub messages: Counter,
    pub indoor_temp: FloatGauge,
    pub indoor_humidity: FloatGauge,
    pub outdoor_temp: FloatGauge,
    pub outdoor_humidity: FloatGauge,
    pub dew_point: FloatGauge,
    pub heater_on: Gauge,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let messages = Counter::default();
        let indoor_temp = FloatGauge::default();
        let indoor_humidity = FloatGauge::default();
        let outdoor_temp = FloatGauge::default();
        let outdoor_humidity = FloatGauge::default();
        let dew_point = FloatGauge::default();
        let heater_on = Gauge::default();

        registry.register(
            "mqtt_message_count",
            "Number of MQTT messages received",
            messages.clone(),
        );
        registry.register(
            "indoor_temp",
            "Current indoor temperature",
            indoor_temp.clone(),
        );
        registry.register(
            "indoor_humidity",
            "Current indoor humidity",
            indoor_humidity.clone(),
        );
        registry.register(
            "outdoor_temp",
            "Current outdoor temperature",
            outdoor_temp.clone(),
        );
        registry.register(
            "outdoor_humidity",
            "Current outdoor humidity",
            outdoor_humidity.clone(),
        );
        registry.register(
            "dew_point",
            "Outdoor dew point used for the heater decision",
            dew_point.clone(),
        );
        registry.register(
            "heater_on",
            "Last commanded heater state (1 = on)",
            heater_on.clone(),
        );

        Self {
            registry,
            messages,
            indoor_temp,
            indoor_humidity,
            outdoor_temp,
            outdoor_humidity,
            dew_point,
            heater_on,
        }
    }

    pub fn count_message(&self) -> u64 {
        self.messages.inc() + 1
    }

    // absent fields leave the gauge alone
    pub fn record_indoor(&self, reading: &IndoorReading) {
        if let Some(t) = reading.temperature {
            self.indoor_temp.set(t);
        }
        if let Some(h) = reading.humidity {
            self.indoor_humidity.set(h);
        }
    }

    pub fn record_outdoor(&self, reading: &SensorReading) {
        self.outdoor_temp.set(reading.temperature);
        self.outdoor_humidity.set(reading.humidity);
    }

    pub fn record_decision(&self, decision: &Decision) {
        self.dew_point.set(decision.dew_point);
        self.heater_on.set(decision.heater_on as i64);
    }

    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        encode(&mut buf, &self.registry)?;
        Ok(buf)
    }
}

impl Default for BridgeMetrics {
    fn default() -> Self {
        Self::new()
    }
}


// EOF

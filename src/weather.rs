// weather.rs

use crate::*;

const ALPACA_CLIENT_ID: u32 = 4242;

// Alpaca wraps every property read in this envelope
#[derive(Debug, Deserialize)]
struct AlpacaValue {
    #[serde(rename = "Value", default)]
    value: Option<f64>,
    #[serde(rename = "ErrorNumber", default)]
    error_number: i64,
    #[serde(rename = "ErrorMessage", default)]
    error_message: String,
}

impl AlpacaValue {
    fn into_value(self, property: &str) -> BridgeResult<f64> {
        if self.error_number != 0 {
            return Err(BridgeError::UpstreamUnavailable(format!(
                "alpaca {property}: error {} {}",
                self.error_number, self.error_message
            )));
        }
        self.value.ok_or_else(|| {
            BridgeError::UpstreamUnavailable(format!("alpaca {property}: no value"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherDoc {
    #[serde(alias = "temp", alias = "ambient_temperature")]
    temperature: f64,
    #[serde(alias = "relative_humidity")]
    humidity: f64,
}

/// Outdoor weather source. Any failure maps to [`BridgeError::UpstreamUnavailable`].
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    source: WeatherSource,
    txn: Arc<AtomicU64>,
}

impl WeatherClient {
    pub fn new(source: WeatherSource, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domeheat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            source,
            txn: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn source(&self) -> &WeatherSource {
        &self.source
    }

    pub async fn fetch(&self) -> BridgeResult<SensorReading> {
        let reading = match &self.source {
            WeatherSource::Alpaca { url, device } => {
                let temperature = self.alpaca_get(url, *device, "temperature").await?;
                let humidity = self.alpaca_get(url, *device, "humidity").await?;
                SensorReading::new(temperature, humidity)
            }
            WeatherSource::Json { url } => {
                let doc: WeatherDoc = self
                    .http
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                SensorReading::new(doc.temperature, doc.humidity)
            }
        };
        debug!("Outdoor reading: {reading:?}");
        Ok(clamp_humidity(reading))
    }

    async fn alpaca_get(&self, base: &str, device: u32, property: &str) -> BridgeResult<f64> {
        let txn = self.txn.fetch_add(1, Ordering::Relaxed);
        let url = alpaca_url(base, device, property);
        let resp: AlpacaValue = self
            .http
            .get(&url)
            .query(&[
                ("ClientID", ALPACA_CLIENT_ID.to_string()),
                ("ClientTransactionID", txn.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        resp.into_value(property)
    }
}

pub fn alpaca_url(base: &str, device: u32, property: &str) -> String {
    format!(
        "{}/api/v1/observingconditions/{device}/{property}",
        base.trim_end_matches('/')
    )
}

// sensors occasionally report a bit over saturation
fn clamp_humidity(mut reading: SensorReading) -> SensorReading {
    if reading.humidity > 100.0 {
        reading.humidity = 100.0;
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpaca_urls() {
        assert_eq!(
            alpaca_url("http://obs.local:11111/", 0, "temperature"),
            "http://obs.local:11111/api/v1/observingconditions/0/temperature"
        );
        assert_eq!(
            alpaca_url("http://obs.local", 2, "humidity"),
            "http://obs.local/api/v1/observingconditions/2/humidity"
        );
    }

    #[test]
    fn alpaca_envelope() {
        let ok: AlpacaValue = serde_json::from_str(
            r#"{"Value": 4.25, "ClientTransactionID": 3, "ServerTransactionID": 77, "ErrorNumber": 0, "ErrorMessage": ""}"#,
        )
        .unwrap();
        assert_eq!(ok.into_value("temperature"), Ok(4.25));

        let err: AlpacaValue = serde_json::from_str(
            r#"{"Value": 0.0, "ErrorNumber": 1031, "ErrorMessage": "Not connected"}"#,
        )
        .unwrap();
        assert!(matches!(
            err.into_value("humidity"),
            Err(BridgeError::UpstreamUnavailable(m)) if m.contains("Not connected")
        ));

        let empty: AlpacaValue = serde_json::from_str(r#"{"ErrorNumber": 0}"#).unwrap();
        assert!(empty.into_value("humidity").is_err());
    }

    #[test]
    fn weather_doc_aliases() {
        let d: WeatherDoc =
            serde_json::from_str(r#"{"ambient_temperature": -2.5, "relative_humidity": 93}"#)
                .unwrap();
        assert_eq!(d.temperature, -2.5);
        assert_eq!(d.humidity, 93.0);
    }

    #[test]
    fn humidity_clamped_to_saturation() {
        let r = clamp_humidity(SensorReading::new(1.0, 100.4));
        assert_eq!(r.humidity, 100.0);
        let r = clamp_humidity(SensorReading::new(1.0, 0.0));
        assert_eq!(r.humidity, 0.0);
    }
}

// EOF

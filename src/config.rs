// config.rs

use std::{fs, path::Path};

use crate::*;

const DEFAULT_API_PORT: u16 = 8001;
const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_MQTT_KEEPALIVE: u64 = 25;
const DEFAULT_MQTT_RETRY_DELAY: u64 = 10;
const DEFAULT_HTTP_TIMEOUT: u64 = 5;
const DEFAULT_ALPACA_URL: &str = "http://boltwood.local:11111";
const DEFAULT_IFTTT_URL: &str = "https://maker.ifttt.com";

pub const CONFIG_ENV: &str = "DOMEHEAT_CONFIG";

/// Where the outdoor reading comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WeatherSource {
    /// ASCOM Alpaca ObservingConditions device
    Alpaca { url: String, device: u32 },
    /// Plain JSON document with `temperature` and `humidity`
    Json { url: String },
}

impl Default for WeatherSource {
    fn default() -> Self {
        WeatherSource::Alpaca {
            url: DEFAULT_ALPACA_URL.into(),
            device: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub port: u16,
    pub log_level: String,

    pub mqtt_url: String,
    pub mqtt_topic: String,
    pub mqtt_client_id: String,
    pub mqtt_keepalive: u64,
    pub mqtt_retry_delay: u64,

    pub weather: WeatherSource,
    pub http_timeout: u64,

    pub dewpoint_plus: f64,
    pub hysteresis: f64,
    pub initial_heater_on: bool,

    pub ifttt_url: String,
    pub ifttt_key: String,
    pub ifttt_event_on: String,
    pub ifttt_event_off: String,
    pub notify_on_change: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: option_env!("API_PORT")
                .unwrap_or("-")
                .parse()
                .unwrap_or(DEFAULT_API_PORT),
            log_level: "info".into(),

            mqtt_url: option_env!("MQTT_URL")
                .unwrap_or("mqtt://192.168.74.11:1883")
                .into(),
            mqtt_topic: option_env!("MQTT_TOPIC").unwrap_or("dome/data").into(),
            mqtt_client_id: "MQTT_Subscriber".into(),
            mqtt_keepalive: DEFAULT_MQTT_KEEPALIVE,
            mqtt_retry_delay: DEFAULT_MQTT_RETRY_DELAY,

            weather: WeatherSource::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,

            dewpoint_plus: DEFAULT_DEWPOINT_PLUS,
            hysteresis: DEFAULT_HYSTERESIS,
            initial_heater_on: false,

            ifttt_url: DEFAULT_IFTTT_URL.into(),
            ifttt_key: String::new(),
            ifttt_event_on: "turn_dome_heater_on".into(),
            ifttt_event_off: "turn_dome_heater_off".into(),
            notify_on_change: false,
        }
    }
}

impl BridgeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => bail!("Cannot read config file {path:?}: {e}"),
        };
        let config: BridgeConfig = match serde_json::from_str(&text) {
            Ok(c) => c,
            Err(e) => bail!("Cannot parse config file {path:?}: {e}"),
        };
        config.validate()?;
        Ok(config)
    }

    /// First command line argument wins over the environment.
    pub fn path_from(arg: Option<String>) -> Option<String> {
        arg.or_else(|| std::env::var(CONFIG_ENV).ok())
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.dewpoint_plus >= 0.0) {
            bail!("dewpoint_plus must be >= 0, got {}", self.dewpoint_plus);
        }
        if !(self.hysteresis >= 0.0) {
            bail!("hysteresis must be >= 0, got {}", self.hysteresis);
        }
        if self.http_timeout == 0 {
            bail!("http_timeout must be at least 1 second");
        }
        if self.mqtt_retry_delay == 0 {
            bail!("mqtt_retry_delay must be at least 1 second");
        }
        if self.mqtt_topic.is_empty() {
            bail!("mqtt_topic must not be empty");
        }
        self.mqtt_host_port()?;
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            dewpoint_plus: self.dewpoint_plus,
            hysteresis: self.hysteresis,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn ifttt_enabled(&self) -> bool {
        !self.ifttt_key.is_empty()
    }

    /// Broker URL in form mqtt://host:port, tcp://host:port or host:port
    pub fn mqtt_host_port(&self) -> anyhow::Result<(String, u16)> {
        let url = self
            .mqtt_url
            .trim_start_matches("mqtt://")
            .trim_start_matches("tcp://");

        let parts: Vec<&str> = url.split(':').collect();
        match parts.as_slice() {
            [host] if !host.is_empty() => Ok((host.to_string(), DEFAULT_MQTT_PORT)),
            [host, port] if !host.is_empty() => match port.parse::<u16>() {
                Ok(p) => Ok((host.to_string(), p)),
                Err(_) => bail!("Invalid port in broker URL: {port}"),
            },
            _ => bail!("Invalid broker URL: {}", self.mqtt_url),
        }
    }

    /// Copy that is safe to show over the API.
    pub fn redacted(&self) -> Self {
        let mut c = self.clone();
        if !c.ifttt_key.is_empty() {
            c.ifttt_key = "********".into();
        }
        c
    }
}


// EOF

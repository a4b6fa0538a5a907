// state.rs

use crate::*;

#[derive(Clone, Debug, Serialize)]
pub struct LastCycle {
    pub timestamp: i64,
    pub last_update: String,
    pub report: CycleReport,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusValues {
    pub version: &'static str,
    pub uptime: Uptime,
    pub mqtt_connected: bool,
    pub messages: u64,
    pub heater_on: bool,
    pub thresholds: Thresholds,
    pub last_error: Option<String>,
    pub last: Option<LastCycle>,
}

pub struct BridgeState {
    pub config: BridgeConfig,
    pub started: DateTime<Utc>,
    pub api_cnt: AtomicU64,
    pub metrics: BridgeMetrics,
    pub weather: WeatherClient,
    pub notifier: Notifier,
    pub mqtt_connected: RwLock<bool>,
    pub heater_on: RwLock<bool>,
    pub last: RwLock<Option<LastCycle>>,
    pub last_error: RwLock<Option<String>>,
}

impl BridgeState {
    pub fn new(config: BridgeConfig) -> anyhow::Result<Self> {
        let weather = WeatherClient::new(config.weather.clone(), config.http_timeout())?;
        let notifier = Notifier::new(&config)?;
        let heater_on = config.initial_heater_on;
        let metrics = BridgeMetrics::new();
        metrics.heater_on.set(heater_on as i64);
        Ok(BridgeState {
            config,
            started: Utc::now(),
            api_cnt: AtomicU64::new(0),
            metrics,
            weather,
            notifier,
            mqtt_connected: RwLock::new(false),
            heater_on: RwLock::new(heater_on),
            last: RwLock::new(None),
            last_error: RwLock::new(None),
        })
    }

    pub async fn status(&self) -> StatusValues {
        StatusValues {
            version: SW_VERSION,
            uptime: Uptime::since(self.started),
            mqtt_connected: *self.mqtt_connected.read().await,
            messages: self.metrics.messages.get(),
            heater_on: *self.heater_on.read().await,
            thresholds: self.config.thresholds(),
            last_error: self.last_error.read().await.clone(),
            last: self.last.read().await.clone(),
        }
    }
}

// EOF

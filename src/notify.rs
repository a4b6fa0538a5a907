// notify.rs

use std::fmt;

use crate::*;

#[derive(Debug, Serialize)]
struct IftttPayload<'a> {
    value1: &'a str,
    value2: String,
    value3: String,
}

/// IFTTT Maker webhook that flips the heater. Delivery is best effort.
#[derive(Clone)]
pub struct Notifier {
    http: reqwest::Client,
    base_url: String,
    key: String,
    event_on: String,
    event_off: String,
}

// the key is part of the trigger URL, keep it out of logs
impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.key.is_empty() { "" } else { "********" };
        f.debug_struct("Notifier")
            .field("base_url", &self.base_url)
            .field("key", &key)
            .field("event_on", &self.event_on)
            .field("event_off", &self.event_off)
            .finish()
    }
}

impl Notifier {
    pub fn new(config: &BridgeConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.ifttt_url.trim_end_matches('/').to_string(),
            key: config.ifttt_key.clone(),
            event_on: config.ifttt_event_on.clone(),
            event_off: config.ifttt_event_off.clone(),
        })
    }

    pub fn enabled(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn event_name(&self, heater_on: bool) -> &str {
        if heater_on {
            &self.event_on
        } else {
            &self.event_off
        }
    }

    pub fn trigger_url(&self, heater_on: bool) -> String {
        format!(
            "{}/trigger/{}/with/key/{}",
            self.base_url,
            self.event_name(heater_on),
            self.key
        )
    }

    /// Send the decision. Callers log the error and carry on.
    pub async fn notify(&self, report: &CycleReport) -> anyhow::Result<()> {
        let heater_on = report.heater_on();
        let event = self.event_name(heater_on);
        if !self.enabled() {
            info!("IFTTT disabled, would trigger {event}: {}", report.decision.label());
            return Ok(());
        }

        let payload = IftttPayload {
            value1: report.decision.label(),
            value2: format!("{:.1}", report.indoor.temperature.unwrap_or_default()),
            value3: format!("{:.1}", report.decision.dew_point),
        };

        let resp = self
            .http
            .post(self.trigger_url(heater_on))
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Failed to trigger IFTTT {event}: {status} {body}");
        }

        info!(
            "IFTTT triggered: {event} with values {}, {}, {}",
            payload.value1, payload.value2, payload.value3
        );
        Ok(())
    }
}


// EOF

// bridge.rs

use crate::*;

/// Process one delivered sensor message end to end.
///
/// Errors are logged here and returned for inspection; they never
/// stop the subscriber.
pub async fn handle_message(
    state: &BridgeState,
    topic: &str,
    payload: &[u8],
) -> BridgeResult<CycleReport> {
    let cnt = state.metrics.count_message();
    info!(
        "#{cnt} Received message: {} on topic {topic}",
        String::from_utf8_lossy(payload)
    );

    let result = run_cycle(state, payload).await;
    match &result {
        Ok(report) => {
            *state.last_error.write().await = None;
            if report.changed() || !state.config.notify_on_change {
                if let Err(e) = state.notifier.notify(report).await {
                    error!("Webhook delivery failed: {e:#}");
                }
            } else {
                debug!("Heater state unchanged, not notifying");
            }
        }
        Err(e) => {
            match e {
                BridgeError::MalformedMessage(_) => error!("Discarding message: {e}"),
                BridgeError::UpstreamUnavailable(_) => {
                    warn!("Skipping evaluation, keeping heater command: {e}")
                }
                BridgeError::InvalidInput(_) => error!("Evaluation aborted: {e}"),
            }
            *state.last_error.write().await = Some(e.to_string());
        }
    }
    result
}

async fn run_cycle(state: &BridgeState, payload: &[u8]) -> BridgeResult<CycleReport> {
    let indoor = IndoorReading::from_payload(payload)?;
    state.metrics.record_indoor(&indoor);

    let outdoor = state.weather.fetch().await;
    if let Ok(o) = &outdoor {
        state.metrics.record_outdoor(o);
    }

    let previous = *state.heater_on.read().await;
    let report = evaluate_cycle(&indoor, outdoor, previous, &state.config.thresholds())?;
    let d = &report.decision;
    info!(
        "Indoor Temp: {:.1}°C, Outdoor Temp: {:.1}°C, Dew Point: {:.1}°C, band {:.1}..{:.1}°C -> {}",
        indoor.temperature.unwrap_or_default(),
        report.outdoor.temperature,
        d.dew_point,
        d.low_threshold,
        d.high_threshold,
        d.label(),
    );

    state.metrics.record_decision(d);
    *state.heater_on.write().await = d.heater_on;

    let now = Utc::now();
    *state.last.write().await = Some(LastCycle {
        timestamp: now.timestamp(),
        last_update: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        report: report.clone(),
    });
    Ok(report)
}

// EOF

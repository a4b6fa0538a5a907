// mqtt.rs

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};

use crate::*;

pub async fn run_mqtt(state: Arc<BridgeState>) -> anyhow::Result<()> {
    let (host, port) = state.config.mqtt_host_port()?;
    let retry_delay = Duration::from_secs(state.config.mqtt_retry_delay);

    loop {
        info!("MQTT connecting to {host}:{port}...");
        let mut opts = MqttOptions::new(&state.config.mqtt_client_id, &host, port);
        opts.set_keep_alive(Duration::from_secs(state.config.mqtt_keepalive));
        opts.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(opts, 16);
        if let Err(e) = event_loop(&state, client, eventloop).await {
            error!("MQTT connection failed: {e:#}");
        }
        *state.mqtt_connected.write().await = false;

        info!("MQTT reconnecting in {}s", retry_delay.as_secs());
        sleep(retry_delay).await;
    }
}

async fn event_loop(
    state: &BridgeState,
    client: AsyncClient,
    mut conn: EventLoop,
) -> anyhow::Result<()> {
    let topic = state.config.mqtt_topic.as_str();
    loop {
        match conn.poll().await? {
            Event::Incoming(Packet::ConnAck(_)) => {
                info!("Connected to MQTT broker");
                *state.mqtt_connected.write().await = true;
                // clean session, so subscribe again on every connect
                client.subscribe(topic, QoS::AtLeastOnce).await?;
            }
            Event::Incoming(Packet::SubAck(_)) => {
                info!("Subscribed to {topic}");
            }
            Event::Incoming(Packet::Publish(publish)) => {
                // result is already logged
                let _ = handle_message(state, &publish.topic, &publish.payload).await;
            }
            Event::Incoming(Packet::Disconnect) => {
                bail!("broker sent disconnect");
            }
            _ => {}
        }
    }
}

// EOF

// build.rs

use std::env;

fn main() -> anyhow::Result<()> {
    for var in ["MQTT_URL", "MQTT_TOPIC", "API_PORT"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let mqtt_url = env::var("MQTT_URL").unwrap_or_else(|_| "mqtt://192.168.74.11:1883".into());
    let mqtt_topic = env::var("MQTT_TOPIC").unwrap_or_else(|_| "dome/data".into());
    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8001".into());

    println!("cargo:rustc-env=MQTT_URL={mqtt_url}");
    println!("cargo:rustc-env=MQTT_TOPIC={mqtt_topic}");
    println!("cargo:rustc-env=API_PORT={api_port}");

    Ok(())
}

// EOF

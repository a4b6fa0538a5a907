// bin/domeheat.rs

use std::sync::Arc;

use domeheat::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config_path = BridgeConfig::path_from(std::env::args().nth(1));
    let config = match BridgeConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting up domeheat v{SW_VERSION}");
    match &config_path {
        Some(p) => info!("Config read from {p}"),
        None => warn!("No config file given, using built-in defaults"),
    }
    info!("My config:\n{:#?}", config.redacted());

    let state = Arc::new(BridgeState::new(config)?);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async move {
            info!("Entering main loop...");
            tokio::select! {
                r = run_mqtt(state.clone()) => { error!("run_mqtt() ended: {r:?}"); }
                r = run_api_server(state.clone()) => { error!("run_api_server() ended: {r:?}"); }
                _ = tokio::signal::ctrl_c() => { info!("Interrupted, shutting down."); }
            };
        });

    info!("main() finished.");
    Ok(())
}

// EOF

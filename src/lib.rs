// lib.rs

pub use std::{
    net,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

pub use anyhow::bail;
pub use chrono::*;
pub use serde::{Deserialize, Serialize};
pub use tokio::{
    sync::RwLock,
    time::{Duration, sleep},
};
pub use tracing::*;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod dewpoint;
pub use dewpoint::*;

mod control;
pub use control::*;

mod reading;
pub use reading::*;

mod cycle;
pub use cycle::*;

mod metrics;
pub use metrics::*;

mod weather;
pub use weather::*;

mod notify;
pub use notify::*;

mod state;
pub use state::*;

mod bridge;
pub use bridge::*;

mod mqtt;
pub use mqtt::*;

mod apiserver;
pub use apiserver::*;

pub const SW_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, Serialize)]
pub struct Uptime {
    pub uptime: u64,
    pub uptime_s: String,
}

impl Uptime {
    pub fn since(started: DateTime<Utc>) -> Self {
        let secs = (Utc::now() - started).num_seconds().max(0) as u64;
        Uptime {
            uptime: secs,
            uptime_s: format_uptime(secs),
        }
    }
}

pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    if days > 0 {
        format!("{days}d {hours}h {mins}m {secs}s")
    } else {
        format!("{hours}h {mins}m {secs}s")
    }
}


// EOF

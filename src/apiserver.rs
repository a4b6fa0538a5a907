// apiserver.rs

use askama::Template;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Response, StatusCode, header},
    response::{Html, IntoResponse},
    routing::*,
};
use tower_http::trace::TraceLayer;

use crate::*;

type SharedState = Arc<BridgeState>;

#[derive(Template)]
#[template(path = "index.html.ask", escape = "html")]
struct IndexTemplate<'a> {
    status: &'a StatusValues,
    topic: &'a str,
    heater: &'static str,
}

pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/uptime", get(get_uptime))
        .route("/status", get(get_status))
        .route("/config", get(get_config))
        .route("/metrics", get(get_metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_api_server(state: SharedState) -> anyhow::Result<()> {
    let listen = format!("0.0.0.0:{}", state.config.port);
    let addr = listen.parse::<net::SocketAddr>()?;

    let app = api_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening to {listen}");
    Ok(axum::serve(listener, app.into_make_service()).await?)
}

pub async fn get_index(State(state): State<SharedState>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_index()");

    let status = state.status().await;
    let page = IndexTemplate {
        status: &status,
        topic: &state.config.mqtt_topic,
        heater: heater_label(status.heater_on),
    };
    match page.render() {
        Err(e) => {
            let err_msg = format!("Index template error: {e:?}\n");
            error!("{err_msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, err_msg).into_response()
        }
        Ok(s) => (StatusCode::OK, Html(s)).into_response(),
    }
}

pub async fn get_uptime(State(state): State<SharedState>) -> (StatusCode, Json<Uptime>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_uptime()");

    (StatusCode::OK, Json(Uptime::since(state.started)))
}

pub async fn get_status(State(state): State<SharedState>) -> (StatusCode, Json<StatusValues>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_status()");

    (StatusCode::OK, Json(state.status().await))
}

pub async fn get_config(State(state): State<SharedState>) -> (StatusCode, Json<BridgeConfig>) {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    info!("#{cnt} get_config()");

    (StatusCode::OK, Json(state.config.redacted()))
}

pub async fn get_metrics(State(state): State<SharedState>) -> Response<Body> {
    let cnt = state.api_cnt.fetch_add(1, Ordering::Relaxed);
    debug!("#{cnt} get_metrics()");

    match state.metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                "application/openmetrics-text; version=1.0.0; charset=utf-8",
            )],
            text,
        )
            .into_response(),
        Err(e) => {
            let msg = format!("Metrics encoding error: {e:?}");
            error!("{msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
        }
    }
}

// EOF

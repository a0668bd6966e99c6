use crate::{
    config::Config,
    metrics::METRICS_HANDLE,
    notification::{Notification, RejectReason},
    render::Renderer,
    report::Report,
};
use axum::{
    Router,
    body::Bytes,
    extract::{ConnectInfo, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use hyper::StatusCode;
use std::net::{IpAddr, SocketAddr};
use tracing::Instrument;

/// Creates an Axum Web Server
pub async fn create_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting the web server");

    let app = create_router(Renderer::new(config.render.legacy_string_marker));

    let host: IpAddr = config
        .http
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Unable to parse address '{}': {}", config.http.host, e))?;
    let addr = SocketAddr::new(host, config.http.port);

    tracing::info!("Listening on port {}...", addr.port());

    axum_server::bind(addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}

/// Create the router for the application
pub fn create_router(renderer: Renderer) -> Router {
    Router::new()
        .route("/alive", get(alive))
        .route("/metrics", get(metrics))
        .route("/", post(receive))
        .route("/*path", post(receive))
        .with_state(renderer)
}

/// This is the handler for the /alive path
async fn alive() -> StatusCode {
    crate::metrics::http::record_http_request("/alive");
    let _timer = crate::metrics::http::http_request_timer("/alive");

    StatusCode::OK
}

/// This is the handler for the /metrics path
#[tracing::instrument]
async fn metrics() -> impl IntoResponse {
    crate::metrics::http::record_http_request("/metrics");
    let _timer = crate::metrics::http::http_request_timer("/metrics");

    match METRICS_HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get the metrics handle".to_string(),
        ),
    }
}

/// This is the handler for notifications, posted to any path
async fn receive(
    State(renderer): State<Renderer>,
    remote: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> Response {
    crate::metrics::http::record_http_request("receive");
    let _timer = crate::metrics::http::http_request_timer("receive");

    let remote = remote.map(|ConnectInfo(addr)| addr.to_string());

    let notification = match Notification::from_slice(&body) {
        Ok(notification) => notification,
        Err(e) => {
            let reason = RejectReason::from(&e);
            crate::metrics::notifications::record_rejected(reason);

            tracing::warn!(
                remote = remote.as_deref(),
                reason = %reason,
                "Rejected notification: {}",
                e
            );

            return (StatusCode::BAD_REQUEST, format!("Invalid notification: {e}")).into_response();
        }
    };

    let span = tracing::info_span!(
        "notification",
        remote = remote.as_deref(),
        receiver = notification.receiver.as_deref(),
        group_key = notification.group_key.as_deref(),
        external_url = notification.external_url.as_deref(),
        version = notification.version.as_deref(),
    );

    async {
        if let Some(truncated) = notification.truncated_alerts.filter(|n| *n > 0) {
            tracing::warn!("Sender truncated {} alerts from this notification", truncated);
        }

        // One event per report keeps concurrent reports from interleaving
        tracing::info!("{}", Report::new(&notification, &renderer));

        crate::metrics::notifications::record_notification(&notification);
    }
    .instrument(span)
    .await;

    StatusCode::OK.into_response()
}

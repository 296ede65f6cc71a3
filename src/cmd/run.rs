//! `flaggate run` — start the gateway server.
//!
//! Validates the startup settings fail-fast, builds the backend client
//! and the gateway mount, and serves the composed router with graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::api::HttpMonitorApi;
use crate::cli::RunArgs;
use crate::config::Settings;
use crate::error::GatewayError;
use crate::logging;
use crate::observer::{LogSink, TracingSink};
use crate::routes::{self, ApiHandle, AuthKey};
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), GatewayError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let settings = Settings::from_run_args(&args)?;

    let api: ApiHandle = Arc::new(HttpMonitorApi::new(&settings.api_url, settings.timeout_ms));
    let key: AuthKey = Arc::from(settings.api_key.as_str());
    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);

    let route_count = routes::feature_flag_bindings().len();
    let gateway = routes::mount(api, key, sink)?;

    let state = Arc::new(AppState {
        upstream: settings.api_url.to_string(),
        prefix: settings.prefix.clone(),
        route_count,
        start_time: Instant::now(),
    });
    let router = server::build_router(state, gateway, &settings.prefix, settings.max_body);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        upstream = %settings.api_url,
        prefix = %settings.prefix,
        routes = route_count,
        "flaggate started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("flaggate stopped");
    Ok(())
}

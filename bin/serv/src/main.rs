use anyhow::Context;
use axum::{Router, middleware, routing::get};
use distill_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("failed to load configuration")?;

    distill_api::tracing::init_tracing(&config.env);

    let metrics_handle = distill_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let pool = distill_db::create_pool(&config.database_url, config.db_max_connections).await?;
    distill_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    let state = ApiState::new(&config, pool);

    let cors = distill_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Metrics are served from their own router so they carry no API state
    let metrics_app = Router::new()
        .route("/metrics", get(distill_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = distill_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(distill_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            distill_api::middleware::request_id::request_id_middleware,
        ));

    let app = distill_api::middleware::security_headers::apply_security_headers(
        app,
        config.env.clone(),
    );

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!(environment = ?config.env, "Distill search API listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}

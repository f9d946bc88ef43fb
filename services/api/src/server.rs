use crate::cli::ServeArgs;
use crate::infra::{load_catalog, load_scoring_config, AppState, InMemoryBetRepository};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bet_ranking::config::AppConfig;
use bet_ranking::error::AppError;
use bet_ranking::rankings::RankingService;
use bet_ranking::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.data.catalog_csv = Some(catalog);
    }
    if let Some(scoring_config) = args.scoring_config.take() {
        config.data.scoring_config = Some(scoring_config);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let bets = load_catalog(config.data.catalog_csv.as_deref())?;
    let scoring_config = load_scoring_config(config.data.scoring_config.as_deref())?;
    let repository = Arc::new(InMemoryBetRepository::from_bets(bets));
    let ranking_service = Arc::new(RankingService::new(repository, scoring_config));

    let app = with_ranking_routes(ranking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "bet ranking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

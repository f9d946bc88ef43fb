use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use bet_ranking::catalog::CatalogImporter;
use bet_ranking::error::AppError;
use bet_ranking::rankings::{
    ranking_router, star_rating, BetRepository, OverallVariant, RankedEntry, Ranking,
    RankingService, ScoringConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

const DEFAULT_CATALOG_TOP: usize = 10;

/// Ad-hoc ranking of a catalog export posted inline, without touching the served catalog.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogRankRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) variant: OverallVariant,
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogRankResponse {
    pub(crate) variant: OverallVariant,
    pub(crate) total: usize,
    pub(crate) entries: Vec<CatalogRankEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogRankEntry {
    #[serde(flatten)]
    pub(crate) entry: RankedEntry,
    pub(crate) stars: f64,
}

pub(crate) fn with_ranking_routes<R>(service: Arc<RankingService<R>>) -> Router
where
    R: BetRepository + 'static,
{
    let scoring = Arc::new(service.config().clone());

    ranking_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/catalog/rank",
            post(move |body| catalog_rank_endpoint(scoring.clone(), body)),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "loading")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_rank_endpoint(
    scoring: Arc<ScoringConfig>,
    Json(payload): Json<CatalogRankRequest>,
) -> Result<Json<CatalogRankResponse>, AppError> {
    let CatalogRankRequest { csv, variant, top } = payload;

    let bets = CatalogImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let ranking = Ranking::overall(&bets, variant, &scoring);
    let total = ranking.len();
    let entries = ranking
        .top(top.unwrap_or(DEFAULT_CATALOG_TOP))
        .iter()
        .map(|entry| CatalogRankEntry {
            stars: star_rating(entry.score),
            entry: entry.clone(),
        })
        .collect();

    Ok(Json(CatalogRankResponse {
        variant,
        total,
        entries,
    }))
}

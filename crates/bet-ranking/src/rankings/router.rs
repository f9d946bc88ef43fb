use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::comparison::ComparisonError;
use super::domain::BetId;
use super::repository::{BetRepository, RepositoryError};
use super::scoring::OverallVariant;
use super::service::{OverviewQuery, RankingService, RankingServiceError, DEFAULT_TOP};

/// Router builder exposing the ranking, dashboard and comparison endpoints.
pub fn ranking_router<R>(service: Arc<RankingService<R>>) -> Router
where
    R: BetRepository + 'static,
{
    Router::new()
        .route("/api/v1/bets/ranking", get(overview_handler::<R>))
        .route("/api/v1/bets/ranking/full", get(full_ranking_handler::<R>))
        .route("/api/v1/bets/compare", post(compare_handler::<R>))
        .route("/api/v1/bets/:bet_id/dashboard", get(dashboard_handler::<R>))
        .route(
            "/api/v1/categories/:category/ranking",
            get(category_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OverviewParams {
    pub(crate) variant: Option<String>,
    pub(crate) top: Option<usize>,
    pub(crate) window: Option<usize>,
    pub(crate) bet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VariantParams {
    pub(crate) variant: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopParams {
    pub(crate) top: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub(crate) bet_ids: Vec<String>,
}

/// Response envelope stamping when the scores were computed.
#[derive(Debug, Serialize)]
struct Computed<T> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: T,
}

fn computed<T: Serialize>(body: T) -> Response {
    let payload = Computed {
        generated_at: Utc::now(),
        body,
    };
    (StatusCode::OK, Json(payload)).into_response()
}

fn parse_variant(raw: Option<&str>) -> Result<OverallVariant, Response> {
    match raw {
        None => Ok(OverallVariant::default()),
        Some(value) => value.parse().map_err(|message: String| {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }),
    }
}

pub(crate) async fn overview_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Query(params): Query<OverviewParams>,
) -> Response
where
    R: BetRepository + 'static,
{
    let variant = match parse_variant(params.variant.as_deref()) {
        Ok(variant) => variant,
        Err(response) => return response,
    };
    let defaults = OverviewQuery::default();
    let query = OverviewQuery {
        variant,
        top: params.top.unwrap_or(defaults.top),
        window: params.window.unwrap_or(defaults.window),
        reference: params
            .bet
            .filter(|bet| !bet.trim().is_empty())
            .map(BetId),
    };

    match service.overview(&query) {
        Ok(overview) => computed(overview),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn full_ranking_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Query(params): Query<VariantParams>,
) -> Response
where
    R: BetRepository + 'static,
{
    let variant = match parse_variant(params.variant.as_deref()) {
        Ok(variant) => variant,
        Err(response) => return response,
    };

    match service.full_ranking(variant) {
        Ok(entries) => computed(json!({ "variant": variant, "entries": entries })),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Path(bet_id): Path<String>,
) -> Response
where
    R: BetRepository + 'static,
{
    match service.dashboard(&BetId(bet_id)) {
        Ok(dashboard) => computed(dashboard),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn category_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Path(category): Path<String>,
    Query(params): Query<TopParams>,
) -> Response
where
    R: BetRepository + 'static,
{
    match service.category_top(&category, params.top.unwrap_or(DEFAULT_TOP)) {
        Ok(ranking) => computed(ranking),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn compare_handler<R>(
    State(service): State<Arc<RankingService<R>>>,
    Json(request): Json<CompareRequest>,
) -> Response
where
    R: BetRepository + 'static,
{
    let ids: Vec<BetId> = request.bet_ids.into_iter().map(BetId).collect();
    match service.compare(&ids) {
        Ok(report) => computed(report),
        Err(error) => error.into_response(),
    }
}

impl IntoResponse for RankingServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            RankingServiceError::UnknownBet(_) | RankingServiceError::UnknownCategory(_) => {
                StatusCode::NOT_FOUND
            }
            RankingServiceError::Comparison(
                ComparisonError::InvalidSelection(_) | ComparisonError::DuplicateBet(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            RankingServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}

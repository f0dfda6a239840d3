use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::{
    cache::CacheStats,
    error::{AppError, AppResult},
    middleware::RequestId,
    models::RecommendationResult,
    services::recommendations::{
        DEFAULT_COLLABORATIVE_LIMIT, DEFAULT_CONTENT_LIMIT, DEFAULT_HYBRID_LIMIT,
        DEFAULT_TEACHER_LIMIT,
    },
};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    /// Applies the strategy default and rejects values outside `1..=max`
    fn resolve(&self, default: usize, max: usize) -> AppResult<usize> {
        let limit = self.limit.unwrap_or(default);
        if limit == 0 || limit > max {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                max
            )));
        }
        Ok(limit)
    }
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Courses similar to a given course
pub async fn content_based(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(course_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResult>> {
    let limit = query.resolve(DEFAULT_CONTENT_LIMIT, state.max_limit)?;
    tracing::info!(request_id = %request_id, course_id = %course_id, limit, "Content-based request");

    Ok(Json(state.recommender.content_based(&course_id, limit).await))
}

/// Courses endorsed by similar users
pub async fn collaborative(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResult>> {
    let limit = query.resolve(DEFAULT_COLLABORATIVE_LIMIT, state.max_limit)?;
    tracing::info!(request_id = %request_id, user_id = %user_id, limit, "Collaborative request");

    Ok(Json(state.recommender.collaborative(&user_id, limit).await))
}

/// Blend of collaborative and content-based results
pub async fn hybrid(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResult>> {
    let limit = query.resolve(DEFAULT_HYBRID_LIMIT, state.max_limit)?;
    tracing::info!(request_id = %request_id, user_id = %user_id, limit, "Hybrid request");

    Ok(Json(state.recommender.hybrid(&user_id, limit).await))
}

/// Courses matching a teacher's subject and preferences
pub async fn teacher_profile(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResult>> {
    let limit = query.resolve(DEFAULT_TEACHER_LIMIT, state.max_limit)?;
    tracing::info!(request_id = %request_id, user_id = %user_id, limit, "Teacher-profile request");

    Ok(Json(state.recommender.teacher_profile(&user_id, limit).await))
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.recommender.cache().stats())
}

pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.recommender.cache().clear();
    tracing::info!("Recommendation cache cleared");
    StatusCode::NO_CONTENT
}

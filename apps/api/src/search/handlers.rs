//! Axum route handlers for the Search API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::search::pipeline::{discover, DiscoveryReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchCandidatesRequest {
    pub queries: Vec<String>,
    pub min_results: usize,
    #[serde(default)]
    pub existing_links: Vec<String>,
}

/// POST /api/v1/search/candidates
///
/// Runs candidate discovery directly against caller-supplied queries.
/// Fewer than `min_results` candidates is a normal outcome, not an error.
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    Json(request): Json<SearchCandidatesRequest>,
) -> Result<Json<DiscoveryReport>, AppError> {
    if request.queries.iter().all(|q| q.trim().is_empty()) {
        return Err(AppError::Validation("queries cannot be empty".to_string()));
    }
    if request.min_results == 0 {
        return Err(AppError::Validation(
            "min_results must be at least 1".to_string(),
        ));
    }

    let report = discover(
        state.search.as_ref(),
        &request.queries,
        request.min_results,
        request.existing_links,
        &state.config.discovery_options(),
    )
    .await;

    Ok(Json(report))
}

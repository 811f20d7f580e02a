//! Axum route handlers for the Workspace API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::search::pipeline::{discover, StopReason};
use crate::state::AppState;
use crate::workspace::drafts::{save_draft, take_draft, DraftTarget, QueryDraft};
use crate::workspace::export::{export_filename, workspace_csv};
use crate::workspace::models::{NewWorkspace, Profile, Workspace, WorkspaceSummary};
use crate::workspace::queries::{effective_queries, generate_queries};
use crate::workspace::store;
use crate::workspace::template::fill_if_present;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    #[serde(default)]
    pub title: String,
    pub job_description: String,
    pub candidate_count: Option<i32>,
    pub query_count: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft_id: Uuid,
    pub target: DraftTarget,
    pub queries: Vec<String>,
    pub candidate_count: i32,
}

impl From<QueryDraft> for DraftResponse {
    fn from(draft: QueryDraft) -> Self {
        Self {
            draft_id: draft.draft_id,
            target: draft.target,
            queries: draft.queries,
            candidate_count: draft.candidate_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmDraftRequest {
    /// Queries as edited in the preview. Blank or absent means "use the generated ones".
    pub queries: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmDraftResponse {
    pub workspace: Workspace,
    pub added: u64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct SetCheckedRequest {
    pub link: String,
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
pub struct OpenProfileRequest {
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct OpenProfileResponse {
    pub link: String,
    pub profile: Profile,
    /// `None` when the workspace template is blank.
    pub filled_template: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Query previews
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workspaces/preview
///
/// Generates search queries for a new workspace and parks them as a draft.
/// Nothing is persisted until the draft is confirmed.
pub async fn handle_preview_workspace(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let workspace = NewWorkspace::with_defaults(
        &request.title,
        &request.job_description,
        request.candidate_count,
        request.query_count,
    );
    let queries =
        generate_queries(&state.llm, &workspace.job_description, workspace.query_count).await?;
    let candidate_count = workspace.candidate_count;

    let draft = QueryDraft::new(
        DraftTarget::NewWorkspace { workspace },
        queries,
        candidate_count,
    );
    save_draft(&state.redis, &draft, state.config.draft_ttl_secs).await?;

    Ok(Json(draft.into()))
}

/// POST /api/v1/workspaces/:id/more
///
/// Generates fresh queries for an existing workspace. Confirming the draft
/// appends candidates the workspace does not already have.
pub async fn handle_more_candidates(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
) -> Result<Json<DraftResponse>, AppError> {
    let workspace = require_workspace(&state, workspace_id).await?;
    info!("Getting more candidates for workspace: {}", workspace.row.title);

    let queries = generate_queries(
        &state.llm,
        &workspace.row.job_description,
        workspace.row.query_count,
    )
    .await?;

    let draft = QueryDraft::new(
        DraftTarget::ExistingWorkspace { workspace_id },
        queries,
        workspace.row.candidate_count,
    );
    save_draft(&state.redis, &draft, state.config.draft_ttl_secs).await?;

    Ok(Json(draft.into()))
}

/// POST /api/v1/workspaces/:id/duplicate
///
/// Starts a new workspace with the same job description, counts and template.
pub async fn handle_duplicate_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
) -> Result<Json<DraftResponse>, AppError> {
    let source = require_workspace(&state, workspace_id).await?;
    let workspace = NewWorkspace::duplicate_of(&source.row);
    info!("Duplicating workspace: {}", source.row.title);

    let queries =
        generate_queries(&state.llm, &workspace.job_description, workspace.query_count).await?;
    let candidate_count = workspace.candidate_count;

    let draft = QueryDraft::new(
        DraftTarget::NewWorkspace { workspace },
        queries,
        candidate_count,
    );
    save_draft(&state.redis, &draft, state.config.draft_ttl_secs).await?;

    Ok(Json(draft.into()))
}

/// POST /api/v1/drafts/:draft_id/confirm
///
/// Runs candidate discovery for a draft and stores the results, either as a
/// new workspace or appended to the draft's workspace.
pub async fn handle_confirm_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    request: Option<Json<ConfirmDraftRequest>>,
) -> Result<Json<ConfirmDraftResponse>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let draft = take_draft(&state.redis, draft_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Draft {draft_id} not found or expired")))?;

    let queries = effective_queries(request.queries.as_deref(), &draft.queries);
    let min_results = usize::try_from(draft.candidate_count).unwrap_or_default();
    let options = state.config.discovery_options();

    let response = match draft.target {
        DraftTarget::NewWorkspace { workspace } => {
            let report = discover(
                state.search.as_ref(),
                &queries,
                min_results,
                Vec::<String>::new(),
                &options,
            )
            .await;
            let profiles: Vec<Profile> = report.candidates.into_iter().map(Profile::from).collect();
            let workspace = store::create_workspace(&state.db, &workspace, &profiles).await?;

            ConfirmDraftResponse {
                added: workspace.profiles.len() as u64,
                workspace,
                stop_reason: report.stop_reason,
            }
        }
        DraftTarget::ExistingWorkspace { workspace_id } => {
            let existing = require_workspace(&state, workspace_id).await?;
            info!(
                "Searching for candidates (existing: {}, requested: {})",
                existing.profiles.len(),
                min_results
            );
            let existing_links: Vec<String> = existing.links().map(String::from).collect();

            let report = discover(
                state.search.as_ref(),
                &queries,
                min_results,
                existing_links,
                &options,
            )
            .await;
            let profiles: Vec<Profile> = report.candidates.into_iter().map(Profile::from).collect();
            let added = store::append_profiles(&state.db, workspace_id, &profiles).await?;

            ConfirmDraftResponse {
                workspace: require_workspace(&state, workspace_id).await?,
                added,
                stop_reason: report.stop_reason,
            }
        }
    };

    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Workspaces
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/workspaces
pub async fn handle_list_workspaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkspaceSummary>>, AppError> {
    Ok(Json(store::list_workspaces(&state.db).await?))
}

/// GET /api/v1/workspaces/:id
pub async fn handle_get_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Workspace>, AppError> {
    Ok(Json(require_workspace(&state, workspace_id).await?))
}

/// DELETE /api/v1/workspaces/:id
pub async fn handle_delete_workspace(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !store::delete_workspace(&state.db, workspace_id).await? {
        return Err(workspace_not_found(workspace_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/workspaces/:id/template
pub async fn handle_update_template(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<StatusCode, AppError> {
    if !store::update_template(&state.db, workspace_id, &request.template).await? {
        return Err(workspace_not_found(workspace_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/workspaces/:id/export.csv
pub async fn handle_export_csv(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let workspace = require_workspace(&state, workspace_id).await?;
    let csv = workspace_csv(&workspace);
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&workspace));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/workspaces/:id/profiles/checked
pub async fn handle_set_checked(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
    Json(request): Json<SetCheckedRequest>,
) -> Result<Json<Profile>, AppError> {
    let profile =
        store::set_profile_checked(&state.db, workspace_id, &request.link, request.checked)
            .await?
            .ok_or_else(|| profile_not_found(workspace_id, &request.link))?;
    Ok(Json(profile))
}

/// POST /api/v1/workspaces/:id/profiles/open
///
/// The user is about to contact this candidate: mark them checked and hand
/// back the workspace template filled in for them.
pub async fn handle_open_profile(
    State(state): State<AppState>,
    Path(workspace_id): Path<i64>,
    Json(request): Json<OpenProfileRequest>,
) -> Result<Json<OpenProfileResponse>, AppError> {
    let workspace = require_workspace(&state, workspace_id).await?;
    let mut profile = workspace
        .profiles
        .iter()
        .find(|p| p.link == request.link)
        .cloned()
        .ok_or_else(|| profile_not_found(workspace_id, &request.link))?;

    if !profile.checked {
        profile = store::set_profile_checked(&state.db, workspace_id, &profile.link, true)
            .await?
            .ok_or_else(|| profile_not_found(workspace_id, &request.link))?;
        info!("Auto-checked profile: {}", profile.name);
    }

    let filled_template = fill_if_present(&workspace.row.template, &profile);

    Ok(Json(OpenProfileResponse {
        link: profile.link.clone(),
        profile,
        filled_template,
    }))
}

async fn require_workspace(state: &AppState, workspace_id: i64) -> Result<Workspace, AppError> {
    store::get_workspace(&state.db, workspace_id)
        .await?
        .ok_or_else(|| workspace_not_found(workspace_id))
}

fn workspace_not_found(workspace_id: i64) -> AppError {
    AppError::NotFound(format!("Workspace {workspace_id} not found"))
}

fn profile_not_found(workspace_id: i64, link: &str) -> AppError {
    AppError::NotFound(format!("Profile {link} not found in workspace {workspace_id}"))
}

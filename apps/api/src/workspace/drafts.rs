//! Pending query previews.
//!
//! Generating queries and running the search are two requests: the user
//! reviews (and may edit) the generated queries in between. The draft holding
//! them lives in Redis with a TTL and is claimed exactly once on confirm.

use chrono::{DateTime, Utc};
use redis::Client as RedisClient;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::workspace::models::NewWorkspace;

const KEY_PREFIX: &str = "outreach:draft:";

/// Where confirmed candidates go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftTarget {
    /// Create a workspace with these parameters.
    NewWorkspace { workspace: NewWorkspace },
    /// Append to an existing workspace, skipping links it already holds.
    ExistingWorkspace { workspace_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDraft {
    pub draft_id: Uuid,
    pub target: DraftTarget,
    pub queries: Vec<String>,
    pub candidate_count: i32,
    pub created_at: DateTime<Utc>,
}

impl QueryDraft {
    pub fn new(target: DraftTarget, queries: Vec<String>, candidate_count: i32) -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            target,
            queries,
            candidate_count,
            created_at: Utc::now(),
        }
    }
}

fn draft_key(draft_id: Uuid) -> String {
    format!("{KEY_PREFIX}{draft_id}")
}

pub async fn save_draft(
    redis: &RedisClient,
    draft: &QueryDraft,
    ttl_secs: u64,
) -> Result<(), AppError> {
    let payload = serde_json::to_string(draft).map_err(anyhow::Error::from)?;
    let mut conn = redis.get_multiplexed_async_connection().await?;

    redis::cmd("SET")
        .arg(draft_key(draft.draft_id))
        .arg(payload)
        .arg("EX")
        .arg(ttl_secs)
        .query_async::<_, ()>(&mut conn)
        .await?;

    debug!("Saved query draft {} ({} queries)", draft.draft_id, draft.queries.len());
    Ok(())
}

/// Removes and returns a draft. `None` if it never existed or has expired.
pub async fn take_draft(redis: &RedisClient, draft_id: Uuid) -> Result<Option<QueryDraft>, AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;

    let payload: Option<String> = redis::cmd("GETDEL")
        .arg(draft_key(draft_id))
        .query_async(&mut conn)
        .await?;

    payload
        .map(|p| serde_json::from_str(&p).map_err(|e| AppError::Internal(e.into())))
        .transpose()
}

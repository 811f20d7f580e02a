use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::search::models::Candidate;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_CANDIDATE_COUNT: i32 = 10;
pub const DEFAULT_QUERY_COUNT: i32 = 3;
pub const DEFAULT_TEMPLATE: &str = "Hi [Name],\n\nContent\n\nBest regards,\nYour Name";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkspaceRow {
    pub id: i64,
    pub title: String,
    pub job_description: String,
    pub candidate_count: i32,
    pub query_count: i32,
    pub template: String,
    pub created_at: DateTime<Utc>,
}

/// A candidate attached to a workspace, with its outreach-contacted flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub page_title: String,
    pub link: String,
    pub name: String,
    pub job_title: String,
    pub checked: bool,
}

impl From<Candidate> for Profile {
    fn from(candidate: Candidate) -> Self {
        Self {
            page_title: candidate.page_title,
            link: candidate.link,
            name: candidate.name,
            job_title: candidate.job_title,
            checked: false,
        }
    }
}

/// Full workspace as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct Workspace {
    #[serde(flatten)]
    pub row: WorkspaceRow,
    pub profiles: Vec<Profile>,
}

impl Workspace {
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.link.as_str())
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkspaceSummary {
    pub id: i64,
    pub title: String,
    pub candidate_count: i32,
    pub query_count: i32,
    pub profile_count: i64,
    pub checked_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Parameters for a workspace that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkspace {
    pub title: String,
    pub job_description: String,
    pub candidate_count: i32,
    pub query_count: i32,
    pub template: String,
}

impl NewWorkspace {
    /// Applies creation defaults: blank title, missing or non-positive counts.
    pub fn with_defaults(
        title: &str,
        job_description: &str,
        candidate_count: Option<i32>,
        query_count: Option<i32>,
    ) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            job_description: job_description.to_string(),
            candidate_count: candidate_count
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_CANDIDATE_COUNT),
            query_count: query_count.filter(|n| *n > 0).unwrap_or(DEFAULT_QUERY_COUNT),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Same parameters and template as `source`, title marked as a copy.
    pub fn duplicate_of(source: &WorkspaceRow) -> Self {
        Self {
            title: format!("{} (Copy)", source.title),
            job_description: source.job_description.clone(),
            candidate_count: source.candidate_count,
            query_count: source.query_count,
            template: source.template.clone(),
        }
    }
}

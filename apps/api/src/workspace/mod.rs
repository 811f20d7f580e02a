// Workspace manager: job descriptions, generated query previews, the
// candidates found for them, outreach status and message templates.
// Candidate discovery itself lives in crate::search.

pub mod drafts;
pub mod export;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod queries;
pub mod store;
pub mod template;

//! Search query generation — job description in, search query strings out.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_LINES_SYSTEM;
use crate::llm_client::LlmClient;
use crate::workspace::prompts::QUERY_GENERATION_PROMPT_TEMPLATE;

/// Asks the LLM for `query_count` search queries built from the job description.
pub async fn generate_queries(
    llm: &LlmClient,
    job_description: &str,
    query_count: i32,
) -> Result<Vec<String>, AppError> {
    let prompt = QUERY_GENERATION_PROMPT_TEMPLATE
        .replace("{query_count}", &query_count.to_string())
        .replace("{job_description}", job_description);

    let reply = llm
        .call_text(&prompt, PLAIN_LINES_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Query generation failed: {e}")))?;

    let queries = split_queries(&reply);
    if queries.is_empty() {
        return Err(AppError::Llm("Query generation returned no queries".to_string()));
    }

    info!("Generated {} search queries", queries.len());
    Ok(queries)
}

/// One query per line: trimmed, blanks and stray code fences dropped.
pub fn split_queries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(String::from)
        .collect()
}

/// Queries the user edited in the preview win over the generated ones,
/// unless the edit left nothing behind.
pub fn effective_queries(edited: Option<&[String]>, generated: &[String]) -> Vec<String> {
    let edited: Vec<String> = edited
        .unwrap_or_default()
        .iter()
        .flat_map(|q| split_queries(q))
        .collect();
    if edited.is_empty() {
        generated.to_vec()
    } else {
        edited
    }
}

// LLM prompt constants for the Workspace module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Query generation prompt. Replace `{query_count}` and `{job_description}` before sending.
pub const QUERY_GENERATION_PROMPT_TEMPLATE: &str = "\
From the following Job Description, extract keywords to search for best suiting candidates \
using Google Search Engine in professional networking sites.
Filter by job locations given in the JD.
Give the response as plain text with each search on a separate line.
Provide {query_count} different combinations of such search queries.

{job_description}";

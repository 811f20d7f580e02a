// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces bare line-per-item output.
pub const PLAIN_LINES_SYSTEM: &str = "You are a precise assistant. \
    Respond with plain text only, one item per line. \
    Do NOT number or bullet the lines. \
    Do NOT use markdown or code fences. \
    Do NOT include explanations, headings or apologies.";

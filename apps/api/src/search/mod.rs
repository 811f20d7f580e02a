// Candidate discovery: query cursor, result extraction, dedup accumulation,
// and the sequential loop tying them to a search backend.

pub mod accumulator;
pub mod cursor;
pub mod extractor;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod pipeline;

//! Candidate discovery — the sequential, deduplicating, multi-query search loop.
//!
//! Flow: cursor picks (query, start) → fetch one page → extract candidates →
//!       accumulator filters duplicates → repeat until the target is met,
//!       every query is abandoned, or too many pages in a row add nothing.
//!
//! Exactly one fetch is outstanding at a time, so candidate order is fully
//! determined by the API responses. Fetch failures never reach the caller:
//! they abandon the current query and the run carries on with the next one.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::search::accumulator::{DedupAccumulator, Offer};
use crate::search::cursor::QueryCursor;
use crate::search::extractor::extract_page;
use crate::search::fetcher::PageFetcher;
use crate::search::models::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    TargetReached,
    QueriesExhausted,
    Stalled,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub candidates: Vec<Candidate>,
    pub stop_reason: StopReason,
    /// Fetch attempts, failed ones included.
    pub pages_fetched: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Pause between consecutive page fetches. Never applied before the first.
    pub page_delay: Duration,
}

/// Returns up to `min_results` unique candidates, in discovery order.
pub async fn search_candidates<I, S>(
    fetcher: &dyn PageFetcher,
    queries: &[String],
    min_results: usize,
    existing_links: I,
) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    discover(
        fetcher,
        queries,
        min_results,
        existing_links,
        &DiscoveryOptions::default(),
    )
    .await
    .candidates
}

/// Runs the discovery loop and reports why it stopped.
pub async fn discover<I, S>(
    fetcher: &dyn PageFetcher,
    queries: &[String],
    min_results: usize,
    existing_links: I,
    options: &DiscoveryOptions,
) -> DiscoveryReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let queries: Vec<&str> = queries
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .collect();

    let mut accumulator = DedupAccumulator::new(min_results, existing_links);
    let mut cursor = QueryCursor::new(queries.len());
    let mut pages_fetched: u32 = 0;

    let stop_reason = if accumulator.is_target_reached() {
        StopReason::TargetReached
    } else {
        loop {
            let Some((query_index, start)) = cursor.position() else {
                break StopReason::QueriesExhausted;
            };
            let query = queries[query_index];

            if pages_fetched > 0 && !options.page_delay.is_zero() {
                tokio::time::sleep(options.page_delay).await;
            }

            debug!("Fetching query #{query_index} \"{query}\" at start={start}");
            pages_fetched += 1;

            let page = match fetcher.fetch_page(query, start).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Search failed for query \"{query}\" at start={start}: {e}");
                    cursor.advance_query();
                    accumulator.reset_stall();
                    continue;
                }
            };

            if page.is_empty() {
                debug!(
                    "Query #{query_index} exhausted after {} seen links",
                    accumulator.seen_count()
                );
                cursor.advance_query();
                accumulator.reset_stall();
                continue;
            }

            let target_met = extract_page(&page)
                .any(|candidate| accumulator.offer(candidate) == Offer::TargetReached);
            if target_met {
                break StopReason::TargetReached;
            }

            if accumulator.finish_page() {
                break StopReason::Stalled;
            }

            if cursor.advance_page() {
                debug!(
                    "Query #{query_index} hit the pagination ceiling after {} seen links",
                    accumulator.seen_count()
                );
                accumulator.reset_stall();
            }
        }
    };

    info!(
        "Candidate discovery finished: {} of {} found, {} pages fetched, stop={:?}",
        accumulator.len(),
        min_results,
        pages_fetched,
        stop_reason
    );

    DiscoveryReport {
        candidates: accumulator.into_results(),
        stop_reason,
        pages_fetched,
    }
}

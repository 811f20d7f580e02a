//! Dedup Accumulator — owns the seen-link set and the ordered result list.
//!
//! Two stopping rules live here: the target count, checked after every
//! accepted candidate, and the stall limit, checked after every full page.

use std::collections::HashSet;

use crate::search::models::Candidate;

/// Consecutive non-accepting pages that end a run early.
pub const STALL_LIMIT: u32 = 5;

/// What happened to a candidate offered to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Accepted,
    /// Accepted, and the target count is now met.
    TargetReached,
    Duplicate,
}

#[derive(Debug)]
pub struct DedupAccumulator {
    seen: HashSet<String>,
    results: Vec<Candidate>,
    target: usize,
    stall_count: u32,
    accepted_this_page: bool,
}

impl DedupAccumulator {
    /// `existing_links` are treated as already emitted.
    pub fn new<I, S>(target: usize, existing_links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen: existing_links.into_iter().map(Into::into).collect(),
            results: Vec::new(),
            target,
            stall_count: 0,
            accepted_this_page: false,
        }
    }

    pub fn offer(&mut self, candidate: Candidate) -> Offer {
        if self.seen.contains(&candidate.link) {
            return Offer::Duplicate;
        }
        self.seen.insert(candidate.link.clone());
        self.results.push(candidate);
        self.accepted_this_page = true;
        self.stall_count = 0;

        if self.is_target_reached() {
            Offer::TargetReached
        } else {
            Offer::Accepted
        }
    }

    /// Closes out a fully processed page. Returns `true` when the stall limit
    /// has been hit and the run should stop.
    pub fn finish_page(&mut self) -> bool {
        if std::mem::take(&mut self.accepted_this_page) {
            self.stall_count = 0;
        } else {
            self.stall_count += 1;
        }
        self.stall_count >= STALL_LIMIT
    }

    /// Called when the cursor moves on to a new query: empty page, fetch
    /// failure or pagination ceiling. Each query starts with a fresh budget.
    pub fn reset_stall(&mut self) {
        self.stall_count = 0;
        self.accepted_this_page = false;
    }

    pub fn is_target_reached(&self) -> bool {
        self.results.len() >= self.target
    }

    pub fn stall_count(&self) -> u32 {
        self.stall_count
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn into_results(self) -> Vec<Candidate> {
        self.results
    }
}

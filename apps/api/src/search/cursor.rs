//! Query Cursor — which query is active and which result page comes next.
//!
//! Pages are ten results wide and addressed by a 1-based start rank. The
//! search API serves at most 100 results per query, so the last page fetched
//! for any query starts at 91. Advancing is one-way: a query is never revisited.

pub const PAGE_SIZE: u32 = 10;
pub const FIRST_START: u32 = 1;
/// Highest start offset the cursor will ever request.
pub const LAST_START: u32 = 91;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCursor {
    query_index: usize,
    start: u32,
    query_count: usize,
}

impl QueryCursor {
    pub fn new(query_count: usize) -> Self {
        Self {
            query_index: 0,
            start: FIRST_START,
            query_count,
        }
    }

    /// The `(query index, start offset)` to fetch next, or `None` once every
    /// query has been abandoned.
    pub fn position(&self) -> Option<(usize, u32)> {
        (!self.is_exhausted()).then_some((self.query_index, self.start))
    }

    pub fn query_index(&self) -> usize {
        self.query_index
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn is_exhausted(&self) -> bool {
        self.query_index >= self.query_count
    }

    /// Moves to the next page of the current query. Switches to the next query
    /// instead when the new offset would pass the pagination ceiling.
    ///
    /// Returns `true` when that caused a query switch.
    pub fn advance_page(&mut self) -> bool {
        self.start += PAGE_SIZE;
        if self.start > LAST_START {
            self.advance_query();
            true
        } else {
            false
        }
    }

    /// Abandons the current query: empty page, fetch failure, or page ceiling.
    pub fn advance_query(&mut self) {
        if !self.is_exhausted() {
            self.query_index += 1;
        }
        self.start = FIRST_START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_page_of_first_query() {
        let cursor = QueryCursor::new(2);
        assert_eq!(cursor.position(), Some((0, 1)));
    }

    #[test]
    fn test_no_queries_is_immediately_exhausted() {
        let cursor = QueryCursor::new(0);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), None);
    }

    #[test]
    fn test_pages_walk_to_91_then_switch_query() {
        let mut cursor = QueryCursor::new(2);
        let mut starts = vec![cursor.start()];
        while !cursor.advance_page() {
            starts.push(cursor.start());
        }
        assert_eq!(starts, vec![1, 11, 21, 31, 41, 51, 61, 71, 81, 91]);
        assert_eq!(cursor.position(), Some((1, 1)));
    }

    #[test]
    fn test_advance_query_resets_page() {
        let mut cursor = QueryCursor::new(3);
        cursor.advance_page();
        cursor.advance_page();
        assert_eq!(cursor.start(), 21);
        cursor.advance_query();
        assert_eq!(cursor.position(), Some((1, 1)));
    }

    #[test]
    fn test_advancing_past_last_query_exhausts() {
        let mut cursor = QueryCursor::new(1);
        cursor.advance_query();
        assert!(cursor.is_exhausted());
        cursor.advance_query();
        assert_eq!(cursor.query_index(), 1);
    }
}

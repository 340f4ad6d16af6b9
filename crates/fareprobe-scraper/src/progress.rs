//! Progress and run-summary reporting.

use std::time::Duration;

use fareprobe_core::{ResourceKind, SearchRequest};

/// How one search ended, as seen by progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Produced this many records (at least one).
    Found(usize),
    /// Completed normally but the site listed nothing.
    Empty,
    /// Every submission attempt failed, or the worker crashed.
    Failed,
}

/// Aggregate statistics for one run.
///
/// `empty` and `failed` are kept apart so "nothing found" can be told from
/// "nothing fetched".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub resource: ResourceKind,
    pub total: usize,
    pub completed: usize,
    pub with_results: usize,
    pub empty: usize,
    pub failed: usize,
    /// Pagination pages skipped after retries, across all searches.
    pub pages_failed: usize,
    pub records: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    #[must_use]
    pub fn new(resource: ResourceKind, total: usize) -> Self {
        Self {
            resource,
            total,
            completed: 0,
            with_results: 0,
            empty: 0,
            failed: 0,
            pages_failed: 0,
            records: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn record(&mut self, status: SearchStatus) {
        self.completed += 1;
        match status {
            SearchStatus::Found(n) => {
                self.with_results += 1;
                self.records += n;
            }
            SearchStatus::Empty => self.empty += 1,
            SearchStatus::Failed => self.failed += 1,
        }
    }
}

/// Receives progress events from the engine. Events arrive from the single
/// task that merges results, in completion order.
pub trait ProgressSink: Send + Sync {
    fn on_start(&self, _resource: ResourceKind, _total: usize) {}

    fn on_search_done(&self, _request: &SearchRequest, _status: SearchStatus, _summary: &RunSummary) {}

    fn on_finish(&self, _summary: &RunSummary) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Reports progress through `tracing`: one event per completed search and a
/// summary at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_start(&self, resource: ResourceKind, total: usize) {
        tracing::info!(%resource, total, "search run started");
    }

    fn on_search_done(&self, request: &SearchRequest, status: SearchStatus, summary: &RunSummary) {
        match status {
            SearchStatus::Failed => tracing::warn!(
                completed = summary.completed,
                total = summary.total,
                request = %request,
                "search failed"
            ),
            SearchStatus::Found(records) => tracing::info!(
                completed = summary.completed,
                total = summary.total,
                records,
                request = %request,
                "search done"
            ),
            SearchStatus::Empty => tracing::info!(
                completed = summary.completed,
                total = summary.total,
                records = 0,
                request = %request,
                "search done"
            ),
        }
    }

    fn on_finish(&self, summary: &RunSummary) {
        tracing::info!(
            resource = %summary.resource,
            records = summary.records,
            searches = summary.total,
            empty = summary.empty,
            failed = summary.failed,
            pages_failed = summary.pages_failed,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "search run completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_separates_empty_from_failed() {
        let mut summary = RunSummary::new(ResourceKind::Hotels, 4);
        summary.record(SearchStatus::Found(3));
        summary.record(SearchStatus::Empty);
        summary.record(SearchStatus::Failed);
        summary.record(SearchStatus::Found(2));

        assert_eq!(summary.completed, 4);
        assert_eq!(summary.with_results, 2);
        assert_eq!(summary.empty, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.records, 5);
    }
}

//! Worker pool orchestration.
//!
//! Every [`SearchRequest`] runs as its own task: pacing delay, fresh session,
//! submission, then pagination walk (or a direct extraction for resources
//! without pagination). At most `max_workers` tasks run at once. Results are
//! merged in completion order by the single task driving the pool, so the
//! merge is a plain append.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use fareprobe_core::{AppConfig, Record, SearchRequest};

use crate::error::ScraperError;
use crate::extract::{ExtractContext, Extractor};
use crate::pagination::walk;
use crate::progress::{ProgressSink, RunSummary, SearchStatus};
use crate::session::SessionFactory;
use crate::submit::submit;
use crate::timing::{Jitter, RetryPolicy};

/// Pool size and every randomized wait used by workers.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub max_workers: usize,
    /// Slept by each worker before it submits.
    pub pacing: Jitter,
    /// Slept between consecutive pagination fetches.
    pub pagination: Jitter,
    pub retry: RetryPolicy,
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            pacing: Jitter::from_secs_f64(AppConfig::MIN_SLEEP_SECS, config.search_sleep_secs),
            pagination: Jitter::from_secs_f64(
                AppConfig::MIN_SLEEP_SECS,
                config.pagination_sleep_secs,
            ),
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                backoff_base: config.backoff_base,
                backoff_unit: Duration::from_secs(1),
            },
        }
    }
}

/// Result of one worker.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The submission succeeded. `records` may be empty.
    Completed {
        records: Vec<Record>,
        pages_failed: usize,
    },
    Failed(ScraperError),
}

/// Every record extracted during a run plus its statistics.
#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<Record>,
    pub summary: RunSummary,
}

pub struct Engine {
    sessions: Arc<SessionFactory>,
    extractor: Arc<dyn Extractor>,
    config: Arc<EngineConfig>,
}

impl Engine {
    #[must_use]
    pub fn new(sessions: SessionFactory, extractor: Arc<dyn Extractor>, config: EngineConfig) -> Self {
        Self {
            sessions: Arc::new(sessions),
            extractor,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a single search in the current task.
    pub async fn search(&self, request: SearchRequest) -> SearchOutcome {
        run_search(
            Arc::clone(&self.sessions),
            Arc::clone(&self.extractor),
            Arc::clone(&self.config),
            request,
        )
        .await
    }

    /// Runs every request through the bounded worker pool.
    ///
    /// Never fails as a whole: a search that exhausts its retries or whose
    /// worker panics contributes no records and is counted in
    /// [`RunSummary::failed`].
    pub async fn run<I>(&self, requests: I, progress: &dyn ProgressSink) -> RunReport
    where
        I: IntoIterator<Item = SearchRequest>,
        I::IntoIter: ExactSizeIterator,
    {
        let started = Instant::now();
        let requests = requests.into_iter();
        let mut summary = RunSummary::new(self.extractor.resource(), requests.len());
        progress.on_start(summary.resource, summary.total);

        let max_workers = self.config.max_workers.max(1);
        let mut in_flight = stream::iter(requests)
            .map(|request| {
                let handle = tokio::spawn(run_search(
                    Arc::clone(&self.sessions),
                    Arc::clone(&self.extractor),
                    Arc::clone(&self.config),
                    request.clone(),
                ));
                async move { (request, handle.await) }
            })
            .buffer_unordered(max_workers);

        let mut records = Vec::new();
        while let Some((request, joined)) = in_flight.next().await {
            let status = match joined {
                Ok(SearchOutcome::Completed {
                    records: found,
                    pages_failed,
                }) => {
                    summary.pages_failed += pages_failed;
                    let count = found.len();
                    records.extend(found);
                    if count == 0 {
                        SearchStatus::Empty
                    } else {
                        SearchStatus::Found(count)
                    }
                }
                Ok(SearchOutcome::Failed(e)) => {
                    tracing::warn!(request = %request, error = %e, "search yielded no results after failure");
                    SearchStatus::Failed
                }
                Err(e) => {
                    tracing::error!(request = %request, error = %e, "search worker crashed");
                    SearchStatus::Failed
                }
            };
            summary.record(status);
            progress.on_search_done(&request, status, &summary);
        }

        summary.elapsed = started.elapsed();
        progress.on_finish(&summary);
        RunReport { records, summary }
    }
}

async fn run_search(
    sessions: Arc<SessionFactory>,
    extractor: Arc<dyn Extractor>,
    config: Arc<EngineConfig>,
    request: SearchRequest,
) -> SearchOutcome {
    config.pacing.sleep().await;

    let session = match sessions.new_session() {
        Ok(session) => session,
        Err(e) => return SearchOutcome::Failed(e),
    };

    let page = match submit(&session, &request, &config.retry).await {
        Ok(page) => page,
        Err(e) => return SearchOutcome::Failed(e),
    };
    tracing::debug!(request = %request, url = %page.url, "search submitted");

    let ctx = ExtractContext::from(&request);
    let (mut records, pages_failed) = if extractor.has_pagination() {
        let walked = walk(
            &session,
            &page,
            extractor.as_ref(),
            &ctx,
            &config.retry,
            &config.pagination,
        )
        .await;
        (walked.records, walked.pages_failed)
    } else {
        (extractor.extract(&page, &ctx), 0)
    };

    for record in &mut records {
        record.annotate(&request);
    }

    SearchOutcome::Completed {
        records,
        pages_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_config(search_sleep_secs: f64) -> AppConfig {
        AppConfig {
            base_url: "https://example.com/".to_string(),
            log_level: "info".to_string(),
            search_path: "./config/search.yaml".into(),
            output_dir: "./output".into(),
            user_agent: "ua".to_string(),
            request_timeout_secs: 20,
            search_sleep_secs,
            pagination_sleep_secs: 1.0,
            backoff_base: 2.0,
            max_attempts: 3,
            max_workers: 10,
        }
    }

    #[test]
    fn from_app_config_uses_half_second_floor() {
        let config = EngineConfig::from_app_config(&app_config(2.0));
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.pacing.min, Duration::from_millis(500));
        assert_eq!(config.pacing.max, Duration::from_secs(2));
        assert_eq!(config.pagination.max, Duration::from_secs(1));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_unit, Duration::from_secs(1));
    }

    #[test]
    fn from_app_config_saturates_oversized_sleep() {
        let config = EngineConfig::from_app_config(&app_config(1e30));
        assert_eq!(config.pacing.max, Duration::MAX);
        assert_eq!(config.pacing.min, Duration::from_millis(500));
    }
}

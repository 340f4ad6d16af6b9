//! Retrying search submission.
//!
//! A search is one form POST. Transport failures (connection errors,
//! timeouts, non-2xx statuses) are retried on the same session with
//! randomized exponential backoff; once attempts run out the caller gets
//! [`ScraperError::RetriesExhausted`] and treats the search as yielding no
//! results.

use std::future::Future;

use fareprobe_core::SearchRequest;

use crate::error::ScraperError;
use crate::session::{Page, Session};
use crate::timing::RetryPolicy;

/// Runs `operation` up to `policy.max_attempts` times.
///
/// Non-transport errors are returned immediately. A backoff wait is inserted
/// only when another attempt follows.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !err.is_transport() {
            return Err(err);
        }
        if attempt + 1 >= max_attempts {
            return Err(ScraperError::RetriesExhausted {
                attempts: attempt + 1,
                last: Box::new(err),
            });
        }

        let delay = policy.backoff(attempt);
        tracing::warn!(
            attempt,
            max_attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient transport error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Submits `request` as a search form and returns the resulting page, after
/// following any redirect to the final results URL.
///
/// # Errors
///
/// - [`ScraperError::RetriesExhausted`] if every attempt failed in transport.
/// - Any non-transport error from the first attempt that produced one.
pub async fn submit(
    session: &Session,
    request: &SearchRequest,
    policy: &RetryPolicy,
) -> Result<Page, ScraperError> {
    let fields = request.form_fields();
    retry_with_backoff(policy, || session.post_form(&fields)).await
}

/// Fetches a follow-up page with the same retry policy as submissions.
///
/// # Errors
///
/// Same as [`submit`].
pub async fn fetch(session: &Session, url: &str, policy: &RetryPolicy) -> Result<Page, ScraperError> {
    retry_with_backoff(policy, || session.get(url)).await
}

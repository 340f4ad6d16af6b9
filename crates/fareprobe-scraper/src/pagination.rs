//! Walking a search's chain of result pages.
//!
//! Result pages link to their siblings through `div.links a.page` anchors with
//! site-relative `href`s. The chain is the submission page followed by every
//! linked page in document order; pages are fetched one at a time, both
//! because the links come from the first page and to bound the request rate.

use std::sync::LazyLock;

use scraper::Selector;

use fareprobe_core::Record;

use crate::extract::{ExtractContext, Extractor};
use crate::parse_helpers::selector;
use crate::session::{Page, Session};
use crate::submit::fetch;
use crate::timing::{Jitter, RetryPolicy};

static PAGE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("div.links a.page"));

/// Records accumulated over one pagination chain.
#[derive(Debug, Default)]
pub struct Walk {
    /// Records in page order.
    pub records: Vec<Record>,
    pub pages_visited: usize,
    /// Linked pages that still failed after retries and were skipped.
    pub pages_failed: usize,
}

/// Absolute URLs of the further result pages linked from `page`, in document
/// order. Each `href` is appended verbatim to `base_url`. Duplicates are kept.
#[must_use]
pub fn discover_page_links(page: &Page, base_url: &str) -> Vec<String> {
    page.document()
        .select(&PAGE_LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| format!("{base_url}{href}"))
        .collect()
}

/// Extracts `start` and every page it links to, sequentially.
///
/// `start` is the already-fetched submission result and is not fetched
/// again. A `pagination` delay is slept before each further fetch. A linked
/// page that cannot be fetched is logged and skipped.
pub async fn walk(
    session: &Session,
    start: &Page,
    extractor: &dyn Extractor,
    ctx: &ExtractContext,
    retry: &RetryPolicy,
    pagination: &Jitter,
) -> Walk {
    let links = discover_page_links(start, session.base_url());
    let mut walk = Walk {
        records: extractor.extract(start, ctx),
        pages_visited: 1,
        pages_failed: 0,
    };

    for url in links {
        pagination.sleep().await;
        match fetch(session, &url, retry).await {
            Ok(page) => {
                walk.records.extend(extractor.extract(&page, ctx));
                walk.pages_visited += 1;
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "skipping result page");
                walk.pages_failed += 1;
            }
        }
    }

    walk
}

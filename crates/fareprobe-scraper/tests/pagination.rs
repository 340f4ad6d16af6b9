//! Integration tests for the pagination walker.

mod common;

use std::sync::{Arc, Mutex};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use fareprobe_core::{Record, ResourceKind};
use fareprobe_scraper::{walk, ExtractContext, Extractor, Jitter, Page};

use common::{factory_for, html_page, quick_retry};

type EventLog = Arc<Mutex<Vec<String>>>;

/// Emits one record per page, tagged with the page path, and logs each
/// extraction.
struct PageTagExtractor {
    log: EventLog,
}

impl Extractor for PageTagExtractor {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Hotels
    }

    fn fields(&self) -> &'static [&'static str] {
        &["Page"]
    }

    fn extract(&self, page: &Page, _ctx: &ExtractContext) -> Vec<Record> {
        let path = reqwest::Url::parse(&page.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| page.url.clone());
        self.log.lock().unwrap().push(format!("extract {path}"));
        vec![Record::new().with("Page", path)]
    }
}

/// Serves a fixed body and logs each fetch into the shared event log.
struct LoggingResponder {
    log: EventLog,
    body: String,
}

impl Respond for LoggingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.log
            .lock()
            .unwrap()
            .push(format!("fetch {}", request.url.path()));
        ResponseTemplate::new(200).set_body_string(self.body.clone())
    }
}

fn links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|h| format!(r#"<a class="page" href="{h}">{h}</a>"#))
        .collect();
    format!(r#"<div class="links">{anchors}</div>"#)
}

#[tokio::test]
async fn walk_visits_start_then_linked_pages_sequentially() {
    let server = MockServer::start().await;
    let log: EventLog = Arc::default();

    for p in ["/p1", "/p2"] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(LoggingResponder {
                log: Arc::clone(&log),
                body: html_page(&links(&["p1", "p2"])),
            })
            .expect(1)
            .mount(&server)
            .await;
    }

    let session = factory_for(&server.uri()).new_session().unwrap();
    let start = Page::new(
        format!("{}/start", server.uri()),
        html_page(&links(&["p1", "p2"])),
    );
    let extractor = PageTagExtractor {
        log: Arc::clone(&log),
    };

    let walked = walk(
        &session,
        &start,
        &extractor,
        &ExtractContext { nights: 7 },
        &quick_retry(3),
        &Jitter::NONE,
    )
    .await;

    let pages: Vec<&str> = walked
        .records
        .iter()
        .map(|r| r.get("Page").unwrap().as_str())
        .collect();
    assert_eq!(pages, vec!["/start", "/p1", "/p2"]);
    assert_eq!(walked.pages_visited, 3);
    assert_eq!(walked.pages_failed, 0);

    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "extract /start",
            "fetch /p1",
            "extract /p1",
            "fetch /p2",
            "extract /p2",
        ],
        "pages must be fetched one at a time, in document order"
    );
}

#[tokio::test]
async fn walk_without_links_extracts_only_start_page() {
    let server = MockServer::start().await;
    let log: EventLog = Arc::default();

    let session = factory_for(&server.uri()).new_session().unwrap();
    let start = Page::new(format!("{}/only", server.uri()), html_page("<p>one page</p>"));
    let extractor = PageTagExtractor {
        log: Arc::clone(&log),
    };

    let walked = walk(
        &session,
        &start,
        &extractor,
        &ExtractContext { nights: 7 },
        &quick_retry(3),
        &Jitter::NONE,
    )
    .await;

    assert_eq!(walked.records.len(), 1);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn walk_skips_page_that_keeps_failing() {
    let server = MockServer::start().await;
    let log: EventLog = Arc::default();

    Mock::given(method("GET"))
        .and(path("/p1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("")))
        .expect(1)
        .mount(&server)
        .await;

    let session = factory_for(&server.uri()).new_session().unwrap();
    let start = Page::new(
        format!("{}/start", server.uri()),
        html_page(&links(&["p1", "p2"])),
    );
    let extractor = PageTagExtractor {
        log: Arc::clone(&log),
    };

    let walked = walk(
        &session,
        &start,
        &extractor,
        &ExtractContext { nights: 7 },
        &quick_retry(3),
        &Jitter::NONE,
    )
    .await;

    let pages: Vec<&str> = walked
        .records
        .iter()
        .map(|r| r.get("Page").unwrap().as_str())
        .collect();
    assert_eq!(pages, vec!["/start", "/p2"]);
    assert_eq!(walked.pages_failed, 1);
    assert_eq!(walked.pages_visited, 2);
}

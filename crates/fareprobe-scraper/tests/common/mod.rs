//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::time::Duration;

use fareprobe_core::{MonthYear, Party, ResourceKind, SearchRequest};
use fareprobe_scraper::{EngineConfig, Jitter, RetryPolicy, SessionFactory};

/// Retry policy with millisecond backoff so retry tests stay fast.
pub fn quick_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        backoff_base: 2.0,
        backoff_unit: Duration::from_millis(1),
    }
}

/// Engine settings with every wait shrunk to at most a couple of milliseconds.
pub fn quick_engine_config(max_workers: usize) -> EngineConfig {
    EngineConfig {
        max_workers,
        pacing: Jitter::new(Duration::ZERO, Duration::from_millis(2)),
        pagination: Jitter::NONE,
        retry: quick_retry(3),
    }
}

/// Session factory pointed at a mock server root (with trailing slash, as
/// pagination links are appended verbatim).
pub fn factory_for(server_uri: &str) -> SessionFactory {
    SessionFactory::new(
        &format!("{server_uri}/"),
        "fareprobe-test/0.1",
        Duration::from_secs(5),
    )
    .expect("failed to build test SessionFactory")
}

pub fn request(resource: ResourceKind, day: u8, nights: u16) -> SearchRequest {
    SearchRequest {
        resource,
        origin: resource.uses_origin().then(|| "LON".to_string()),
        day,
        month: MonthYear::new(1, 2025),
        nights,
        party: Party::default(),
    }
}

pub fn html_page(body: &str) -> String {
    format!("<html><body>{body}</body></html>")
}

pub fn direct_flight(airline: &str, price: &str) -> String {
    format!(
        r#"<div class="flight">
             <div class="airline"><h2>{airline}</h2></div>
             <small class="direct">Direct</small>
             <span class="pounds">{price}</span>
           </div>"#
    )
}

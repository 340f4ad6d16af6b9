use std::sync::LazyLock;

use scraper::Selector;

use fareprobe_core::{Record, ResourceKind};

use super::{ExtractContext, Extractor, DEAL_FIELD, PRICE_FIELD};
use crate::parse_helpers::{first_text, nested_text, selector};
use crate::session::Page;

const FIELDS: &[&str] = &["Airline", "Type", PRICE_FIELD, DEAL_FIELD];

static LISTING: LazyLock<Selector> = LazyLock::new(|| selector("div.flight"));
static AIRLINE: LazyLock<Selector> = LazyLock::new(|| selector("div.airline"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static INDIRECT: LazyLock<Selector> = LazyLock::new(|| selector("small.indirect"));
static DIRECT: LazyLock<Selector> = LazyLock::new(|| selector("small.direct"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.pounds"));
static DEAL: LazyLock<Selector> = LazyLock::new(|| selector("div.deal"));
static DEAL_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("h4"));

/// Direct flight listings. Listings flagged indirect are dropped entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightsExtractor;

impl Extractor for FlightsExtractor {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Flights
    }

    fn fields(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn extract(&self, page: &Page, _ctx: &ExtractContext) -> Vec<Record> {
        let document = page.document();
        document
            .select(&LISTING)
            .filter(|listing| listing.select(&INDIRECT).next().is_none())
            .map(|listing| {
                Record::new()
                    .with("Airline", nested_text(listing, &AIRLINE, &HEADING))
                    .with("Type", first_text(listing, &DIRECT))
                    .with(PRICE_FIELD, first_text(listing, &PRICE))
                    .with(DEAL_FIELD, nested_text(listing, &DEAL, &DEAL_TEXT))
            })
            .collect()
    }
}

use std::sync::LazyLock;

use scraper::Selector;

use fareprobe_core::{Record, ResourceKind};

use super::{ExtractContext, Extractor, DEAL_FIELD, PRICE_FIELD};
use crate::parse_helpers::{first_text, nested_text, selector};
use crate::session::Page;

const FIELDS: &[&str] = &["Hotel", PRICE_FIELD, DEAL_FIELD];

static LISTING: LazyLock<Selector> = LazyLock::new(|| selector("div.accommodation"));
static INFO: LazyLock<Selector> = LazyLock::new(|| selector("div.info"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.pounds"));
static DEAL: LazyLock<Selector> = LazyLock::new(|| selector("div.deal"));
static DEAL_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("h4"));

#[derive(Debug, Clone, Copy, Default)]
pub struct HotelsExtractor;

impl Extractor for HotelsExtractor {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Hotels
    }

    fn fields(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn extract(&self, page: &Page, _ctx: &ExtractContext) -> Vec<Record> {
        let document = page.document();
        document
            .select(&LISTING)
            .map(|listing| {
                Record::new()
                    .with("Hotel", nested_text(listing, &INFO, &HEADING))
                    .with(PRICE_FIELD, first_text(listing, &PRICE))
                    .with(DEAL_FIELD, nested_text(listing, &DEAL, &DEAL_TEXT))
            })
            .collect()
    }
}

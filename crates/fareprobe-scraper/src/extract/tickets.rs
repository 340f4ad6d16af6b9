use std::sync::LazyLock;

use scraper::Selector;

use fareprobe_core::{Record, ResourceKind};

use super::{ExtractContext, Extractor, DEAL_FIELD, PRICE_FIELD};
use crate::parse_helpers::{nested_text, selector};
use crate::session::Page;

const FIELDS: &[&str] = &["Ticket", PRICE_FIELD, DEAL_FIELD];

/// Stays of this many nights or more are offered the 14-day ticket; the site
/// falls back to it rather than listing a longer one.
pub const FOURTEEN_DAY_MIN_NIGHTS: u16 = 14;

static SEVEN_DAY_PANEL: LazyLock<Selector> =
    LazyLock::new(|| selector("div.type.seven.small-12.medium-12"));
static FOURTEEN_DAY_PANEL: LazyLock<Selector> =
    LazyLock::new(|| selector("div.type.fourteen.small-12.medium-12"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("div.heading"));
static HEADING_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("div.price.horizontal"));
static PRICE_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static PROMO: LazyLock<Selector> = LazyLock::new(|| selector("li.icon.promo"));
static PROMO_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("strong"));

/// Park tickets: a single submission yields one page holding at most one
/// record, so results never paginate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketsExtractor;

impl TicketsExtractor {
    fn panel_for(nights: u16) -> &'static Selector {
        if nights < FOURTEEN_DAY_MIN_NIGHTS {
            &SEVEN_DAY_PANEL
        } else {
            &FOURTEEN_DAY_PANEL
        }
    }
}

impl Extractor for TicketsExtractor {
    fn resource(&self) -> ResourceKind {
        ResourceKind::Tickets
    }

    fn fields(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn has_pagination(&self) -> bool {
        false
    }

    fn extract(&self, page: &Page, ctx: &ExtractContext) -> Vec<Record> {
        let document = page.document();
        let Some(panel) = document.select(Self::panel_for(ctx.nights)).next() else {
            tracing::debug!(
                url = %page.url,
                nights = ctx.nights,
                "no ticket panel for requested duration"
            );
            return Vec::new();
        };

        // The price block sits outside the ticket panel.
        let price = nested_text(document.root_element(), &PRICE, &PRICE_TEXT);

        vec![Record::new()
            .with("Ticket", nested_text(panel, &HEADING, &HEADING_TEXT))
            .with(PRICE_FIELD, price)
            .with(DEAL_FIELD, nested_text(panel, &PROMO, &PROMO_TEXT))]
    }
}

//! Extraction plug-ins: one per resource type.
//!
//! The engine is generic over [`Extractor`]. A plug-in turns one fetched page
//! into zero or more [`Record`]s with a fixed field set and declares whether
//! its results paginate.

mod flights;
mod hotels;
mod tickets;

use std::sync::Arc;

use fareprobe_core::{Record, ResourceKind, SearchRequest};

use crate::session::Page;

pub use flights::FlightsExtractor;
pub use hotels::HotelsExtractor;
pub use tickets::TicketsExtractor;

/// Column names shared by every resource.
pub const PRICE_FIELD: &str = "Price (GBP)";
pub const DEAL_FIELD: &str = "Deal";

/// Per-search parameters an extraction policy may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractContext {
    /// Requested stay length in nights.
    pub nights: u16,
}

impl From<&SearchRequest> for ExtractContext {
    fn from(request: &SearchRequest) -> Self {
        Self {
            nights: request.nights,
        }
    }
}

pub trait Extractor: Send + Sync {
    fn resource(&self) -> ResourceKind;

    /// Extraction fields every record of this resource carries, in order.
    fn fields(&self) -> &'static [&'static str];

    /// Whether the submission result links to further result pages.
    fn has_pagination(&self) -> bool {
        self.resource().paginates()
    }

    fn extract(&self, page: &Page, ctx: &ExtractContext) -> Vec<Record>;
}

/// The built-in plug-in for `resource`.
#[must_use]
pub fn extractor_for(resource: ResourceKind) -> Arc<dyn Extractor> {
    match resource {
        ResourceKind::Flights => Arc::new(FlightsExtractor),
        ResourceKind::Hotels => Arc::new(HotelsExtractor),
        ResourceKind::Tickets => Arc::new(TicketsExtractor),
    }
}

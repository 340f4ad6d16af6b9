use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Connection failure, timeout, or body read error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<ScraperError>,
    },
}

impl ScraperError {
    /// Transport-level failures are worth another attempt; everything else
    /// would fail the same way again. A request `reqwest` could not even
    /// build (for example an unparseable URL) is not a transport failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder(),
            Self::UnexpectedStatus { .. } => true,
            Self::InvalidUrl { .. } | Self::RetriesExhausted { .. } => false,
        }
    }
}

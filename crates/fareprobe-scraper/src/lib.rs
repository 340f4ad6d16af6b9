pub mod engine;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod progress;
pub mod session;
pub mod submit;
pub mod timing;

mod parse_helpers;

pub use engine::{Engine, EngineConfig, RunReport, SearchOutcome};
pub use error::ScraperError;
pub use extract::{extractor_for, ExtractContext, Extractor};
pub use pagination::{discover_page_links, walk, Walk};
pub use progress::{LogProgress, NoProgress, ProgressSink, RunSummary, SearchStatus};
pub use session::{Page, Session, SessionFactory};
pub use submit::{fetch, submit};
pub use timing::{Jitter, RetryPolicy};

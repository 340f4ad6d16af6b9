//! Per-search HTTP sessions.
//!
//! Each unit of work gets a fresh [`Session`] with its own cookie jar and
//! connection pool. Sessions are never pooled or shared, so the booking
//! site's session tracking cannot correlate concurrent searches.

use std::time::Duration;

use reqwest::{Client, Url};
use scraper::Html;

use fareprobe_core::AppConfig;

use crate::error::ScraperError;

/// A fetched result page: the final URL after redirects and the raw body.
///
/// The body is parsed on demand by [`Page::document`]; the parsed tree is
/// not `Send`, so it never lives across an `await`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Builds independent [`Session`]s. Holds only immutable settings, so it is
/// safe to call from any number of workers without coordination.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl SessionFactory {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url: base_url.to_owned(),
            user_agent: user_agent.to_owned(),
            timeout,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured base URL is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a session with its own cookie store and connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new_session(&self) -> Result<Session, ScraperError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(&self.user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Session {
            client,
            base_url: self.base_url.clone(),
        })
    }
}

/// One worker's HTTP client. Redirects are followed, so a submitted search
/// resolves to its final results URL.
#[derive(Debug)]
pub struct Session {
    client: Client,
    base_url: String,
}

impl Session {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `fields` as a urlencoded form to the base URL.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on connection failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx final status.
    pub async fn post_form(&self, fields: &[(&str, String)]) -> Result<Page, ScraperError> {
        let response = self
            .client
            .post(&self.base_url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .form(fields)
            .send()
            .await?;
        Self::into_page(response).await
    }

    /// Fetches `url` with a plain GET.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on connection failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx final status.
    pub async fn get(&self, url: &str) -> Result<Page, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::REFERER, &self.base_url)
            .send()
            .await?;
        Self::into_page(response).await
    }

    async fn into_page(response: reqwest::Response) -> Result<Page, ScraperError> {
        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        Ok(Page { url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_base_url() {
        let err = SessionFactory::new("/walt-disney-world/", "ua", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }

    #[test]
    fn sessions_are_independent_values() {
        let factory =
            SessionFactory::new("https://example.com/search/", "ua", Duration::from_secs(1))
                .unwrap();
        let a = factory.new_session().unwrap();
        let b = factory.new_session().unwrap();
        assert_eq!(a.base_url(), b.base_url());
        assert_eq!(factory.base_url(), "https://example.com/search/");
    }

    #[test]
    fn page_document_parses_body() {
        let page = Page::new("https://example.com/", "<html><body><h2>Hi</h2></body></html>");
        let doc = page.document();
        let sel = scraper::Selector::parse("h2").unwrap();
        assert_eq!(doc.select(&sel).count(), 1);
    }
}

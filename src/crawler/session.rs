//! Wiki crawler session
//!
//! Resolves wiki paths against a base URL, fetches and parses pages
//! through an [`HttpSession`], and applies the extractors from
//! [`crate::crawler::parser`].

use crate::config::Config;
use crate::crawler::parser::{extract_description, extract_links, Links, LINK_CONTAINER};
use crate::crawler::HttpSession;
use crate::{Result, WikiError};
use scraper::Html;
use url::Url;

/// A crawl session against one wiki
#[derive(Debug, Clone)]
pub struct WikiCrawlerSession {
    base_url: String,
    http: HttpSession,
}

impl WikiCrawlerSession {
    /// Creates a session; trailing slashes are stripped from `base_url`
    pub fn new(base_url: &str, http: HttpSession) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Creates a session from the site and HTTP sections of `config`
    pub fn from_config(config: &Config, debug: bool) -> Result<Self> {
        let http = HttpSession::from_config(&config.http, debug)?;
        Ok(Self::new(&config.site.base_url, http))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &HttpSession {
        &self.http
    }

    /// Resolves a wiki path against the base URL
    ///
    /// Absolute `http(s)` URLs are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_crawler::config::HttpConfig;
    /// use wiki_crawler::crawler::{HttpSession, WikiCrawlerSession};
    ///
    /// let http = HttpSession::from_config(&HttpConfig::default(), false).unwrap();
    /// let session = WikiCrawlerSession::new("https://www.bg-wiki.com/", http);
    /// assert_eq!(session.url("/bg/Cocoon"), "https://www.bg-wiki.com/bg/Cocoon");
    /// assert_eq!(session.url("bg/Cocoon"), "https://www.bg-wiki.com/bg/Cocoon");
    /// ```
    pub fn url(&self, uri: &str) -> String {
        if let Ok(parsed) = Url::parse(uri) {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                return uri.to_string();
            }
        }

        let joiner = if uri.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.base_url, joiner, uri)
    }

    /// Fetches a page and parses it as HTML
    ///
    /// # Errors
    ///
    /// * `WikiError::NoResponse` - the server answered with an error status
    /// * `WikiError::Http` - the request failed outright
    pub async fn get_document(&self, uri: &str) -> Result<Html> {
        let url = self.url(uri);
        let response = self
            .http
            .get(&url, None, None)
            .await?
            .ok_or(WikiError::NoResponse { url })?;

        Ok(Html::parse_document(&response.body))
    }

    /// Lists the member links of a category page
    pub async fn get_links(&self, uri: &str) -> Result<Links> {
        let document = self.get_document(uri).await?;
        let links = extract_links(&document).ok_or_else(|| WikiError::ElementNotFound {
            selector: LINK_CONTAINER.to_string(),
            url: self.url(uri),
        })?;

        tracing::info!("Found {} links on {}", links.len(), uri);
        Ok(links)
    }

    /// Reads the description of one Blue Magic spell page
    ///
    /// # Errors
    ///
    /// Besides fetch errors, returns `WikiError::NoMatchingLayout` when no
    /// known layout yields a description.
    pub async fn get_spell_description(&self, uri: &str) -> Result<String> {
        let document = self.get_document(uri).await?;
        extract_description(&document).ok_or_else(|| WikiError::NoMatchingLayout {
            url: self.url(uri),
        })
    }

    /// Reads the description of every spell linked from a category page
    ///
    /// Pages are fetched one after another. A failed page is reported in
    /// its own entry and does not stop the others.
    pub async fn get_spell_descriptions(
        &self,
        category_uri: &str,
    ) -> Result<Vec<(String, Result<String>)>> {
        let links = self.get_links(category_uri).await?;

        let mut descriptions = Vec::with_capacity(links.len());
        for (spell, uri) in links {
            let description = self.get_spell_description(&uri).await;
            if let Err(e) = &description {
                tracing::warn!("Could not read description of {}: {}", spell, e);
            }
            descriptions.push((spell, description));
        }

        Ok(descriptions)
    }
}

use serde::Deserialize;

/// Default wiki the crawler talks to
pub const DEFAULT_BASE_URL: &str = "https://www.bg-wiki.com";

/// Category page listing every Blue Magic spell
pub const DEFAULT_CATEGORY_PAGE: &str = "/bg/Blue_Magic";

/// Default CSV sink written by the description listing
pub const DEFAULT_CSV_PATH: &str = "blu_spells.csv";

/// Main configuration structure for wiki-crawler
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub output: OutputConfig,
    pub http: HttpConfig,
}

/// Which wiki to crawl and where to start
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every relative page path is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Category page whose link list names the pages to visit
    #[serde(rename = "category-page")]
    pub category_page: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category_page: DEFAULT_CATEGORY_PAGE.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file mirrored by the description table
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Display width of the description column
    #[serde(rename = "description-width")]
    pub description_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
            description_width: 100,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("wiki-crawler/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

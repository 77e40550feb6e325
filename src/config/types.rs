use serde::Deserialize;

/// Top-level configuration file layout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of a single crawl
///
/// A crawl never mutates its configuration; the engine validates it once when
/// the crawl starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// URL the crawl starts from (depth 0)
    pub seed: String,

    /// Maximum number of pages to record
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum number of hops away from the seed
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Only follow links whose host matches the linking page's host
    #[serde(default)]
    pub same_domain_only: bool,

    /// Keywords highlighted in extracted body text
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Minimum time between two fetches, in seconds
    #[serde(default = "default_rate_limit")]
    pub rate_limit: f64,

    /// Whether robots.txt directives are honoured
    #[serde(default = "default_respect_robots")]
    pub respect_robots: bool,

    /// Which content extractor turns HTML into page records
    #[serde(default)]
    pub extractor: ExtractorKind,

    /// Order in which discovered links are expanded
    #[serde(default)]
    pub link_order: LinkOrder,
}

/// Content extractor selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Body text taken from the whole `<body>`
    Generic,
    /// Body text taken from the main documentation container
    #[default]
    Documentation,
}

/// Link expansion order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkOrder {
    /// Links are expanded in the order they appear on the page
    Discovery,
    /// Documentation-looking links first, then the rest in page order
    #[default]
    DocumentationFirst,
}

/// Where the CLI writes its documents
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the plain-text report
    #[serde(default = "default_text_path")]
    pub text_path: String,

    /// Path of the structured JSON document
    #[serde(default = "default_json_path")]
    pub json_path: String,

    /// Optional path of the numbered link list
    #[serde(default)]
    pub links_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_path: default_text_path(),
            json_path: default_json_path(),
            links_path: None,
        }
    }
}

impl CrawlConfig {
    /// Creates a configuration for `seed` with default limits
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            same_domain_only: false,
            keywords: Vec::new(),
            rate_limit: default_rate_limit(),
            respect_robots: default_respect_robots(),
            extractor: ExtractorKind::default(),
            link_order: LinkOrder::default(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_same_domain_only(mut self, same_domain_only: bool) -> Self {
        self.same_domain_only = same_domain_only;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rate_limit(mut self, seconds: f64) -> Self {
        self.rate_limit = seconds;
        self
    }

    pub fn with_respect_robots(mut self, respect_robots: bool) -> Self {
        self.respect_robots = respect_robots;
        self
    }

    pub fn with_extractor(mut self, extractor: ExtractorKind) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_link_order(mut self, link_order: LinkOrder) -> Self {
        self.link_order = link_order;
        self
    }
}

fn default_max_pages() -> usize {
    20
}

fn default_max_depth() -> u32 {
    2
}

fn default_rate_limit() -> f64 {
    1.0
}

fn default_respect_robots() -> bool {
    true
}

fn default_text_path() -> String {
    "doc_output/scraped_content.txt".to_string()
}

fn default_json_path() -> String {
    "doc_output/structured_content.json".to_string()
}

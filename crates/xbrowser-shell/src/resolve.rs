//! Address-bar input classification.
//!
//! Pure string work: no network access and no validation beyond deciding
//! whether the input is a URL, a bare domain, or a search query.

use xbrowser_types::config::{QUERY_PLACEHOLDER, ShellConfig};
use xbrowser_types::error::{Result, ShellError};

/// Default search URL template.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q={query}";

/// Turns raw address-bar text into a loadable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    search_template: String,
}

impl UrlResolver {
    /// Create a resolver with a custom search template containing
    /// `{query}`.
    pub fn new(search_template: &str) -> Self {
        Self {
            search_template: search_template.to_string(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(&config.search_template)
    }

    /// Classify and normalise `raw`.
    ///
    /// - `http://` / `https://` input is returned as-is (after trimming).
    /// - Input with a `.` and no whitespace is a bare domain and gets an
    ///   `https://` prefix.
    /// - Anything else becomes a search query.
    pub fn resolve(&self, raw: &str) -> Result<String> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ShellError::EmptyInput);
        }
        if has_web_scheme(input) {
            return Ok(input.to_string());
        }
        if input.contains('.') && !input.contains(char::is_whitespace) {
            return Ok(format!("https://{input}"));
        }
        Ok(self.search_url(input))
    }

    /// Embed `query` into the search template.
    pub fn search_url(&self, query: &str) -> String {
        self.search_template
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(query))
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_TEMPLATE)
    }
}

/// Resolve with the default search engine.
pub fn resolve(raw: &str) -> Result<String> {
    UrlResolver::default().resolve(raw)
}

fn has_web_scheme(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Connection security shown next to the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    Secure,
    Insecure,
}

impl SecurityLevel {
    pub fn of(url: &str) -> Self {
        if url.starts_with("https://") {
            Self::Secure
        } else {
            Self::Insecure
        }
    }

    /// Tooltip text for the indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Secure => "Secure connection",
            Self::Insecure => "Not secure",
        }
    }
}

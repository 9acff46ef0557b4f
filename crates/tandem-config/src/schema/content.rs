//! Content panel configuration: start page and address bar search.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Address loaded in the first tab of a new project.
    pub start_page: String,
    /// Address loaded by a new, empty tab.
    pub blank_page: String,
    /// Prefix for free-text address bar input; the encoded query is appended.
    pub search_endpoint: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            start_page: "https://duckduckgo.com".into(),
            blank_page: "about:blank".into(),
            search_endpoint: "https://duckduckgo.com/?q=".into(),
        }
    }
}

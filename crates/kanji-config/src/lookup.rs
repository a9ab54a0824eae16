use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://jisho.org/search".to_string()
}

fn default_kanji_marker() -> String {
    "#kanji".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("kanji-list/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    /// Search endpoint; the term is appended as one path segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Appended to single-kanji searches
    #[serde(default = "default_kanji_marker")]
    pub kanji_marker: String,
    /// 0 disables the request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            kanji_marker: default_kanji_marker(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

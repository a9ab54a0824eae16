/// Which request shape a term needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Exactly one character, searched as a kanji entry
    SingleCharacter,
    /// Two or more characters, searched as a word
    Compound,
}

impl LookupKind {
    /// Pick the lookup kind by character count, not byte length
    pub fn for_term(term: &str) -> Self {
        let mut chars = term.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => LookupKind::SingleCharacter,
            _ => LookupKind::Compound,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::SingleCharacter => "kanji",
            LookupKind::Compound => "compound",
        }
    }
}

/// Definition provider interface
#[async_trait::async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Look up one kanji or compound and return its definition text
    async fn lookup(&self, term: &str) -> Result<String, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> SourceMetadata;
}

#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    #[error("No `{selector}` element found for {term}")]
    Extraction { term: String, selector: String },
}

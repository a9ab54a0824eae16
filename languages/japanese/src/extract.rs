use kanji_lookup::{LookupError, LookupKind};
use scraper::{Html, Selector};

/// Main meanings block on a kanji details page
pub const KANJI_MEANINGS_SELECTOR: &str = "body div.kanji-details__main-meanings";
/// First sense of the first word result
pub const WORD_MEANING_SELECTOR: &str = "body span.meaning-meaning";

pub fn selector_for(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::SingleCharacter => KANJI_MEANINGS_SELECTOR,
        LookupKind::Compound => WORD_MEANING_SELECTOR,
    }
}

/// Pull the definition text for `term` out of a rendered search page.
///
/// Only the first matching element counts. Its text is trimmed; an element
/// that is present but empty yields an empty definition.
pub fn extract_definition(page: &str, term: &str, kind: LookupKind) -> Result<String, LookupError> {
    let selector_text = selector_for(kind);
    let extraction_error = || LookupError::Extraction {
        term: term.to_string(),
        selector: selector_text.to_string(),
    };

    let selector = Selector::parse(selector_text).map_err(|_| extraction_error())?;
    let document = Html::parse_document(page);

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .ok_or_else(extraction_error)
}

//! Ordered selector cascades, one per posting field.
//!
//! Each list encodes observed layout variants of job pages, most specific first.
//! The first selector whose first match has non-empty text wins; later entries are
//! never consulted.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::clean_text;

pub const TITLE_SELECTORS: &[&str] = &[
    "h1.top-card-layout__title",
    "h1.job-details-jobs-unified-top-card__job-title",
    "h1.jobs-unified-top-card__job-title",
    "h1[data-test-id=\"job-title\"]",
    "h1.job-title",
    "h1",
];

pub const COMPANY_SELECTORS: &[&str] = &[
    "a.topcard__org-name-link",
    "a.job-details-jobs-unified-top-card__company-name",
    "a.jobs-unified-top-card__company-name",
    "a[data-test-id=\"company-name\"]",
    "a.company-name",
    "span.company-name",
];

pub const LOCATION_SELECTORS: &[&str] = &[
    "span.topcard__flavor--bullet",
    "span.job-details-jobs-unified-top-card__bullet",
    "span.jobs-unified-top-card__bullet",
    "span[data-test-id=\"job-location\"]",
    "span.job-location",
    "div.job-location",
];

pub const DESCRIPTION_SELECTORS: &[&str] = &[
    "div.jobs-description__content",
    "div.job-details-jobs-unified-top-card__job-description",
    "div.jobs-unified-top-card__job-description",
    "div[data-test-id=\"job-description\"]",
    "div.job-description",
    "div.description",
    "div.jobs-box__html-content",
    "div.jobs-description-content__text",
    "div[class*=\"description\"]",
    "div[class*=\"content\"]",
];

/// A winning cascade entry: its priority rank, the matched element and its cleaned text.
#[derive(Debug)]
pub struct CascadeMatch<'a> {
    pub rank: usize,
    pub element: ElementRef<'a>,
    pub text: String,
}

/// An ordered list of compiled selectors for one field.
pub struct SelectorCascade {
    field: &'static str,
    selectors: Vec<Selector>,
}

impl SelectorCascade {
    pub fn new(field: &'static str, sources: &[&str]) -> Self {
        let selectors = sources
            .iter()
            .filter_map(|source| match Selector::parse(source) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    warn!("Skipping invalid {field} selector '{source}': {e}");
                    None
                }
            })
            .collect();
        Self { field, selectors }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Walks the cascade in priority order and stops at the first non-empty match.
    pub fn first_match<'a>(&self, document: &'a Html) -> Option<CascadeMatch<'a>> {
        self.selectors
            .iter()
            .enumerate()
            .find_map(|(rank, selector)| {
                let element = document.select(selector).next()?;
                let text = element_text(element);
                (!text.is_empty()).then_some(CascadeMatch {
                    rank,
                    element,
                    text,
                })
            })
            .inspect(|m| debug!("{} matched at cascade rank {}", self.field, m.rank))
    }

    /// Convenience for fields where only the text matters.
    pub fn first_text(&self, document: &Html) -> Option<String> {
        self.first_match(document).map(|m| m.text)
    }
}

/// Cleaned text of an element, whitespace-collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Raw text of an element with the document's own line breaks preserved.
pub fn element_raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

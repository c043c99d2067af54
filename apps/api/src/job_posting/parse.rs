//! HTML → [`JobPosting`] extraction.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::sections::{MarkerVocabulary, PatternError, SectionPatterns};
use super::selectors::{
    element_raw_text, element_text, SelectorCascade, COMPANY_SELECTORS, DESCRIPTION_SELECTORS,
    LOCATION_SELECTORS, TITLE_SELECTORS,
};
use super::JobPosting;

/// How many class-matched `div`s the description fallback inspects.
const FALLBACK_DIV_LIMIT: usize = 5;
/// A fallback `div` must carry more text than this to count as a description.
const FALLBACK_MIN_CHARS: usize = 100;

/// Parses job pages. Holds the compiled marker vocabulary; selectors are compiled per
/// parse because `Html` documents are parsed per page anyway.
#[derive(Debug, Clone)]
pub struct PostingParser {
    sections: SectionPatterns,
}

impl PostingParser {
    pub fn new(vocabulary: &MarkerVocabulary) -> Result<Self, PatternError> {
        Ok(Self {
            sections: SectionPatterns::compile(vocabulary)?,
        })
    }

    /// Extracts every field it can. Missing fields stay empty; this never fails.
    pub fn parse(&self, html: &str) -> JobPosting {
        let document = Html::parse_document(html);

        let mut posting = JobPosting {
            title: SelectorCascade::new("title", TITLE_SELECTORS)
                .first_text(&document)
                .unwrap_or_default(),
            company: SelectorCascade::new("company", COMPANY_SELECTORS)
                .first_text(&document)
                .unwrap_or_default(),
            location: SelectorCascade::new("location", LOCATION_SELECTORS)
                .first_text(&document)
                .unwrap_or_default(),
            ..JobPosting::default()
        };

        let description = SelectorCascade::new("description", DESCRIPTION_SELECTORS);
        match description.first_match(&document) {
            Some(found) => {
                let raw = element_raw_text(found.element);
                posting.description = found.text;
                posting.company_description = self
                    .sections
                    .company_description(&raw)
                    .unwrap_or_default();
                posting.role_description =
                    self.sections.role_description(&raw).unwrap_or_default();
                posting.qualifications = self.qualifications(&raw, found.element);
            }
            None => {
                posting.description = fallback_description(&document).unwrap_or_default();
            }
        }

        debug!(
            title = !posting.title.is_empty(),
            company = !posting.company.is_empty(),
            location = !posting.location.is_empty(),
            description = !posting.description.is_empty(),
            qualifications = posting.qualifications.len(),
            "job page parsed"
        );
        posting
    }

    /// Qualification cascade: marker bullets, then `<li>` items, then long lines.
    fn qualifications(&self, raw: &str, container: ElementRef<'_>) -> Vec<String> {
        let Some(section) = self.sections.qualifications_section(raw) else {
            debug!("no qualifications section found");
            return Vec::new();
        };

        let mut candidates = self.sections.bullet_candidates(section);
        if candidates.is_empty() {
            candidates = list_items(container);
        }
        if candidates.is_empty() {
            candidates = self.sections.line_candidates(section);
        }

        self.sections.finalize_qualifications(candidates)
    }
}

impl Default for PostingParser {
    fn default() -> Self {
        Self {
            sections: SectionPatterns::compile(&MarkerVocabulary::default())
                .expect("default marker vocabulary compiles"),
        }
    }
}

fn list_items(container: ElementRef<'_>) -> Vec<String> {
    let Ok(li) = Selector::parse("li") else {
        return Vec::new();
    };
    container.select(&li).map(element_text).collect()
}

/// Scans the first few `div`s whose class mentions description/content and returns the
/// first one carrying a substantial amount of text.
fn fallback_description(document: &Html) -> Option<String> {
    let div = Selector::parse("div[class]").ok()?;
    document
        .select(&div)
        .filter(|el| {
            el.value().attr("class").is_some_and(|class| {
                let class = class.to_lowercase();
                class.contains("description") || class.contains("content")
            })
        })
        .take(FALLBACK_DIV_LIMIT)
        .map(element_text)
        .find(|text| text.chars().count() > FALLBACK_MIN_CHARS)
}

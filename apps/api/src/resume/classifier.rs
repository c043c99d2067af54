//! Document classifier: decides whether extracted text looks like a resume.
//!
//! Two tiers, evaluated in order:
//! 1. keyword density: enough distinct vocabulary hits → resume, whatever the length;
//! 2. length: short keyword-sparse text is rejected as too short;
//! 3. otherwise the text is rejected as generic non-resume content.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;

/// Why a document was not accepted as a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    TooShort { min_length: usize },
    NotResumeContent,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooShort { min_length } => write!(
                f,
                "Document is too short to be a valid CV (minimum {min_length} characters)"
            ),
            RejectReason::NotResumeContent => {
                write!(f, "Document does not appear to contain CV/resume content")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationVerdict {
    pub is_resume: bool,
    pub reason: Option<RejectReason>,
}

impl ClassificationVerdict {
    fn resume() -> Self {
        Self {
            is_resume: true,
            reason: None,
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            is_resume: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeClassifier {
    keywords: Vec<String>,
    keyword_threshold: usize,
    min_length: usize,
}

impl ResumeClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            keyword_threshold: config.keyword_threshold,
            min_length: config.min_length,
        }
    }

    /// Number of distinct vocabulary terms present anywhere in the text (substring match).
    pub fn keyword_hits(&self, text: &str) -> usize {
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count()
    }

    pub fn classify(&self, text: &str) -> ClassificationVerdict {
        if self.keyword_hits(text) >= self.keyword_threshold {
            return ClassificationVerdict::resume();
        }

        if text.trim().chars().count() < self.min_length {
            return ClassificationVerdict::rejected(RejectReason::TooShort {
                min_length: self.min_length,
            });
        }

        ClassificationVerdict::rejected(RejectReason::NotResumeContent)
    }
}

impl Default for ResumeClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds keyword-free filler padded to exactly `len` characters.
    fn filler(prefix: &str, len: usize) -> String {
        let mut text = prefix.to_string();
        while text.chars().count() < len {
            text.push_str(" lorem ipsum dolor sit amet");
        }
        text.chars().take(len).collect()
    }

    #[test]
    fn test_filler_has_no_keywords() {
        let classifier = ResumeClassifier::default();
        assert_eq!(classifier.keyword_hits(&filler("", 400)), 0);
    }

    #[test]
    fn test_three_keywords_pass_even_when_short() {
        let classifier = ResumeClassifier::default();
        let verdict = classifier.classify("Experience. Education. Skills.");
        assert!(verdict.is_resume);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let classifier = ResumeClassifier::default();
        assert_eq!(classifier.keyword_hits("EDUCATION and SKILLS"), 2);
    }

    #[test]
    fn test_one_keyword_short_text_is_too_short() {
        let classifier = ResumeClassifier::default();
        let text = filler("skills", 150);
        assert_eq!(classifier.keyword_hits(&text), 1);

        let verdict = classifier.classify(&text);
        assert!(!verdict.is_resume);
        assert_eq!(
            verdict.reason,
            Some(RejectReason::TooShort { min_length: 200 })
        );
    }

    #[test]
    fn test_one_keyword_long_text_gets_generic_reason() {
        let classifier = ResumeClassifier::default();
        let text = filler("skills", 500);
        assert_eq!(classifier.keyword_hits(&text), 1);

        let verdict = classifier.classify(&text);
        assert!(!verdict.is_resume);
        assert_eq!(verdict.reason, Some(RejectReason::NotResumeContent));
    }

    #[test]
    fn test_length_check_uses_trimmed_text() {
        let classifier = ResumeClassifier::default();
        let padded = format!("{}{}", " ".repeat(300), filler("", 100));
        let verdict = classifier.classify(&padded);
        assert_eq!(
            verdict.reason,
            Some(RejectReason::TooShort { min_length: 200 })
        );
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = ClassifierConfig {
            keyword_threshold: 1,
            ..ClassifierConfig::default()
        };
        let classifier = ResumeClassifier::new(&config);
        assert!(classifier.classify("my skills").is_resume);
    }
}

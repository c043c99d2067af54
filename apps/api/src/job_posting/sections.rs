//! Section partitioning and qualification-bullet recovery for job description text.
//!
//! Everything locale-specific lives in [`MarkerVocabulary`]; [`SectionPatterns`] is the
//! compiled form. All lists are ordered and evaluated first-match-wins.

use regex::Regex;
use thiserror::Error;

use super::clean_text;

/// Minimum length of a line kept by the line-splitting fallback.
const MIN_LINE_CANDIDATE_CHARS: usize = 20;
/// Minimum length of a qualification that survives the final filter.
const MIN_QUALIFICATION_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid section pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("bullet pattern '{pattern}' has no capture group")]
    MissingCapture { pattern: String },
}

/// Label strings and bullet markers that drive section detection.
#[derive(Debug, Clone)]
pub struct MarkerVocabulary {
    /// (start label, end label) pairs bracketing the company description.
    pub company_role: Vec<(String, String)>,
    /// (start label, end label) pairs bracketing the role description.
    pub role_qualifications: Vec<(String, String)>,
    /// (header, terminator) pairs; the section runs to the terminator or end of text.
    pub qualification_headers: Vec<(String, String)>,
    /// Regexes with one capture group holding the bullet's text.
    pub bullet_patterns: Vec<String>,
    /// Lines starting with any of these are page chrome, not content.
    pub boilerplate_prefixes: Vec<String>,
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

impl Default for MarkerVocabulary {
    fn default() -> Self {
        Self {
            company_role: pairs(&[
                ("Company Description", "Role Description"),
                ("Şirket Tanımı", "Rol Tanımı"),
            ]),
            role_qualifications: pairs(&[
                ("Role Description", "Qualifications"),
                ("Rol Tanımı", "Nitelikler"),
            ]),
            qualification_headers: pairs(&[
                ("Genel Nitelikler:", "İş Tanımı:"),
                ("Qualifications:", "Job Description:"),
                ("Nitelikler:", "İş Tanımı:"),
                ("Requirements:", "Job Description:"),
                ("Gereksinimler:", "İş Tanımı:"),
            ]),
            bullet_patterns: vec![
                r"•[ \t]*([^\n]*)".to_string(),
                r"(?m)^[ \t]*-[ \t]*([^\n]*)".to_string(),
                r"(?m)^[ \t]*\*[ \t]*([^\n]*)".to_string(),
                r"(?m)^[ \t]*\d+\.[ \t]*([^\n]*)".to_string(),
                r"(?m)^[ \t]*[a-zA-Z]\.[ \t]*([^\n]*)".to_string(),
            ],
            boilerplate_prefixes: ["İş Tanımı", "Job Description", "Show more", "Show less"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Compiled [`MarkerVocabulary`].
#[derive(Debug, Clone)]
pub struct SectionPatterns {
    company_role: Vec<Regex>,
    role_qualifications: Vec<Regex>,
    qualification_headers: Vec<Regex>,
    bullets: Vec<Regex>,
    boilerplate_prefixes: Vec<String>,
}

fn compile(pattern: String) -> Result<Regex, PatternError> {
    Regex::new(&pattern).map_err(|source| PatternError::Invalid { pattern, source })
}

impl SectionPatterns {
    pub fn compile(vocabulary: &MarkerVocabulary) -> Result<Self, PatternError> {
        let between = |list: &[(String, String)]| {
            list.iter()
                .map(|(start, end)| {
                    compile(format!(
                        "(?s){}(.*?){}",
                        regex::escape(start),
                        regex::escape(end)
                    ))
                })
                .collect::<Result<Vec<_>, _>>()
        };

        let qualification_headers = vocabulary
            .qualification_headers
            .iter()
            .map(|(header, terminator)| {
                compile(format!(
                    r"(?si){}(.*?)(?:{}|\z)",
                    regex::escape(header),
                    regex::escape(terminator)
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bullets = vocabulary
            .bullet_patterns
            .iter()
            .map(|pattern| {
                let re = compile(pattern.clone())?;
                if re.captures_len() < 2 {
                    return Err(PatternError::MissingCapture {
                        pattern: pattern.clone(),
                    });
                }
                Ok(re)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            company_role: between(&vocabulary.company_role)?,
            role_qualifications: between(&vocabulary.role_qualifications)?,
            qualification_headers,
            bullets,
            boilerplate_prefixes: vocabulary.boilerplate_prefixes.clone(),
        })
    }

    pub fn company_description(&self, text: &str) -> Option<String> {
        first_capture(&self.company_role, text).map(clean_text)
    }

    pub fn role_description(&self, text: &str) -> Option<String> {
        first_capture(&self.role_qualifications, text).map(clean_text)
    }

    /// Body of the first qualifications section found, raw (line breaks intact).
    pub fn qualifications_section<'t>(&self, text: &'t str) -> Option<&'t str> {
        first_capture(&self.qualification_headers, text)
    }

    /// Bullet texts from the first marker pattern with any match; empty when none match.
    pub fn bullet_candidates(&self, section: &str) -> Vec<String> {
        for re in &self.bullets {
            let found: Vec<String> = re
                .captures_iter(section)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// Last-resort split: long enough lines that are not page chrome.
    pub fn line_candidates(&self, section: &str) -> Vec<String> {
        section
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > MIN_LINE_CANDIDATE_CHARS)
            .filter(|line| !self.is_boilerplate(line))
            .map(String::from)
            .collect()
    }

    /// Cleans candidates and drops short or boilerplate entries.
    pub fn finalize_qualifications(&self, candidates: Vec<String>) -> Vec<String> {
        candidates
            .iter()
            .map(|c| clean_text(c))
            .filter(|q| q.chars().count() >= MIN_QUALIFICATION_CHARS)
            .filter(|q| !self.is_boilerplate(q))
            .collect()
    }

    pub fn is_boilerplate(&self, line: &str) -> bool {
        self.boilerplate_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}

fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

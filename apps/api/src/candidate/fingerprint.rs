use sha2::{Digest, Sha256};

const RESUME_PREFIX_CHARS: usize = 100;
const FINGERPRINT_LEN: usize = 12;

/// Deterministic profile id: 12 hex chars of SHA-256 over the first 100 characters of
/// resume text followed by both URLs (absent = empty).
///
/// Two resumes sharing their first 100 characters and URLs get the same id; the later
/// profile overwrites the earlier one.
pub fn profile_fingerprint(
    resume_text: &str,
    github_url: Option<&str>,
    linkedin_url: Option<&str>,
) -> String {
    let prefix: String = resume_text.chars().take(RESUME_PREFIX_CHARS).collect();
    let combined = format!(
        "{prefix}{}{}",
        github_url.unwrap_or(""),
        linkedin_url.unwrap_or("")
    );
    let digest = format!("{:x}", Sha256::digest(combined.as_bytes()));
    digest[..FINGERPRINT_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GH: Option<&str> = Some("https://github.com/octocat");

    #[test]
    fn test_fingerprint_is_twelve_lowercase_hex_chars() {
        let id = profile_fingerprint("resume", GH, None);
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(
            profile_fingerprint("same text", GH, Some("https://linkedin.com/in/x")),
            profile_fingerprint("same text", GH, Some("https://linkedin.com/in/x"))
        );
    }

    #[test]
    fn test_changes_past_first_hundred_chars_are_ignored() {
        let base = "a".repeat(200);
        let mut changed = base.clone();
        changed.replace_range(150..151, "b");
        assert_eq!(
            profile_fingerprint(&base, GH, None),
            profile_fingerprint(&changed, GH, None)
        );
    }

    #[test]
    fn test_url_changes_produce_new_id() {
        let text = "a".repeat(200);
        assert_ne!(
            profile_fingerprint(&text, GH, None),
            profile_fingerprint(&text, Some("https://github.com/other"), None)
        );
    }

    #[test]
    fn test_absent_and_empty_urls_are_equivalent() {
        assert_eq!(
            profile_fingerprint("cv", None, None),
            profile_fingerprint("cv", Some(""), Some(""))
        );
    }
}

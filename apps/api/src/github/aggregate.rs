use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{GitHubProfile, GithubRepo, GithubUser, RepositorySummary};

const TOP_REPOSITORIES: usize = 5;
const RECENT_WINDOW_DAYS: i64 = 180;
pub const NO_RECENT_ACTIVITY: &str = "No activity in the last 6 months";

/// Folds the raw user record and repository page into a [`GitHubProfile`].
/// `now` is injected so recency is deterministic under test.
pub fn aggregate(
    username: &str,
    user: GithubUser,
    repos: Vec<GithubRepo>,
    now: DateTime<Utc>,
) -> GitHubProfile {
    let total_stars_received = repos.iter().map(|r| u64::from(r.stargazers_count)).sum();
    let total_forks_received = repos.iter().map(|r| u64::from(r.forks_count)).sum();

    GitHubProfile {
        username: username.to_string(),
        name: user
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.to_string()),
        bio: user.bio,
        company: user.company,
        location: user.location,
        public_repos: user.public_repos,
        followers: user.followers,
        following: user.following,
        total_stars_received,
        total_forks_received,
        languages: language_histogram(&repos),
        recent_activity: recent_activity(&repos, now),
        top_repositories: top_repositories(repos),
    }
}

pub fn language_histogram(repos: &[GithubRepo]) -> BTreeMap<String, u32> {
    let mut languages = BTreeMap::new();
    for language in repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.is_empty())
    {
        *languages.entry(language.to_string()).or_insert(0) += 1;
    }
    languages
}

/// Most-starred first; ties keep API order.
fn top_repositories(mut repos: Vec<GithubRepo>) -> Vec<RepositorySummary> {
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos
        .into_iter()
        .take(TOP_REPOSITORIES)
        .map(|repo| RepositorySummary {
            name: repo.name,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language,
            url: repo.html_url,
            topics: repo.topics,
            updated_at: repo.updated_at,
        })
        .collect()
}

pub fn recent_activity(repos: &[GithubRepo], now: DateTime<Utc>) -> String {
    let recent: Vec<(&str, i64)> = repos
        .iter()
        .filter_map(|repo| {
            let updated = DateTime::parse_from_rfc3339(repo.updated_at.as_deref()?).ok()?;
            // Timestamps ahead of `now` (clock skew) count as today.
            let days = (now - updated.with_timezone(&Utc)).num_days().max(0);
            (days <= RECENT_WINDOW_DAYS).then_some((repo.name.as_str(), days))
        })
        .collect();

    match recent.iter().min_by_key(|(_, days)| *days) {
        Some((name, days)) => format!(
            "Active on {} repositories in the last 6 months. Most recently updated: {name} ({days} days ago)",
            recent.len()
        ),
        None => NO_RECENT_ACTIVITY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn repo(name: &str, stars: u32, language: Option<&str>, days_ago: i64) -> GithubRepo {
        GithubRepo {
            name: name.to_string(),
            stargazers_count: stars,
            forks_count: 1,
            language: language.map(String::from),
            html_url: format!("https://github.com/octo/{name}"),
            updated_at: Some((now() - Duration::days(days_ago)).to_rfc3339()),
            ..GithubRepo::default()
        }
    }

    #[test]
    fn test_stars_and_top_repositories_are_ordered() {
        let repos = vec![
            repo("alpha", 10, Some("Rust"), 400),
            repo("beta", 5, Some("Go"), 400),
            repo("gamma", 50, Some("Rust"), 400),
        ];
        let profile = aggregate("octo", GithubUser::default(), repos, now());

        assert_eq!(profile.total_stars_received, 65);
        assert_eq!(profile.total_forks_received, 3);
        let stars: Vec<u32> = profile.top_repositories.iter().map(|r| r.stars).collect();
        assert_eq!(stars, vec![50, 10, 5]);
    }

    #[test]
    fn test_top_repositories_capped_at_five() {
        let repos = (0..8).map(|i| repo(&format!("r{i}"), i, None, 1)).collect();
        let profile = aggregate("octo", GithubUser::default(), repos, now());
        assert_eq!(profile.top_repositories.len(), 5);
        assert_eq!(profile.top_repositories[0].name, "r7");
    }

    #[test]
    fn test_language_histogram_skips_missing_languages() {
        let repos = vec![
            repo("a", 0, Some("Rust"), 1),
            repo("b", 0, Some("Rust"), 1),
            repo("c", 0, None, 1),
            repo("d", 0, Some("Python"), 1),
        ];
        let histogram = language_histogram(&repos);
        assert_eq!(histogram.get("Rust"), Some(&2));
        assert_eq!(histogram.get("Python"), Some(&1));
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn test_recent_activity_counts_only_last_six_months() {
        let repos = vec![repo("fresh", 0, None, 10), repo("stale", 0, None, 200)];
        assert_eq!(
            recent_activity(&repos, now()),
            "Active on 1 repositories in the last 6 months. Most recently updated: fresh (10 days ago)"
        );
    }

    #[test]
    fn test_recent_activity_picks_most_recent() {
        let repos = vec![repo("older", 0, None, 90), repo("newer", 0, None, 3)];
        assert!(recent_activity(&repos, now()).ends_with("newer (3 days ago)"));
    }

    #[test]
    fn test_future_timestamp_counts_as_today() {
        let repos = vec![repo("skewed", 0, None, -3), repo("older", 0, None, 20)];
        assert_eq!(
            recent_activity(&repos, now()),
            "Active on 2 repositories in the last 6 months. Most recently updated: skewed (0 days ago)"
        );
    }

    #[test]
    fn test_no_recent_activity_sentinel() {
        assert_eq!(recent_activity(&[], now()), "No activity in the last 6 months");
        let stale = vec![repo("old", 0, None, 181)];
        assert_eq!(recent_activity(&stale, now()), NO_RECENT_ACTIVITY);
    }

    #[test]
    fn test_unparseable_timestamp_is_ignored() {
        let mut broken = repo("broken", 0, None, 1);
        broken.updated_at = Some("yesterday".to_string());
        assert_eq!(recent_activity(&[broken], now()), NO_RECENT_ACTIVITY);
    }

    #[test]
    fn test_missing_name_falls_back_to_username() {
        let profile = aggregate("octo", GithubUser::default(), Vec::new(), now());
        assert_eq!(profile.name, "octo");

        let named = GithubUser {
            name: Some("The Octocat".to_string()),
            ..GithubUser::default()
        };
        assert_eq!(aggregate("octo", named, Vec::new(), now()).name, "The Octocat");
    }
}

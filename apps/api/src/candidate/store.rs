//! Profile Store: keyed bundles of everything gathered for a candidate.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`; the only implementation keeps bundles
//! for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::github::GitHubProfile;
use crate::job_posting::JobPosting;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub resume_text: String,
    pub github: Option<GitHubProfile>,
    pub linkedin: Option<JobPosting>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, profile_id: &str) -> Option<ProfileBundle>;

    /// Insert or overwrite.
    async fn put(&self, profile_id: String, bundle: ProfileBundle);
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, ProfileBundle>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, profile_id: &str) -> Option<ProfileBundle> {
        self.profiles.read().await.get(profile_id).cloned()
    }

    async fn put(&self, profile_id: String, bundle: ProfileBundle) {
        self.profiles.write().await.insert(profile_id, bundle);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn bundle(resume: &str) -> ProfileBundle {
        ProfileBundle {
            resume_text: resume.to_string(),
            github: None,
            linkedin: None,
        }
    }

    #[tokio::test]
    async fn get_returns_what_was_put() {
        let store = InMemoryProfileStore::new();
        store.put("abc123def456".to_string(), bundle("cv")).await;
        assert_eq!(store.get("abc123def456").await, Some(bundle("cv")));
        assert_eq!(store.get("missing").await, None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_entry() {
        let store = InMemoryProfileStore::new();
        store.put("id".to_string(), bundle("first")).await;
        store.put("id".to_string(), bundle("second")).await;
        assert_eq!(store.get("id").await.unwrap().resume_text, "second");
    }

    #[tokio::test]
    async fn concurrent_writers_are_all_visible() {
        let store: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.put(format!("p{i}"), bundle("cv")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        for i in 0..16 {
            assert!(store.get(&format!("p{i}")).await.is_some());
        }
    }
}

//! Run results — explicit, caller-owned result values with a defined
//! lifecycle: created when a run completes, replaced atomically, cleared
//! wholesale on reset. No ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The two opaque text blobs a completed run holds, plus identity.
/// Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub tailored_resume: String,
    pub interview_prep: String,
    pub created_at: DateTime<Utc>,
}

impl RunResult {
    pub fn new(tailored_resume: String, interview_prep: String) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            tailored_resume,
            interview_prep,
            created_at: Utc::now(),
        }
    }
}

/// Shared store of completed runs. Written once per run after the full
/// pipeline completes; reads are concurrent-safe.
#[derive(Debug, Clone, Default)]
pub struct RunStore {
    inner: Arc<RwLock<HashMap<Uuid, RunResult>>>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a completed run, replacing any previous result with the same id.
    pub async fn insert(&self, result: RunResult) {
        self.inner.write().await.insert(result.run_id, result);
    }

    pub async fn get(&self, run_id: Uuid) -> Option<RunResult> {
        self.inner.read().await.get(&run_id).cloned()
    }

    /// Reset: clears every stored result.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let store = RunStore::new();
        let result = RunResult::new("resume".to_string(), "prep".to_string());
        let id = result.run_id;
        store.insert(result).await;

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.tailored_resume, "resume");
        assert_eq!(fetched.interview_prep, "prep");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = RunStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_clear_empties_the_store_wholesale() {
        let store = RunStore::new();
        store
            .insert(RunResult::new("a".to_string(), "b".to_string()))
            .await;
        store
            .insert(RunResult::new("c".to_string(), "d".to_string()))
            .await;
        assert_eq!(store.len().await, 2);

        store.clear().await;
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_results_are_independent_clones() {
        // Mutating a fetched copy never touches the stored value.
        let store = RunStore::new();
        let result = RunResult::new("original".to_string(), "prep".to_string());
        let id = result.run_id;
        store.insert(result).await;

        let mut copy = store.get(id).await.unwrap();
        copy.tailored_resume.push_str(" - edited");
        assert_eq!(store.get(id).await.unwrap().tailored_resume, "original");
    }
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-memory pattern storage for development, tests and file-backed front ends.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{Pattern, PatternId};
use crate::infrastructure::repository::{PatternFilter, PatternRepository, RepositoryError};

/// Keeps patterns in insertion order so that `offset`/`limit` are stable.
#[derive(Clone, Default)]
pub struct InMemoryPatternRepository {
    patterns: Arc<Mutex<Vec<Pattern>>>,
}

impl InMemoryPatternRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self {
            patterns: Arc::new(Mutex::new(patterns.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Pattern>>, RepositoryError> {
        self.patterns
            .lock()
            .map_err(|_| RepositoryError::database("Mutex poisoned"))
    }

    /// Add a pattern, replacing any existing one with the same id.
    pub fn insert(&self, pattern: Pattern) -> Result<(), RepositoryError> {
        if pattern.id.is_empty() {
            return Err(RepositoryError::validation("id", "pattern id cannot be empty"));
        }
        let mut patterns = self.lock()?;
        match patterns.iter_mut().find(|p| p.id == pattern.id) {
            Some(existing) => *existing = pattern,
            None => patterns.push(pattern),
        }
        Ok(())
    }

    /// Copy of every stored pattern, in storage order.
    pub fn snapshot(&self) -> Result<Vec<Pattern>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PatternRepository for InMemoryPatternRepository {
    async fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<Pattern>, RepositoryError> {
        let patterns = self.lock()?;
        Ok(filter.apply(patterns.iter()))
    }

    async fn get_pattern(&self, id: &PatternId) -> Result<Pattern, RepositoryError> {
        let patterns = self.lock()?;
        patterns
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn update_pattern(&self, pattern: &Pattern) -> Result<(), RepositoryError> {
        let mut patterns = self.lock()?;
        let existing = patterns
            .iter_mut()
            .find(|p| p.id == pattern.id)
            .ok_or_else(|| RepositoryError::not_found(&pattern.id))?;
        *existing = pattern.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_and_update() {
        let repo = InMemoryPatternRepository::new();
        repo.insert(Pattern::new("ls", "list files").with_id("1")).unwrap();

        let mut pattern = repo.get_pattern(&PatternId::from("1")).await.unwrap();
        pattern.strength = 77.0;
        repo.update_pattern(&pattern).await.unwrap();

        let stored = repo.get_pattern(&PatternId::from("1")).await.unwrap();
        assert_eq!(stored.strength, 77.0);
    }

    #[tokio::test]
    async fn test_missing_pattern_is_not_found() {
        let repo = InMemoryPatternRepository::new();
        let id = PatternId::from("nope");

        let err = repo.get_pattern(&id).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound { id: id.clone() });

        let err = repo.update_pattern(&Pattern::new("x", "").with_id("nope")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_applies_filter_in_insertion_order() {
        let repo = InMemoryPatternRepository::with_patterns(vec![
            Pattern::new("a", "").with_id("a").with_space("work"),
            Pattern::new("b", "").with_id("b").with_space("home"),
            Pattern::new("c", "").with_id("c").with_space("work"),
        ]);

        let listed = repo.list_patterns(&PatternFilter::in_space("work")).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(repo.list_patterns(&PatternFilter::default()).await.unwrap().len(), 3);
    }

    #[test]
    fn test_insert_replaces_and_validates() {
        let repo = InMemoryPatternRepository::new();
        repo.insert(Pattern::new("a", "first").with_id("1")).unwrap();
        repo.insert(Pattern::new("a", "second").with_id("1")).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.snapshot().unwrap()[0].response, "second");
        assert!(matches!(
            repo.insert(Pattern::new("a", "").with_id("  ")),
            Err(RepositoryError::Validation { .. })
        ));
    }
}

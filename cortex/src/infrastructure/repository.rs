// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository interface for patterns
//! The storage contract the cortex consumes; implementations live outside the matching core

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Pattern, PatternId};

/// Candidate selection for [`PatternRepository::list_patterns`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternFilter {
    pub space_id: Option<String>,
    pub project: Option<String>,
    /// A pattern must carry every listed tag.
    pub tags: Vec<String>,
    /// 0 means unbounded.
    pub limit: usize,
    pub offset: usize,
}

impl PatternFilter {
    pub fn in_space(space_id: impl Into<String>) -> Self {
        Self {
            space_id: Some(space_id.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Field predicate only; `limit` and `offset` are applied by the repository.
    pub fn matches(&self, pattern: &Pattern) -> bool {
        if let Some(space_id) = &self.space_id {
            if pattern.space_id.as_ref() != Some(space_id) {
                return false;
            }
        }
        if let Some(project) = &self.project {
            if pattern.project.as_ref() != Some(project) {
                return false;
            }
        }
        self.tags.iter().all(|tag| pattern.has_tag(tag))
    }

    /// Apply predicate, then offset, then limit, preserving storage order.
    pub fn apply<'a, I>(&self, patterns: I) -> Vec<Pattern>
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        let selected = patterns
            .into_iter()
            .filter(|p| self.matches(p))
            .skip(self.offset)
            .cloned();

        if self.limit > 0 {
            selected.take(self.limit).collect()
        } else {
            selected.collect()
        }
    }
}

#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// List patterns selected by `filter`, in storage order
    async fn list_patterns(&self, filter: &PatternFilter) -> Result<Vec<Pattern>, RepositoryError>;

    /// Fetch one pattern; `RepositoryError::NotFound` when absent
    async fn get_pattern(&self, id: &PatternId) -> Result<Pattern, RepositoryError>;

    /// Overwrite an existing pattern; `RepositoryError::NotFound` when absent
    async fn update_pattern(&self, pattern: &Pattern) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Pattern not found: {id}")]
    NotFound { id: PatternId },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RepositoryError {
    pub fn not_found(id: &PatternId) -> Self {
        RepositoryError::NotFound { id: id.clone() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        RepositoryError::Database {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_space_project_tags() {
        let pattern = Pattern::new("t", "r")
            .with_space("work")
            .with_project("reflex")
            .with_tag("git")
            .with_tag("cli");

        assert!(PatternFilter::default().matches(&pattern));
        assert!(PatternFilter::in_space("work").with_tag("git").matches(&pattern));
        assert!(!PatternFilter::in_space("home").matches(&pattern));
        assert!(!PatternFilter::default().with_tag("git").with_tag("docker").matches(&pattern));

        let by_project = PatternFilter {
            project: Some("other".to_string()),
            ..PatternFilter::default()
        };
        assert!(!by_project.matches(&pattern));
    }

    #[test]
    fn test_filter_offset_then_limit() {
        let patterns: Vec<_> = (0..6).map(|i| Pattern::new("t", "").with_id(i.to_string())).collect();
        let filter = PatternFilter {
            offset: 2,
            limit: 3,
            ..PatternFilter::default()
        };

        let ids: Vec<_> = filter.apply(&patterns).into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_errors_are_matched_by_variant() {
        let err = RepositoryError::not_found(&PatternId::from("x"));
        assert!(matches!(err, RepositoryError::NotFound { ref id } if id.as_str() == "x"));
        assert_eq!(err.to_string(), "Pattern not found: x");

        let err: RepositoryError = serde_json::from_str::<Pattern>("{").unwrap_err().into();
        assert!(matches!(err, RepositoryError::Serialization { .. }));
    }
}

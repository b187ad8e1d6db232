// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Per-query match results. Confidence is computed for one query and never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::pattern::Pattern;

/// Which matcher produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBranch {
    Exact,
    Keyword,
}

impl MatchBranch {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchBranch::Exact => "exact",
            MatchBranch::Keyword => "keyword",
        }
    }
}

impl fmt::Display for MatchBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern borrowed from the caller's candidate list, scored against a query.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchResult<'a> {
    pub pattern: &'a Pattern,
    /// Score in [0, 100].
    pub confidence: f64,
    pub branch: MatchBranch,
}

impl<'a> MatchResult<'a> {
    pub fn new(pattern: &'a Pattern, confidence: f64, branch: MatchBranch) -> Self {
        Self {
            pattern,
            confidence,
            branch,
        }
    }

    /// Detach the result from the candidate list it borrows from.
    pub fn into_owned(self) -> PatternMatch {
        PatternMatch {
            pattern: self.pattern.clone(),
            confidence: self.confidence,
            branch: self.branch,
        }
    }
}

/// Owned counterpart of [`MatchResult`], returned across async/storage boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: Pattern,
    pub confidence: f64,
    pub branch: MatchBranch,
}

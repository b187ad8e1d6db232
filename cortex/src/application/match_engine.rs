// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # MatchEngine — Ranked Retrieval
//!
//! Runs the exact and keyword matchers over the same candidate list, merges
//! their results, drops anything under the confidence threshold, sorts by
//! confidence (highest first) and truncates to the limit.
//!
//! ## Ordering
//!
//! Both matchers always run. `exact_first` only picks which matcher's results
//! enter the working list first; the sort is stable, so the flag decides the
//! order of equal-confidence results and nothing else. A pattern matched by
//! both strategies appears twice, once per branch.
//!
//! ## Tags and spaces
//!
//! `MatchOptions::tags` and `MatchOptions::space_id` travel with the request
//! but are not applied here. Narrow the candidate list before calling (see
//! `PatternFilter` and `PatternService::search`).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::application::matcher::{ExactMatcher, KeywordMatcher, Matcher};
use crate::domain::{MatchResult, Pattern};

pub const DEFAULT_MATCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Minimum confidence, in [0, 100], a result must reach.
    pub threshold: f64,
    /// Maximum number of results; 0 means unbounded.
    pub limit: usize,
    pub exact_first: bool,
    /// Informational; filter candidates before matching.
    pub tags: Vec<String>,
    /// Informational; filter candidates before matching.
    pub space_id: Option<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            limit: DEFAULT_MATCH_LIMIT,
            exact_first: true,
            tags: Vec::new(),
            space_id: None,
        }
    }
}

impl MatchOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_exact_first(mut self, exact_first: bool) -> Self {
        self.exact_first = exact_first;
        self
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MatchEngine {
    exact: ExactMatcher,
    keyword: KeywordMatcher,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self {
            exact: ExactMatcher::new(),
            keyword: KeywordMatcher::new(),
        }
    }

    /// Rank `patterns` against `query`.
    ///
    /// Returns an empty list for an empty (or whitespace-only) query or an
    /// empty candidate list. Never fails.
    pub fn match_all<'a>(
        &self,
        query: &str,
        patterns: &'a [Pattern],
        options: &MatchOptions,
    ) -> Vec<MatchResult<'a>> {
        if patterns.is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let exact = self.exact.find(query, patterns);
        let keyword = self.keyword.find(query, patterns);

        let mut results = Vec::with_capacity(exact.len() + keyword.len());
        if options.exact_first {
            results.extend(exact);
            results.extend(keyword);
        } else {
            results.extend(keyword);
            results.extend(exact);
        }

        results.retain(|r| r.confidence >= options.threshold);

        // Stable: ties keep the insertion order chosen above.
        results.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));

        if options.limit > 0 {
            results.truncate(options.limit);
        }

        results
    }

    /// Best single match, if any.
    pub fn match_one<'a>(&self, query: &str, patterns: &'a [Pattern]) -> Option<MatchResult<'a>> {
        let options = MatchOptions {
            threshold: 0.0,
            limit: 1,
            exact_first: true,
            ..MatchOptions::default()
        };

        self.match_all(query, patterns, &options).into_iter().next()
    }
}

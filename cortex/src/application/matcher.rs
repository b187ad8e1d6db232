// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Matchers
//!
//! Two stateless scoring strategies over a borrowed candidate list:
//!
//! | Matcher | Branch | Confidence |
//! |---------|--------|------------|
//! | [`ExactMatcher`] | `exact` | 100 when the trimmed, lowercased trigger equals the query |
//! | [`KeywordMatcher`] | `keyword` | share of query tokens found in the trigger, × 100 |
//!
//! Both preserve input order and emit at most one result per pattern.
//! Neither holds per-call state, so one instance can serve concurrent callers.

use crate::application::tokenizer::tokenize;
use crate::domain::{MatchBranch, MatchResult, Pattern};

pub const EXACT_CONFIDENCE: f64 = 100.0;

/// A query scorer over a candidate list.
pub trait Matcher: Send + Sync {
    fn find<'a>(&self, query: &str, patterns: &'a [Pattern]) -> Vec<MatchResult<'a>>;
}

/// Whole-string equality, ignoring case and surrounding whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatcher;

impl ExactMatcher {
    pub fn new() -> Self {
        Self
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Matcher for ExactMatcher {
    fn find<'a>(&self, query: &str, patterns: &'a [Pattern]) -> Vec<MatchResult<'a>> {
        let query = normalize(query);

        patterns
            .iter()
            .filter(|pattern| normalize(&pattern.trigger) == query)
            .map(|pattern| MatchResult::new(pattern, EXACT_CONFIDENCE, MatchBranch::Exact))
            .collect()
    }
}

/// Token-overlap scoring.
///
/// A query token counts as matched when some trigger token contains it or is
/// contained by it. Each query token is counted at most once.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordMatcher;

impl KeywordMatcher {
    pub fn new() -> Self {
        Self
    }

    fn matched_tokens(query_tokens: &[String], trigger_tokens: &[String]) -> usize {
        query_tokens
            .iter()
            .filter(|qt| {
                trigger_tokens
                    .iter()
                    .any(|tt| tt.contains(qt.as_str()) || qt.contains(tt.as_str()))
            })
            .count()
    }
}

impl Matcher for KeywordMatcher {
    fn find<'a>(&self, query: &str, patterns: &'a [Pattern]) -> Vec<MatchResult<'a>> {
        let query_tokens = tokenize(&query.to_lowercase());
        if query_tokens.is_empty() {
            return Vec::new();
        }
        let total = query_tokens.len() as f64;

        patterns
            .iter()
            .filter_map(|pattern| {
                let trigger_tokens = tokenize(&pattern.trigger.to_lowercase());
                let matched = Self::matched_tokens(&query_tokens, &trigger_tokens);
                (matched > 0).then(|| {
                    MatchResult::new(pattern, matched as f64 / total * 100.0, MatchBranch::Keyword)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(triggers: &[(&str, &str)]) -> Vec<Pattern> {
        triggers
            .iter()
            .map(|(id, trigger)| Pattern::new(*trigger, "").with_id(*id))
            .collect()
    }

    #[test]
    fn test_exact_ignores_case_and_whitespace() {
        let candidates = patterns(&[("1", "  Git Status "), ("2", "git stash")]);
        let results = ExactMatcher::new().find("GIT STATUS", &candidates);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pattern.id.as_str(), "1");
        assert_eq!(results[0].confidence, 100.0);
        assert_eq!(results[0].branch, MatchBranch::Exact);
    }

    #[test]
    fn test_exact_has_no_partial_credit() {
        let candidates = patterns(&[("1", "git status --short")]);
        assert!(ExactMatcher::new().find("git status", &candidates).is_empty());
    }

    #[test]
    fn test_exact_keeps_input_order() {
        let candidates = patterns(&[("b", "deploy"), ("a", "Deploy"), ("c", "build")]);
        let ids: Vec<_> = ExactMatcher::new()
            .find("deploy", &candidates)
            .iter()
            .map(|r| r.pattern.id.as_str())
            .collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_keyword_full_overlap() {
        let candidates = patterns(&[("2", "docker run container")]);
        let results = KeywordMatcher::new().find("docker container", &candidates);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence, 100.0);
        assert_eq!(results[0].branch, MatchBranch::Keyword);
    }

    #[test]
    fn test_keyword_partial_overlap() {
        let candidates = patterns(&[("1", "restart nginx")]);
        let results = KeywordMatcher::new().find("restart the server now", &candidates);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence, 25.0);
    }

    #[test]
    fn test_keyword_substring_either_direction() {
        let candidates = patterns(&[("1", "kubernetes"), ("2", "db")]);
        let results = KeywordMatcher::new().find("kube database", &candidates);

        // "kube" sits inside "kubernetes"; "database" does not contain "db".
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pattern.id.as_str(), "1");
        assert_eq!(results[0].confidence, 50.0);

        let kube = patterns(&[("3", "kube")]);
        let results = KeywordMatcher::new().find("kubernetes-cluster", &kube);
        assert_eq!(results[0].confidence, 50.0);
    }

    #[test]
    fn test_keyword_counts_each_query_token_once() {
        let candidates = patterns(&[("1", "log logs logger")]);
        let results = KeywordMatcher::new().find("log", &candidates);

        assert_eq!(results[0].confidence, 100.0);
    }

    #[test]
    fn test_keyword_repeated_query_tokens_are_counted_separately() {
        let candidates = patterns(&[("1", "build")]);
        let results = KeywordMatcher::new().find("build build test", &candidates);

        assert!((results[0].confidence - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_no_overlap_yields_nothing() {
        let candidates = patterns(&[("1", "npm install")]);
        assert!(KeywordMatcher::new().find("cargo build", &candidates).is_empty());
    }

    #[test]
    fn test_keyword_empty_query() {
        let candidates = patterns(&[("1", "anything")]);
        assert!(KeywordMatcher::new().find("", &candidates).is_empty());
        assert!(KeywordMatcher::new().find("--//..", &candidates).is_empty());
    }
}

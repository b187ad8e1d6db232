// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Cortex Application Layer
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tokenizer`] | `tokenize` |
//! | [`matcher`] | `Matcher`, `ExactMatcher`, `KeywordMatcher` |
//! | [`match_engine`] | `MatchEngine`, `MatchOptions` |
//! | [`pattern_service`] | `PatternService`, `StandardPatternService`, `DecayReport` |

pub mod tokenizer;
pub mod matcher;
pub mod match_engine;
pub mod pattern_service;

pub use tokenizer::tokenize;
pub use matcher::{ExactMatcher, KeywordMatcher, Matcher};
pub use match_engine::{MatchEngine, MatchOptions};
pub use pattern_service::{DecayFailure, DecayReport, PatternService, SearchRequest, StandardPatternService};

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Cortex Domain Layer
//!
//! Pure domain types. No I/O dependencies.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`pattern`] | `Pattern`, `PatternId` |
//! | [`match_result`] | `MatchResult`, `MatchBranch`, `PatternMatch` |
//! | [`lifecycle`] | `reinforce`, `decay`, `DecayOutcome` |
//! | [`events`] | `PatternEvent` |

pub mod pattern;
pub mod match_result;
pub mod lifecycle;
pub mod events;

pub use pattern::*;
pub use match_result::*;
pub use lifecycle::{DecayOutcome, MAX_REINFORCE_AMOUNT, DEFAULT_REINFORCE_AMOUNT};
pub use events::*;

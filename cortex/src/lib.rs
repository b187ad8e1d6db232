// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `reflex-cortex` — Pattern Matching & Strength Lifecycle
//!
//! Stores nothing itself. Given a candidate list of [`Pattern`]s obtained from a
//! [`PatternRepository`], the cortex ranks them against a free-text query and
//! applies reinforcement and time decay to their strength.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Pattern`, `MatchResult`, lifecycle arithmetic, events |
//! | [`application`] | Application | `MatchEngine`, matchers, `PatternService` |
//! | [`infrastructure`] | Infrastructure | `PatternRepository`, in-memory store, `EventBus` |
//!
//! The domain layer and the matchers perform no I/O and no logging; only the
//! application service talks to storage and emits `tracing` output.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::*;

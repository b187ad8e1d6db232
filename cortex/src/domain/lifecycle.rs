// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Pattern Lifecycle — Reinforcement & Time Decay
//!
//! Strength arithmetic for a single [`Pattern`]. Both operators take the
//! pattern by value and hand the updated value back; writing it to storage is
//! the caller's job. Neither performs I/O and neither can fail on a
//! well-formed pattern.
//!
//! ## Reinforcement
//!
//! `strength = min(100, strength + amount)` where a non-positive `amount`
//! falls back to [`DEFAULT_REINFORCE_AMOUNT`] and any amount is capped at
//! [`MAX_REINFORCE_AMOUNT`].
//!
//! ## Decay
//!
//! Linear in elapsed days since `updated_at`, skipped entirely inside the
//! first [`DECAY_GRACE_HOURS`]:
//!
//! ```text
//! days        = hours_since_update / 24
//! decay       = decay_rate × days × 100
//! strength    = max(0, strength − decay)
//! ```

use chrono::{DateTime, Utc};

use super::pattern::{clamp_strength, Pattern, MAX_STRENGTH, MIN_STRENGTH};

pub const DEFAULT_REINFORCE_AMOUNT: f64 = 5.0;
pub const MAX_REINFORCE_AMOUNT: f64 = 20.0;

/// No decay is applied until this many hours have passed since the last update.
pub const DECAY_GRACE_HOURS: f64 = 24.0;

const HOURS_PER_DAY: f64 = 24.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Result of [`decay`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecayOutcome {
    pub pattern: Pattern,
    /// `false` when decay is disabled or the grace window has not elapsed.
    pub applied: bool,
    /// Strength actually removed (0 when not applied).
    pub amount: f64,
}

/// Normalise a requested reinforcement amount.
pub fn reinforce_amount(amount: f64) -> f64 {
    // `!(amount > 0.0)` also routes NaN to the default.
    if !(amount > 0.0) {
        return DEFAULT_REINFORCE_AMOUNT;
    }
    amount.min(MAX_REINFORCE_AMOUNT)
}

/// Raise the pattern's strength and count the reinforcement.
pub fn reinforce(mut pattern: Pattern, amount: f64) -> Pattern {
    let amount = reinforce_amount(amount);
    pattern.strength = clamp_strength((pattern.strength + amount).min(MAX_STRENGTH));
    pattern.reinforce_count += 1;
    pattern
}

/// Hours elapsed between `since` and `now`, negative if `since` is in the future.
fn hours_between(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_seconds() as f64 / SECONDS_PER_HOUR
}

/// Apply time decay as of `now`.
pub fn decay(mut pattern: Pattern, now: DateTime<Utc>) -> DecayOutcome {
    if !pattern.decay_enabled {
        return DecayOutcome {
            pattern,
            applied: false,
            amount: 0.0,
        };
    }

    let hours_since_update = hours_between(pattern.updated_at, now);
    if hours_since_update < DECAY_GRACE_HOURS {
        return DecayOutcome {
            pattern,
            applied: false,
            amount: 0.0,
        };
    }

    let days = hours_since_update / HOURS_PER_DAY;
    // A negative rate must not turn decay into reinforcement.
    let decay_amount = (pattern.decay_rate * days * 100.0).max(0.0);

    let before = pattern.strength;
    pattern.strength = clamp_strength((pattern.strength - decay_amount).max(MIN_STRENGTH));
    pattern.decay_count += 1;

    DecayOutcome {
        amount: before - pattern.strength,
        pattern,
        applied: true,
    }
}

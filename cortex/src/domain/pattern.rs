// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Pattern Aggregate
//!
//! A [`Pattern`] is a trigger → response association whose `strength` moves
//! over time: reinforcement raises it, decay lowers it. Storage owns the
//! pattern; the cortex only borrows it for matching and takes it by value for
//! lifecycle operations (see [`crate::domain::lifecycle`]).
//!
//! # Invariants
//!
//! - `0 ≤ strength ≤ 100` after every mutator.
//! - A pattern is *active* iff `strength ≥ threshold`. Never stored.
//! - `reinforce_count` / `decay_count` only grow, by one per applied operation.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_STRENGTH: f64 = 0.0;
pub const MAX_STRENGTH: f64 = 100.0;

pub const DEFAULT_STRENGTH: f64 = 50.0;
pub const DEFAULT_THRESHOLD: f64 = 30.0;
/// Fraction of full strength lost per elapsed day.
pub const DEFAULT_DECAY_RATE: f64 = 0.01;

/// Opaque pattern identifier. Generated ids are UUID v4 strings, but any
/// non-empty string assigned by storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(pub String);

impl PatternId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for PatternId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PatternId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default)]
    pub id: PatternId,
    pub trigger: String,
    #[serde(default)]
    pub response: String,

    /// Current relevance, in [0, 100].
    #[serde(default = "default_strength")]
    pub strength: f64,
    /// Minimum strength for the pattern to count as active.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_decay_enabled")]
    pub decay_enabled: bool,
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    #[serde(default)]
    pub reinforce_count: u64,
    #[serde(default)]
    pub decay_count: u64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

fn default_strength() -> f64 {
    DEFAULT_STRENGTH
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_decay_enabled() -> bool {
    true
}

fn default_decay_rate() -> f64 {
    DEFAULT_DECAY_RATE
}

impl Pattern {
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PatternId::new(),
            trigger: trigger.into(),
            response: response.into(),
            strength: DEFAULT_STRENGTH,
            threshold: DEFAULT_THRESHOLD,
            decay_enabled: true,
            decay_rate: DEFAULT_DECAY_RATE,
            reinforce_count: 0,
            decay_count: 0,
            created_at: now,
            updated_at: now,
            last_used_at: None,
            tags: BTreeSet::new(),
            project: None,
            space_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<PatternId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the strength, clamped into [0, 100].
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = clamp_strength(strength);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(MIN_STRENGTH, MAX_STRENGTH);
        self
    }

    pub fn with_decay(mut self, enabled: bool, rate: f64) -> Self {
        self.decay_enabled = enabled;
        self.decay_rate = rate;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_space(mut self, space_id: impl Into<String>) -> Self {
        self.space_id = Some(space_id.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Derived activation state: `strength ≥ threshold`.
    pub fn is_active(&self) -> bool {
        self.strength >= self.threshold
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Clamp a strength value into [0, 100]. NaN collapses to 0.
pub fn clamp_strength(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_STRENGTH;
    }
    value.clamp(MIN_STRENGTH, MAX_STRENGTH)
}

/// Keep only the patterns that are currently active.
pub fn filter_active(patterns: &[Pattern]) -> Vec<Pattern> {
    patterns.iter().filter(|p| p.is_active()).cloned().collect()
}

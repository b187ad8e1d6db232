// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Domain events for the cortex
//! Published on the [`crate::infrastructure::EventBus`] after a change has been persisted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::pattern::PatternId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternEvent {
    /// Strength was raised in response to positive feedback
    PatternReinforced {
        pattern_id: PatternId,
        old_strength: f64,
        new_strength: f64,
        reinforce_count: u64,
        timestamp: DateTime<Utc>,
    },

    /// Time decay was applied and persisted
    PatternDecayed {
        pattern_id: PatternId,
        old_strength: f64,
        new_strength: f64,
        decay_count: u64,
        /// Whether the pattern is still at or above its threshold
        active: bool,
        timestamp: DateTime<Utc>,
    },

    /// A batch decay pass over every stored pattern finished
    DecaySweepCompleted {
        examined: usize,
        decayed: usize,
        failed: usize,
        timestamp: DateTime<Utc>,
    },
}

impl PatternEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PatternEvent::PatternReinforced { timestamp, .. } => *timestamp,
            PatternEvent::PatternDecayed { timestamp, .. } => *timestamp,
            PatternEvent::DecaySweepCompleted { timestamp, .. } => *timestamp,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            PatternEvent::PatternReinforced { .. } => "pattern_reinforced",
            PatternEvent::PatternDecayed { .. } => "pattern_decayed",
            PatternEvent::DecaySweepCompleted { .. } => "decay_sweep_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = PatternEvent::PatternReinforced {
            pattern_id: PatternId::from("42"),
            old_strength: 50.0,
            new_strength: 55.0,
            reinforce_count: 1,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"pattern_reinforced\""));

        let deserialized: PatternEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_sweep_event_type() {
        let event = PatternEvent::DecaySweepCompleted {
            examined: 3,
            decayed: 2,
            failed: 1,
            timestamp: Utc::now(),
        };

        assert_eq!(event.event_type(), "decay_sweep_completed");
    }
}

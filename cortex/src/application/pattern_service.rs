// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PatternService — Retrieval, Reinforcement & Decay Sweeps
//!
//! Application service tying storage, the [`MatchEngine`] and the lifecycle
//! arithmetic together:
//!
//! - **Search**: list candidates from storage (narrowed by `PatternFilter`),
//!   optionally drop inactive patterns, then rank with the engine.
//! - **Reinforce**: load, raise strength, stamp usage, persist, publish.
//! - **Decay**: single pattern or a full sweep. A sweep persists only patterns
//!   whose decay was applied; a failed write is logged, recorded in the
//!   [`DecayReport`] and skipped.
//!
//! Persisting a change stamps `updated_at` with the caller's `now`, so the
//! next decay measures elapsed time from the last write rather than
//! compounding over the same interval.
//!
//! Storage errors are returned unchanged. There is no scheduler: decay only
//! runs when a caller asks for it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::application::match_engine::{MatchEngine, MatchOptions};
use crate::domain::lifecycle::{self, DecayOutcome};
use crate::domain::{filter_active, Pattern, PatternEvent, PatternId, PatternMatch};
use crate::infrastructure::{EventBus, PatternFilter, PatternRepository, RepositoryError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub filter: PatternFilter,
    pub options: MatchOptions,
    /// Drop patterns whose strength is below their threshold before matching.
    pub active_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecayFailure {
    pub pattern_id: PatternId,
    pub error: RepositoryError,
}

/// Summary of a [`PatternService::decay_all`] sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecayReport {
    pub examined: usize,
    /// Patterns whose decay was applied and persisted.
    pub decayed: usize,
    pub failures: Vec<DecayFailure>,
}

impl DecayReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[async_trait]
pub trait PatternService: Send + Sync {
    /// Ranked matches for `query` among the stored patterns.
    async fn search(
        &self,
        query: &str,
        request: &SearchRequest,
    ) -> Result<Vec<PatternMatch>, RepositoryError>;

    /// Single best match among the patterns selected by `filter`.
    async fn best_match(
        &self,
        query: &str,
        filter: &PatternFilter,
    ) -> Result<Option<PatternMatch>, RepositoryError>;

    /// Reinforce one pattern and persist it.
    async fn reinforce(
        &self,
        pattern_id: &PatternId,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Pattern, RepositoryError>;

    /// Decay one pattern, persisting only when decay was applied.
    async fn decay(
        &self,
        pattern_id: &PatternId,
        now: DateTime<Utc>,
    ) -> Result<DecayOutcome, RepositoryError>;

    /// Decay every stored pattern. Only listing failures abort the sweep.
    async fn decay_all(&self, now: DateTime<Utc>) -> Result<DecayReport, RepositoryError>;
}

pub struct StandardPatternService {
    pattern_repo: Arc<dyn PatternRepository>,
    event_bus: EventBus,
    engine: MatchEngine,
}

impl StandardPatternService {
    pub fn new(pattern_repo: Arc<dyn PatternRepository>, event_bus: EventBus) -> Self {
        Self {
            pattern_repo,
            event_bus,
            engine: MatchEngine::new(),
        }
    }

    fn require_id(pattern_id: &PatternId) -> Result<(), RepositoryError> {
        if pattern_id.is_empty() {
            return Err(RepositoryError::validation("id", "pattern id is required"));
        }
        Ok(())
    }

    async fn candidates(&self, filter: &PatternFilter, active_only: bool) -> Result<Vec<Pattern>, RepositoryError> {
        let patterns = self.pattern_repo.list_patterns(filter).await?;
        if active_only {
            return Ok(filter_active(&patterns));
        }
        Ok(patterns)
    }

    /// Persist an applied decay and announce it.
    async fn persist_decay(
        &self,
        outcome: &mut DecayOutcome,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let old_strength = outcome.pattern.strength + outcome.amount;
        outcome.pattern.updated_at = now;
        self.pattern_repo.update_pattern(&outcome.pattern).await?;

        self.event_bus.publish(PatternEvent::PatternDecayed {
            pattern_id: outcome.pattern.id.clone(),
            old_strength,
            new_strength: outcome.pattern.strength,
            decay_count: outcome.pattern.decay_count,
            active: outcome.pattern.is_active(),
            timestamp: now,
        });
        Ok(())
    }
}

#[async_trait]
impl PatternService for StandardPatternService {
    async fn search(
        &self,
        query: &str,
        request: &SearchRequest,
    ) -> Result<Vec<PatternMatch>, RepositoryError> {
        let patterns = self.candidates(&request.filter, request.active_only).await?;

        let matches: Vec<PatternMatch> = self
            .engine
            .match_all(query, &patterns, &request.options)
            .into_iter()
            .map(|m| m.into_owned())
            .collect();

        debug!(
            candidates = patterns.len(),
            matches = matches.len(),
            "Pattern search completed"
        );
        Ok(matches)
    }

    async fn best_match(
        &self,
        query: &str,
        filter: &PatternFilter,
    ) -> Result<Option<PatternMatch>, RepositoryError> {
        let patterns = self.candidates(filter, false).await?;
        Ok(self.engine.match_one(query, &patterns).map(|m| m.into_owned()))
    }

    async fn reinforce(
        &self,
        pattern_id: &PatternId,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Pattern, RepositoryError> {
        Self::require_id(pattern_id)?;
        let pattern = self.pattern_repo.get_pattern(pattern_id).await?;
        let old_strength = pattern.strength;

        let mut pattern = lifecycle::reinforce(pattern, amount);
        pattern.updated_at = now;
        pattern.last_used_at = Some(now);

        self.pattern_repo.update_pattern(&pattern).await?;

        info!(
            pattern_id = %pattern.id,
            old_strength,
            new_strength = pattern.strength,
            "Pattern reinforced"
        );
        self.event_bus.publish(PatternEvent::PatternReinforced {
            pattern_id: pattern.id.clone(),
            old_strength,
            new_strength: pattern.strength,
            reinforce_count: pattern.reinforce_count,
            timestamp: now,
        });

        Ok(pattern)
    }

    async fn decay(
        &self,
        pattern_id: &PatternId,
        now: DateTime<Utc>,
    ) -> Result<DecayOutcome, RepositoryError> {
        Self::require_id(pattern_id)?;
        let pattern = self.pattern_repo.get_pattern(pattern_id).await?;

        let mut outcome = lifecycle::decay(pattern, now);
        if outcome.applied {
            self.persist_decay(&mut outcome, now).await?;
            info!(
                pattern_id = %outcome.pattern.id,
                amount = outcome.amount,
                strength = outcome.pattern.strength,
                "Pattern decayed"
            );
        }
        Ok(outcome)
    }

    async fn decay_all(&self, now: DateTime<Utc>) -> Result<DecayReport, RepositoryError> {
        let patterns = self.pattern_repo.list_patterns(&PatternFilter::default()).await?;
        let mut report = DecayReport {
            examined: patterns.len(),
            ..DecayReport::default()
        };

        for pattern in patterns {
            let mut outcome = lifecycle::decay(pattern, now);
            if !outcome.applied {
                continue;
            }

            match self.persist_decay(&mut outcome, now).await {
                Ok(()) => {
                    debug!(
                        pattern_id = %outcome.pattern.id,
                        amount = outcome.amount,
                        "Pattern decayed"
                    );
                    report.decayed += 1;
                }
                Err(e) => {
                    warn!(pattern_id = %outcome.pattern.id, "Failed to persist decayed pattern: {}", e);
                    report.failures.push(DecayFailure {
                        pattern_id: outcome.pattern.id.clone(),
                        error: e,
                    });
                }
            }
        }

        info!(
            examined = report.examined,
            decayed = report.decayed,
            failed = report.failed(),
            "Decay sweep completed"
        );
        self.event_bus.publish(PatternEvent::DecaySweepCompleted {
            examined: report.examined,
            decayed: report.decayed,
            failed: report.failed(),
            timestamp: now,
        });

        Ok(report)
    }
}

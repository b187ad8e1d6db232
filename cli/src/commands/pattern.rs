// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Pattern management commands
//!
//! Commands: list, reinforce, decay

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;

use reflex_cortex::application::{DecayReport, PatternService};
use reflex_cortex::{filter_active, PatternFilter, PatternId, PatternRepository, DEFAULT_REINFORCE_AMOUNT};

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only list patterns in this space
    #[arg(long)]
    pub space: Option<String>,

    /// Only list patterns carrying this tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Only list active patterns
    #[arg(long)]
    pub active_only: bool,
}

#[derive(Args, Debug)]
pub struct ReinforceCommand {
    /// Pattern ID
    #[arg(value_name = "PATTERN_ID")]
    pub pattern_id: String,

    /// Strength to add (non-positive uses the default, capped at 20)
    #[arg(short, long, default_value_t = DEFAULT_REINFORCE_AMOUNT)]
    pub amount: f64,
}

#[derive(Args, Debug)]
pub struct DecayCommand {
    /// Pattern ID; decays every pattern when omitted
    #[arg(value_name = "PATTERN_ID")]
    pub pattern_id: Option<String>,
}

pub async fn list(command: ListCommand, repo: &dyn PatternRepository) -> Result<()> {
    let filter = PatternFilter {
        space_id: command.space,
        tags: command.tags,
        ..PatternFilter::default()
    };
    let patterns = repo
        .list_patterns(&filter)
        .await
        .context("Failed to list patterns")?;
    let patterns = if command.active_only {
        filter_active(&patterns)
    } else {
        patterns
    };

    if patterns.is_empty() {
        println!("{}", "No patterns found".yellow());
        return Ok(());
    }

    println!("{} patterns found:", patterns.len());
    println!(
        "{:<38} {:>8} {:>9} {:<8} {}",
        "ID", "STRENGTH", "THRESHOLD", "STATUS", "TRIGGER"
    );
    for pattern in patterns {
        let status = if pattern.is_active() {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        println!(
            "{:<38} {:>8.1} {:>9.1} {:<8} {}",
            pattern.id,
            pattern.strength,
            pattern.threshold,
            status,
            pattern.trigger.bold()
        );
    }

    Ok(())
}

pub async fn reinforce(command: ReinforceCommand, service: &dyn PatternService) -> Result<()> {
    let pattern_id = PatternId::from(command.pattern_id);
    let pattern = service
        .reinforce(&pattern_id, command.amount, Utc::now())
        .await
        .with_context(|| format!("Failed to reinforce pattern {}", pattern_id))?;

    println!(
        "{}",
        format!(
            "✓ Pattern {} reinforced: strength {:.1} (reinforced {} times)",
            pattern.id, pattern.strength, pattern.reinforce_count
        )
        .green()
    );
    Ok(())
}

pub async fn decay(command: DecayCommand, service: &dyn PatternService) -> Result<()> {
    let now = Utc::now();

    let Some(pattern_id) = command.pattern_id else {
        let report = service.decay_all(now).await.context("Decay sweep failed")?;
        print_report(&report);
        return Ok(());
    };

    let pattern_id = PatternId::from(pattern_id);
    let outcome = service
        .decay(&pattern_id, now)
        .await
        .with_context(|| format!("Failed to decay pattern {}", pattern_id))?;

    if outcome.applied {
        println!(
            "{}",
            format!(
                "✓ Pattern {} decayed by {:.1}: strength {:.1}",
                outcome.pattern.id, outcome.amount, outcome.pattern.strength
            )
            .green()
        );
    } else {
        println!(
            "{}",
            format!("Pattern {} not decayed (disabled or updated within 24h)", outcome.pattern.id).dimmed()
        );
    }
    Ok(())
}

fn print_report(report: &DecayReport) {
    println!(
        "{}",
        format!(
            "✓ Decayed {} of {} patterns",
            report.decayed, report.examined
        )
        .green()
    );

    if !report.failures.is_empty() {
        println!("{}", format!("⚠ {} patterns could not be saved:", report.failed()).yellow());
        for failure in &report.failures {
            println!("  {} {}", failure.pattern_id, failure.error.to_string().red());
        }
    }
}

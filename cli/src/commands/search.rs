// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `reflex match` — rank stored patterns against a query

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use reflex_cortex::application::{PatternService, SearchRequest};
use reflex_cortex::{MatchBranch, PatternFilter, PatternMatch};

use crate::config::ReflexConfig;

#[derive(Args, Debug)]
pub struct MatchCommand {
    /// Query text (multiple words are joined with spaces)
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Minimum confidence (0-100); defaults to matching.threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Maximum number of matches (0 = unbounded); defaults to matching.limit
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// On equal confidence, list keyword matches before exact matches
    #[arg(long)]
    pub keyword_first: bool,

    /// Only consider patterns in this space
    #[arg(long)]
    pub space: Option<String>,

    /// Only consider patterns carrying this tag (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Skip patterns whose strength is below their threshold
    #[arg(long)]
    pub active_only: bool,

    /// Print only the single best match (threshold, limit and --active-only do not apply)
    #[arg(long)]
    pub one: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl MatchCommand {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// Merge flags over configured defaults.
    pub fn to_request(&self, config: &ReflexConfig) -> SearchRequest {
        let mut options = config.matching.to_options();
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        if let Some(limit) = self.limit {
            options.limit = limit;
        }
        if self.keyword_first {
            options.exact_first = false;
        }
        options.tags = self.tags.clone();
        options.space_id = self.space.clone();

        SearchRequest {
            filter: PatternFilter {
                space_id: self.space.clone(),
                tags: self.tags.clone(),
                ..PatternFilter::default()
            },
            options,
            active_only: self.active_only || config.matching.active_only,
        }
    }
}

pub async fn execute(command: MatchCommand, config: &ReflexConfig, service: &dyn PatternService) -> Result<()> {
    let query = command.query_text();
    let request = command.to_request(config);

    let matches: Vec<PatternMatch> = if command.one {
        service
            .best_match(&query, &request.filter)
            .await
            .context("Failed to search patterns")?
            .into_iter()
            .collect()
    } else {
        service
            .search(&query, &request)
            .await
            .context("Failed to search patterns")?
    };

    if command.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    print_matches(&matches);
    Ok(())
}

fn print_matches(matches: &[PatternMatch]) {
    if matches.is_empty() {
        println!("{}", "No matches found".yellow());
        return;
    }

    println!("{} matches found:", matches.len());
    println!(
        "{:<4} {:>6} {:<8} {:<38} {:>8} {}",
        "#", "CONF", "BRANCH", "ID", "STRENGTH", "TRIGGER → RESPONSE"
    );

    for (rank, m) in matches.iter().enumerate() {
        let branch = match m.branch {
            MatchBranch::Exact => m.branch.as_str().green(),
            MatchBranch::Keyword => m.branch.as_str().cyan(),
        };
        println!(
            "{:<4} {:>6.1} {:<8} {:<38} {:>8.1} {} → {}",
            rank + 1,
            m.confidence,
            branch,
            m.pattern.id,
            m.pattern.strength,
            m.pattern.trigger.bold(),
            m.pattern.response
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        command: MatchCommand,
    }

    fn parse(args: &[&str]) -> MatchCommand {
        Harness::parse_from(std::iter::once("reflex").chain(args.iter().copied())).command
    }

    #[test]
    fn test_flags_override_config() {
        let command = parse(&["docker", "logs", "--threshold", "40", "-l", "3", "--keyword-first", "-t", "ops"]);
        let request = command.to_request(&ReflexConfig::default());

        assert_eq!(command.query_text(), "docker logs");
        assert_eq!(request.options.threshold, 40.0);
        assert_eq!(request.options.limit, 3);
        assert!(!request.options.exact_first);
        assert_eq!(request.filter.tags, vec!["ops".to_string()]);
        assert!(!request.active_only);
    }

    #[test]
    fn test_config_defaults_apply() {
        let mut config = ReflexConfig::default();
        config.matching.threshold = 55.0;
        config.matching.active_only = true;

        let request = parse(&["deploy", "--space", "work"]).to_request(&config);

        assert_eq!(request.options.threshold, 55.0);
        assert_eq!(request.options.limit, 10);
        assert!(request.options.exact_first);
        assert!(request.active_only);
        assert_eq!(request.filter.space_id.as_deref(), Some("work"));
    }
}

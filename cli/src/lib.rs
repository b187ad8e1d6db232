// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! reflex CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Configuration, YAML pattern storage and command handlers
//!   wired onto `reflex-cortex`

pub mod commands;
pub mod config;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use reflex_cortex::application::StandardPatternService;
use reflex_cortex::EventBus;

use crate::config::ReflexConfig;
use crate::store::YamlPatternRepository;

/// Open the pattern file selected by `patterns_override` or the config and
/// build a service over it.
pub async fn open_service(
    config: &ReflexConfig,
    patterns_override: Option<PathBuf>,
) -> anyhow::Result<(Arc<YamlPatternRepository>, StandardPatternService)> {
    let path = config.resolve_patterns_path(patterns_override);
    let repo = Arc::new(
        YamlPatternRepository::open(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open pattern file {:?}: {}", path, e))?,
    );
    let service = StandardPatternService::new(repo.clone(), EventBus::with_default_capacity());
    Ok((repo, service))
}

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the reflex CLI

pub mod config;
pub mod pattern;
pub mod search;

pub use self::config::ConfigCommand;
pub use self::pattern::{DecayCommand, ListCommand, ReinforceCommand};
pub use self::search::MatchCommand;

// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Infrastructure layer for the cortex

pub mod repository;
pub mod in_memory;
pub mod event_bus;

pub use repository::{PatternFilter, PatternRepository, RepositoryError};
pub use in_memory::InMemoryPatternRepository;
pub use event_bus::{EventBus, EventReceiver};

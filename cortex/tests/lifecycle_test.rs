// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{Duration, Utc};
use proptest::prelude::*;
use reflex_cortex::lifecycle::{decay, reinforce, DECAY_GRACE_HOURS};
use reflex_cortex::Pattern;

fn pattern(strength: f64, rate: f64, hours_ago: i64) -> (Pattern, chrono::DateTime<Utc>) {
    let now = Utc::now();
    let p = Pattern::new("t", "r")
        .with_strength(strength)
        .with_decay(true, rate)
        .with_updated_at(now - Duration::hours(hours_ago));
    (p, now)
}

#[test]
fn reinforce_above_cap_equals_cap() {
    let (p, _) = pattern(42.0, 0.0, 0);
    assert_eq!(reinforce(p.clone(), 25.0), reinforce(p, 20.0));
}

#[test]
fn reinforce_saturates_at_hundred() {
    let (p, _) = pattern(95.0, 0.0, 0);
    let p = reinforce(p, 10.0);
    assert_eq!(p.strength, 100.0);
    assert_eq!(p.reinforce_count, 1);
}

#[test]
fn decay_below_grace_window() {
    let (p, now) = pattern(50.0, 0.1, 12);
    let outcome = decay(p, now);
    assert!(!outcome.applied);
    assert_eq!(outcome.pattern.strength, 50.0);
}

#[test]
fn decay_after_two_days() {
    let (p, now) = pattern(80.0, 0.1, 48);
    let outcome = decay(p, now);
    assert!(outcome.applied);
    assert!((outcome.pattern.strength - 60.0).abs() < 1e-9);
    assert_eq!(outcome.pattern.decay_count, 1);
}

#[test]
fn decay_can_deactivate() {
    let (p, now) = pattern(35.0, 0.05, 72);
    let p = p.with_threshold(30.0);
    assert!(p.is_active());

    let outcome = decay(p, now);
    assert!((outcome.pattern.strength - 20.0).abs() < 1e-9);
    assert!(!outcome.pattern.is_active());
}

proptest! {
    #[test]
    fn reinforce_never_lowers_and_stays_bounded(strength in 0.0f64..=100.0, amount in -50.0f64..50.0) {
        let (p, _) = pattern(strength, 0.0, 0);
        let out = reinforce(p.clone(), amount);

        prop_assert!(out.strength >= p.strength);
        prop_assert!(out.strength <= 100.0);
        prop_assert!(out.strength - p.strength <= 20.0 + 1e-9);
        prop_assert_eq!(out.reinforce_count, p.reinforce_count + 1);
    }

    #[test]
    fn decay_never_raises_and_stays_bounded(
        strength in 0.0f64..=100.0,
        rate in -0.5f64..1.0,
        hours in 0i64..(24 * 400),
        enabled in any::<bool>(),
    ) {
        let (p, now) = pattern(strength, rate, hours);
        let p = p.with_decay(enabled, rate);
        let outcome = decay(p.clone(), now);

        prop_assert!(outcome.pattern.strength <= p.strength);
        prop_assert!(outcome.pattern.strength >= 0.0);
        prop_assert_eq!(outcome.applied, enabled && hours as f64 >= DECAY_GRACE_HOURS);
        let expected_count = p.decay_count + u64::from(outcome.applied);
        prop_assert_eq!(outcome.pattern.decay_count, expected_count);
    }
}

//! End-to-end tests for classification and value resolution.
//!
//! These tests verify that:
//! - Size classes classify and fall back correctly
//! - Misconfigured tables and maps fail at construction
//! - Subscribers resolve layouts for the category they are notified with
//! - Swapping the threshold table re-classifies the current viewport

use std::cell::RefCell;
use std::rc::Rc;

use floem_responsive::{CATCH_ALL, ConfigError, resolve};
use floem_responsive_test::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Large from 950, medium from 600, small from 200 and nothing below.
fn three_step_table() -> ThresholdTable<SizeClass> {
    ThresholdTable::new([
        (SizeClass::Large, 950.0),
        (SizeClass::Medium, 600.0),
        (SizeClass::Small, 200.0),
    ])
    .unwrap()
}

// ============================================================================
// Classification and fallback
// ============================================================================

#[test]
fn test_largest_only_map_resolves_everywhere() {
    let table = three_step_table();
    let map = CategoryValueMap::builder()
        .value(SizeClass::Large, "L")
        .build()
        .unwrap();

    assert_eq!(table.category_for(700.0), SizeClass::Medium);
    assert_eq!(table.category_for(150.0), SizeClass::Small);
    assert_eq!(resolve(SizeClass::Medium, &map), Ok(&"L"));
    assert_eq!(resolve(SizeClass::Small, &map), Ok(&"L"));

    let resolver = ValueResolver::new(map);
    for width in [150.0, 700.0, 1200.0] {
        assert_eq!(*resolver.resolve(table.category_for(width)), "L");
    }
}

#[test]
fn test_ascending_table_is_a_config_error() {
    let err = ThresholdTable::new([
        (SizeClass::Large, 100.0),
        (SizeClass::Medium, 200.0),
        (SizeClass::Small, 300.0),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::NotDescending { .. }));
    assert!(err.to_string().contains("`medium` (200)"));

    assert!(
        ThresholdTable::new([
            (SizeClass::Large, 300.0),
            (SizeClass::Medium, 200.0),
            (SizeClass::Small, 100.0),
        ])
        .is_ok()
    );
}

#[test]
fn test_all_empty_map_fails_at_construction() {
    let err = CategoryValueMap::<SizeClass, &str>::builder()
        .optional(SizeClass::Small, None)
        .optional(SizeClass::Large, None)
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "value map has no value for any category (declared: [small: empty, large: empty])"
    );
}

#[test]
fn test_fallback_prefers_smaller_then_declaration_order() {
    use strum::IntoEnumIterator;

    let map = CategoryValueMap::builder()
        .value(RefinedSize::DesktopLarge, "4k")
        .value(RefinedSize::TabletNormal, "tablet")
        .build()
        .unwrap();
    let resolver = ValueResolver::new(map.clone());

    for category in RefinedSize::iter() {
        let expected = if category >= RefinedSize::DesktopLarge {
            "4k"
        } else if category >= RefinedSize::TabletNormal {
            "tablet"
        } else {
            // Nothing smaller than the request: first declared value.
            "4k"
        };
        assert_eq!(*resolver.resolve(category), expected, "{category:?}");
        assert_eq!(resolve(category, &map), Ok(&expected));
    }
}

// ============================================================================
// Subscribers resolving values
// ============================================================================

#[test]
fn test_subscriber_resolves_layout_per_category() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(390.0, 844.0);
    let layout = Rc::new(ValueResolver::new(
        CategoryValueMap::builder()
            .value(ScreenSize::Xs, "stack")
            .values(range(ScreenSize::Lg..), "sidebar")
            .build()
            .unwrap(),
    ));
    let rendered = Rc::new(RefCell::new(Vec::new()));
    harness.context().subscribe(Aspect::Category, {
        let layout = layout.clone();
        let rendered = rendered.clone();
        move |snapshot| {
            rendered
                .borrow_mut()
                .push(*layout.resolve(snapshot.category()))
        }
    });

    harness.resize(700.0, 844.0).unwrap(); // Sm
    harness.resize(1100.0, 844.0).unwrap(); // Lg
    harness.resize(1500.0, 844.0).unwrap(); // Xxl
    harness.resize(500.0, 844.0).unwrap(); // Xs

    assert_eq!(*rendered.borrow(), ["stack", "sidebar", "sidebar", "stack"]);
    assert_eq!(*harness.context().resolve(&layout), "stack");
}

#[test]
fn test_refined_and_coarse_contexts_agree() {
    let refined = HostHarness::<RefinedSize>::new_with_size(1024.0, 768.0);
    let coarse = HostHarness::<DeviceScreenType>::new_with_size(1024.0, 768.0);
    assert_eq!(refined.category(), RefinedSize::DesktopSmall);
    assert_eq!(refined.category().device_type(), coarse.category());
}

// ============================================================================
// Threshold swaps
// ============================================================================

#[test]
fn test_threshold_swap_notifies_category_subscribers() {
    let harness = HostHarness::<SizeClass>::new_with_size(700.0, 700.0);
    let tracker = NotificationTracker::new();
    tracker.track_named("category", harness.context(), Aspect::Category);
    assert_eq!(harness.category(), SizeClass::Medium);

    let dispatch = harness
        .set_thresholds(
            ThresholdTable::new([(SizeClass::Large, 640.0), (SizeClass::Small, CATCH_ALL)])
                .unwrap(),
        )
        .unwrap();

    assert!(dispatch.category_changed());
    assert_eq!(tracker.categories(), vec![SizeClass::Large]);
    assert_eq!(
        harness.context().thresholds().threshold_of(SizeClass::Medium),
        None
    );
}

#[test]
fn test_threshold_swap_without_category_change_is_silent() {
    let harness = HostHarness::<SizeClass>::new_with_size(700.0, 700.0);
    let tracker = NotificationTracker::new();
    tracker.track(harness.context(), Aspect::Full);

    let dispatch = harness
        .set_thresholds(
            ThresholdTable::new([
                (SizeClass::Large, 1200.0),
                (SizeClass::Medium, 500.0),
                (SizeClass::Small, CATCH_ALL),
            ])
            .unwrap(),
        )
        .unwrap();

    assert!(!dispatch.changed());
    assert!(!tracker.was_notified());
}

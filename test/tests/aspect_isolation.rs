//! Tests for aspect-scoped notification.
//!
//! These tests verify that:
//! - Category subscribers ignore changes to secondary metrics
//! - Full subscribers hear about every change, exactly once per update
//! - Orientation subscribers only hear about rotations
//! - Unchanged reports notify nobody

use floem_responsive_test::prelude::*;

// ============================================================================
// Secondary metrics
// ============================================================================

#[test]
fn test_text_scale_only_reaches_full_subscribers() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(800.0, 600.0);
    let tracker = NotificationTracker::new();
    tracker.track_named("category", harness.context(), Aspect::Category);
    tracker.track_named("full", harness.context(), Aspect::Full);

    harness.set_text_scale(1.3).unwrap();

    assert_eq!(tracker.count_for("category"), 0);
    assert_eq!(tracker.count_for("full"), 1);
}

#[test]
fn test_scale_factor_and_insets_are_secondary() {
    let mut harness = HostHarness::<DeviceScreenType>::new_with_size(390.0, 844.0);
    let tracker = NotificationTracker::new();
    tracker.track_named("category", harness.context(), Aspect::Category);
    tracker.track_named("full", harness.context(), Aspect::Full);

    harness.set_scale_factor(2.0).unwrap();
    harness
        .set_view_insets(Insets::new(0.0, 0.0, 0.0, 336.0))
        .unwrap();
    harness.set_view_insets(Insets::ZERO).unwrap();

    assert_eq!(tracker.count_for("category"), 0);
    assert_eq!(tracker.count_for("full"), 3);
    assert_eq!(
        tracker.last_snapshot().unwrap().secondary().view_insets,
        Insets::ZERO
    );
}

// ============================================================================
// Category changes
// ============================================================================

#[test]
fn test_resize_across_a_breakpoint_notifies_each_subscriber_once() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(800.0, 600.0);
    let tracker = NotificationTracker::new();
    tracker.track_named("category", harness.context(), Aspect::Category);
    tracker.track_named("full", harness.context(), Aspect::Full);

    let dispatch = harness.resize(1300.0, 600.0).unwrap();

    assert!(dispatch.category_changed());
    assert_eq!(dispatch.notified().len(), 2);
    assert_eq!(tracker.names(), vec!["category", "full"]);
    assert_eq!(tracker.categories(), vec![ScreenSize::Xl, ScreenSize::Xl]);
}

#[test]
fn test_resize_within_a_breakpoint_skips_category_subscribers() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(800.0, 600.0);
    let tracker = NotificationTracker::new();
    tracker.track_named("category", harness.context(), Aspect::Category);
    tracker.track_named("full", harness.context(), Aspect::Full);

    for width in [810.0, 850.0, 900.0, 990.0] {
        harness.resize(width, 600.0).unwrap();
    }

    assert_eq!(tracker.count_for("category"), 0);
    assert_eq!(tracker.count_for("full"), 4);
    assert_eq!(harness.category(), ScreenSize::Md);
}

#[test]
fn test_drag_resize_reports_every_crossing() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(320.0, 700.0);
    let tracker = NotificationTracker::new();
    tracker.track(harness.context(), Aspect::Category);

    let mut width = 320.0;
    while width <= 1600.0 {
        harness.resize(width, 700.0).unwrap();
        width += 16.0;
    }

    assert_eq!(
        tracker.categories(),
        vec![
            ScreenSize::Sm,
            ScreenSize::Md,
            ScreenSize::Lg,
            ScreenSize::Xl,
            ScreenSize::Xxl
        ]
    );
}

// ============================================================================
// Orientation and no-op reports
// ============================================================================

#[test]
fn test_rotation_reaches_orientation_subscribers() {
    let categorizer = floem_responsive::Categorizer::<DeviceScreenType>::default()
        .with_source(floem_responsive::DimensionSource::ShortestSide);
    let mut harness = HostHarness::new(
        categorizer,
        RawMetrics::new(Size::new(820.0, 1180.0), 2.0),
    );
    let tracker = NotificationTracker::new();
    tracker.track_named("orientation", harness.context(), Aspect::Orientation);
    tracker.track_named("category", harness.context(), Aspect::Category);

    harness.rotate().unwrap();
    assert_eq!(harness.snapshot().orientation(), Orientation::Landscape);
    harness.rotate().unwrap();

    assert_eq!(tracker.count_for("orientation"), 2);
    assert_eq!(tracker.count_for("category"), 0);
    assert_eq!(harness.category(), DeviceScreenType::Tablet);
}

#[test]
fn test_repeated_report_notifies_nobody() {
    let harness = HostHarness::<RefinedSize>::new_with_size(1024.0, 768.0);
    let tracker = NotificationTracker::new();
    tracker.track(harness.context(), Aspect::Full);
    tracker.track(harness.context(), Aspect::Category);

    for _ in 0..5 {
        let dispatch = harness.report().unwrap();
        assert!(!dispatch.changed());
    }

    assert!(!tracker.was_notified());
}

#[test]
fn test_unsubscribed_tracker_stops_recording() {
    let mut harness = HostHarness::<ScreenSize>::new_with_size(800.0, 600.0);
    let tracker = NotificationTracker::new();
    let id = tracker.track(harness.context(), Aspect::Full);

    harness.resize(1000.0, 600.0).unwrap();
    assert!(harness.context().unsubscribe(id));
    harness.resize(1200.0, 600.0).unwrap();

    assert_eq!(tracker.count(), 1);
}

//! End-to-end drop flow: gesture in, screen reaction out.

use std::time::{Duration, Instant};

use buildmeet_app::{MapScreen, ToastKind};
use buildmeet_core::drop_mode::DropMode;
use buildmeet_core::geo::GeoPoint;
use buildmeet_core::map::MapViewModel;
use buildmeet_core::pins::{BuilderPin, BuilderStatus, EventPin};
use buildmeet_core::surface::{FlatProjection, MapSurface};
use buildmeet_core::toolbox::ToolKind;
use kurbo::{Point, Size};

const SF: GeoPoint = GeoPoint { latitude: 37.7749, longitude: -122.4194 };

fn screen_with_user_in_sf() -> MapScreen {
    let mut map = MapViewModel::new();
    map.set_current_user(BuilderPin::new(
        "Builder",
        "001",
        "Building something",
        BuilderStatus::Exploring,
        false,
        None,
    ));
    let surface = MapSurface::attached(Box::new(FlatProjection::new(
        SF,
        Size::new(800.0, 600.0),
        100.0,
    )));
    let mut screen = MapScreen::new(map, surface);
    screen.mount();

    // First fix arrives through the feed, applied on tick.
    screen.location_handle().push(SF);
    screen.tick(Instant::now());
    screen
}

#[test]
fn accepted_drop_flows_into_a_created_event() {
    let mut screen = screen_with_user_in_sf();

    screen.on_tool_drag_start(ToolKind::Event);
    assert!(matches!(screen.drop_mode(), DropMode::Active { .. }));

    // Simulated pointer path across the map, release near the user.
    for x in [410.0, 430.0, 450.0] {
        screen.on_tool_drag_moved(Point::new(x, 290.0));
    }
    screen.on_tool_drag_end(Point::new(450.0, 290.0));

    assert_eq!(screen.drop_mode(), DropMode::Inactive);

    // The creation form hands back a pin built from that context.
    let pending = screen.take_pending_event().expect("nearby drop should be accepted");
    screen.complete_event_creation(EventPin::new(
        "Hardware Hacking",
        "Builder 001",
        "Open bench space.",
        false,
        pending.coordinate,
    ));

    assert_eq!(screen.map().events.len(), 1);
    let event = &screen.map().events[0];
    assert!((event.coordinate.latitude - pending.coordinate.latitude).abs() < f64::EPSILON);
    assert!(screen.is_toast_visible(ToastKind::EventCreated));
}

#[test]
fn out_of_radius_drop_only_toasts() {
    let mut screen = screen_with_user_in_sf();
    let t0 = Instant::now();

    screen.on_tool_drag_start(ToolKind::Event);
    screen.on_tool_drag_end(Point::new(795.0, 5.0));

    assert!(screen.pending_event().is_none());
    assert_eq!(screen.map().events.len(), 0);
    assert!(screen.is_toast_visible(ToastKind::DropRejected));

    // Fixed two-second display, swept by the frame pump.
    screen.tick(t0 + Duration::from_millis(1_900));
    assert!(screen.is_toast_visible(ToastKind::DropRejected));
    screen.tick(t0 + Duration::from_millis(2_200));
    assert!(!screen.is_toast_visible(ToastKind::DropRejected));
}

#[test]
fn radius_upgrade_turns_a_rejection_into_an_acceptance() {
    let mut screen = screen_with_user_in_sf();
    // About 40 km east of the user: outside the 25 km free tier.
    let candidate = GeoPoint::new(37.7749, -121.9649);

    screen.on_tool_drag_start(ToolKind::Event);
    let release = screen.surface().coordinate_to_point(candidate).unwrap();
    screen.on_tool_drag_end(release);
    assert!(screen.pending_event().is_none());

    // Premium upgrade: the same place now falls inside the radius. The
    // release point is re-projected because entering drop mode refits the
    // camera to the new radius.
    screen.map_mut().set_free_radius_m(100_000.0);
    screen.on_tool_drag_start(ToolKind::Event);
    let release = screen.surface().coordinate_to_point(candidate).unwrap();
    screen.on_tool_drag_end(release);

    assert!(screen.pending_event().is_some());
}

#[test]
fn detached_map_rejects_without_measuring() {
    let mut map = MapViewModel::new();
    map.set_current_user(BuilderPin::new(
        "Builder",
        "001",
        "Building something",
        BuilderStatus::Exploring,
        false,
        Some(SF),
    ));
    let mut screen = MapScreen::new(map, MapSurface::new());
    screen.mount();

    screen.on_tool_drag_start(ToolKind::Event);
    screen.on_tool_drag_end(Point::new(400.0, 300.0));

    assert!(screen.pending_event().is_none());
    assert!(screen.is_toast_visible(ToastKind::DropRejected));
}

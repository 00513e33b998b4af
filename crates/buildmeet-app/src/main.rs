//! Demo driver: runs the drop flow headlessly and logs the outcomes.

use std::thread;
use std::time::Instant;

use buildmeet_app::MapScreen;
use buildmeet_core::geo::GeoPoint;
use buildmeet_core::map::MapViewModel;
use buildmeet_core::pins::{BuilderPin, BuilderStatus, EventPin};
use buildmeet_core::surface::{FlatProjection, MapSurface};
use buildmeet_core::toolbox::ToolKind;
use kurbo::{Point, Size};

fn main() {
    env_logger::init();
    log::info!("Starting BuildMeet demo");

    let sf = GeoPoint::new(37.7749, -122.4194);

    let mut map = MapViewModel::with_mock_data();
    map.set_current_user(BuilderPin::new(
        "Builder",
        "001",
        "Building something",
        BuilderStatus::Exploring,
        false,
        None,
    ));
    let surface = MapSurface::attached(Box::new(FlatProjection::new(
        sf,
        Size::new(800.0, 600.0),
        100.0,
    )));

    let mut screen = MapScreen::new(map, surface);
    screen.mount();

    // A position fix arrives from the platform's location thread.
    let handle = screen.location_handle();
    let feeder = thread::spawn(move || handle.push(sf));
    let _ = feeder.join();
    screen.tick(Instant::now());

    // Drop an event pin a few hundred meters from the user.
    screen.on_tool_drag_start(ToolKind::Event);
    screen.on_tool_drag_moved(Point::new(420.0, 280.0));
    screen.on_tool_drag_end(Point::new(420.0, 280.0));

    if let Some(pending) = screen.take_pending_event() {
        screen.complete_event_creation(EventPin::new(
            "Rooftop Demo Night",
            "Builder 001",
            "Show what you shipped.",
            false,
            pending.coordinate,
        ));
    }

    // Try again at the far corner of the fitted viewport; this one is
    // outside the free radius and only produces a toast.
    screen.on_tool_drag_start(ToolKind::Event);
    screen.on_tool_drag_moved(Point::new(795.0, 5.0));
    screen.on_tool_drag_end(Point::new(795.0, 5.0));

    log::info!(
        "done: {} events on the map, rejection toast visible: {}",
        screen.map().events.len(),
        screen.is_toast_visible(buildmeet_app::ToastKind::DropRejected)
    );

    screen.unmount();
}

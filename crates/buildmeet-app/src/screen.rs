//! Map screen: wires the toolbox, drop mode, toasts and the location feed.
//!
//! The screen owns the broker and registers its subscription on mount,
//! removing it on unmount. State the subscription writes into lives behind
//! `Rc<RefCell<..>>` so the callback and the screen's own methods share it
//! on the one interaction thread.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Instant;

use buildmeet_core::broker::{PinDropBroker, PinDropEvent, SubscriptionId};
use buildmeet_core::drop_mode::{DropMode, DropModeController};
use buildmeet_core::geo::GeoPoint;
use buildmeet_core::location::{LocationFeed, LocationHandle};
use buildmeet_core::map::MapViewModel;
use buildmeet_core::pins::EventPin;
use buildmeet_core::surface::{MapProjection, MapSurface};
use buildmeet_core::toolbox::{ToolKind, Toolbox};
use kurbo::Point;

use crate::toast::{Toast, ToastKind, ToastStack};

/// Context handed to the external event-creation form when a drop lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEvent {
    /// Where the pin was dropped.
    pub coordinate: GeoPoint,
    /// Where the user stood at the time.
    pub user_coordinate: GeoPoint,
}

/// State the drop-event subscription writes into.
#[derive(Default)]
struct ScreenState {
    drop_mode: DropModeController,
    toasts: ToastStack,
    pending_event: Option<PendingEvent>,
}

/// The screen hosting the map, its toolbox, and the drop flow.
pub struct MapScreen {
    map: Rc<RefCell<MapViewModel>>,
    surface: Rc<RefCell<MapSurface>>,
    state: Rc<RefCell<ScreenState>>,
    toolbox: Toolbox,
    broker: PinDropBroker,
    location: LocationFeed,
    subscription: Option<SubscriptionId>,
}

impl MapScreen {
    pub fn new(map: MapViewModel, surface: MapSurface) -> Self {
        Self {
            map: Rc::new(RefCell::new(map)),
            surface: Rc::new(RefCell::new(surface)),
            state: Rc::new(RefCell::new(ScreenState::default())),
            toolbox: Toolbox::new(),
            broker: PinDropBroker::new(),
            location: LocationFeed::new(),
            subscription: None,
        }
    }

    /// Register the drop-event subscription. Idempotent.
    pub fn mount(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let state = Rc::clone(&self.state);
        let map = Rc::clone(&self.map);
        let surface = Rc::clone(&self.surface);
        let id = self
            .broker
            .subscribe(move |event| Self::handle_drop_event(event, &state, &map, &surface));
        self.subscription = Some(id);
    }

    /// Remove the subscription; later drop events no longer reach this
    /// screen. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.broker.unsubscribe(id);
        }
    }

    fn handle_drop_event(
        event: &PinDropEvent,
        state: &RefCell<ScreenState>,
        map: &RefCell<MapViewModel>,
        surface: &RefCell<MapSurface>,
    ) {
        match event {
            PinDropEvent::DropModeEntered => {
                let map = map.borrow();
                let mut surface = surface.borrow_mut();
                state.borrow_mut().drop_mode.enter(
                    &mut surface,
                    map.user_coordinate(),
                    map.free_radius_m(),
                );
            }
            PinDropEvent::DropModeExited => {
                state.borrow_mut().drop_mode.exit();
            }
            PinDropEvent::DropAccepted { tool, coordinate } => {
                Self::on_drop_accepted(*tool, *coordinate, state, map);
            }
            PinDropEvent::DropRejected { reason } => {
                log::info!("drop rejected: {reason}");
                state.borrow_mut().toasts.show(ToastKind::DropRejected, Instant::now());
            }
        }
    }

    fn on_drop_accepted(
        tool: ToolKind,
        coordinate: GeoPoint,
        state: &RefCell<ScreenState>,
        map: &RefCell<MapViewModel>,
    ) {
        if tool != ToolKind::Event {
            log::debug!("no creation flow for {tool:?} drops yet");
            return;
        }
        let Some(user_coordinate) = map.borrow().user_coordinate() else {
            log::warn!("accepted drop without a user position; discarding");
            return;
        };
        log::info!(
            "pin dropped at {} {}",
            coordinate.latitude,
            coordinate.longitude
        );
        state.borrow_mut().pending_event = Some(PendingEvent { coordinate, user_coordinate });
    }

    // --- Toolbox gestures ---

    pub fn on_tool_drag_start(&mut self, tool: ToolKind) {
        self.toolbox.begin_drag(tool, &mut self.broker);
    }

    pub fn on_tool_drag_moved(&mut self, point: Point) {
        self.toolbox.update_drag(point);
    }

    pub fn on_tool_drag_end(&mut self, point: Point) {
        let surface = Rc::clone(&self.surface);
        let map = Rc::clone(&self.map);
        self.toolbox
            .end_drag(point, &surface.borrow(), &map.borrow(), &mut self.broker);
    }

    // --- Frame pump ---

    /// Per-frame pump: apply pending location fixes, expire toasts.
    pub fn tick(&mut self, now: Instant) {
        for fix in self.location.poll() {
            self.map.borrow_mut().apply_location_update(fix);
        }
        self.state.borrow_mut().toasts.tick(now);
    }

    // --- Event creation flow ---

    /// The context for the creation form, if an accepted drop is waiting.
    pub fn pending_event(&self) -> Option<PendingEvent> {
        self.state.borrow().pending_event
    }

    /// Hand the pending context to the creation form, clearing it here.
    pub fn take_pending_event(&mut self) -> Option<PendingEvent> {
        self.state.borrow_mut().pending_event.take()
    }

    /// The form collaborator finished; put its pin on the map and confirm.
    pub fn complete_event_creation(&mut self, event: EventPin) {
        self.map.borrow_mut().add_event(event);
        let mut state = self.state.borrow_mut();
        state.pending_event = None;
        state.toasts.show(ToastKind::EventCreated, Instant::now());
    }

    pub fn cancel_event_creation(&mut self) {
        self.state.borrow_mut().pending_event = None;
    }

    // --- Map surface lifecycle ---

    /// The live map mounted; hand over its projection capability.
    pub fn attach_map(&mut self, projection: Box<dyn MapProjection>) {
        self.surface.borrow_mut().attach(projection);
    }

    pub fn detach_map(&mut self) {
        self.surface.borrow_mut().detach();
    }

    // --- Accessors for the rendering chrome ---

    pub fn map(&self) -> Ref<'_, MapViewModel> {
        self.map.borrow()
    }

    pub fn map_mut(&mut self) -> RefMut<'_, MapViewModel> {
        self.map.borrow_mut()
    }

    pub fn location_handle(&self) -> LocationHandle {
        self.location.handle()
    }

    /// The surface capability, e.g. for positioning pin markers.
    pub fn surface(&self) -> Ref<'_, MapSurface> {
        self.surface.borrow()
    }

    pub fn drop_mode(&self) -> DropMode {
        self.state.borrow().drop_mode.mode()
    }

    pub fn visible_toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.visible().to_vec()
    }

    pub fn is_toast_visible(&self, kind: ToastKind) -> bool {
        self.state.borrow().toasts.is_visible(kind)
    }

    /// Position of the drag-follow pin marker, while a drag is in flight.
    pub fn floating_pin(&self) -> Option<Point> {
        self.toolbox
            .session()
            .filter(|session| session.floating_pin_visible)
            .map(|session| session.position)
    }

    pub fn is_dragging(&self) -> bool {
        self.toolbox.is_dragging()
    }
}

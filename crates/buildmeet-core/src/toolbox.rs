//! Toolbox drag state machine: from gesture to drop outcome.

use crate::broker::{PinDropBroker, PinDropEvent, RejectReason};
use crate::map::MapViewModel;
use crate::surface::MapSurface;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Placeable tools offered by the toolbox.
///
/// Only `Event` has a downstream creation flow so far; the others publish
/// their drops and wait for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Event,
    Meetup,
    Help,
    Note,
}

/// Ephemeral state of the one in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub tool: ToolKind,
    /// Current pointer position in surface-local screen space.
    pub position: Point,
    /// Whether the drag-follow pin marker should render.
    pub floating_pin_visible: bool,
}

/// Drag lifecycle state. At most one drag is ever in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Owns the single in-flight drag and turns its release into a drop outcome.
#[derive(Default)]
pub struct Toolbox {
    state: DragState,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The live session, if a drag is in flight.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Start dragging `tool` and announce drop mode.
    ///
    /// A second call while a drag is in flight is a logged no-op: the
    /// gesture recognizer re-fires its start on every pointer move.
    pub fn begin_drag(&mut self, tool: ToolKind, broker: &mut PinDropBroker) {
        if self.is_dragging() {
            log::debug!("begin_drag while already dragging; ignored");
            return;
        }
        self.state = DragState::Dragging(DragSession {
            tool,
            position: Point::ZERO,
            floating_pin_visible: true,
        });
        broker.publish(&PinDropEvent::DropModeEntered);
    }

    /// Track the pointer. Screen space only; projecting to a coordinate is
    /// deferred to the release point so pointer moves stay cheap.
    pub fn update_drag(&mut self, point: Point) {
        if let DragState::Dragging(session) = &mut self.state {
            session.position = point;
        }
    }

    /// Release at `point`: resolve the coordinate exactly once, admit or
    /// reject, and close the session out.
    ///
    /// Emits the terminal outcome followed by `DropModeExited`, whatever the
    /// outcome was. A release with no drag in flight is a logged no-op.
    pub fn end_drag(
        &mut self,
        point: Point,
        surface: &MapSurface,
        map: &MapViewModel,
        broker: &mut PinDropBroker,
    ) {
        let DragState::Dragging(session) = self.state else {
            log::debug!("end_drag while idle; ignored");
            return;
        };
        self.state = DragState::Idle;

        let outcome = match surface.point_to_coordinate(point) {
            Ok(coordinate) => {
                if map.is_within_allowed_radius(coordinate) {
                    PinDropEvent::DropAccepted { tool: session.tool, coordinate }
                } else {
                    log::info!("drop at {coordinate:?} rejected: outside allowed radius");
                    PinDropEvent::DropRejected { reason: RejectReason::TooFar }
                }
            }
            Err(err) => {
                log::warn!("drop release could not be resolved: {err}");
                PinDropEvent::DropRejected { reason: RejectReason::MapUnavailable }
            }
        };

        broker.publish(&outcome);
        broker.publish(&PinDropEvent::DropModeExited);
    }
}

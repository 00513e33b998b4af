//! Typed pin-drop event channel between the toolbox and the map screen.
//!
//! Subscriptions are scoped: a screen registers its callback when it mounts
//! and removes it when it unmounts. Publishing with no subscribers drops the
//! event on the floor; nothing is queued or replayed.

use crate::geo::GeoPoint;
use crate::toolbox::ToolKind;
use std::fmt;

/// Why a drop was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The release point is outside the allowed radius.
    TooFar,
    /// The release point could not be resolved to a coordinate because the
    /// map surface was not attached.
    MapUnavailable,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooFar => "too_far",
            Self::MapUnavailable => "map_unavailable",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events published over one drag session, in program order:
/// `DropModeEntered`, then exactly one of `DropAccepted`/`DropRejected`,
/// then `DropModeExited`.
#[derive(Debug, Clone, PartialEq)]
pub enum PinDropEvent {
    DropModeEntered,
    DropModeExited,
    DropAccepted { tool: ToolKind, coordinate: GeoPoint },
    DropRejected { reason: RejectReason },
}

/// Handle identifying one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Synchronous in-process fan-out of [`PinDropEvent`]s.
///
/// Fire-and-forget: `publish` runs every subscriber callback before
/// returning, expects no acknowledgment, and never retries.
#[derive(Default)]
pub struct PinDropBroker {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&PinDropEvent)>)>,
}

impl PinDropBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every subsequent event.
    pub fn subscribe(&mut self, callback: impl FnMut(&PinDropEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to every subscriber, in registration order.
    pub fn publish(&mut self, event: &PinDropEvent) {
        log::trace!("publishing {event:?} to {} subscriber(s)", self.subscribers.len());
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }
}

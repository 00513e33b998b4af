//! BuildMeet application shell.
//!
//! Hosts the map screen and the pieces around it that are not the map
//! renderer itself: toast notices, the drop-event subscription, and the
//! location feed pump.

pub mod screen;
pub mod toast;

pub use screen::{MapScreen, PendingEvent};
pub use toast::{Toast, ToastKind, ToastStack, TOAST_DURATION};

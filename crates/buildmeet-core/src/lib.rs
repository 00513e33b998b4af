//! BuildMeet Core Library
//!
//! Platform-agnostic models and logic for the BuildMeet builder map:
//! geographic admission, the toolbox drag state machine, drop mode, and the
//! pin-drop event channel.

pub mod broker;
pub mod drop_mode;
pub mod geo;
pub mod location;
pub mod map;
pub mod pins;
pub mod storage;
pub mod surface;
pub mod toolbox;

pub use broker::{PinDropBroker, PinDropEvent, RejectReason, SubscriptionId};
pub use drop_mode::{DropMode, DropModeController};
pub use geo::GeoPoint;
pub use location::{LocationFeed, LocationHandle};
pub use map::{FREE_RADIUS_M, MapViewModel};
pub use pins::{BuilderPin, BuilderStatus, EventId, EventPin, LocalUser};
pub use storage::{MemoryStorage, ProfileStorage, StorageError};
pub use surface::{FlatProjection, MapProjection, MapRegion, MapSurface, SurfaceError};
pub use toolbox::{DragSession, DragState, ToolKind, Toolbox};

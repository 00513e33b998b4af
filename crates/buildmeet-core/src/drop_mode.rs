//! Drop mode: camera fit and admissible-zone ring while a drag is in flight.

use crate::geo::GeoPoint;
use crate::surface::{MapRegion, MapSurface};

/// Whether drop mode is active, and the ring geometry when it is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DropMode {
    #[default]
    Inactive,
    Active {
        /// The user position the ring is centered on.
        center: GeoPoint,
        /// Ring radius in screen pixels at the fitted zoom.
        ring_radius_px: f64,
    },
}

/// Bounds the user's attention to the admissible area while they decide
/// where to release. Has no say in whether the drop is accepted.
#[derive(Debug, Default)]
pub struct DropModeController {
    mode: DropMode,
}

impl DropModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DropMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        matches!(self.mode, DropMode::Active { .. })
    }

    /// Enter drop mode: recenter the camera on the allowed radius around the
    /// user and arm the ring, sized from the radius in force right now.
    ///
    /// Idempotent. Without a user position drop mode stays off; there is no
    /// admissible area to show.
    pub fn enter(&mut self, surface: &mut MapSurface, user: Option<GeoPoint>, free_radius_m: f64) {
        if self.is_active() {
            return;
        }
        let Some(center) = user else {
            log::warn!("drop mode requested without a user position; staying inactive");
            return;
        };

        surface.set_region(MapRegion::around(center, free_radius_m));
        let ring_radius_px = match surface.pixels_per_meter(center) {
            Ok(ppm) => free_radius_m * ppm,
            Err(err) => {
                log::warn!("ring sizing unavailable: {err}");
                0.0
            }
        };
        self.mode = DropMode::Active { center, ring_radius_px };
    }

    /// Leave drop mode. Idempotent. The camera is deliberately left where it
    /// is so the outcome toast is not shown over a moving map.
    pub fn exit(&mut self) {
        self.mode = DropMode::Inactive;
    }
}

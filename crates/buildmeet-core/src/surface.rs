//! Map surface capability: projection between screen points and coordinates.
//!
//! The rendering surface itself (basemap, pin markers) is an external
//! collaborator. What this module models is the capability it hands to the
//! screen hosting it: converting between the surface's local point space and
//! geographic coordinates, and recentering the viewport.

use crate::geo::{self, GeoPoint};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Meters per degree of latitude (spherical approximation).
const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Errors from surface operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// No projection is attached: the map has not mounted yet.
    #[error("map surface not attached")]
    Detached,
}

/// A map viewport described by its center and metric extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: GeoPoint,
    pub latitudinal_meters: f64,
    pub longitudinal_meters: f64,
}

impl MapRegion {
    /// Region spanning `radius_m` in every direction around `center`.
    pub fn around(center: GeoPoint, radius_m: f64) -> Self {
        Self {
            center,
            latitudinal_meters: radius_m * 2.0,
            longitudinal_meters: radius_m * 2.0,
        }
    }
}

/// Projection/viewport state of the live map rendering surface.
pub trait MapProjection {
    /// Convert a point in the surface's local space to a coordinate.
    fn point_to_coordinate(&self, point: Point) -> GeoPoint;

    /// Convert a coordinate to a point in the surface's local space.
    fn coordinate_to_point(&self, coordinate: GeoPoint) -> Point;

    /// Recenter and zoom the viewport to show the given region.
    fn set_region(&mut self, region: MapRegion);
}

/// Owner of the optional live projection, with an explicit detached state.
///
/// Conversion before the map has mounted yields [`SurfaceError::Detached`]
/// rather than a sentinel coordinate: (0, 0) is a real place, and a caller
/// could not tell it from a legitimate drop there.
#[derive(Default)]
pub struct MapSurface {
    projection: Option<Box<dyn MapProjection>>,
}

impl MapSurface {
    /// A surface with nothing attached yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface born attached (demo and test convenience).
    pub fn attached(projection: Box<dyn MapProjection>) -> Self {
        Self { projection: Some(projection) }
    }

    /// Attach the live projection when the map mounts.
    pub fn attach(&mut self, projection: Box<dyn MapProjection>) {
        self.projection = Some(projection);
    }

    /// Drop the projection when the map unmounts.
    pub fn detach(&mut self) {
        self.projection = None;
    }

    pub fn is_attached(&self) -> bool {
        self.projection.is_some()
    }

    /// Convert a screen-space point to the coordinate under it.
    ///
    /// Pure math on the projection state at the moment of the call; cheap
    /// enough to run on every pointer move, though the drag path defers it
    /// to the release point.
    pub fn point_to_coordinate(&self, point: Point) -> Result<GeoPoint, SurfaceError> {
        self.projection
            .as_ref()
            .map(|p| p.point_to_coordinate(point))
            .ok_or(SurfaceError::Detached)
    }

    /// Convert a coordinate to its screen-space point.
    pub fn coordinate_to_point(&self, coordinate: GeoPoint) -> Result<Point, SurfaceError> {
        self.projection
            .as_ref()
            .map(|p| p.coordinate_to_point(coordinate))
            .ok_or(SurfaceError::Detached)
    }

    /// Recenter the viewport. Ignored (and logged) while detached.
    pub fn set_region(&mut self, region: MapRegion) {
        match self.projection.as_mut() {
            Some(projection) => projection.set_region(region),
            None => log::warn!("set_region ignored: map surface not attached"),
        }
    }

    /// Screen pixels covered by one meter of ground at `at`.
    ///
    /// Probed from the projection by measuring a short eastward step, the
    /// same way the rendered radius ring is sized.
    pub fn pixels_per_meter(&self, at: GeoPoint) -> Result<f64, SurfaceError> {
        let step = GeoPoint::new(at.latitude, at.longitude + 0.01);
        let p1 = self.coordinate_to_point(at)?;
        let p2 = self.coordinate_to_point(step)?;
        let meters = geo::distance_meters(at, step);
        if meters < f64::EPSILON {
            return Ok(0.0);
        }
        Ok((p2.x - p1.x).abs() / meters)
    }
}

/// Simple equirectangular projection used by the demo binary and tests.
///
/// Linear in degrees around a center coordinate; adequate at city scale,
/// which is all the demo needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatProjection {
    center: GeoPoint,
    viewport: Size,
    meters_per_pixel: f64,
}

impl FlatProjection {
    pub fn new(center: GeoPoint, viewport: Size, meters_per_pixel: f64) -> Self {
        Self { center, viewport, meters_per_pixel }
    }

    fn meters_per_degree_lon(&self) -> f64 {
        METERS_PER_DEGREE_LAT * self.center.latitude.to_radians().cos()
    }
}

impl MapProjection for FlatProjection {
    fn point_to_coordinate(&self, point: Point) -> GeoPoint {
        let east_m = (point.x - self.viewport.width / 2.0) * self.meters_per_pixel;
        // Screen y grows downward, latitude grows northward.
        let north_m = (self.viewport.height / 2.0 - point.y) * self.meters_per_pixel;
        GeoPoint::new(
            self.center.latitude + north_m / METERS_PER_DEGREE_LAT,
            self.center.longitude + east_m / self.meters_per_degree_lon(),
        )
    }

    fn coordinate_to_point(&self, coordinate: GeoPoint) -> Point {
        let north_m = (coordinate.latitude - self.center.latitude) * METERS_PER_DEGREE_LAT;
        let east_m =
            (coordinate.longitude - self.center.longitude) * self.meters_per_degree_lon();
        Point::new(
            self.viewport.width / 2.0 + east_m / self.meters_per_pixel,
            self.viewport.height / 2.0 - north_m / self.meters_per_pixel,
        )
    }

    fn set_region(&mut self, region: MapRegion) {
        self.center = region.center;
        let per_height = region.latitudinal_meters / self.viewport.height.max(1.0);
        let per_width = region.longitudinal_meters / self.viewport.width.max(1.0);
        self.meters_per_pixel = per_height.max(per_width);
    }
}

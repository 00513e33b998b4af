//! Map view model: pins, radius admission, and the people/events toggle.

use crate::geo::{self, GeoPoint};
use crate::pins::{BuilderPin, BuilderStatus, EventPin};
use crate::surface::MapRegion;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admission radius for the free tier, in meters.
pub const FREE_RADIUS_M: f64 = 25_000.0;

/// Region shown before any location fix arrives (San Francisco).
fn default_region() -> MapRegion {
    MapRegion {
        center: GeoPoint::new(37.7749, -122.4194),
        latitudinal_meters: 5_000.0,
        longitudinal_meters: 5_000.0,
    }
}

/// State behind the map screen: who is on the map and what the signed-in
/// user is allowed to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapViewModel {
    /// Visible region, if the host ever decides to control it again.
    pub region: MapRegion,
    /// Allowed drop radius in meters. Read at decision time, never cached:
    /// an upgrade can raise it between two drops.
    free_radius_m: f64,
    /// The signed-in user's own pin.
    pub current_user: Option<BuilderPin>,
    pub builders: Vec<BuilderPin>,
    pub selected_builder: Option<Uuid>,
    pub events: Vec<EventPin>,
    /// Toggle between showing builders and showing events.
    pub show_people: bool,
}

impl Default for MapViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MapViewModel {
    /// An empty map with free-tier defaults.
    pub fn new() -> Self {
        Self {
            region: default_region(),
            free_radius_m: FREE_RADIUS_M,
            current_user: None,
            builders: Vec::new(),
            selected_builder: None,
            events: Vec::new(),
            show_people: true,
        }
    }

    /// A map seeded with the demo builders and events.
    pub fn with_mock_data() -> Self {
        let mut map = Self::new();
        map.builders = mock_builders();
        map.events = mock_events();
        map
    }

    pub fn free_radius_m(&self) -> f64 {
        self.free_radius_m
    }

    /// Raise (or lower) the allowed radius, e.g. after a premium upgrade.
    pub fn set_free_radius_m(&mut self, radius_m: f64) {
        log::info!("allowed drop radius is now {radius_m} m");
        self.free_radius_m = radius_m;
    }

    pub fn set_current_user(&mut self, pin: BuilderPin) {
        self.current_user = Some(pin);
    }

    /// The signed-in user's live position, if a fix has arrived.
    pub fn user_coordinate(&self) -> Option<GeoPoint> {
        self.current_user.as_ref().and_then(|user| user.coordinate)
    }

    /// Apply a position fix from the location feed to the user's own pin.
    pub fn apply_location_update(&mut self, coordinate: GeoPoint) {
        log::debug!("position fix: {} {}", coordinate.latitude, coordinate.longitude);
        if let Some(user) = &mut self.current_user {
            user.coordinate = Some(coordinate);
        }
    }

    /// Whether a drop at `candidate` lands inside the allowed radius of the
    /// user's current position. Radius and position are re-read per call.
    pub fn is_within_allowed_radius(&self, candidate: GeoPoint) -> bool {
        if let Some(user) = self.user_coordinate() {
            log::debug!(
                "drop distance: {:.0} m (allowed {:.0} m)",
                geo::distance_meters(user, candidate),
                self.free_radius_m
            );
        }
        geo::is_within_radius(self.user_coordinate(), candidate, self.free_radius_m)
    }

    pub fn add_event(&mut self, event: EventPin) {
        log::info!(
            "event pin '{}' at {} {}",
            event.title,
            event.coordinate.latitude,
            event.coordinate.longitude
        );
        self.events.push(event);
    }

    /// Placeholder pin for an accepted drop that skipped the creation form.
    pub fn create_event_pin(&mut self, coordinate: GeoPoint) {
        self.add_event(EventPin::new(
            "New Event",
            "Someone",
            "User-created event",
            false,
            coordinate,
        ));
    }

    pub fn select_builder(&mut self, id: Uuid) {
        self.selected_builder = self.builders.iter().find(|b| b.id == id).map(|b| b.id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_builder = None;
    }
}

fn mock_builders() -> Vec<BuilderPin> {
    use BuilderStatus::*;
    vec![
        BuilderPin::new("Max", "Yee", "BuildPurdue", NeedHelp, true,
            Some(GeoPoint::new(37.7749, -122.4194))),
        BuilderPin::new("Clarie", "Yee", "OpenCanvas", Building, false,
            Some(GeoPoint::new(37.7752, -122.4183))),
        BuilderPin::new("Pablo", "Lopez", "MoonshotAI", Exploring, false,
            Some(GeoPoint::new(34.0522, -118.2437))),
        BuilderPin::new("Ben", "Carter", "Drone Vision System", Stuck, true,
            Some(GeoPoint::new(40.7128, -74.0060))),
        BuilderPin::new("Nina", "Ward", "Quantum Sim Engine", Building, false,
            Some(GeoPoint::new(51.5074, -0.1278))),
        BuilderPin::new("Yuki", "Tanaka", "HoloBoard", Building, false,
            Some(GeoPoint::new(35.6762, 139.6503))),
        BuilderPin::new("Leo", "Moreau", "Game Dev Toolkit", NeedHelp, true,
            Some(GeoPoint::new(48.8566, 2.3522))),
        BuilderPin::new("Jade", "Kim", "Fitness AI Coach", Exploring, false,
            Some(GeoPoint::new(30.2672, -97.7431))),
    ]
}

fn mock_events() -> Vec<EventPin> {
    vec![
        EventPin::new("SF Builders Hangout", "Jhon", "Weekly meetup.", false,
            GeoPoint::new(37.7749, -122.4194)),
        EventPin::new("Robotics Jam", "Max", "Hardware hacking.", true,
            GeoPoint::new(37.7765, -122.4172)),
        EventPin::new("Buildspace IRL", "Pablo", "Show progress.", false,
            GeoPoint::new(34.0522, -118.2437)),
        EventPin::new("Startup Draft Day", "Ben", "48-hr build.", true,
            GeoPoint::new(32.7157, -117.1611)),
        EventPin::new("Night Owls Build Session", "Cora", "Midnight build.", false,
            GeoPoint::new(35.6762, 139.6503)),
        EventPin::new("ML Engineering Circle", "Arjun", "Embeddings talk.", false,
            GeoPoint::new(37.3887, -122.0830)),
        EventPin::new("Game Dev Collab", "Leo", "Unity/Godot builds.", false,
            GeoPoint::new(48.8566, 2.3522)),
        EventPin::new("Hardware Hacking", "Sam", "Open bench space.", false,
            GeoPoint::new(1.3521, 103.8198)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SF: GeoPoint = GeoPoint { latitude: 37.7749, longitude: -122.4194 };
    const LA: GeoPoint = GeoPoint { latitude: 34.0522, longitude: -118.2437 };

    fn map_with_user_at(coordinate: Option<GeoPoint>) -> MapViewModel {
        let mut map = MapViewModel::new();
        map.set_current_user(BuilderPin::new(
            "Builder",
            "001",
            "Building something",
            BuilderStatus::Exploring,
            false,
            coordinate,
        ));
        map
    }

    #[test]
    fn test_mock_data_seeds() {
        let map = MapViewModel::with_mock_data();
        assert_eq!(map.builders.len(), 8);
        assert_eq!(map.events.len(), 8);
        assert!(map.show_people);
    }

    #[test]
    fn test_radius_check_with_no_user_fails_closed() {
        let map = MapViewModel::new();
        assert!(!map.is_within_allowed_radius(SF));

        let map = map_with_user_at(None);
        assert!(!map.is_within_allowed_radius(SF));
    }

    #[test]
    fn test_radius_check_nearby_and_far() {
        let map = map_with_user_at(Some(SF));
        assert!(map.is_within_allowed_radius(GeoPoint::new(37.7765, -122.4172)));
        assert!(!map.is_within_allowed_radius(LA));
    }

    #[test]
    fn test_radius_upgrade_is_read_at_decision_time() {
        let mut map = map_with_user_at(Some(SF));
        assert!(!map.is_within_allowed_radius(LA));

        // SF to LA is ~559 km; a premium-sized radius admits it.
        map.set_free_radius_m(600_000.0);
        assert!(map.is_within_allowed_radius(LA));
    }

    #[test]
    fn test_location_update_moves_user_pin() {
        let mut map = map_with_user_at(None);
        assert!(map.user_coordinate().is_none());

        map.apply_location_update(SF);
        let coordinate = map.user_coordinate().unwrap();
        assert!((coordinate.latitude - SF.latitude).abs() < f64::EPSILON);
    }

    #[test]
    fn test_location_update_without_user_is_dropped() {
        let mut map = MapViewModel::new();
        map.apply_location_update(SF);
        assert!(map.user_coordinate().is_none());
    }

    #[test]
    fn test_builder_selection() {
        let mut map = MapViewModel::with_mock_data();
        let id = map.builders[2].id;

        map.select_builder(id);
        assert_eq!(map.selected_builder, Some(id));

        map.select_builder(Uuid::new_v4());
        assert_eq!(map.selected_builder, None);

        map.select_builder(id);
        map.clear_selection();
        assert_eq!(map.selected_builder, None);
    }

    #[test]
    fn test_create_event_pin_appends() {
        let mut map = map_with_user_at(Some(SF));
        assert!(map.events.is_empty());
        map.create_event_pin(SF);
        assert_eq!(map.events.len(), 1);
        assert_eq!(map.events[0].title, "New Event");
    }
}

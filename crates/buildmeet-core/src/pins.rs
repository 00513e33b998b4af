//! Pin and identity models.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event pin.
pub type EventId = Uuid;

/// What a builder is currently up to, shown on their pin card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuilderStatus {
    Building,
    Stuck,
    NeedHelp,
    Exploring,
}

impl BuilderStatus {
    /// Display string for the pin card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::Stuck => "Stuck",
            Self::NeedHelp => "Need Help",
            Self::Exploring => "Exploring",
        }
    }
}

/// A builder shown as a pin on the map.
///
/// The coordinate is absent until the position feed delivers a first fix;
/// an absent coordinate admits no drops and keeps drop mode off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderPin {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub project: String,
    pub status: BuilderStatus,
    pub is_urgent: bool,
    pub coordinate: Option<GeoPoint>,
}

impl BuilderPin {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        project: impl Into<String>,
        status: BuilderStatus,
        is_urgent: bool,
        coordinate: Option<GeoPoint>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            project: project.into(),
            status,
            is_urgent,
            coordinate,
        }
    }

    /// Pin for the signed-in user. Positionless until the first fix.
    pub fn from_user(user: &LocalUser) -> Self {
        Self::new(
            user.first_name.clone(),
            user.last_name.clone(),
            user.project.clone(),
            user.status,
            false,
            None,
        )
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An event on the map. Created by an accepted drop (through the creation
/// form) or seeded as mock data; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPin {
    pub id: EventId,
    pub title: String,
    pub host: String,
    pub description: String,
    pub is_urgent: bool,
    pub coordinate: GeoPoint,
}

impl EventPin {
    pub fn new(
        title: impl Into<String>,
        host: impl Into<String>,
        description: impl Into<String>,
        is_urgent: bool,
        coordinate: GeoPoint,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            host: host.into(),
            description: description.into(),
            is_urgent,
            coordinate,
        }
    }
}

/// The signed-in identity, as handed over by the session provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub project: String,
    pub status: BuilderStatus,
}

impl LocalUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

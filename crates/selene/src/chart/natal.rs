use crate::ephemeris::types::{Body, CelestialPosition, Observer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body positions at a birth instant and place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChart {
    pub birth_instant: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Observer>,
    /// Ordered as supplied by the chart provider
    pub positions: Vec<CelestialPosition>,
}

impl NatalChart {
    pub fn new(
        birth_instant: DateTime<Utc>,
        location: Option<Observer>,
        positions: Vec<CelestialPosition>,
    ) -> Self {
        Self {
            birth_instant,
            location,
            positions,
        }
    }

    pub fn get(&self, body: Body) -> Option<&CelestialPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    pub fn ascendant(&self) -> Option<&CelestialPosition> {
        self.get(Body::Ascendant)
    }

    pub fn sun(&self) -> Option<&CelestialPosition> {
        self.get(Body::Sun)
    }

    /// Core bodies and angles, in chart order. Nodes, Chiron and other points are left out.
    pub fn aspect_points(&self) -> impl Iterator<Item = &CelestialPosition> {
        self.positions
            .iter()
            .filter(|p| p.body.is_core() || p.body.is_angle())
    }
}

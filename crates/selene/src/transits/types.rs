use crate::ephemeris::types::{Body, SignDuration};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Significance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitKind {
    SignChange,
    Retrograde,
    Direct,
    LunarPhase,
}

/// A dated sky event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitEvent {
    pub timestamp: DateTime<Utc>,
    pub body: Body,
    /// Human label, also part of the event identity ("Mars enters Leo")
    pub label: String,
    pub significance: Significance,
    pub kind: TransitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<SignDuration>,
}

/// Identity used for deduplication: (calendar day, body, label)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub day: NaiveDate,
    pub body: Body,
    pub label: String,
}

impl TransitEvent {
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn key(&self) -> EventKey {
        EventKey {
            day: self.day(),
            body: self.body,
            label: self.label.clone(),
        }
    }
}

/// Fixed significance of a body's sign ingress
pub fn ingress_significance(body: Body) -> Significance {
    match body {
        Body::Sun | Body::Mars | Body::Jupiter | Body::Saturn | Body::Pluto => Significance::High,
        Body::Moon | Body::Mercury | Body::Venus | Body::Uranus | Body::Neptune => {
            Significance::Medium
        }
        _ => Significance::Low,
    }
}

use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};

/// One ordered piece of the composite prompt. Ordinal defines render order
/// and doubles as the storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateFragment {
    pub ordinal: i64,
    #[serde(default)]
    pub label: String,
    pub body: String,
}

impl TemplateFragment {
    pub fn new(ordinal: i64, label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ordinal,
            label: label.into(),
            body: body.into(),
        }
    }

    /// Validate a schemaless admin payload at the storage boundary.
    /// Only `ordinal` and `body` are load-bearing; `label` defaults to empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| PlannerError::InvalidFragment {
                reason: "payload must be an object".to_string(),
            })?;

        let ordinal = obj
            .get("ordinal")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| PlannerError::InvalidFragment {
                reason: "ordinal is required and must be an integer".to_string(),
            })?;

        let body = obj
            .get("body")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PlannerError::InvalidFragment {
                reason: "body is required and must be a string".to_string(),
            })?;

        let label = obj
            .get("label")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        Ok(Self::new(ordinal, label, body))
    }
}

fn default_days() -> u32 {
    5
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub from_location: String,
    #[serde(default)]
    pub specific_places: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub intent: Vec<String>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub stay: String,
    #[serde(default)]
    pub notes: String,
}

impl TripRequest {
    pub fn new(from_location: impl Into<String>, days: u32) -> Self {
        Self {
            from_location: from_location.into(),
            specific_places: String::new(),
            categories: Vec::new(),
            days,
            currency: default_currency(),
            budget: String::new(),
            intent: Vec::new(),
            group: String::new(),
            stay: String::new(),
            notes: String::new(),
        }
    }

    /// Destination description: explicit places win, otherwise the joined
    /// category list, otherwise empty.
    pub fn location_input(&self) -> String {
        let sp = self.specific_places.trim();
        if !sp.is_empty() {
            return sp.to_string();
        }
        self.categories.join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(default)]
    pub time: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cost_estimate: String,
    #[serde(default)]
    pub bookings: Vec<String>,
    #[serde(default)]
    pub map_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub day: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub accommodation: String,
    #[serde(default)]
    pub travel_notes: String,
    #[serde(default)]
    pub rough_cost: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
}

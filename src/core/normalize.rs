use crate::domain::model::Itinerary;
use crate::utils::error::{PlannerError, Result};
use serde_json::Value;

/// Any accepted map link must carry this prefix.
pub const MAPS_LINK_PREFIX: &str = "https://www.google.com/maps/";

/// Canonical map-search URL for a place name, percent-encoded with `+` for
/// spaces (quote-plus form).
pub fn maps_search_link(place_name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(place_name.as_bytes()).collect();
    format!("https://www.google.com/maps/search/?api=1&query={}", encoded)
}

fn schema_violation(reason: impl Into<String>) -> PlannerError {
    PlannerError::SchemaViolation {
        reason: reason.into(),
    }
}

/// Enforce the structural invariants on a parsed value and produce the typed
/// itinerary: top-level arrays are wrapped as `{"days": ...}`, `activities`
/// defaults to an empty list, `day` is required, and every activity ends up
/// with a well-formed map link (synthesized from its title when the
/// generator omitted or mangled one).
pub fn normalize_itinerary(mut value: Value) -> Result<Itinerary> {
    if value.is_array() {
        value = serde_json::json!({ "days": value });
    }

    let root = value
        .as_object_mut()
        .ok_or_else(|| schema_violation("missing days"))?;
    let days = root
        .get_mut("days")
        .ok_or_else(|| schema_violation("missing days"))?;
    let days = days
        .as_array_mut()
        .ok_or_else(|| schema_violation("days not array"))?;

    for day in days.iter_mut() {
        let day_obj = day
            .as_object_mut()
            .ok_or_else(|| schema_violation("day entry not an object"))?;
        if !day_obj.contains_key("day") {
            return Err(schema_violation("missing day number"));
        }

        let activities = day_obj
            .entry("activities")
            .or_insert_with(|| Value::Array(Vec::new()));
        let activities = activities
            .as_array_mut()
            .ok_or_else(|| schema_violation("activities not array"))?;

        for activity in activities.iter_mut() {
            ensure_map_link(activity)?;
        }
    }

    serde_json::from_value(value)
        .map_err(|e| schema_violation(format!("invalid itinerary shape: {}", e)))
}

fn ensure_map_link(activity: &mut Value) -> Result<()> {
    let obj = activity
        .as_object_mut()
        .ok_or_else(|| schema_violation("activity not an object"))?;

    let link_ok = obj
        .get("map_link")
        .and_then(|v| v.as_str())
        .map(|s| !s.is_empty() && s.starts_with(MAPS_LINK_PREFIX))
        .unwrap_or(false);
    if link_ok {
        return Ok(());
    }

    let title = obj
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| schema_violation("activity missing title"))?;
    let link = maps_search_link(title);
    obj.insert("map_link".to_string(), Value::String(link));
    Ok(())
}

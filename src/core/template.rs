use crate::domain::model::{TemplateFragment, TripRequest};
use crate::utils::error::{PlannerError, Result};

/// Schema block appended after the merged prompt so the generator knows the
/// exact shape expected back, including the map-link format.
pub const SCHEMA_INSTRUCTION: &str = r#"IMPORTANT: You MUST return ONLY valid JSON in this EXACT format.
Include Google Maps links for all locations (format: https://www.google.com/maps/search/?api=1&query=<place_name>).

{
  "days": [
    {
      "day": 1,
      "date": "",
      "title": "",
      "summary": "",
      "activities": [
        {
          "time": "",
          "title": "",
          "description": "",
          "duration": "",
          "cost_estimate": "",
          "bookings": [],
          "map_link": "https://www.google.com/maps/search/?api=1&query=Place+Name"
        }
      ],
      "accommodation": "",
      "travel_notes": "",
      "rough_cost": ""
    }
  ]
}"#;

/// Placeholder values for one render pass. Order is fixed at construction and
/// drives the fallback replacement sequence.
#[derive(Debug, Clone)]
pub struct Substitutions {
    entries: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn from_request(request: &TripRequest) -> Self {
        let trip_type = request
            .intent
            .first()
            .cloned()
            .unwrap_or_else(|| "general".to_string());

        Self::new(vec![
            ("from_location".to_string(), request.from_location.clone()),
            ("specific_location".to_string(), request.location_input()),
            ("categories".to_string(), request.categories.join(", ")),
            ("days".to_string(), request.days.to_string()),
            ("currency".to_string(), request.currency.clone()),
            ("budget".to_string(), request.budget.clone()),
            ("intent".to_string(), request.intent.join(", ")),
            ("group".to_string(), request.group.clone()),
            ("stay".to_string(), request.stay.clone()),
            ("notes".to_string(), request.notes.clone()),
            ("trip_type".to_string(), trip_type),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Strict `{name}` formatter. `{{` and `}}` escape to literal braces; an
/// unknown key, an unclosed `{`, or a lone `}` is an error.
fn format_strict(template: &str, subs: &Substitutions) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut key = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    if n == '{' {
                        return Err("unexpected '{' inside placeholder".to_string());
                    }
                    key.push(n);
                }
                if !closed {
                    return Err("unclosed placeholder".to_string());
                }
                match subs.get(&key) {
                    Some(value) => out.push_str(value),
                    None => return Err(format!("unknown placeholder '{}'", key)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err("single '}' encountered".to_string());
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Render one fragment. Strict formatting first; on any format error, fall
/// back to literal find-and-replace, which never fails and leaves unmatched
/// placeholders verbatim.
pub fn render_fragment(fragment: &TemplateFragment, subs: &Substitutions) -> String {
    match format_strict(&fragment.body, subs) {
        Ok(rendered) => rendered,
        Err(reason) => {
            tracing::warn!(
                "Formatting fallback for fragment {}: {}",
                fragment.ordinal,
                reason
            );
            let mut text = fragment.body.clone();
            for (key, value) in subs.iter() {
                text = text.replace(&format!("{{{}}}", key), value);
            }
            text
        }
    }
}

/// Merge fragments into the composite prompt: sort ascending by ordinal,
/// render, trim, join with one blank line. Order is load-bearing downstream.
pub fn merge_fragments(fragments: &[TemplateFragment], subs: &Substitutions) -> Result<String> {
    if fragments.is_empty() {
        return Err(PlannerError::NoFragments);
    }

    let mut ordered: Vec<&TemplateFragment> = fragments.iter().collect();
    ordered.sort_by_key(|f| f.ordinal);

    let rendered: Vec<String> = ordered
        .iter()
        .map(|f| render_fragment(f, subs).trim().to_string())
        .collect();

    Ok(rendered.join("\n\n"))
}

/// The full prompt sent to the generator: merged fragments plus the fixed
/// schema instruction.
pub fn compose_prompt(fragments: &[TemplateFragment], subs: &Substitutions) -> Result<String> {
    let merged = merge_fragments(fragments, subs)?;
    Ok(format!("{}\n\n{}", merged, SCHEMA_INSTRUCTION))
}

use crate::core::extract::locate_structured_text;
use crate::core::normalize::normalize_itinerary;
use crate::core::repair::repair_json;
use crate::core::template::{compose_prompt, Substitutions};
use crate::domain::model::{Itinerary, TripRequest};
use crate::domain::ports::{FragmentStore, TextGenerator};
use crate::utils::error::{PlannerError, Result};

/// Orchestrates one generation request: compose the prompt from stored
/// fragments, call the generator, recover a typed itinerary from whatever
/// comes back. Holds no per-request state, so concurrent plans are safe.
pub struct Planner<S: FragmentStore, G: TextGenerator> {
    store: S,
    generator: G,
}

impl<S: FragmentStore, G: TextGenerator> Planner<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self { store, generator }
    }

    pub async fn plan(&self, request: &TripRequest) -> Result<Itinerary> {
        let fragments = self.store.list_fragments().await?;
        let subs = Substitutions::from_request(request);
        let prompt = compose_prompt(&fragments, &subs)?;

        tracing::info!(
            "Sending prompt to generator (truncated): {}",
            truncate_chars(&prompt, 800).replace('\n', " ")
        );

        let raw = self.generator.generate(&prompt).await?;
        tracing::debug!("Raw generator output: {:?}", raw);

        recover_itinerary(&raw)
    }
}

/// Post-generation recovery pipeline: locate the structured payload, parse
/// strictly, fall back to textual repair, then normalize. Diagnostic detail
/// is logged; the returned error stays opaque.
pub fn recover_itinerary(raw: &str) -> Result<Itinerary> {
    let candidate = locate_structured_text(raw);
    tracing::debug!("Extracted candidate: {:?}", candidate);

    let value: serde_json::Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(strict_err) => {
            let repaired = repair_json(candidate);
            match serde_json::from_str(&repaired) {
                Ok(value) => {
                    tracing::debug!("Strict parse failed ({}), repair succeeded", strict_err);
                    value
                }
                Err(repair_err) => {
                    tracing::error!(
                        "Failed to parse generator output: {} (after repair: {})",
                        strict_err,
                        repair_err
                    );
                    tracing::error!("Original response was: {:?}", raw);
                    return Err(PlannerError::ExtractionFailure {
                        reason: format!("unparseable even after repair: {}", repair_err),
                    });
                }
            }
        }
    };

    normalize_itinerary(value)
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    if s.chars().count() <= max_chars {
        s
    } else {
        let byte_idx = s
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        &s[..byte_idx]
    }
}

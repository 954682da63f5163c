use crate::domain::model::TemplateFragment;
use crate::domain::ports::FragmentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Fragment store backed by process memory. The BTreeMap keeps fragments
/// sorted by ordinal, which is the listing contract.
pub struct InMemoryFragmentStore {
    fragments: RwLock<BTreeMap<i64, TemplateFragment>>,
}

impl InMemoryFragmentStore {
    pub fn new() -> Self {
        Self {
            fragments: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store preloaded with the four default prompt fragments.
    pub fn seeded() -> Self {
        Self::with_fragments(default_fragments())
    }

    pub fn with_fragments(seed: Vec<TemplateFragment>) -> Self {
        let fragments = seed.into_iter().map(|f| (f.ordinal, f)).collect();
        Self {
            fragments: RwLock::new(fragments),
        }
    }
}

impl Default for InMemoryFragmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FragmentStore for InMemoryFragmentStore {
    async fn list_fragments(&self) -> Result<Vec<TemplateFragment>> {
        let fragments = self.fragments.read().await;
        Ok(fragments.values().cloned().collect())
    }

    async fn upsert_fragment(&self, fragment: TemplateFragment) -> Result<()> {
        let mut fragments = self.fragments.write().await;
        fragments.insert(fragment.ordinal, fragment);
        Ok(())
    }

    async fn delete_fragment(&self, ordinal: i64) -> Result<bool> {
        let mut fragments = self.fragments.write().await;
        Ok(fragments.remove(&ordinal).is_some())
    }
}

/// The default prompt set used when no fragments are configured.
pub fn default_fragments() -> Vec<TemplateFragment> {
    vec![
        TemplateFragment::new(
            1,
            "Core Itinerary Generator",
            "You are an elite luxury travel concierge. \
             Design a detailed {days}-day travel itinerary starting from {from_location}. \
             For each activity, include a Google Maps link (format: https://www.google.com/maps/search/?api=1&query=<place_name>). \
             Focus on {trip_type} travel with local insider knowledge. \
             Include authentic cultural insights and time-of-day recommendations.",
        ),
        TemplateFragment::new(
            2,
            "Experience Enhancer",
            "Refine the itinerary with insider secrets and luxury-level detail. \
             Include Google Maps links for all locations. \
             Add sensory details and balance must-see highlights with local encounters.",
        ),
        TemplateFragment::new(
            3,
            "Local Insights & Tips",
            "Write a 'Local's Secrets' section with cultural etiquette and safety tips. \
             Include Google Maps links for recommended places.",
        ),
        TemplateFragment::new(
            4,
            "Presentation Polish",
            "Rewrite the itinerary with clear headings and compelling intros. \
             Ensure all locations have Google Maps links.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn lists_fragments_sorted_by_ordinal() {
        let store = InMemoryFragmentStore::new();
        store
            .upsert_fragment(TemplateFragment::new(3, "c", "third"))
            .await
            .unwrap();
        store
            .upsert_fragment(TemplateFragment::new(1, "a", "first"))
            .await
            .unwrap();
        store
            .upsert_fragment(TemplateFragment::new(2, "b", "second"))
            .await
            .unwrap();

        let fragments = store.list_fragments().await.unwrap();
        let ordinals: Vec<i64> = fragments.iter().map(|f| f.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn upsert_replaces_fragment_with_same_ordinal() {
        let store = InMemoryFragmentStore::new();
        store
            .upsert_fragment(TemplateFragment::new(1, "a", "old body"))
            .await
            .unwrap();
        store
            .upsert_fragment(TemplateFragment::new(1, "a", "new body"))
            .await
            .unwrap();

        let fragments = store.list_fragments().await.unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].body, "new body");
    }

    #[tokio::test]
    async fn delete_reports_whether_fragment_existed() {
        let store = InMemoryFragmentStore::new();
        store
            .upsert_fragment(TemplateFragment::new(1, "a", "body"))
            .await
            .unwrap();

        assert!(store.delete_fragment(1).await.unwrap());
        assert!(!store.delete_fragment(1).await.unwrap());
        assert!(store.list_fragments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_from_admin_payload_rejects_malformed_input() {
        let store = InMemoryFragmentStore::new();

        let valid = TemplateFragment::from_value(json!({"ordinal": 5, "body": "extra part"}));
        store.upsert_fragment(valid.unwrap()).await.unwrap();
        assert_eq!(store.list_fragments().await.unwrap().len(), 1);

        assert!(TemplateFragment::from_value(json!({"label": "no body"})).is_err());
    }

    #[test]
    fn seeded_store_contains_default_fragments() {
        let fragments = default_fragments();
        assert_eq!(fragments.len(), 4);
        assert_eq!(fragments[0].ordinal, 1);
        assert!(fragments[0].body.contains("{days}"));
        assert!(fragments[0].body.contains("{from_location}"));
    }
}

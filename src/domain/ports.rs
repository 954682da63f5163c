use crate::domain::model::TemplateFragment;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Store of prompt fragments. The planning pipeline only ever reads;
/// upsert/delete form the administrative surface.
#[async_trait]
pub trait FragmentStore: Send + Sync {
    /// All fragments, sorted ascending by ordinal.
    async fn list_fragments(&self) -> Result<Vec<TemplateFragment>>;

    /// Insert or replace the fragment with the same ordinal.
    async fn upsert_fragment(&self, fragment: TemplateFragment) -> Result<()>;

    /// Returns whether a fragment with that ordinal existed.
    async fn delete_fragment(&self, ordinal: i64) -> Result<bool>;
}

/// Opaque text generator. Single-shot, no retry, no streaming; the response
/// carries no well-formedness guarantees.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

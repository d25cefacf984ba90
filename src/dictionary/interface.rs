use async_trait::async_trait;

/// Source of usage-example sentences for English words.
#[async_trait]
pub trait ExampleLookup: Send + Sync {
    /// Return the first example sentence for `word`, or `None` when the
    /// service has none or cannot be reached. Never fails.
    async fn lookup_example(&self, word: &str) -> Option<String>;
}

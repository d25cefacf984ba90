use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::interface::ExampleLookup;
use crate::translate::ProviderError;

const PROVIDER: &str = "dictionary";

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    example: Option<String>,
}

/// Client for a Free-Dictionary-compatible API
/// (`GET {base}/api/v2/entries/en/{word}`).
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DictionaryClient {
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn entry_url(&self, word: &str) -> Result<Url, ProviderError> {
        let invalid = |message: String| ProviderError::Network {
            provider: PROVIDER,
            message,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);
        Ok(url)
    }

    /// Fetch the first example sentence, surfacing failures to the caller.
    pub async fn fetch_example(&self, word: &str) -> Result<Option<String>, ProviderError> {
        let word = word.trim().to_lowercase();
        let url = self.entry_url(&word)?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                message: format!("no entry for {:?}", word),
            });
        }

        let entries: Vec<Entry> = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        Ok(first_example(&entries))
    }
}

/// First non-empty example in entry → meaning → definition order.
fn first_example(entries: &[Entry]) -> Option<String> {
    entries
        .iter()
        .flat_map(|entry| &entry.meanings)
        .flat_map(|meaning| &meaning.definitions)
        .filter_map(|definition| definition.example.as_deref())
        .map(str::trim)
        .find(|example| !example.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ExampleLookup for DictionaryClient {
    async fn lookup_example(&self, word: &str) -> Option<String> {
        match self.fetch_example(word).await {
            Ok(Some(example)) => {
                debug!(word, "Dictionary example found");
                Some(example)
            }
            Ok(None) => {
                debug!(word, "Dictionary has no example");
                None
            }
            Err(ProviderError::Upstream { status: 404, .. }) => {
                debug!(word, "Word not in dictionary");
                None
            }
            Err(e) => {
                warn!(word, kind = e.kind(), error = %e, "Dictionary lookup failed");
                None
            }
        }
    }
}

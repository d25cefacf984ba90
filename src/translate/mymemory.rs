use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::interface::{
    explicit_source, lenient_f64, Alternative, ProviderError, ProviderTranslation,
    TranslationProvider,
};

const PROVIDER: &str = "mymemory";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetReply {
    response_data: Option<ResponseData>,
    #[serde(default, deserialize_with = "lenient_f64")]
    response_status: Option<f64>,
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
    #[serde(default, rename = "match", deserialize_with = "lenient_f64")]
    match_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Match {
    translation: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    quality: Option<f64>,
    source: Option<String>,
}

/// Secondary provider: the MyMemory `get` endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl MyMemoryClient {
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

/// MyMemory encodes the direction as `src|tgt` and has no auto-detection.
pub fn language_pair(source_language: &str, target_language: &str) -> String {
    format!("{}|{}", explicit_source(source_language), target_language)
}

#[async_trait]
impl TranslationProvider for MyMemoryClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let url = format!("{}/get", self.base_url);
        let langpair = language_pair(source_language, target_language);

        debug!(provider = PROVIDER, langpair = %langpair, "Sending translation request");

        let response = self
            .client
            .get(&url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                message,
            });
        }

        let reply: GetReply = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        let data = reply.response_data.ok_or_else(|| ProviderError::MalformedResponse {
            provider: PROVIDER,
            message: "missing responseData".to_string(),
        })?;

        // MyMemory reports quota and bad-pair errors in-band with HTTP 200;
        // the message sits in translatedText.
        if let Some(code) = reply.response_status {
            if code != 200.0 {
                return Err(ProviderError::Upstream {
                    provider: PROVIDER,
                    status: code as u16,
                    message: data.translated_text.unwrap_or_default(),
                });
            }
        }

        let text = data
            .translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER,
                message: "missing responseData.translatedText".to_string(),
            })?;

        let alternatives = reply
            .matches
            .into_iter()
            .filter_map(|m| {
                m.translation.map(|translation| Alternative {
                    translation,
                    quality: m.quality,
                    source: m.source.unwrap_or_default(),
                })
            })
            .collect();

        Ok(ProviderTranslation {
            text,
            detected_language: None,
            confidence: data.match_score.map(|c| c.clamp(0.0, 1.0)),
            alternatives,
        })
    }
}

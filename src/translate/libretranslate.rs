use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::interface::{
    explicit_source, lenient_f64, ProviderError, ProviderTranslation, TranslationProvider,
};
use crate::languages::LanguageDescriptor;

const PROVIDER: &str = "libretranslate";

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: Option<String>,
    detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: Option<String>,
    /// Percentage in `0..=100`.
    #[serde(default, deserialize_with = "lenient_f64")]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    code: String,
    name: String,
}

/// Primary provider: a LibreTranslate-compatible instance.
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    languages_timeout: Duration,
}

impl LibreTranslateClient {
    pub fn new(client: Client, base_url: &str, timeout: Duration, languages_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            languages_timeout,
        }
    }

    /// Query the instance's own language list.
    pub async fn fetch_languages(&self) -> Result<Vec<LanguageDescriptor>, ProviderError> {
        let url = format!("{}/languages", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.languages_timeout)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                message: "language list request rejected".to_string(),
            });
        }

        let entries: Vec<LanguageEntry> = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        Ok(entries
            .into_iter()
            .map(|entry| LanguageDescriptor::new(entry.code, entry.name))
            .collect())
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let url = format!("{}/translate", self.base_url);
        let body = TranslateBody {
            q: text,
            source: explicit_source(source_language),
            target: target_language,
            format: "text",
        };

        debug!(provider = PROVIDER, source = body.source, target = target_language, "Sending translation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
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

        let reply: TranslateReply = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, &e))?;

        let text = reply
            .translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER,
                message: "missing translatedText".to_string(),
            })?;

        let (detected_language, confidence) = match reply.detected_language {
            Some(detected) => (
                detected.language,
                detected.confidence.map(|c| (c / 100.0).clamp(0.0, 1.0)),
            ),
            None => (None, None),
        };

        Ok(ProviderTranslation {
            text,
            detected_language,
            confidence,
            alternatives: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_upstream, unreachable_url};
    use axum::{routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn client(base_url: &str, timeout: Duration) -> LibreTranslateClient {
        LibreTranslateClient::new(Client::new(), base_url, timeout, timeout)
    }

    #[tokio::test]
    async fn sends_explicit_english_for_auto_and_reads_text() {
        let router = Router::new().route(
            "/translate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["q"], "hello");
                assert_eq!(body["source"], "en");
                assert_eq!(body["target"], "es");
                assert_eq!(body["format"], "text");
                Json(json!({ "translatedText": "hola" }))
            }),
        );
        let base = spawn_upstream(router).await;

        let result = client(&base, Duration::from_secs(2))
            .translate("hello", "auto", "es")
            .await
            .unwrap();
        assert_eq!(result.text, "hola");
        assert_eq!(result.detected_language, None);
        assert!(result.alternatives.is_empty());
    }

    #[tokio::test]
    async fn detected_language_is_reported() {
        let router = Router::new().route(
            "/translate",
            post(|| async {
                Json(json!({
                    "translatedText": "bonjour",
                    "detectedLanguage": { "language": "en", "confidence": 90 }
                }))
            }),
        );
        let base = spawn_upstream(router).await;

        let result = client(&base, Duration::from_secs(2))
            .translate("hello", "en", "fr")
            .await
            .unwrap();
        assert_eq!(result.detected_language.as_deref(), Some("en"));
        assert_eq!(result.confidence, Some(0.9));
    }

    #[tokio::test]
    async fn missing_text_is_malformed() {
        let router = Router::new().route("/translate", post(|| async { Json(json!({ "error": null })) }));
        let base = spawn_upstream(router).await;

        let err = client(&base, Duration::from_secs(2))
            .translate("hello", "auto", "es")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "malformed-response");
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let router = Router::new().route(
            "/translate",
            post(|| async { (axum::http::StatusCode::FORBIDDEN, "api key required") }),
        );
        let base = spawn_upstream(router).await;

        let err = client(&base, Duration::from_secs(2))
            .translate("hello", "auto", "es")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { status: 403, .. }));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let router = Router::new().route(
            "/translate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "translatedText": "tarde" }))
            }),
        );
        let base = spawn_upstream(router).await;

        let err = client(&base, Duration::from_millis(100))
            .translate("late", "auto", "es")
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let err = client(&unreachable_url().await, Duration::from_secs(2))
            .translate("hello", "auto", "es")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn languages_are_listed() {
        let router = Router::new().route(
            "/languages",
            get(|| async {
                Json(json!([
                    { "code": "en", "name": "English", "targets": ["es"] },
                    { "code": "es", "name": "Spanish", "targets": ["en"] }
                ]))
            }),
        );
        let base = spawn_upstream(router).await;

        let languages = client(&base, Duration::from_secs(2)).fetch_languages().await.unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[1], LanguageDescriptor::new("es", "Spanish"));
    }
}

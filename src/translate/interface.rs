use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Source language value meaning "let the provider decide".
pub const AUTO_LANGUAGE: &str = "auto";

/// Language assumed when the caller passed `auto` to a provider that needs an
/// explicit source.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Maximum number of alternates carried in a result.
pub const MAX_ALTERNATIVES: usize = 3;

/// Why a single outbound call failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("{provider} timed out")]
    Timeout { provider: &'static str },
    #[error("{provider} unreachable: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} returned status {status}: {message}")]
    Upstream {
        provider: &'static str,
        status: u16,
        message: String,
    },
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::MalformedResponse { .. } => "malformed-response",
            Self::Upstream { .. } => "upstream-error",
        }
    }

    /// Classify a transport-level reqwest error.
    pub fn from_reqwest(provider: &'static str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else if err.is_decode() {
            Self::MalformedResponse {
                provider,
                message: err.to_string(),
            }
        } else {
            Self::Network {
                provider,
                message: err.to_string(),
            }
        }
    }
}

/// One alternate translation reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub translation: String,
    pub quality: Option<f64>,
    pub source: String,
}

/// Successful outcome of one provider call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderTranslation {
    pub text: String,
    pub detected_language: Option<String>,
    pub confidence: Option<f64>,
    pub alternatives: Vec<Alternative>,
}

/// A third-party translation service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Issue exactly one translation request. No retries.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError>;
}

/// Upstream scores arrive as numbers or numeric strings (`74` or `"74"`);
/// anything else reads as absent.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Map the caller's source language to what an explicit-source provider needs.
pub fn explicit_source(source_language: &str) -> &str {
    if source_language == AUTO_LANGUAGE {
        DEFAULT_SOURCE_LANGUAGE
    } else {
        source_language
    }
}

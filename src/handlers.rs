use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::envelope::{
    timestamp, ExampleTranslateResponse, LanguagesResponse, TranslateResponse,
};
use crate::error::ApiError;
use crate::languages::supported_languages;
use crate::state::AppState;
use crate::translate::interface::AUTO_LANGUAGE;

/// Raw body of the translate endpoints. Everything is optional so that a
/// missing field is reported as a validation error rather than a rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    pub word: Option<String>,
    pub target_language: Option<String>,
    pub source_language: Option<String>,
}

/// A validated translation request: trimmed word, lowercased language codes.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub word: String,
    pub target_language: String,
    pub source_language: String,
}

impl TranslateBody {
    pub fn validate(self) -> Result<TranslationRequest, ApiError> {
        let (Some(word), Some(target_language)) = (self.word, self.target_language) else {
            return Err(ApiError::missing_fields());
        };

        let word = word.trim();
        if word.is_empty() {
            return Err(ApiError::invalid("Invalid word: must be a non-empty string"));
        }

        let target_language = target_language.trim().to_lowercase();
        if target_language.is_empty() {
            return Err(ApiError::invalid(
                "Invalid targetLanguage: must be a non-empty string",
            ));
        }

        let source_language = self
            .source_language
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| AUTO_LANGUAGE.to_string());

        Ok(TranslationRequest {
            word: word.to_string(),
            target_language,
            source_language,
        })
    }
}

fn parse_body(payload: Result<Json<TranslateBody>, JsonRejection>) -> Result<TranslationRequest, ApiError> {
    match payload {
        Ok(Json(body)) => body.validate(),
        Err(rejection) => Err(ApiError::invalid(format!(
            "Request body must be a JSON object: {}",
            rejection.body_text()
        ))),
    }
}

fn endpoint_map() -> Value {
    json!({
        "health": "GET /health",
        "translate": "POST /api/translate",
        "translateWithExample": "POST /api/translate-with-example",
        "languages": "GET /api/languages",
        "liveLanguages": "GET /api/translate/languages"
    })
}

pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Translation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoint_map()
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "uptime": state.uptime_secs()
    }))
}

pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let request = parse_body(payload)?;
    info!(
        word = %request.word,
        target = %request.target_language,
        source = %request.source_language,
        "Translating word"
    );

    let result = state
        .translator
        .translate_word(&request.word, &request.target_language, &request.source_language)
        .await?;
    info!(provider = result.provider, "Translation served");

    Ok(Json(TranslateResponse::new(
        &request.word,
        &request.target_language,
        result,
    )))
}

pub async fn translate_with_example(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<ExampleTranslateResponse>, ApiError> {
    let request = parse_body(payload)?;
    info!(
        word = %request.word,
        target = %request.target_language,
        "Translating word with example"
    );

    let result = state
        .translator
        .translate_with_example(&request.word, &request.target_language)
        .await?;

    Ok(Json(ExampleTranslateResponse::new(
        &request.word,
        &request.target_language,
        result,
    )))
}

pub async fn languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse::new(supported_languages()))
}

pub async fn live_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse::new(state.translator.live_languages().await))
}

pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!("Route {} {} not found", method, uri.path()),
            "availableEndpoints": endpoint_map()
        })),
    )
}

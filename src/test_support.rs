//! Shared fixtures for unit tests: an in-process upstream server and fake
//! providers.

use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex};

use crate::dictionary::ExampleLookup;
use crate::languages::LanguageDescriptor;
use crate::translate::{
    LanguageCatalog, ProviderError, ProviderTranslation, TranslationProvider,
};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

type Responder = Box<dyn Fn(&str, &str) -> Result<ProviderTranslation, ProviderError> + Send + Sync>;

pub struct FakeProvider {
    name: &'static str,
    respond: Responder,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeProvider {
    fn new(name: &'static str, respond: Responder) -> Arc<Self> {
        Arc::new(Self {
            name,
            respond,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Translates `text` to `"{text}-{target}"`.
    pub fn echo(name: &'static str) -> Arc<Self> {
        Self::new(name, Box::new(|text: &str, target: &str| Ok(echo(text, target))))
    }

    pub fn failing(name: &'static str, error: ProviderError) -> Arc<Self> {
        Self::new(name, Box::new(move |_: &str, _: &str| Err(error.clone())))
    }

    /// Echoes, except for texts containing `needle`.
    pub fn failing_on(name: &'static str, needle: &'static str) -> Arc<Self> {
        Self::new(
            name,
            Box::new(move |text: &str, target: &str| {
                if text.contains(needle) {
                    Err(ProviderError::Upstream {
                        provider: name,
                        status: 500,
                        message: "rejected".to_string(),
                    })
                } else {
                    Ok(echo(text, target))
                }
            }),
        )
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

fn echo(text: &str, target: &str) -> ProviderTranslation {
    ProviderTranslation {
        text: format!("{}-{}", text, target),
        ..Default::default()
    }
}

#[async_trait]
impl TranslationProvider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        self.calls.lock().unwrap().push((
            text.to_string(),
            source_language.to_string(),
            target_language.to_string(),
        ));
        (self.respond)(text, target_language)
    }
}

pub struct FakeLookup(Option<String>);

impl FakeLookup {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn with(example: &str) -> Self {
        Self(Some(example.to_string()))
    }
}

#[async_trait]
impl ExampleLookup for FakeLookup {
    async fn lookup_example(&self, _word: &str) -> Option<String> {
        self.0.clone()
    }
}

pub struct FakeCatalog(Option<Vec<LanguageDescriptor>>);

impl FakeCatalog {
    pub fn failing() -> Self {
        Self(None)
    }

    pub fn with(languages: Vec<LanguageDescriptor>) -> Self {
        Self(Some(languages))
    }
}

#[async_trait]
impl LanguageCatalog for FakeCatalog {
    async fn languages(&self) -> Result<Vec<LanguageDescriptor>, ProviderError> {
        self.0.clone().ok_or(ProviderError::Timeout { provider: "catalog" })
    }
}

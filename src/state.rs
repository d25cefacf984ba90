use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;

use crate::config::Config;
use crate::dictionary::DictionaryClient;
use crate::translate::{LibreTranslateClient, MyMemoryClient, TranslationService};

/// Per-process, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<TranslationService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let providers = &config.providers;
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let libretranslate = Arc::new(LibreTranslateClient::new(
            client.clone(),
            &providers.libretranslate_url,
            providers.translate_timeout(),
            providers.lookup_timeout(),
        ));
        let mymemory = Arc::new(MyMemoryClient::new(
            client.clone(),
            &providers.mymemory_url,
            providers.translate_timeout(),
        ));
        let dictionary = Arc::new(DictionaryClient::new(
            client,
            &providers.dictionary_url,
            providers.lookup_timeout(),
        ));

        let translator = TranslationService::new(
            libretranslate.clone(),
            mymemory,
            dictionary,
            libretranslate,
        );

        Ok(Self::with_translator(config, translator))
    }

    pub fn with_translator(config: Config, translator: TranslationService) -> Self {
        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

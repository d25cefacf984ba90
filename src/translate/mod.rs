pub mod interface;
pub mod libretranslate;
pub mod mymemory;
pub mod service;

pub use interface::{Alternative, ProviderError, ProviderTranslation, TranslationProvider};
pub use libretranslate::LibreTranslateClient;
pub use mymemory::MyMemoryClient;
pub use service::{
    ExampleOrigin, ExampleSentence, ExampleTranslation, LanguageCatalog, TranslationError,
    TranslationResult, TranslationService,
};

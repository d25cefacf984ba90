pub mod interface;
pub mod client;

pub use interface::ExampleLookup;
pub use client::DictionaryClient;

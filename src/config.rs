use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Whether internal error messages may be shown to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Upstream endpoints and per-call timeouts. These are the only knobs of the
/// translation chain; the order of providers is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_libretranslate_url")]
    pub libretranslate_url: String,
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    #[serde(default = "default_translate_timeout_ms")]
    pub translate_timeout_ms: u64,
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.com".to_string()
}

fn default_mymemory_url() -> String {
    "https://api.mymemory.translated.net".to_string()
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev".to_string()
}

fn default_translate_timeout_ms() -> u64 {
    10_000
}

fn default_lookup_timeout_ms() -> u64 {
    5_000
}

impl ProvidersConfig {
    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            libretranslate_url: default_libretranslate_url(),
            mymemory_url: default_mymemory_url(),
            dictionary_url: default_dictionary_url(),
            translate_timeout_ms: default_translate_timeout_ms(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl Config {
    /// Load a YAML or JSON config file, substituting `${VAR}` placeholders
    /// from the process environment.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&fs::read_to_string(path)?, |name| {
            std::env::var(name).ok()
        });

        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Resolve configuration: first readable file among `CONFIG_PATH`,
    /// `config.yaml`, `config.json`, else defaults; then env overrides.
    pub fn resolve() -> Result<Self> {
        let candidates: Vec<String> = vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("config.yaml".to_string()),
            Some("config.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut config = None;
        for path in &candidates {
            if !Path::new(path).exists() {
                continue;
            }
            match Config::load(path) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from: {}", path);
                    config = Some(cfg);
                    break;
                }
                Err(e) => {
                    anyhow::bail!("Failed to load config from {}: {}", path, e);
                }
            }
        }

        let mut config = config.unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            Config::default()
        });
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment overrides. `lookup` is injected so tests don't have
    /// to mutate the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid number: {}", e))?;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.server.environment = Environment::parse(&env)
                .ok_or_else(|| anyhow::anyhow!("Unknown APP_ENV value: {}", env))?;
        } else if let Some(environment) = lookup("NODE_ENV").and_then(|env| Environment::parse(&env)) {
            // NODE_ENV carries other values ("test", "staging"); those are ignored
            self.server.environment = environment;
        }
        if let Some(url) = lookup("LIBRETRANSLATE_URL") {
            self.providers.libretranslate_url = url;
        }
        if let Some(url) = lookup("MYMEMORY_URL") {
            self.providers.mymemory_url = url;
        }
        if let Some(url) = lookup("DICTIONARY_URL") {
            self.providers.dictionary_url = url;
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the looked-up value; unknown variables are kept
/// verbatim.
fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(pattern) => pattern,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

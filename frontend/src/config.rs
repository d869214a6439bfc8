use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw values as they appear in `window.__FOLIO_ENV` or `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

/// Validated connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing Supabase environment variables")]
    Missing,
    #[error("invalid Supabase URL `{0}`")]
    InvalidUrl(String),
}

impl RuntimeConfig {
    fn non_empty(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Field-by-field merge; values already present win.
    pub fn or(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            supabase_url: Self::non_empty(self.supabase_url)
                .or_else(|| Self::non_empty(fallback.supabase_url)),
            supabase_anon_key: Self::non_empty(self.supabase_anon_key)
                .or_else(|| Self::non_empty(fallback.supabase_anon_key)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }

    pub fn into_backend(self) -> Result<BackendConfig, ConfigError> {
        let url = Self::non_empty(self.supabase_url).ok_or(ConfigError::Missing)?;
        let anon_key = Self::non_empty(self.supabase_anon_key).ok_or(ConfigError::Missing)?;
        let parsed = reqwest::Url::parse(&url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(url));
        }
        Ok(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn from_build_env() -> RuntimeConfig {
        RuntimeConfig {
            supabase_url: option_env!("SUPABASE_URL").map(str::to_string),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY").map(str::to_string),
        }
    }
}

impl BackendConfig {
    /// `abc` for `https://abc.supabase.co`.
    pub fn project_ref(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .and_then(|host| host.split('.').next().map(str::to_string))
            .unwrap_or_else(|| "local".to_string())
    }

    pub fn session_storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;
    use anyhow::{anyhow, Context};

    fn read_key(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    /// Optional global: `window.__FOLIO_ENV = { SUPABASE_URL: "...", SUPABASE_ANON_KEY: "..." }`
    pub fn from_env_js() -> RuntimeConfig {
        let Some(window) = web_sys::window() else {
            return RuntimeConfig::default();
        };
        let any = match js_sys::Reflect::get(&window, &"__FOLIO_ENV".into()) {
            Ok(any) if !any.is_undefined() && !any.is_null() => any,
            _ => return RuntimeConfig::default(),
        };
        let obj = js_sys::Object::from(any);
        RuntimeConfig {
            supabase_url: read_key(&obj, &["SUPABASE_URL", "supabase_url"]),
            supabase_anon_key: read_key(&obj, &["SUPABASE_ANON_KEY", "supabase_anon_key"]),
        }
    }

    pub async fn fetch_config_json() -> anyhow::Result<RuntimeConfig> {
        let origin = web_sys::window()
            .ok_or_else(|| anyhow!("no global `window` exists"))?
            .location()
            .origin()
            .map_err(|_| anyhow!("location origin unavailable"))?;
        let resp = reqwest::get(format!("{}/config.json", origin))
            .await
            .context("requesting config.json")?;
        if !resp.status().is_success() {
            return Err(anyhow!("config.json returned {}", resp.status()));
        }
        resp.json::<RuntimeConfig>()
            .await
            .context("parsing config.json")
    }
}

/// Resolves backend settings: env.js globals, then `config.json`, then
/// values baked in at build time.
pub async fn load() -> Result<BackendConfig, ConfigError> {
    #[cfg(target_arch = "wasm32")]
    let resolved = {
        let mut cfg = browser::from_env_js();
        if !cfg.is_complete() {
            match browser::fetch_config_json().await {
                Ok(fetched) => cfg = cfg.or(fetched),
                Err(err) => log::debug!("no runtime config.json: {:#}", err),
            }
        }
        cfg.or(RuntimeConfig::from_build_env())
    };
    #[cfg(not(target_arch = "wasm32"))]
    let resolved = RuntimeConfig::from_build_env();

    let backend = resolved.into_backend()?;
    log::info!("Supabase URL: {}", backend.url);
    log::info!("Anon key length: {}", backend.anon_key.len());
    Ok(backend)
}

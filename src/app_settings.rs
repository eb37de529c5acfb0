use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;

pub const API_URL_ENV: &str = "HYPERION_API_URL";

/// Client-side settings, persisted through [`crate::storage::Storage`].
///
/// `api_url` holds only an address the user typed in; the environment and
/// built-in fallbacks are applied when the URL is read, never stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub id: Option<u32>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub default_model_id: Option<String>,
    #[serde(default = "default_true")]
    pub sidebar_open: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            id: Some(1),
            api_url: None,
            default_model_id: None,
            sidebar_open: true,
        }
    }
}

impl AppSettings {
    /// Settings loaded from storage, or defaults when nothing was saved.
    pub fn resolve(stored: Option<AppSettings>) -> Self {
        let s = stored.unwrap_or_default();
        let api_url = s.api_url.as_deref().and_then(non_blank);
        Self { api_url, ..s }
    }

    /// Replaces the user's URL override; a blank entry removes it.
    pub fn with_api_url(self, input: &str) -> Self {
        Self {
            api_url: non_blank(input),
            ..self
        }
    }

    /// Address the client talks to right now.
    pub fn effective_api_url(&self) -> String {
        self.api_url_with_env(env_api_url())
    }

    pub fn api_url_with_env(&self, env: Option<String>) -> String {
        resolve_api_url(self.api_url.as_deref(), env)
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

/// First non-blank of: stored value, environment value, built-in default.
pub fn resolve_api_url(stored: Option<&str>, env: Option<String>) -> String {
    stored
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| env.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn env_api_url() -> Option<String> {
    std::env::var(API_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_api_url() -> Option<String> {
    option_env!("HYPERION_API_URL").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_url_wins() {
        let url = resolve_api_url(Some("http://rag:9000"), Some("http://env:1".into()));
        assert_eq!(url, "http://rag:9000");
    }

    #[test]
    fn blank_stored_url_falls_back_to_env_then_default() {
        assert_eq!(
            resolve_api_url(Some("  "), Some("http://env:1".into())),
            "http://env:1"
        );
        assert_eq!(resolve_api_url(None, Some("".into())), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(None, None), DEFAULT_API_URL);
    }

    #[test]
    fn old_settings_files_get_defaults() {
        let s: AppSettings =
            serde_json::from_str(r#"{"id": 1, "api_url": "http://x"}"#).unwrap();
        assert!(s.sidebar_open);
        assert_eq!(s.default_model_id, None);
        assert_eq!(s.api_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn saving_other_settings_does_not_pin_the_env_url() {
        // Defaults are persisted, e.g. by a sidebar toggle, then reloaded.
        let toggled = AppSettings {
            sidebar_open: false,
            ..AppSettings::default()
        };
        let json = serde_json::to_string(&toggled).unwrap();
        let reloaded = AppSettings::resolve(Some(serde_json::from_str(&json).unwrap()));

        assert_eq!(reloaded.api_url, None);
        assert_eq!(
            reloaded.api_url_with_env(Some("http://env-b:2".into())),
            "http://env-b:2"
        );
    }

    #[test]
    fn blank_entry_clears_the_override() {
        let s = AppSettings::default().with_api_url("http://rag:9000");
        assert_eq!(s.api_url_with_env(Some("http://env:1".into())), "http://rag:9000");

        let s = s.with_api_url("   ");
        assert_eq!(s.api_url, None);
        assert_eq!(s.api_url_with_env(Some("http://env:1".into())), "http://env:1");
        assert_eq!(s.api_url_with_env(None), DEFAULT_API_URL);
    }

    #[test]
    fn blank_stored_url_is_dropped_on_load() {
        let stored = AppSettings {
            api_url: Some("  ".into()),
            ..AppSettings::default()
        };
        assert_eq!(AppSettings::resolve(Some(stored)).api_url, None);
    }
}

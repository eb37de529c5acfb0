use std::fmt;

use dioxus::logger::tracing::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError, check, decode, discard, flexible_id};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    #[serde(rename = "openrouter")]
    OpenRouter,
    Ollama,
    LmStudio,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenRouter, Provider::Ollama, Provider::LmStudio];

    pub fn key(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::Ollama => "ollama",
            Provider::LmStudio => "lm_studio",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Hosted providers need a key, self-hosted ones need a URL.
    pub fn needs_api_key(&self) -> bool {
        matches!(self, Provider::OpenRouter)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provider::OpenRouter => "OpenRouter",
            Provider::Ollama => "Ollama",
            Provider::LmStudio => "LM Studio",
        };
        f.write_str(label)
    }
}

/// A model configuration as stored in the backend registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    #[serde(alias = "id", deserialize_with = "flexible_id")]
    pub model_id: String,
    #[serde(alias = "name")]
    pub model_name: String,
    #[serde(default)]
    pub provider: Provider,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, alias = "knowledge_table")]
    pub knowledge_table_name: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Editable form of a [`Model`]; body of create and update calls.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelDraft {
    pub provider: Provider,
    pub model: String,
    pub model_name: String,
    pub system_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for ModelDraft {
    fn default() -> Self {
        Self {
            provider: Provider::OpenRouter,
            model: "deepseek/deepseek-chat-v3-0324:free".into(),
            model_name: "Deepseek Chat v3".into(),
            system_prompt: "You are a helpful assistant.".into(),
            api_key: None,
            base_url: None,
            knowledge_table_name: None,
            temperature: Some(0.7),
        }
    }
}

impl ModelDraft {
    pub fn from_model(m: &Model) -> Self {
        Self {
            provider: m.provider,
            model: m.model.clone(),
            model_name: m.model_name.clone(),
            system_prompt: m.system_prompt.clone().unwrap_or_default(),
            api_key: m.api_key.clone(),
            base_url: m.base_url.clone(),
            knowledge_table_name: m.knowledge_table_name.clone(),
            temperature: m.temperature,
        }
    }

    /// Client-side checks run before the draft is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_name.trim().is_empty() {
            return Err("Model name is required".into());
        }
        if self.model.trim().is_empty() {
            return Err("Model identifier is required".into());
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err("Temperature must be between 0 and 2".into());
        }
        Ok(())
    }

    /// Applies the draft on top of an existing record, keeping its id.
    pub fn into_model(self, model_id: String) -> Model {
        Model {
            model_id,
            model_name: self.model_name,
            provider: self.provider,
            model: self.model,
            system_prompt: Some(self.system_prompt).filter(|s| !s.is_empty()),
            base_url: self.base_url,
            api_key: self.api_key,
            knowledge_table_name: self.knowledge_table_name,
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelCreated {
    #[serde(default)]
    pub status: String,
    pub model_name: String,
    #[serde(deserialize_with = "flexible_id")]
    pub model_id: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decodes registry rows one by one; a malformed row is logged and skipped.
fn models_from_rows(rows: Vec<Value>) -> Vec<Model> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Model>(row) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("Skipping unreadable model entry: {e}");
                None
            }
        })
        .collect()
}

impl ApiClient {
    pub(super) async fn get_models(&self) -> Result<Vec<Model>, ApiError> {
        let res = self.http.get(self.url("/models")).send().await?;
        let rows: Vec<Value> = decode(check(res, "Could not load models").await?).await?;
        Ok(models_from_rows(rows))
    }

    pub(super) async fn post_model(&self, draft: &ModelDraft) -> Result<ModelCreated, ApiError> {
        let res = self
            .http
            .post(self.url("/model/create"))
            .json(draft)
            .send()
            .await?;
        let created: ModelCreated = decode(check(res, "Could not add model").await?).await?;
        if let Some(e) = created.error.clone().filter(|e| !e.is_empty()) {
            return Err(ApiError::Rejected(e));
        }
        Ok(created)
    }

    pub(super) async fn patch_model(
        &self,
        model_id: &str,
        draft: &ModelDraft,
    ) -> Result<Model, ApiError> {
        let res = self
            .http
            .patch(self.url_with_id("/model", model_id))
            .json(draft)
            .send()
            .await?;
        decode(check(res, "Could not update model").await?).await
    }

    pub(super) async fn remove_model(&self, model_id: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .delete(self.url_with_id("/model", model_id))
            .send()
            .await?;
        discard(check(res, "Could not delete model").await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_valid() {
        assert_eq!(ModelDraft::default().validate(), Ok(()));
    }

    #[test]
    fn draft_rejects_blank_name_and_out_of_range_temperature() {
        let mut d = ModelDraft { model_name: "  ".into(), ..Default::default() };
        assert!(d.validate().is_err());

        d.model_name = "Local llama".into();
        d.temperature = Some(2.5);
        assert_eq!(d.validate(), Err("Temperature must be between 0 and 2".into()));

        d.temperature = None;
        d.model = String::new();
        assert_eq!(d.validate(), Err("Model identifier is required".into()));
    }

    #[test]
    fn model_accepts_legacy_field_names() {
        let m: Model = serde_json::from_str(
            r#"{"id": 3, "name": "Qwen", "provider": "ollama", "knowledge_table": "docs"}"#,
        )
        .unwrap();
        assert_eq!(m.model_id, "3");
        assert_eq!(m.model_name, "Qwen");
        assert_eq!(m.provider, Provider::Ollama);
        assert_eq!(m.knowledge_table_name.as_deref(), Some("docs"));
    }

    #[test]
    fn provider_keys_round_trip_through_select_values() {
        for p in Provider::ALL {
            assert_eq!(Provider::from_key(p.key()), Some(p));
        }
        assert_eq!(Provider::from_key("bogus"), None);
    }

    #[test]
    fn unknown_provider_skips_only_that_row() {
        let rows = vec![
            serde_json::json!({"model_id": "a", "model_name": "Good", "provider": "ollama"}),
            serde_json::json!({"model_id": "b", "model_name": "Odd", "provider": "mystery"}),
        ];
        let models = models_from_rows(rows);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].model_id, "a");
    }
}

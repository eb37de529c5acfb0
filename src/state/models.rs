#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use crate::api::{ApiError, Model, ModelCreated, ModelDraft};

/// What the model editor is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFocus {
    New,
    Existing(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRegistry {
    pub models: Vec<Model>,
    pub focus: Option<ModelFocus>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

impl ModelRegistry {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Model>, ApiError>) {
        self.loading = false;
        match result {
            Ok(models) => self.models = models,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn fail(&mut self, e: &ApiError) {
        self.saving = false;
        self.error = Some(e.to_string());
    }

    pub fn open_new(&mut self) {
        self.focus = Some(ModelFocus::New);
        self.error = None;
    }

    pub fn open(&mut self, model_id: &str) {
        self.focus = Some(ModelFocus::Existing(model_id.to_string()));
        self.error = None;
    }

    pub fn close(&mut self) {
        self.focus = None;
    }

    pub fn get(&self, model_id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.model_id == model_id)
    }

    pub fn focused_model(&self) -> Option<&Model> {
        match &self.focus {
            Some(ModelFocus::Existing(id)) => self.get(id),
            _ => None,
        }
    }

    /// Validates a draft and marks the registry busy. On a validation
    /// failure the message is stored and `false` returned.
    pub fn begin_save(&mut self, draft: &ModelDraft) -> bool {
        if self.saving {
            return false;
        }
        if let Err(msg) = draft.validate() {
            self.error = Some(msg);
            return false;
        }
        self.error = None;
        self.saving = true;
        true
    }

    pub fn apply_created(&mut self, draft: ModelDraft, created: ModelCreated) {
        self.saving = false;
        let mut model = draft.into_model(created.model_id.clone());
        if !created.model_name.is_empty() {
            model.model_name = created.model_name;
        }
        self.models.push(model);
        self.focus = Some(ModelFocus::Existing(created.model_id));
    }

    pub fn apply_updated(&mut self, model: Model) {
        self.saving = false;
        match self.models.iter_mut().find(|m| m.model_id == model.model_id) {
            Some(existing) => *existing = model,
            None => self.models.push(model),
        }
    }

    /// Returns `true` when the removed model was open in the editor.
    pub fn remove(&mut self, model_id: &str) -> bool {
        self.models.retain(|m| m.model_id != model_id);
        if self.focus == Some(ModelFocus::Existing(model_id.to_string())) {
            self.focus = None;
            return true;
        }
        false
    }

    /// The preferred model if the registry still has it, else the first one.
    pub fn default_model_id(&self, preferred: Option<&str>) -> Option<String> {
        preferred
            .and_then(|id| self.get(id))
            .or_else(|| self.models.first())
            .map(|m| m.model_id.clone())
    }
}

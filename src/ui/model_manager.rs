use dioxus::{logger::tracing::{info, warn}, prelude::*};

use crate::{
    api::{Model, ModelDraft, Provider, SharedBackend},
    state::{ModelFocus, ModelRegistry},
    ui::box_select::{BoxSelect, SelectOption},
};

const FIELD_STYLE: &str = "
    width: 100%;
    padding: 0.5rem;
    border: 1px solid #ddd;
    border-radius: 3px;
    box-sizing: border-box;
";

#[component]
pub fn Models() -> Element {
    let backend = use_context::<Signal<SharedBackend>>();
    let mut registry = use_context::<Signal<ModelRegistry>>();

    let delete_model = move |model_id: String| async move {
        let be = backend.cloned();
        match be.delete_model(&model_id).await {
            Ok(()) => {
                info!("Deleted model {model_id}");
                registry.with_mut(|r| r.remove(&model_id));
            }
            Err(e) => {
                warn!("Failed to delete model {model_id}: {e}");
                registry.with_mut(|r| r.fail(&e));
            }
        }
    };

    let reg = registry.read();
    let models = reg.models.clone();
    let focus = reg.focus.clone();
    let loading = reg.loading;
    let error = reg.error.clone();
    let form_model = reg.focused_model().cloned();
    drop(reg);

    let form_key = match &focus {
        Some(ModelFocus::Existing(id)) => format!("edit-{id}"),
        _ => "new".to_string(),
    };

    rsx! {
        div { class: "page-body",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem;",
                h3 { style: "margin: 0;", "Models" }
                button {
                    class: "primary",
                    onclick: move |_| registry.with_mut(|r| r.open_new()),
                    "+ Add Model"
                }
            }
            hr { style: "margin-bottom: 1rem;" }

            if let Some(err) = error {
                div { class: "error-box",
                    div { class: "error-text", "{err}" }
                }
            }

            if focus.is_some() {
                ModelForm {
                    key: "{form_key}",
                    model: form_model,
                }
            }

            if loading && models.is_empty() {
                p { style: "color: #666;", "Loading..." }
            } else if models.is_empty() {
                p { style: "color: #666; font-style: italic;", "No models configured" }
            } else {
                for m in models {
                    ModelItem {
                        key: "{m.model_id}",
                        model: m,
                        on_delete: delete_model,
                    }
                }
            }
        }
    }
}

#[component]
fn ModelItem(model: Model, on_delete: Callback<String, ()>) -> Element {
    let mut registry = use_context::<Signal<ModelRegistry>>();
    let edit_id = model.model_id.clone();
    let delete_id = model.model_id.clone();
    let temperature = model
        .temperature
        .map(|t| format!("{t:.1}"))
        .unwrap_or_else(|| "default".into());

    rsx! {
        div { style: "
                border: 1px solid #ddd;
                border-radius: 4px;
                padding: 1rem;
                margin-bottom: 0.5rem;
                background: #f9f9f9;
            ",
            div { style: "display: flex; justify-content: space-between; align-items: flex-start;",
                div { style: "flex-grow: 1;",
                    div { style: "display: flex; align-items: center; gap: 0.5rem; margin-bottom: 0.25rem;",
                        div { style: "font-weight: bold;", "{model.model_name}" }
                        div { class: "badge", "{model.provider}" }
                    }
                    div { style: "font-family: monospace; font-size: 0.9em; color: #666; margin-bottom: 0.25rem;",
                        "{model.model}"
                    }
                    div { style: "font-size: 0.8em; color: #888;", "Temperature: {temperature}" }
                    if let Some(table) = &model.knowledge_table_name {
                        div { style: "font-size: 0.8em; color: #888;", "Knowledge table: {table}" }
                    }
                }
                div { style: "display: flex; gap: 0.5rem;",
                    button {
                        class: "small success",
                        onclick: move |_| registry.with_mut(|r| r.open(&edit_id)),
                        "Edit"
                    }
                    button {
                        class: "small danger",
                        onclick: move |_| on_delete(delete_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Create form when `model` is `None`, edit form otherwise.
#[component]
fn ModelForm(model: Option<Model>) -> Element {
    let backend = use_context::<Signal<SharedBackend>>();
    let mut registry = use_context::<Signal<ModelRegistry>>();

    let editing_id = model.as_ref().map(|m| m.model_id.clone());
    let mut draft = use_signal(|| model.as_ref().map(ModelDraft::from_model).unwrap_or_default());
    let mut temperature_text = use_signal(|| {
        draft
            .peek()
            .temperature
            .map(|t| t.to_string())
            .unwrap_or_default()
    });

    let handle_save = move |_| {
        let editing_id = editing_id.clone();
        async move {
            let text = temperature_text.cloned();
            let text = text.trim();
            let temperature = if text.is_empty() {
                None
            } else {
                match text.parse::<f32>() {
                    Ok(t) => Some(t),
                    Err(_) => {
                        registry.with_mut(|r| {
                            r.error = Some("Temperature must be a number".into())
                        });
                        return;
                    }
                }
            };
            draft.with_mut(|d| d.temperature = temperature);
            let d = draft.cloned();
            if !registry.with_mut(|r| r.begin_save(&d)) {
                return;
            }

            let be = backend.cloned();
            match editing_id {
                Some(id) => match be.update_model(&id, &d).await {
                    Ok(updated) => {
                        info!("Updated model {id}");
                        registry.with_mut(|r| {
                            r.apply_updated(updated);
                            r.close();
                        });
                    }
                    Err(e) => {
                        warn!("Failed to update model {id}: {e}");
                        registry.with_mut(|r| r.fail(&e));
                    }
                },
                None => match be.create_model(&d).await {
                    Ok(created) => {
                        info!("Created model {}", created.model_id);
                        registry.with_mut(|r| {
                            r.apply_created(d, created);
                            r.close();
                        });
                    }
                    Err(e) => {
                        warn!("Failed to create model: {e}");
                        registry.with_mut(|r| r.fail(&e));
                    }
                },
            }
        }
    };

    let provider_options: Vec<SelectOption> = Provider::ALL
        .iter()
        .map(|p| SelectOption::new(p.key(), p.to_string()))
        .collect();

    let d = draft.read();
    let provider = d.provider;
    let model_name = d.model_name.clone();
    let model_ident = d.model.clone();
    let system_prompt = d.system_prompt.clone();
    let api_key = d.api_key.clone().unwrap_or_default();
    let base_url = d.base_url.clone().unwrap_or_default();
    let knowledge_table = d.knowledge_table_name.clone().unwrap_or_default();
    drop(d);
    let saving = registry.read().saving;
    let title = if model.is_some() { "Edit Model" } else { "New Model" };

    rsx! {
        div { style: "
                border: 1px solid #007bff;
                border-radius: 4px;
                padding: 1rem;
                margin-bottom: 1rem;
                background: #f8f9fa;
            ",
            h4 { style: "margin: 0 0 1rem 0;", "{title}" }

            FormField { label: "Display name",
                input {
                    style: FIELD_STYLE,
                    value: "{model_name}",
                    placeholder: "e.g., Deepseek Chat v3",
                    oninput: move |e| draft.with_mut(|d| d.model_name = e.value()),
                }
            }

            FormField { label: "Provider",
                BoxSelect {
                    value: Some(provider.key().to_string()),
                    options: provider_options,
                    allow_none: false,
                    on_select: move |key: Option<String>| {
                        if let Some(p) = key.as_deref().and_then(Provider::from_key) {
                            draft.with_mut(|d| d.provider = p);
                        }
                    },
                }
            }

            FormField { label: "Model identifier",
                input {
                    style: FIELD_STYLE,
                    value: "{model_ident}",
                    placeholder: "e.g., deepseek/deepseek-chat-v3-0324:free",
                    oninput: move |e| draft.with_mut(|d| d.model = e.value()),
                }
            }

            if provider.needs_api_key() {
                FormField { label: "API key",
                    input {
                        style: FIELD_STYLE,
                        r#type: "password",
                        value: "{api_key}",
                        oninput: move |e| draft.with_mut(|d| d.api_key = non_empty(e.value())),
                    }
                }
            } else {
                FormField { label: "Base URL",
                    input {
                        style: FIELD_STYLE,
                        value: "{base_url}",
                        placeholder: "e.g., http://localhost:11434",
                        oninput: move |e| draft.with_mut(|d| d.base_url = non_empty(e.value())),
                    }
                }
            }

            FormField { label: "System prompt",
                textarea {
                    style: "{FIELD_STYLE} min-height: 5rem;",
                    value: "{system_prompt}",
                    oninput: move |e| draft.with_mut(|d| d.system_prompt = e.value()),
                }
            }

            FormField { label: "Knowledge table",
                input {
                    style: FIELD_STYLE,
                    value: "{knowledge_table}",
                    placeholder: "Leave empty to answer without retrieval",
                    oninput: move |e| {
                        draft.with_mut(|d| d.knowledge_table_name = non_empty(e.value()))
                    },
                }
            }

            FormField { label: "Temperature (0 to 2)",
                input {
                    style: FIELD_STYLE,
                    r#type: "number",
                    step: "0.1",
                    min: "0",
                    max: "2",
                    value: "{temperature_text}",
                    oninput: move |e| temperature_text.set(e.value()),
                }
            }

            div { style: "display: flex; gap: 0.5rem; justify-content: flex-end;",
                button {
                    class: "secondary",
                    onclick: move |_| registry.with_mut(|r| r.close()),
                    "Cancel"
                }
                button {
                    class: "primary",
                    disabled: saving,
                    onclick: handle_save,
                    if saving { "Saving..." } else { "Save" }
                }
            }
        }
    }
}

#[component]
fn FormField(label: String, children: Element) -> Element {
    rsx! {
        div { style: "margin-bottom: 1rem;",
            label { style: "display: block; margin-bottom: 0.25rem; font-weight: bold;",
                "{label}"
            }
            {children}
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

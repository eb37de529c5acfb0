use dioxus::{logger::tracing::info, prelude::*};

use crate::{
    AppSettings,
    api::{ApiClient, SharedBackend},
    state::ModelRegistry,
    storage,
    ui::box_select::{BoxSelect, SelectOption},
};

#[allow(non_snake_case)]
#[component]
pub fn Settings() -> Element {
    let mut settings = use_context::<Signal<AppSettings>>();
    let mut backend = use_context::<Signal<SharedBackend>>();
    let registry = use_context::<Signal<ModelRegistry>>();

    let mut api_url = use_signal(|| settings.peek().api_url.clone().unwrap_or_default());
    let mut default_model = use_signal(|| settings.peek().default_model_id.clone());
    let mut status = use_signal(|| None::<String>);

    let save_settings = move |_| async move {
        let current = settings.cloned();
        let previous_url = current.effective_api_url();
        let updated = AppSettings {
            default_model_id: default_model.cloned(),
            ..current
        }
        .with_api_url(&api_url.read());
        let url = updated.effective_api_url();
        api_url.set(updated.api_url.clone().unwrap_or_default());
        storage::persist(&updated).await;
        settings.set(updated);
        if url != previous_url {
            info!("Switching backend to {url}");
            backend.set(ApiClient::new(url).shared());
        }
        status.set(Some("Settings saved".into()));
    };

    let effective_url = settings.read().effective_api_url();
    let model_options: Vec<SelectOption> = registry
        .read()
        .models
        .iter()
        .map(|m| SelectOption::new(m.model_id.clone(), m.model_name.clone()))
        .collect();

    rsx! {
        div { class: "page-body",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem;",
                h3 { style: "margin: 0;", "Settings" }
            }

            hr { style: "margin-bottom: 1rem;" }

            div { style: "margin-bottom: 1rem;",
                label { style: "display: block; margin-bottom: 0.25rem; font-weight: bold;",
                    "Backend URL"
                }
                input {
                    style: "
                        width: 100%;
                        padding: 0.5rem;
                        border: 1px solid #ddd;
                        border-radius: 3px;
                        box-sizing: border-box;
                    ",
                    value: api_url(),
                    placeholder: "{effective_url}",
                    oninput: move |e| {
                        api_url.set(e.value());
                        status.set(None);
                    },
                }
            }

            div { style: "margin-bottom: 1rem;",
                label { style: "display: block; margin-bottom: 0.25rem; font-weight: bold;",
                    "Default model"
                }
                BoxSelect {
                    value: default_model(),
                    options: model_options,
                    on_select: move |id: Option<String>| {
                        default_model.set(id);
                        status.set(None);
                    },
                }
            }

            div { style: "display: flex; gap: 1rem; align-items: center;",
                button { class: "primary", onclick: save_settings, "Save" }
                if let Some(msg) = status() {
                    span { style: "color: #28a745;", "{msg}" }
                }
            }
        }
    }
}

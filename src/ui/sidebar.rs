use dioxus::prelude::*;

use crate::{
    Route,
    state::{FileLibrary, ModelRegistry, Navigation, Section},
    ui::chat_list::ChatList,
};

/// Left rail: section switcher plus the list belonging to the active section.
#[component]
pub fn Sidebar() -> Element {
    let nav = navigator();
    let route = use_route::<Route>();
    let navigation = use_context::<Signal<Navigation>>();
    let active = route.section();

    let open = navigation.read().sidebar_open;
    let class = if open { "sidebar open" } else { "sidebar closed" };

    rsx! {
        aside { class: "{class}",
            div { class: "logo", "Hyperion" }
            div { class: "sections",
                for section in Section::NAV {
                    {
                        let label = section.label();
                        let icon = section.icon();
                        rsx! {
                            button {
                                key: "{label}",
                                class: if section == active { "section-button active" } else { "section-button" },
                                title: label,
                                onclick: move |_| {
                                    nav.push(Route::for_section(section));
                                },
                                span { "{icon}" }
                                span { "{label}" }
                            }
                        }
                    }
                }
            }
            hr {}
            div { class: "sidebar-content",
                h3 { style: "margin: 0 0 0.5rem 0;", {active.heading()} }
                {
                    match active {
                        Section::Chats => rsx! { ChatList {} },
                        Section::Models => rsx! { ModelShortList {} },
                        Section::Files => rsx! { FileShortList {} },
                        Section::Settings => rsx! {
                            p { style: "color: #666;", "Configure the backend address and default model." }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn ModelShortList() -> Element {
    let mut registry = use_context::<Signal<ModelRegistry>>();
    let reg = registry.read();
    let items: Vec<(String, String, bool)> = reg
        .models
        .iter()
        .map(|m| {
            let focused = reg.focused_model().map(|f| f.model_id == m.model_id).unwrap_or(false);
            (m.model_id.clone(), m.model_name.clone(), focused)
        })
        .collect();
    drop(reg);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 0.25rem;",
            button {
                class: "new-chat-button",
                onclick: move |_| registry.with_mut(|r| r.open_new()),
                "+ Add model"
            }
            if items.is_empty() {
                div { style: "color: #666; padding: 1rem;", "No models configured" }
            }
            for (id, name, focused) in items {
                div {
                    key: "{id}",
                    class: if focused { "list-item selected" } else { "list-item" },
                    onclick: move |_| registry.with_mut(|r| r.open(&id)),
                    "{name}"
                }
            }
        }
    }
}

#[component]
fn FileShortList() -> Element {
    let mut library = use_context::<Signal<FileLibrary>>();
    let lib = library.read();
    let items: Vec<(String, String, bool)> = lib
        .files
        .iter()
        .map(|f| {
            let selected = lib.selected.as_deref() == Some(f.file_id.as_str());
            (f.file_id.clone(), f.filename.clone(), selected)
        })
        .collect();
    drop(lib);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 0.25rem;",
            if items.is_empty() {
                div { style: "color: #666; padding: 1rem;", "No files uploaded" }
            }
            for (id, name, selected) in items {
                div {
                    key: "{id}",
                    class: if selected { "list-item selected" } else { "list-item" },
                    onclick: move |_| library.with_mut(|l| l.select(Some(id.clone()))),
                    "{name}"
                }
            }
        }
    }
}

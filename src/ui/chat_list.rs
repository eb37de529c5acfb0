use dioxus::{logger::tracing::warn, prelude::*};

use crate::{
    Route,
    api::{ChatSummary, SharedBackend},
    state::ChatDirectory,
};

#[component]
pub fn ChatList() -> Element {
    let mut query = use_signal(String::new);
    let directory = use_context::<Signal<ChatDirectory>>();

    let dir = directory.read();
    let chats: Vec<ChatSummary> = dir.filtered(&query.read()).into_iter().cloned().collect();
    let selected = dir.selected.clone();
    let loading = dir.loading;
    let error = dir.error.clone();
    let total = dir.chats.len();
    drop(dir);

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 0.5rem;",
            Link {
                class: "new-chat-button",
                to: Route::NewChat {},
                "+ New chat"
            }
            input {
                class: "search",
                placeholder: "Search chats",
                value: "{query}",
                oninput: move |e: Event<FormData>| query.set(e.value()),
            }
            if let Some(err) = error {
                div { class: "error-text", "{err}" }
            }
            if loading && total == 0 {
                div { style: "padding: 1rem; color: #666;", "Loading..." }
            } else if chats.is_empty() {
                div { style: "text-align: center; color: #666; padding: 2rem;",
                    if total == 0 {
                        "No chats yet"
                    } else {
                        "No matching chats"
                    }
                }
            } else {
                for c in chats {
                    ChatListItem {
                        key: "{c.chat_id}",
                        selected: selected.as_deref() == Some(c.chat_id.as_str()),
                        chat: c,
                    }
                }
            }
        }
    }
}

#[component]
fn ChatListItem(chat: ChatSummary, selected: bool) -> Element {
    let nav = navigator();
    let backend = use_context::<Signal<SharedBackend>>();
    let mut directory = use_context::<Signal<ChatDirectory>>();
    let mut editing = use_signal(|| None::<String>);

    let id = chat.chat_id.clone();
    let rename = move |_| {
        let id = id.clone();
        async move {
            let Some(label) = editing() else { return };
            let label = label.trim().to_string();
            editing.set(None);
            if label.is_empty() {
                return;
            }
            let be = backend.cloned();
            match be.rename_chat(&id, &label).await {
                Ok(summary) => {
                    let label = if summary.label.is_empty() { label } else { summary.label };
                    directory.with_mut(|d| d.rename(&id, &label));
                }
                Err(e) => {
                    warn!("Failed to rename chat {id}: {e}");
                    directory.with_mut(|d| d.fail(&e));
                }
            }
        }
    };

    let id = chat.chat_id.clone();
    let delete = move |e: Event<MouseData>| {
        e.stop_propagation();
        let id = id.clone();
        async move {
            let be = backend.cloned();
            match be.delete_chat(&id).await {
                Ok(()) => {
                    if directory.with_mut(|d| d.remove(&id)) {
                        nav.push(Route::NewChat {});
                    }
                }
                Err(e) => {
                    warn!("Failed to delete chat {id}: {e}");
                    directory.with_mut(|d| d.fail(&e));
                }
            }
        }
    };

    let class = if selected { "list-item selected" } else { "list-item" };

    if let Some(draft) = editing() {
        return rsx! {
            div { class: "{class}",
                input {
                    style: "flex: 1; min-width: 0;",
                    value: "{draft}",
                    autofocus: true,
                    oninput: move |e: Event<FormData>| editing.set(Some(e.value())),
                    onkeydown: move |e: Event<KeyboardData>| {
                        if e.key() == Key::Escape {
                            editing.set(None);
                        }
                    },
                }
                button { class: "small", onclick: rename, "Save" }
                button {
                    class: "small secondary",
                    onclick: move |_| editing.set(None),
                    "Cancel"
                }
            }
        };
    }

    let label = chat.label.clone();
    rsx! {
        div { class: "{class}",
            Link {
                style: "flex: 1; min-width: 0; text-decoration: none; color: inherit; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                to: Route::ChatEl {
                    id: chat.chat_id.clone(),
                },
                "{chat.label}"
            }
            button {
                class: "icon-button small",
                title: "Rename",
                onclick: move |e: Event<MouseData>| {
                    e.stop_propagation();
                    editing.set(Some(label.clone()));
                },
                "✎"
            }
            button {
                class: "icon-button small danger",
                title: "Delete",
                onclick: delete,
                "×"
            }
        }
    }
}

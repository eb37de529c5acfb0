use dioxus::{logger::tracing::{info, warn}, prelude::*};

use crate::{
    api::{FileRecord, FileUpdate, FileUpload, SharedBackend},
    state::{FileLibrary, content_type_for, display_name, format_size},
};

#[component]
pub fn Files() -> Element {
    let backend = use_context::<Signal<SharedBackend>>();
    let mut library = use_context::<Signal<FileLibrary>>();

    let upload = move |e: Event<FormData>| async move {
        for file in e.files() {
            if !library.with_mut(|l| l.begin_upload()) {
                return;
            }
            let filename = display_name(&file.name()).to_string();
            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(err) => {
                    warn!("Could not read {filename}: {err:?}");
                    library.with_mut(|l| {
                        l.uploading = false;
                        l.error = Some(format!("Could not read {filename}"));
                    });
                    continue;
                }
            };
            let content_type = file
                .content_type()
                .filter(|ct| !ct.is_empty())
                .or_else(|| content_type_for(&filename).map(str::to_string));
            let req = FileUpload {
                filename,
                content_type,
                bytes,
            };
            let be = backend.cloned();
            let result = be.upload_file(req).await;
            match &result {
                Ok(f) => info!("Uploaded {} as {}", f.filename, f.file_id),
                Err(e) => warn!("Upload failed: {e}"),
            }
            library.with_mut(|l| l.finish_upload(result));
        }
    };

    let delete_file = move |file_id: String| async move {
        let be = backend.cloned();
        match be.delete_file(&file_id).await {
            Ok(()) => {
                info!("Deleted file {file_id}");
                library.with_mut(|l| l.remove(&file_id));
            }
            Err(e) => {
                warn!("Failed to delete file {file_id}: {e}");
                library.with_mut(|l| l.fail(&e));
            }
        }
    };

    let lib = library.read();
    let files = lib.files.clone();
    let selected = lib.selected().cloned();
    let loading = lib.loading;
    let uploading = lib.uploading;
    let error = lib.error.clone();
    drop(lib);

    rsx! {
        div { class: "page-body",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem;",
                h3 { style: "margin: 0;", "Files" }
                label { class: if uploading { "primary upload disabled" } else { "primary upload" },
                    if uploading { "Uploading..." } else { "+ Upload" }
                    input {
                        r#type: "file",
                        style: "display: none;",
                        multiple: true,
                        accept: ".pdf,.txt,.md,.csv,.json,.html,.doc,.docx",
                        disabled: uploading,
                        onchange: upload,
                    }
                }
            }
            hr { style: "margin-bottom: 1rem;" }

            if let Some(err) = error {
                div { class: "error-box",
                    div { class: "error-text", "{err}" }
                    button {
                        class: "secondary",
                        onclick: move |_| library.with_mut(|l| l.error = None),
                        "Dismiss"
                    }
                }
            }

            div { style: "display: flex; gap: 1rem; align-items: flex-start;",
                div { style: "flex: 1; min-width: 0;",
                    if loading && files.is_empty() {
                        p { style: "color: #666;", "Loading..." }
                    } else if files.is_empty() {
                        p { style: "color: #666; font-style: italic;", "No files uploaded" }
                    } else {
                        for f in files {
                            FileItem {
                                key: "{f.file_id}",
                                selected: selected.as_ref().map(|s| s.file_id == f.file_id).unwrap_or(false),
                                file: f,
                                on_delete: delete_file,
                            }
                        }
                    }
                }
                if let Some(file) = selected {
                    FileDetails { key: "{file.file_id}", file }
                }
            }
        }
    }
}

#[component]
fn FileItem(file: FileRecord, selected: bool, on_delete: Callback<String, ()>) -> Element {
    let backend = use_context::<Signal<SharedBackend>>();
    let mut library = use_context::<Signal<FileLibrary>>();
    let mut editing = use_signal(|| None::<String>);

    let id = file.file_id.clone();
    let rename = move |_| {
        let id = id.clone();
        async move {
            let Some(name) = editing() else { return };
            let name = name.trim().to_string();
            editing.set(None);
            if name.is_empty() {
                return;
            }
            let be = backend.cloned();
            match be.update_file(&id, &FileUpdate { filename: name }).await {
                Ok(record) => library.with_mut(|l| l.apply_updated(record)),
                Err(e) => {
                    warn!("Failed to rename file {id}: {e}");
                    library.with_mut(|l| l.fail(&e));
                }
            }
        }
    };

    let class = if selected { "list-item selected" } else { "list-item" };
    let size = file.size.map(format_size).unwrap_or_default();

    if let Some(draft) = editing() {
        return rsx! {
            div { class: "{class}",
                input {
                    style: "flex: 1; min-width: 0;",
                    value: "{draft}",
                    oninput: move |e: Event<FormData>| editing.set(Some(e.value())),
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

    let select_id = file.file_id.clone();
    let delete_id = file.file_id.clone();
    let name = file.filename.clone();
    rsx! {
        div {
            class: "{class}",
            onclick: move |_| library.with_mut(|l| l.select(Some(select_id.clone()))),
            span { style: "flex: 1; min-width: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                "{file.filename}"
            }
            span { style: "font-size: 0.8em; color: #888;", "{size}" }
            button {
                class: "icon-button small",
                title: "Rename",
                onclick: move |e: Event<MouseData>| {
                    e.stop_propagation();
                    editing.set(Some(name.clone()));
                },
                "✎"
            }
            button {
                class: "icon-button small danger",
                title: "Delete",
                onclick: move |e: Event<MouseData>| {
                    e.stop_propagation();
                    on_delete(delete_id.clone());
                },
                "×"
            }
        }
    }
}

#[component]
fn FileDetails(file: FileRecord) -> Element {
    let mut library = use_context::<Signal<FileLibrary>>();
    let unknown = || "unknown".to_string();
    let size = file.size.map(format_size).unwrap_or_else(unknown);
    let chunks = file.num_chunks.map(|n| n.to_string()).unwrap_or_else(unknown);
    let uploaded = file.upload_time.clone().unwrap_or_else(unknown);
    let content_type = file.content_type.clone().unwrap_or_else(unknown);
    let method = file.chunking_method.clone().unwrap_or_else(unknown);

    rsx! {
        div { class: "details",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h4 { style: "margin: 0;", "{file.filename}" }
                button {
                    class: "icon-button",
                    title: "Close",
                    onclick: move |_| library.with_mut(|l| l.select(None)),
                    "×"
                }
            }
            dl {
                dt { "Size" }
                dd { "{size}" }
                dt { "Chunks" }
                dd { "{chunks}" }
                dt { "Uploaded" }
                dd { "{uploaded}" }
                dt { "Type" }
                dd { "{content_type}" }
                dt { "Chunking method" }
                dd { "{method}" }
            }
        }
    }
}

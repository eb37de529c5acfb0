use dioxus::{logger::tracing::{info, warn}, prelude::*};

pub mod api;
pub mod app_settings;
mod md2rsx;
pub mod state;
pub mod storage;
mod ui;

pub use app_settings::AppSettings;

use api::{ApiClient, SharedBackend};
use state::{ChatDirectory, FileLibrary, ModelRegistry, Navigation, Section};
use ui::chat::{ChatEl, NewChat};
use ui::file_manager::Files;
use ui::model_manager::Models;
use ui::settings::Settings;
use ui::sidebar::Sidebar;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let init = use_resource(|| async { storage::load_or_default().await });
    let loaded = init.read().clone();
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        if let Some(settings) = loaded {
            Shell { settings }
        } else {
            div { class: "splash", "Loading..." }
        }
    }
}

/// Owns the shared collections and hands them to every page through context.
#[component]
fn Shell(settings: AppSettings) -> Element {
    let sidebar_open = settings.sidebar_open;
    let api_url = settings.effective_api_url();
    use_context_provider(|| Signal::new(settings));
    let backend: Signal<SharedBackend> =
        use_context_provider(|| Signal::new(ApiClient::new(api_url).shared()));
    let mut chats = use_context_provider(|| Signal::new(ChatDirectory::default()));
    let mut models = use_context_provider(|| Signal::new(ModelRegistry::default()));
    let mut files = use_context_provider(|| Signal::new(FileLibrary::default()));
    use_context_provider(|| Signal::new(Navigation { sidebar_open }));

    // Fetch on mount, and again whenever settings swap the backend.
    let _ = use_resource(move || async move {
        let be = backend();
        chats.with_mut(|c| c.begin_fetch());
        models.with_mut(|m| m.begin_fetch());
        files.with_mut(|f| f.begin_fetch());
        let (c, m, f) = futures::join!(be.list_chats(), be.list_models(), be.list_files());
        if let Err(e) = &c {
            warn!("Could not load chats: {e}");
        }
        chats.with_mut(|s| s.finish_fetch(c));
        models.with_mut(|s| s.finish_fetch(m));
        files.with_mut(|s| s.finish_fetch(f));
        info!("Initial data loaded");
    });

    rsx! { Router::<Route> {} }
}

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    NewChat {},
    #[route("/chat/:id")]
    ChatEl { id: String },
    #[route("/models")]
    Models {},
    #[route("/files")]
    Files {},
    #[route("/settings")]
    Settings {},
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

impl Route {
    pub fn section(&self) -> Section {
        match self {
            Route::Models {} => Section::Models,
            Route::Files {} => Section::Files,
            Route::Settings {} => Section::Settings,
            _ => Section::Chats,
        }
    }

    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Chats => Route::NewChat {},
            Section::Models => Route::Models {},
            Section::Files => Route::Files {},
            Section::Settings => Route::Settings {},
        }
    }
}

/// Sidebar, top bar and the routed page.
#[component]
fn Layout() -> Element {
    let mut navigation = use_context::<Signal<Navigation>>();
    let mut settings = use_context::<Signal<AppSettings>>();
    let nav = navigator();
    let open = navigation.read().sidebar_open;

    let toggle = move |_| async move {
        navigation.with_mut(|n| n.toggle_sidebar());
        let open = navigation.read().sidebar_open;
        settings.with_mut(|s| s.sidebar_open = open);
        storage::persist(&settings.cloned()).await;
    };

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "main",
                div { class: "top-bar",
                    button {
                        class: "icon-button",
                        title: if open { "Hide menu" } else { "Show menu" },
                        onclick: toggle,
                        if open { "‹" } else { "☰" }
                    }
                    div { style: "flex-grow: 1;" }
                    button {
                        class: "icon-button",
                        title: "Settings",
                        onclick: move |_| {
                            nav.push(Route::Settings {});
                        },
                        "⚙"
                    }
                }
                div { class: "page", Outlet::<Route> {} }
            }
        }
    }
}

#[component]
fn PageNotFound(segments: Vec<String>) -> Element {
    rsx! {
        div { class: "page-body",
            "Could not find the page you are looking for."
            Link { to: Route::NewChat {}, "Go to chats" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_maps_to_a_route_and_back() {
        for s in [Section::Chats, Section::Models, Section::Files, Section::Settings] {
            assert_eq!(Route::for_section(s).section(), s);
        }
        assert_eq!(Route::ChatEl { id: "7".into() }.section(), Section::Chats);
    }
}

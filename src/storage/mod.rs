use async_trait::async_trait;

use crate::AppSettings;

#[cfg(target_arch = "wasm32")]
mod browser_storage;
#[cfg(not(target_arch = "wasm32"))]
mod file_storage;

#[cfg(not(target_arch = "wasm32"))]
pub type AppStorage = file_storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub type AppStorage = browser_storage::IdbStorage;

#[async_trait(?Send)]
pub trait Storage {
    async fn save_settings(&self, settings: &AppSettings) -> anyhow::Result<()>;
    async fn load_settings(&self) -> anyhow::Result<Option<AppSettings>>;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn get_storage() -> anyhow::Result<AppStorage> {
    use std::path::PathBuf;
    use directories_next::ProjectDirs;

    let base = if let Some(proj_dirs) = ProjectDirs::from("com", "Hyperion", "hyperion") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        PathBuf::from(".")
    };
    let storage = AppStorage::new(base);
    Ok(storage)
}

#[cfg(target_arch = "wasm32")]
pub async fn get_storage() -> anyhow::Result<AppStorage> {
    let storage = AppStorage::new().await?;
    Ok(storage)
}

/// Loads settings, degrading to defaults when storage is unavailable.
pub async fn load_or_default() -> AppSettings {
    use dioxus::logger::tracing::warn;

    let stored = match get_storage().await {
        Ok(stg) => stg.load_settings().await.unwrap_or_else(|e| {
            warn!("Could not read settings: {e:?}");
            None
        }),
        Err(e) => {
            warn!("Could not get storage: {e:?}");
            None
        }
    };
    AppSettings::resolve(stored)
}

/// Saves settings, logging instead of failing when storage is unavailable.
pub async fn persist(settings: &AppSettings) {
    use dioxus::logger::tracing::warn;

    match get_storage().await {
        Ok(stg) => {
            if let Err(e) = stg.save_settings(settings).await {
                warn!("Could not save settings: {e:?}");
            }
        }
        Err(e) => warn!("Could not get storage: {e:?}"),
    }
}

use std::path::PathBuf;
use tokio::fs;
use anyhow::Result;

use crate::AppSettings;

pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn settings_path(&self) -> PathBuf {
        self.base.join("settings.json")
    }
}

#[async_trait::async_trait(?Send)]
impl super::Storage for FileStorage {
    async fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        fs::create_dir_all(&self.base).await?;
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.settings_path(), json).await?;
        Ok(())
    }

    async fn load_settings(&self) -> Result<Option<AppSettings>> {
        match fs::read_to_string(self.settings_path()).await {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hyperion-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_means_no_settings() {
        let stg = FileStorage::new(scratch_dir("missing"));
        assert!(stg.load_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn settings_survive_a_save() {
        let dir = scratch_dir("save");
        let stg = FileStorage::new(&dir);
        let settings = AppSettings {
            id: Some(1),
            api_url: Some("http://rag.internal:8000".into()),
            default_model_id: Some("m-7".into()),
            sidebar_open: false,
        };
        stg.save_settings(&settings).await.unwrap();
        assert_eq!(stg.load_settings().await.unwrap(), Some(settings));
        let _ = std::fs::remove_dir_all(dir);
    }
}

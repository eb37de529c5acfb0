use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, check, decode, discard, flexible_id};

/// A document known to the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    #[serde(alias = "id", deserialize_with = "flexible_id")]
    pub file_id: String,
    #[serde(alias = "name")]
    pub filename: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub num_chunks: Option<u32>,
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub chunking_method: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileUploaded {
    #[serde(deserialize_with = "flexible_id")]
    pub file_id: String,
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
}

impl From<FileUploaded> for FileRecord {
    fn from(u: FileUploaded) -> Self {
        FileRecord {
            file_id: u.file_id,
            filename: u.filename,
            size: Some(u.size),
            num_chunks: None,
            upload_time: None,
            content_type: Some(u.content_type).filter(|c| !c.is_empty()),
            chunking_method: None,
        }
    }
}

/// Body of `PUT /files/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileUpdate {
    pub filename: String,
}

/// A file picked by the user, read fully into memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub(super) async fn get_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        let res = self.http.get(self.url("/files")).send().await?;
        decode(check(res, "Could not load files").await?).await
    }

    pub(super) async fn post_upload(&self, upload: FileUpload) -> Result<FileUploaded, ApiError> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.filename);
        if let Some(ct) = upload.content_type.as_deref() {
            part = part.mime_str(ct)?;
        }
        let form = Form::new().part("file", part);
        let res = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(check(res, "Could not upload file").await?).await
    }

    pub(super) async fn remove_file(&self, file_id: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .delete(self.url_with_id("/files", file_id))
            .send()
            .await?;
        discard(check(res, "Could not delete file").await?).await
    }

    pub(super) async fn put_file(
        &self,
        file_id: &str,
        update: &FileUpdate,
    ) -> Result<FileRecord, ApiError> {
        let res = self
            .http
            .put(self.url_with_id("/files", file_id))
            .json(update)
            .send()
            .await?;
        decode(check(res, "Could not update file").await?).await
    }
}

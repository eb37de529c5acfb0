#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use crate::api::{ApiError, FileRecord, FileUploaded};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileLibrary {
    pub files: Vec<FileRecord>,
    pub selected: Option<String>,
    pub loading: bool,
    pub uploading: bool,
    pub error: Option<String>,
}

impl FileLibrary {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<FileRecord>, ApiError>) {
        self.loading = false;
        match result {
            Ok(files) => self.files = files,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn fail(&mut self, e: &ApiError) {
        self.error = Some(e.to_string());
    }

    pub fn select(&mut self, file_id: Option<String>) {
        self.selected = file_id;
    }

    pub fn selected(&self) -> Option<&FileRecord> {
        let id = self.selected.as_deref()?;
        self.files.iter().find(|f| f.file_id == id)
    }

    /// Returns `false` while another upload is still running.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        self.error = None;
        true
    }

    /// Adds the uploaded file and selects it. Returns its id on success.
    pub fn finish_upload(&mut self, result: Result<FileUploaded, ApiError>) -> Option<String> {
        self.uploading = false;
        match result {
            Ok(uploaded) => {
                let record = FileRecord::from(uploaded);
                let id = record.file_id.clone();
                self.files.retain(|f| f.file_id != id);
                self.files.push(record);
                self.selected = Some(id.clone());
                Some(id)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Merges a server record, keeping metadata the update response omits.
    pub fn apply_updated(&mut self, record: FileRecord) {
        match self.files.iter_mut().find(|f| f.file_id == record.file_id) {
            Some(existing) => {
                existing.filename = record.filename;
                existing.size = record.size.or(existing.size);
                existing.num_chunks = record.num_chunks.or(existing.num_chunks);
                existing.upload_time = record.upload_time.or(existing.upload_time.take());
                existing.content_type = record.content_type.or(existing.content_type.take());
                existing.chunking_method =
                    record.chunking_method.or(existing.chunking_method.take());
            }
            None => self.files.push(record),
        }
    }

    /// Returns `true` when the removed file was selected.
    pub fn remove(&mut self, file_id: &str) -> bool {
        self.files.retain(|f| f.file_id != file_id);
        if self.selected.as_deref() == Some(file_id) {
            self.selected = None;
            return true;
        }
        false
    }
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Last path component; desktop pickers may hand back a full path.
pub fn display_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// MIME type guessed from the extension, for the multipart part header.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        _ => return None,
    };
    Some(mime)
}

use anyhow::Result;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

#[derive(Clone)]
pub struct FileService {
    upload_path: String,
}

impl FileService {
    pub fn new(upload_path: String) -> Self {
        Self { upload_path }
    }

    /// Persist an uploaded file under a fresh UUID name, keeping the original
    /// extension so the OCR engine can sniff the format.
    pub async fn save_file(&self, filename: &str, data: &[u8]) -> Result<String> {
        let file_id = Uuid::new_v4();
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let saved_filename = if extension.is_empty() {
            file_id.to_string()
        } else {
            format!("{}.{}", file_id, extension)
        };

        let file_path = Path::new(&self.upload_path).join(&saved_filename);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&file_path, data).await?;

        Ok(file_path.to_string_lossy().to_string())
    }

    /// Remove a previously saved scratch file.
    pub async fn delete_file(&self, file_path: &str) -> Result<()> {
        fs::remove_file(file_path).await?;
        Ok(())
    }

    pub fn is_allowed_file_type(&self, filename: &str, allowed_types: &[String]) -> bool {
        if let Some(extension) = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            allowed_types.contains(&extension.to_lowercase())
        } else {
            false
        }
    }
}

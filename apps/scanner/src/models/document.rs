use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque name of a partition in the collection (a date bucket like `2024-05-01`).
/// The collection root is represented by `None` wherever a folder is optional.
pub type Folder = String;

/// A resume stored in the collection, as listed by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Unique identifier within the collection, e.g. `2024-05-01/jane_doe.pdf`.
    pub storage_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A local file handed to the session for upload.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, keeping only its file name for the upload.
    pub async fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, bytes))
    }

    /// True when nothing was actually supplied.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_optional_fields_default() {
        let doc: Document =
            serde_json::from_str(r#"{"name": "a.pdf", "storage_path": "2024-05-01/a.pdf"}"#)
                .unwrap();
        assert_eq!(doc.storage_path, "2024-05-01/a.pdf");
        assert_eq!(doc.created_at, None);
        assert_eq!(doc.size, None);
    }

    #[test]
    fn test_empty_upload_detected() {
        assert!(UploadDocument::new("a.pdf", Vec::new()).is_empty());
        assert!(!UploadDocument::new("a.pdf", b"%PDF-1.4".to_vec()).is_empty());
    }

    #[tokio::test]
    async fn test_from_path_keeps_file_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane_doe.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let upload = UploadDocument::from_path(&path).await.unwrap();
        assert_eq!(upload.filename, "jane_doe.pdf");
        assert_eq!(upload.bytes.as_ref(), b"%PDF-1.4");
    }
}

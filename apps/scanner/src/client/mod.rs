//! Evaluation service client. The session reaches the remote scorer only
//! through `EvaluationService`; `HttpEvaluationService` is the real backend
//! and tests plug in their own implementations.
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ServiceError;
use crate::models::{BatchResult, Document, Folder, ScoreResult, UploadDocument};
use crate::session::EvaluationConfig;

const PDF_MIME: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FolderListing {
    success: bool,
    #[serde(default)]
    folders: Vec<Folder>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentListing {
    success: bool,
    #[serde(default)]
    resumes: Vec<Document>,
    error: Option<String>,
}

/// Response of `POST /upload`: where the file landed in the collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    storage_paths: &'a [String],
    job_description: &'a str,
    skills: &'a [String],
}

/// Only used to pull the message out of a non-2xx body.
#[derive(Debug, Deserialize)]
struct FailureBody {
    error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The remote evaluation service. Listing calls are plain reads; the two scan
/// calls trigger computation but persist nothing, so all are safe to repeat.
#[async_trait]
pub trait EvaluationService: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>, ServiceError>;

    /// `None` lists the collection root.
    async fn list_documents(&self, folder: Option<&str>) -> Result<Vec<Document>, ServiceError>;

    /// Scores one uploaded file. A `success: false` body is returned as `Ok`.
    async fn scan_upload(
        &self,
        file: &UploadDocument,
        config: &EvaluationConfig,
    ) -> Result<ScoreResult, ServiceError>;

    /// Scores documents already in the collection. A `success: false` body is returned as `Ok`.
    async fn scan(
        &self,
        storage_paths: &[String],
        config: &EvaluationConfig,
    ) -> Result<BatchResult, ServiceError>;

    /// Stores a file in the collection without scoring it.
    async fn upload(&self, file: &UploadDocument) -> Result<UploadReceipt, ServiceError>;

    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

/// `EvaluationService` over HTTP. No retries: failures go straight back to the
/// session, which treats every one of them as recoverable by asking again.
#[derive(Clone)]
pub struct HttpEvaluationService {
    client: Client,
    base_url: String,
}

impl HttpEvaluationService {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn file_part(file: &UploadDocument) -> Result<multipart::Part, ServiceError> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.filename.clone())
            .mime_str(PDF_MIME)?;
        Ok(part)
    }
}

/// Reads a JSON body regardless of status. The service reports application
/// failures as `{success: false, error}` with a 4xx/5xx status, so a non-2xx
/// response is only an `Api` error when its body can't be read as `T`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(ServiceError::Parse);
    }

    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => {
            debug!("Service returned {status} with a structured body");
            Ok(parsed)
        }
        Err(_) => {
            warn!("Service returned {}: {}", status, body);
            let message = serde_json::from_str::<FailureBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or(body);
            Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn rejected(error: Option<String>) -> ServiceError {
    ServiceError::Rejected(error.unwrap_or_else(|| "Unknown error".to_string()))
}

#[async_trait]
impl EvaluationService for HttpEvaluationService {
    async fn list_folders(&self) -> Result<Vec<Folder>, ServiceError> {
        let response = self.client.get(self.url("folders")).send().await?;
        let listing: FolderListing = read_json(response).await?;
        if !listing.success {
            return Err(rejected(listing.error));
        }
        debug!("Listed {} folders", listing.folders.len());
        Ok(listing.folders)
    }

    async fn list_documents(&self, folder: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        let response = self
            .client
            .get(self.url("resumes"))
            .query(&[("folder", folder.unwrap_or(""))])
            .send()
            .await?;
        let listing: DocumentListing = read_json(response).await?;
        if !listing.success {
            return Err(rejected(listing.error));
        }
        debug!(
            "Listed {} resumes in {:?}",
            listing.resumes.len(),
            folder.unwrap_or("<root>")
        );
        Ok(listing.resumes)
    }

    async fn scan_upload(
        &self,
        file: &UploadDocument,
        config: &EvaluationConfig,
    ) -> Result<ScoreResult, ServiceError> {
        let form = multipart::Form::new()
            .part("file", Self::file_part(file)?)
            .text("job_description", config.job_description.clone())
            .text("skills", config.skills.join(","));

        debug!("Scanning upload {} ({} bytes)", file.filename, file.bytes.len());

        let response = self
            .client
            .post(self.url("scan-upload"))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn scan(
        &self,
        storage_paths: &[String],
        config: &EvaluationConfig,
    ) -> Result<BatchResult, ServiceError> {
        let body = ScanRequest {
            storage_paths,
            job_description: &config.job_description,
            skills: &config.skills,
        };

        debug!("Scanning {} stored resumes", storage_paths.len());

        let response = self
            .client
            .post(self.url("scan"))
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn upload(&self, file: &UploadDocument) -> Result<UploadReceipt, ServiceError> {
        let form = multipart::Form::new().part("file", Self::file_part(file)?);
        let response = self
            .client
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await?;
        let receipt: UploadReceipt = read_json(response).await?;
        if !receipt.success {
            return Err(rejected(receipt.error));
        }
        Ok(receipt)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let response = self.client.get(self.url("health")).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = Config {
            api_url: "http://localhost:5000/api/".to_string(),
            ..Config::default()
        };
        let service = HttpEvaluationService::new(&config).unwrap();
        assert_eq!(service.url("folders"), "http://localhost:5000/api/folders");
    }

    #[test]
    fn test_scan_request_shape() {
        let paths = vec!["2024-05-01/a.pdf".to_string()];
        let skills = vec!["python".to_string(), "".to_string()];
        let body = ScanRequest {
            storage_paths: &paths,
            job_description: "Backend engineer",
            skills: &skills,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "storage_paths": ["2024-05-01/a.pdf"],
                "job_description": "Backend engineer",
                "skills": ["python", ""]
            })
        );
    }

    #[test]
    fn test_rejected_without_message() {
        assert_eq!(rejected(None).display_message(), "Unknown error");
    }
}

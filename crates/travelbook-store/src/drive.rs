//! Remote store adapter.
//!
//! Wraps the drive proxy's HTTP surface behind the four primitives the
//! resolver needs: list a user's namespace, fetch one entry, update one
//! entry, create one entry. Every call is a network call; there is no
//! caching here.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use travelbook_core::Itinerary;

use crate::error::StoreError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A named file entry as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct PersistedFile {
    pub id: String,
    pub name: String,
}

/// Result of listing a user's namespace.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListing {
    #[serde(rename = "userFolderId")]
    pub user_folder_id: String,
    #[serde(default)]
    pub files: Vec<PersistedFile>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "serviceIdentity")]
    service_identity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    id: String,
    /// Parent containers of a created entry, echoed back for verification.
    #[serde(default)]
    parents: Option<Vec<String>>,
}

/// HTTP client for the drive proxy.
#[derive(Debug, Clone)]
pub struct DriveClient {
    base_url: Url,
    client: Arc<Client>,
}

impl DriveClient {
    /// Create a new client against the given proxy base URL.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::remote(format!("invalid base url {base_url:?}: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::remote(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// List the JSON entries in a user's namespace, creating the per-user
    /// container on first access (server-side find-or-create).
    ///
    /// A 404 carrying `ROOT_FOLDER_NOT_FOUND` is returned as
    /// [`StoreError::RootFolderMissing`]; any other failure, including a
    /// malformed body, is a transient [`StoreError::Remote`].
    pub async fn list_files(&self, username: &str) -> Result<FileListing, StoreError> {
        tracing::debug!("Listing files for user: {}", username);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("action", "list"), ("username", username)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                if err.error == "ROOT_FOLDER_NOT_FOUND" {
                    return Err(StoreError::RootFolderMissing {
                        service_identity: err
                            .service_identity
                            .unwrap_or_else(|| "the service account".to_string()),
                    });
                }
            }
        }
        if !status.is_success() {
            return Err(StoreError::remote(format!("list failed ({status}): {body}")));
        }

        let listing: FileListing = serde_json::from_str(&body)
            .map_err(|e| StoreError::remote(format!("malformed list response: {e}")))?;

        tracing::info!(
            "Listed {} files for user {} in folder {}",
            listing.files.len(),
            username,
            listing.user_folder_id
        );
        Ok(listing)
    }

    /// Fetch one entry's content.
    pub async fn get_file(&self, file_id: &str) -> Result<Itinerary, StoreError> {
        tracing::debug!("Fetching file: {}", file_id);

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("action", "get"), ("fileId", file_id)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::FileNotFound(file_id.to_string()));
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::remote(format!("get failed ({status}): {body}")));
        }

        Itinerary::from_json(&body)
            .map_err(|e| StoreError::remote(format!("malformed file content: {e}")))
    }

    /// Overwrite an existing entry's content, returning its id.
    pub async fn update_file(
        &self,
        file_id: &str,
        data: &Itinerary,
    ) -> Result<String, StoreError> {
        tracing::debug!("Updating file: {}", file_id);

        let response = self
            .client
            .post(self.base_url.clone())
            .query(&[("fileId", file_id)])
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?;

        let saved = Self::parse_save_response(response).await?;
        tracing::info!("Updated file: {}", saved.id);
        Ok(saved.id)
    }

    /// Create a new entry inside `folder_id`, returning the minted id.
    /// The server suffixes `.json` onto the name when absent.
    pub async fn create_file(
        &self,
        folder_id: &str,
        file_name: &str,
        data: &Itinerary,
    ) -> Result<String, StoreError> {
        tracing::debug!("Creating file {:?} in folder {}", file_name, folder_id);

        let response = self
            .client
            .post(self.base_url.clone())
            .query(&[("folderId", folder_id), ("fileName", file_name)])
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?;

        let saved = Self::parse_save_response(response).await?;

        // Post-create ownership check: the entry must be discoverable under
        // the folder we asked for, or the next listing will miss it.
        if let Some(parents) = &saved.parents {
            if !parents.iter().any(|p| p == folder_id) {
                tracing::warn!(
                    "Created file {} but parent mismatch: expected {}, got {:?}",
                    saved.id,
                    folder_id,
                    parents
                );
            }
        }

        tracing::info!("Created file {} ({:?})", saved.id, file_name);
        Ok(saved.id)
    }

    async fn parse_save_response(response: reqwest::Response) -> Result<SaveResponse, StoreError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::remote(format!("save failed ({status}): {body}")));
        }
        serde_json::from_str(&body)
            .map_err(|e| StoreError::remote(format!("malformed save response: {e}")))
    }
}

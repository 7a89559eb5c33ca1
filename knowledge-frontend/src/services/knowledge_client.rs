//! Knowledge service client for the document manager BFF.
//!
//! All document state lives in the knowledge service; this client wraps its
//! REST endpoints with trace-context propagation.

use crate::config::KnowledgeServiceSettings;
use crate::models::Document;
use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;

pub struct KnowledgeClient {
    client: Client,
    settings: KnowledgeServiceSettings,
}

/// Response envelope shared by every knowledge service endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub err_msg: Option<String>,
}

/// Payload of a successful list call.
#[derive(Debug, Default, Deserialize)]
pub struct PageData {
    #[serde(default)]
    pub data: Vec<Document>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
}

#[derive(Debug, Serialize)]
pub struct AddDocumentRequest {
    pub doc_name: String,
    pub content: String,
    pub doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl KnowledgeClient {
    pub fn new(settings: KnowledgeServiceSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }

    fn endpoint(&self, space: &str, operation: &str) -> String {
        format!(
            "{}/knowledge/{}/document/{}",
            self.settings.url, space, operation
        )
    }

    /// Fetch one listing page for a space.
    pub async fn list_documents(
        &self,
        space: &str,
        page: u64,
        page_size: u64,
    ) -> Result<ApiResponse<PageData>> {
        let url = self.endpoint(space, "list");

        let response = self
            .client
            .traced_post(&url)
            .json(&serde_json::json!({
                "page": page,
                "page_size": page_size,
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send document list request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let parsed = response.json::<ApiResponse<PageData>>().await.map_err(|e| {
            tracing::error!("Malformed document list response from {}: {}", url, e);
            anyhow::anyhow!("Malformed response: {}", e)
        })?;

        Ok(parsed)
    }

    /// Re-trigger ingestion for the given documents.
    pub async fn sync_documents(
        &self,
        space: &str,
        doc_ids: &[i64],
    ) -> Result<ApiResponse<serde_json::Value>> {
        let url = self.endpoint(space, "sync");

        let response = self
            .client
            .traced_post(&url)
            .json(&serde_json::json!({ "doc_ids": doc_ids }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send document sync request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let parsed = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .map_err(|e| {
                tracing::error!("Malformed document sync response from {}: {}", url, e);
                anyhow::anyhow!("Malformed response: {}", e)
            })?;

        Ok(parsed)
    }

    /// Register a text or URL document.
    pub async fn add_document(
        &self,
        space: &str,
        request: &AddDocumentRequest,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let url = self.endpoint(space, "add");

        let response = self
            .client
            .traced_post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send document add request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let parsed = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .map_err(|e| {
                tracing::error!("Malformed document add response from {}: {}", url, e);
                anyhow::anyhow!("Malformed response: {}", e)
            })?;

        Ok(parsed)
    }

    /// Upload a file document as a multipart form.
    pub async fn upload_document(
        &self,
        space: &str,
        doc_name: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let url = self.endpoint(space, "upload");

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| anyhow::anyhow!("Invalid content type {}: {}", content_type, e))?;

        let form = reqwest::multipart::Form::new()
            .text("doc_name", doc_name.to_string())
            .part("doc_file", part)
            .text("doc_type", "DOCUMENT");

        let response = self
            .client
            .traced_post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send document upload request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let parsed = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .map_err(|e| {
                tracing::error!("Malformed document upload response from {}: {}", url, e);
                anyhow::anyhow!("Malformed response: {}", e)
            })?;

        Ok(parsed)
    }
}

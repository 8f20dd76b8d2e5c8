//! HTTP client for the QR service.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Options for a generate request; unset fields use the server defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// `data` of a successful JSON envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateData {
    pub content: String,
    pub format: String,
    pub timestamp: String,
    pub qr_code: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub direct_download: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct QrClient {
    client: Client,
    base_url: String,
}

impl QrClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the health document.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let res = self
            .client
            .get(format!("{}/api/v1/health", self.base_url))
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    /// `GET generate-qr` returning the raw response, for image formats.
    pub async fn generate_raw(&self, text: &str, options: &GenerateOptions) -> Result<Response, ClientError> {
        let res = self
            .client
            .get(format!("{}/api/v1/generate-qr", self.base_url))
            .query(&[("text", text)])
            .query(options)
            .send()
            .await?;
        check(res).await
    }

    /// `GET generate-qr` returning the JSON envelope with download links.
    pub async fn generate(&self, text: &str, options: &GenerateOptions) -> Result<GenerateData, ClientError> {
        let options = GenerateOptions {
            format: None,
            ..options.clone()
        };
        let envelope: Envelope<GenerateData> = self.generate_raw(text, &options).await?.json().await?;
        Ok(envelope.data)
    }

    /// Download a PNG from a link produced by [`QrClient::generate`].
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let res = self.client.get(url).send().await?;
        Ok(check(res).await?.bytes().await?.to_vec())
    }
}

async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

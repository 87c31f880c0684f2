//! Gateways for the storefront shop directory and review API.
//!
//! Both collaborators sit behind traits so that the workflow can be driven by
//! mocks in tests while the reqwest implementations handle real HTTP.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::media::files::{local_path_from_uri, read_media, sniff_mime};

use super::endpoint::ApiSettings;
use super::error::ReviewError;
use super::models::{ShopSummary, SubmitReceipt, receipt_from_response, summary_from_response};
use super::payload::{FIELD_FILES, PayloadFile, ReviewPayload};

const SHOP_ROUTE: &str = "get-user-by-id";
const REVIEW_ROUTE: &str = "add-review";
const ERROR_BODY_LIMIT: usize = 160;

/// Resolves shop metadata by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopDirectory: Send + Sync {
    /// Fetches the summary of the shop with the given id.
    async fn fetch_by_id(&self, shop_id: &str) -> Result<ShopSummary, ReviewError>;
}

/// Persists a review submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSubmissionGateway: Send + Sync {
    /// Sends the multipart payload once.
    async fn submit(&self, payload: &ReviewPayload) -> Result<SubmitReceipt, ReviewError>;
}

/// reqwest-backed shop directory.
#[derive(Debug, Clone)]
pub struct HttpShopDirectory {
    client: Client,
    settings: ApiSettings,
}

impl HttpShopDirectory {
    /// Builds a directory client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(settings: ApiSettings) -> Result<Self, ReviewError> {
        let client = settings.build_client()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl ShopDirectory for HttpShopDirectory {
    async fn fetch_by_id(&self, shop_id: &str) -> Result<ShopSummary, ReviewError> {
        let url = self.settings.endpoint.route(SHOP_ROUTE)?;
        let request = self.client.get(url).query(&[("id_user", shop_id)]);
        let response = send(authorise(request, &self.settings), "shop lookup").await?;

        let body: Value = response.json().await.map_err(|error| ReviewError::Decode {
            message: format!("shop lookup: {error}"),
        })?;

        Ok(summary_from_response(shop_id, body))
    }
}

/// reqwest-backed review API using a multipart form.
#[derive(Debug, Clone)]
pub struct HttpReviewGateway {
    client: Client,
    settings: ApiSettings,
}

impl HttpReviewGateway {
    /// Builds a review client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(settings: ApiSettings) -> Result<Self, ReviewError> {
        let client = settings.build_client()?;
        Ok(Self { client, settings })
    }

    async fn build_form(payload: &ReviewPayload) -> Result<Form, ReviewError> {
        let mut form = Form::new();
        for (name, value) in payload.text_fields() {
            form = form.text(name, value.to_owned());
        }
        for file in &payload.files {
            form = form.part(FIELD_FILES, load_part(file).await?);
        }
        Ok(form)
    }
}

#[async_trait]
impl ReviewSubmissionGateway for HttpReviewGateway {
    async fn submit(&self, payload: &ReviewPayload) -> Result<SubmitReceipt, ReviewError> {
        let url = self.settings.endpoint.route(REVIEW_ROUTE)?;
        let form = Self::build_form(payload).await?;
        let request = self.client.post(url).multipart(form);
        let response = send(authorise(request, &self.settings), "review submission").await?;

        // Some deployments answer with an empty body; that still counts.
        let text = response.text().await.map_err(|error| ReviewError::Network {
            message: format!("review submission: {error}"),
        })?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);

        Ok(receipt_from_response(&body))
    }
}

fn authorise(request: RequestBuilder, settings: &ApiSettings) -> RequestBuilder {
    match settings.token.as_ref() {
        Some(token) => request.bearer_auth(token.value()),
        None => request,
    }
}

async fn send(request: RequestBuilder, operation: &str) -> Result<Response, ReviewError> {
    let response = request
        .send()
        .await
        .map_err(|error| ReviewError::Network {
            message: format!("{operation}: {error}"),
        })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_or_else(
        |_| "(failed to read error response body)".to_owned(),
        |content| truncate_for_message(content.as_str(), ERROR_BODY_LIMIT),
    );
    Err(map_status_error(operation, status, &body))
}

fn map_status_error(operation: &str, status: StatusCode, body: &str) -> ReviewError {
    ReviewError::Api {
        message: format!("{operation} failed with status {}: {body}", status.as_u16()),
    }
}

async fn load_part(file: &PayloadFile) -> Result<Part, ReviewError> {
    let path = local_path_from_uri(&file.uri)?;
    let bytes = tokio::task::spawn_blocking(move || read_media(&path))
        .await
        .map_err(|error| ReviewError::Io {
            message: format!("attachment read task failed: {error}"),
        })??;

    // Detected contents win over the declared type.
    let mime = sniff_mime(&bytes).or(file.mime_type.as_deref());
    let part = Part::bytes(bytes).file_name(file.name.clone());
    match mime {
        Some(mime) => part.mime_str(mime).map_err(|error| ReviewError::Io {
            message: format!("invalid MIME type '{mime}' for {}: {error}", file.name),
        }),
        None => Ok(part),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;

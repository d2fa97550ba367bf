//! HTTP client for the remote skin-analysis service
//!
//! `POST {base_url}/analyze` takes a multipart form with the photo under
//! `image` and the profile as a JSON string under `user`, and answers with an
//! analysis result. The client injects the bearer token when one is
//! configured and maps non-success statuses onto [`ClientError`].

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use skinglow_shared::{AnalysisResult, UserProfile};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Longest backend error body echoed into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Profile as the analysis service expects it
#[derive(Debug, Serialize)]
struct AnalysisUserPayload<'a> {
    age: u32,
    gender: &'a str,
    height: u32,
    weight: u32,
    diet: &'a str,
    ethnicity: Option<&'a str>,
}

impl<'a> From<&'a UserProfile> for AnalysisUserPayload<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            age: profile.age,
            gender: profile.gender.as_str(),
            height: profile.height_cm,
            weight: profile.weight_kg,
            diet: profile.diet.as_str(),
            ethnicity: profile.ethnicity.as_deref(),
        }
    }
}

/// Client for the analysis endpoint
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<Secret<String>>,
}

impl AnalysisClient {
    /// Build a client with the configured base URL, timeout and token
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone().map(Secret::new),
        })
    }

    /// Replace the bearer token, e.g. after sign-in
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(Secret::new(token.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a photo and profile for analysis.
    ///
    /// Only a 2xx response yields a result; everything else is an error and
    /// nothing should be cached.
    #[instrument(skip(self, image, profile), fields(bytes = image.len()))]
    pub async fn analyze(
        &self,
        image: Vec<u8>,
        file_name: &str,
        profile: &UserProfile,
    ) -> ClientResult<AnalysisResult> {
        let user = serde_json::to_string(&AnalysisUserPayload::from(profile))
            .map_err(|e| ClientError::Config(format!("cannot encode profile: {}", e)))?;

        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part("image", part).text("user", user);

        let mut request = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .multipart(form);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            let err = ClientError::from(e);
            warn!(error = %err, "Analysis request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!(status = status.as_u16(), %message, "Analysis request rejected");
            return Err(ClientError::from_status(status, message));
        }

        let result = response.json::<AnalysisResult>().await?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            score = ?result.score_value(),
            fallback = result.is_fallback(),
            "Analysis received"
        );
        Ok(result)
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"detail": "..."}` and `{"detail": {"message": "..."}}`;
/// otherwise falls back to the (truncated) raw body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return Some(detail.clone()),
            Some(detail) => {
                if let Some(message) = detail.get("message").and_then(Value::as_str) {
                    return Some(message.to_string());
                }
            }
            None => {}
        }
    }

    Some(body.chars().take(MAX_ERROR_BODY_CHARS).collect())
}

/// Image MIME type from the file extension, defaulting to JPEG
fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

//! Analyze flow - photo in, cached analysis out

use crate::api::AnalysisClient;
use crate::error::{ClientError, ClientResult};
use crate::state::AppState;
use skinglow_shared::AnalysisResult;
use std::path::Path;
use tracing::{info, warn};

/// Runs a remote analysis and caches the outcome
pub struct AnalyzeService;

impl AnalyzeService {
    /// Read the photo, submit it with the stored profile and cache the result.
    ///
    /// Nothing is cached when the request fails.
    pub async fn analyze_photo(
        state: &AppState,
        client: &AnalysisClient,
        image_path: &Path,
    ) -> ClientResult<AnalysisResult> {
        let profile = state
            .profile()
            .current()
            .await
            .ok_or(ClientError::ProfileIncomplete)?;

        let image = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo.jpg")
            .to_string();

        info!(file = %file_name, bytes = image.len(), "Submitting photo for analysis");
        let result = client.analyze(image, &file_name, &profile).await?;

        if result.is_fallback() {
            warn!("Analysis service returned its fallback result");
        }

        state.analysis().set(result.clone()).await;
        Ok(result)
    }
}

//! Session request bodies

use serde::Deserialize;
use validator::Validate;

/// Navigate request
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// `home`, `results`, `about` or `how-it-works`
    pub page: String,
}

/// Start scan request. Blank URLs are accepted here and ignored by the
/// scan controller.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: String,
}

/// Chat draft update
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    #[serde(default)]
    pub text: String,
}

/// Chat message; falls back to the stored draft when `text` is absent
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(default)]
    #[validate(length(max = 4000, message = "Message is too long"))]
    pub text: Option<String>,
}

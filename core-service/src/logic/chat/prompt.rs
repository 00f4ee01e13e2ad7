//! Explanation prompt for a fresh detection result.

use serde::Serialize;

use crate::logic::features::FeatureSet;
use crate::logic::scan::DetectionResult;

/// Fields of a result the assistant gets to see
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptResult<'a> {
    url: &'a str,
    is_phishing: bool,
    confidence: u8,
    features: &'a FeatureSet,
}

impl<'a> From<&'a DetectionResult> for PromptResult<'a> {
    fn from(r: &'a DetectionResult) -> Self {
        Self {
            url: &r.url,
            is_phishing: r.is_phishing,
            confidence: r.confidence,
            features: &r.features,
        }
    }
}

const RESPONSE_FORMAT: &str = "\
FORMAT STRICTLY LIKE THIS:

### 🔍 Scan Result
- **Status:** Safe / Phishing
- **Confidence:** XX%

### ⚠️ Reasons
- Bullet points only

### 📊 Risk Level
- Low / Medium / High

### ✅ Recommendation
- One short sentence only";

/// Single user-role prompt that asks for a markdown explanation of `result`
pub fn build_explanation_prompt(result: &DetectionResult) -> String {
    let embedded = serde_json::to_string_pretty(&PromptResult::from(result))
        .unwrap_or_else(|_| format!("{{ \"url\": {:?} }}", result.url));

    format!(
        "You are a **Phishing Detection Assistant**.\n\
         Analyze the scan result below and respond in **clean markdown**.\n\n\
         SCAN RESULT:\n{}\n\n{}",
        embedded, RESPONSE_FORMAT
    )
}

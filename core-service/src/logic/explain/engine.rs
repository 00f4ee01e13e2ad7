use super::types::{FeatureInsight, InsightStatus};
use crate::logic::features::FeatureSet;

// Same cut-offs the rule-based classifier uses
const LONG_URL_THRESHOLD: usize = crate::logic::classifier::rules::LONG_URL_THRESHOLD;
const MANY_DOTS_THRESHOLD: usize = crate::logic::classifier::rules::MANY_DOTS_THRESHOLD;

/// Rate each of the five features for display
pub fn assess(features: &FeatureSet) -> Vec<FeatureInsight> {
    let long = features.url_length > LONG_URL_THRESHOLD;
    let many_dots = features.subdomain_count > MANY_DOTS_THRESHOLD;

    vec![
        insight(
            "URL Length",
            features.url_length.to_string(),
            if long { InsightStatus::Warning } else { InsightStatus::Safe },
            if long { "Suspicious length" } else { "Normal length" },
        ),
        insight(
            "HTTPS Protocol",
            yes_no(features.https_used, "Yes", "No"),
            if features.https_used { InsightStatus::Safe } else { InsightStatus::Danger },
            if features.https_used { "Secure connection" } else { "Insecure connection" },
        ),
        insight(
            "IP Address",
            yes_no(features.has_ip, "Detected", "Not Found"),
            if features.has_ip { InsightStatus::Danger } else { InsightStatus::Safe },
            if features.has_ip { "Contains IP address" } else { "No IP detected" },
        ),
        insight(
            "@ Symbol",
            yes_no(features.has_at_symbol, "Found", "Not Found"),
            if features.has_at_symbol { InsightStatus::Warning } else { InsightStatus::Safe },
            if features.has_at_symbol { "Contains @ symbol" } else { "Clean URL" },
        ),
        insight(
            "Subdomain Count",
            features.subdomain_count.to_string(),
            if many_dots { InsightStatus::Warning } else { InsightStatus::Safe },
            if many_dots { "Multiple subdomains" } else { "Normal structure" },
        ),
    ]
}

/// Worst status across all insights
pub fn overall_status(insights: &[FeatureInsight]) -> InsightStatus {
    insights
        .iter()
        .map(|i| i.status)
        .max_by_key(|s| match s {
            InsightStatus::Safe => 0,
            InsightStatus::Warning => 1,
            InsightStatus::Danger => 2,
        })
        .unwrap_or(InsightStatus::Safe)
}

fn insight(label: &str, value: String, status: InsightStatus, description: &str) -> FeatureInsight {
    FeatureInsight {
        label: label.to_string(),
        value,
        status,
        description: description.to_string(),
    }
}

fn yes_no(flag: bool, yes: &str, no: &str) -> String {
    if flag { yes.to_string() } else { no.to_string() }
}

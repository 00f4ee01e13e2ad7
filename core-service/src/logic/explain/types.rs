use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightStatus {
    Safe,
    Warning,
    Danger,
}

/// One row of the Results view feature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInsight {
    pub label: String,
    pub value: String,
    pub status: InsightStatus,
    pub description: String,
}

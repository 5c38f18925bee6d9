//! Gallery response records.
//!
//! Extension records are passthrough: only the fields this client reads are
//! declared, everything else the gallery sends is preserved in the flattened
//! `extra` map so a record can be forwarded without losing data.

use serde::{Deserialize, Serialize};

/// One extension record from a gallery query response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSummary {
    #[serde(default)]
    pub extension_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub publisher: Publisher,
    #[serde(default)]
    pub versions: Vec<ExtensionVersion>,
    #[serde(default)]
    pub statistics: Vec<Statistic>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    /// Internal identifier used in download URLs, not the display name.
    #[serde(default)]
    pub publisher_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionVersion {
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    #[serde(default)]
    pub statistic_name: String,
    #[serde(default)]
    pub value: f64,
}

impl ExtensionSummary {
    /// Cumulative install count, taken from the statistic named `install`.
    /// Returns None when the gallery did not include that statistic.
    pub fn install_count(&self) -> Option<u64> {
        self.statistics
            .iter()
            .find(|s| s.statistic_name == "install")
            .map(|s| s.value as u64)
    }
}

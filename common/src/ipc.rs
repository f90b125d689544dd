use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::registry::KindTag;

/// A `(kind, payload)` pair exactly as handed over by the job-query side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub kind: KindTag,
    #[serde(default)]
    pub payload: Option<Value>,
}

pub const SERVICE_VERSION: &str = "v1.0.3";

/// Body returned by the service's version endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub msg: String,
    pub version: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            msg: "getVersion success".to_string(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}

//! Storage-service endpoints: report listing and download

use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ClientResult;

/// One report file as listed by the storage service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl ApiClient {
    /// List reports of one type within a bucket
    pub async fn reports(&self, bucket: &str, report_type: &str) -> ClientResult<Vec<ReportFile>> {
        self.get_json(&format!("storage/{}/{}", bucket, report_type))
            .await
    }

    /// Download a report file by name; the body is opaque binary
    pub async fn download_report(&self, bucket: &str, name: &str) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("storage/{}/{}", bucket, name)).await
    }
}

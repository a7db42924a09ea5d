use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use kiteforge_core::{EgressConfig, KiteError, UsageReport, UsageReporter};

use crate::http::HttpClientCache;

/// Metering endpoint used when no override is configured.
pub const DEFAULT_USAGE_REPORT_URL: &str =
    "https://quests-usage-dev.prod.zettablock.com/api/report_usage";

/// Usage reporter POSTing JSON reports to the metering endpoint.
pub struct HttpUsageReporter {
    http: Arc<HttpClientCache>,
    report_url: String,
}

impl HttpUsageReporter {
    pub fn new(http: Arc<HttpClientCache>) -> Self {
        Self {
            http,
            report_url: DEFAULT_USAGE_REPORT_URL.to_string(),
        }
    }

    pub fn with_report_url(mut self, url: impl Into<String>) -> Self {
        self.report_url = url.into();
        self
    }
}

#[async_trait]
impl UsageReporter for HttpUsageReporter {
    async fn report(
        &self,
        egress: Option<&EgressConfig>,
        report: &UsageReport,
    ) -> Result<(), KiteError> {
        let client = self.http.client_for(egress).await?;

        let response = client
            .post(&self.report_url)
            .json(report)
            .send()
            .await
            .map_err(|e| KiteError::transport("usage report", e))?;

        let status = response.status();
        debug!(agent_id = %report.agent_id, status = %status, "Usage report answered");

        // Only a plain 200 counts; 201/204 are treated as rejections too.
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(KiteError::ReportRejected {
                status: status.as_u16(),
            })
        }
    }
}

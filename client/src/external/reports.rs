//! Report submission client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use shared::models::{fields, ApiErrorBody, ReportPayload, SubmissionReceipt};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::services::ports::ReportSink;

use super::{http_client, normalize_base_url};

const GENERIC_FAILURE: &str = "Failed to submit report";

/// Posts multipart hazard reports to `/api/reports/submit`
#[derive(Clone)]
pub struct ReportsClient {
    client: Client,
    base_url: String,
}

impl ReportsClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: http_client(Duration::from_secs(config.request_timeout_secs), None),
            base_url: normalize_base_url(&config.base_url),
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}/api/reports/submit", self.base_url)
    }

    fn multipart(payload: ReportPayload) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in payload.fields {
            form = form.text(name, value);
        }
        for file in payload.files {
            let part = Part::bytes(file.data)
                .file_name(file.name)
                .mime_str(&file.mime_type)?;
            form = form.part(fields::MEDIA_FILES, part);
        }
        Ok(form)
    }

    /// Submit a report and return the server's receipt
    pub async fn submit_report(&self, payload: ReportPayload) -> ClientResult<SubmissionReceipt> {
        let file_count = payload.files.len();
        let form = Self::multipart(payload)?;

        tracing::info!(files = file_count, "Submitting hazard report");
        let response = self
            .client
            .post(self.submit_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            let message = body.reason().unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "Report rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| ClientError::Decode {
            what: "submission receipt",
            reason: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl ReportSink for ReportsClient {
    async fn submit(&self, payload: ReportPayload) -> ClientResult<SubmissionReceipt> {
        self.submit_report(payload).await
    }
}

//! HTTP client for the three backend endpoints.
//!
//! The backend is an opaque collaborator: no retries, no backoff, no local
//! caching. Connection failures and non-2xx responses are equivalent from the
//! caller's point of view; both surface as [`ApiError`].

use log::debug;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::model::{ExtractionResult, HistoryEntry, Language, Translation};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}")]
    Status { status: StatusCode },
}

/// Client bound to one backend base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ProcessRequest<'a> {
    report: &'a str,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    outcome: &'a str,
    language: Language,
}

impl ApiClient {
    /// Build a client for the given base URL; a trailing slash is trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /reports` — the full processed-report history, newest first.
    pub async fn fetch_reports(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = format!("{}/reports", self.base_url);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    /// `POST /process-report` — submit raw report text for extraction.
    pub async fn process_report(&self, report: &str) -> Result<ExtractionResult, ApiError> {
        let url = format!("{}/process-report", self.base_url);
        debug!("POST {url} ({} bytes)", report.len());
        let response = self
            .http
            .post(&url)
            .json(&ProcessRequest { report })
            .send()
            .await?;
        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    /// `POST /translate` — translate an extracted outcome.
    pub async fn translate(
        &self,
        outcome: &str,
        language: Language,
    ) -> Result<Translation, ApiError> {
        let url = format!("{}/translate", self.base_url);
        debug!("POST {url} ({})", language.code());
        let response = self
            .http
            .post(&url)
            .json(&TranslateRequest { outcome, language })
            .send()
            .await?;
        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    fn check_status(status: StatusCode) -> Result<(), ApiError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_reports_decodes_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 3,
                    "raw_report": "Severe nausea after Drug X.",
                    "drug": "Drug X",
                    "adverse_events": ["nausea"],
                    "severity": "severe",
                    "outcome": "recovered",
                    "created_at": "2025-06-03T10:00:00Z",
                },
                {
                    "id": 2,
                    "raw_report": "",
                    "drug": "",
                    "adverse_events": [],
                    "severity": "",
                    "outcome": "",
                    "created_at": "2025-06-02T10:00:00Z",
                },
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let history = client.fetch_reports().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, 3);
        assert_eq!(history[0].severity, Some(Severity::Severe));
        assert_eq!(history[1].drug, None);
        assert_eq!(history[1].severity, None);
    }

    #[tokio::test]
    async fn process_report_sends_report_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-report"))
            .and(body_json(json!({ "report": "Patient recovered." })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "drug": "Drug X",
                "adverse_events": ["nausea", "headache"],
                "severity": "moderate",
                "outcome": "recovered",
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let result = client.process_report("Patient recovered.").await.unwrap();
        assert_eq!(result.drug.as_deref(), Some("Drug X"));
        assert_eq!(result.adverse_events, vec!["nausea", "headache"]);
        assert_eq!(result.severity, Some(Severity::Moderate));
        assert_eq!(result.outcome.as_deref(), Some("recovered"));
    }

    #[tokio::test]
    async fn translate_sends_outcome_and_language() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({ "outcome": "recovered", "language": "fr" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "outcome": "recovered",
                "language": "fr",
                "translated": "rétabli",
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let translation = client.translate("recovered", Language::French).await.unwrap();
        assert_eq!(translation.translated, "rétabli");
        assert_eq!(translation.language, Language::French);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-report"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.process_report("whatever").await.unwrap_err();
        match err {
            ApiError::Status { status } => assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}

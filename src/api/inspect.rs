//! URL Inspection API transport

use crate::api::client::ApiClient;
use crate::api::ApiError;
use crate::batch::{IndexStatus, InspectionOutcome, InspectionRequest, InspectionResult, Inspector};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when a failure carries no better description
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to inspect URL";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectBody<'a> {
    inspection_url: &'a str,
    site_url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectResponse {
    inspection_result: Option<RawInspectionResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInspectionResult {
    #[serde(default)]
    index_status_result: Option<IndexStatus>,
    #[serde(default)]
    amp_result: Option<Value>,
    #[serde(default)]
    mobile_usability_result: Option<Value>,
    #[serde(default)]
    rich_results_result: Option<Value>,
}

/// Inspector backed by the `urlInspection/index:inspect` endpoint
///
/// Every request settles to an outcome: transport errors, error statuses and
/// malformed bodies all become [`InspectionOutcome::Failure`].
pub struct ApiInspector {
    client: ApiClient,
    url: String,
}

impl ApiInspector {
    /// Creates an inspector for the given API base URL
    pub fn new(client: ApiClient, inspection_endpoint: &str) -> Self {
        Self {
            client,
            url: format!(
                "{}/v1/urlInspection/index:inspect",
                inspection_endpoint.trim_end_matches('/')
            ),
        }
    }

    async fn call(&self, request: &InspectionRequest) -> Result<InspectionResult, ApiError> {
        let body = InspectBody {
            inspection_url: &request.url,
            site_url: &request.site_url,
        };

        let response: InspectResponse = self.client.post_json(&self.url, &body).await?;
        let raw = response.inspection_result.ok_or_else(|| {
            ApiError::Decode("inspection response has no inspectionResult".to_string())
        })?;

        Ok(InspectionResult {
            url: request.url.clone(),
            index_status: raw.index_status_result.unwrap_or_default(),
            amp_result: raw.amp_result,
            mobile_usability_result: raw.mobile_usability_result,
            rich_results_result: raw.rich_results_result,
        })
    }
}

#[async_trait]
impl Inspector for ApiInspector {
    async fn inspect(&self, request: &InspectionRequest) -> crate::Result<InspectionOutcome> {
        let outcome = match self.call(request).await {
            Ok(result) => InspectionOutcome::Success(result),
            Err(e) => {
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    DEFAULT_FAILURE_MESSAGE.to_string()
                } else {
                    message
                };
                InspectionOutcome::failure(request.url.clone(), message)
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = InspectBody {
            inspection_url: "https://example.com/page",
            site_url: "sc-domain:example.com",
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["inspectionUrl"], "https://example.com/page");
        assert_eq!(value["siteUrl"], "sc-domain:example.com");
    }

    #[test]
    fn test_response_without_index_status() {
        let response: InspectResponse =
            serde_json::from_str(r#"{"inspectionResult":{"inspectionResultLink":"x"}}"#).unwrap();
        let raw = response.inspection_result.unwrap();
        assert!(raw.index_status_result.is_none());
        assert!(raw.amp_result.is_none());
    }
}

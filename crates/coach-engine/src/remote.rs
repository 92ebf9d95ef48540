//! Remote workflow client
//!
//! Primary analysis path: each analyzer has an HTTP workflow at
//! `POST <base>/<analyzer-name>` taking `{query, businessContext,
//! sessionType}` and answering `{analysis: {...}}`. Failures surface as
//! `EngineError` and are mapped to the zero-confidence sentinel by the
//! conductor; they never abort the other analyzers.

use crate::config::CoachConfig;
use crate::error::{EngineError, Result};
use coach_core::{AgentAnalysis, AnalyzerId, BusinessContext, SessionType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowRequest<'a> {
    query: &'a str,
    business_context: &'a BusinessContext,
    session_type: SessionType,
}

#[derive(Debug, Deserialize)]
struct WorkflowResponse {
    analysis: AgentAnalysis,
}

/// HTTP client for the per-analyzer workflow endpoints
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    base_url: String,
    http: reqwest::Client,
}

impl WorkflowClient {
    /// Build a client from config; `None` when no endpoint is configured
    pub fn from_config(config: &CoachConfig) -> Result<Option<Self>> {
        let Some(base_url) = config.workflow_endpoint.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }))
    }

    /// Invoke one analyzer workflow
    pub async fn analyze(
        &self,
        analyzer: AnalyzerId,
        query: &str,
        business_context: &BusinessContext,
        session_type: SessionType,
    ) -> Result<AgentAnalysis> {
        let url = format!("{}/{}", self.base_url, analyzer.as_str());
        let request = WorkflowRequest {
            query,
            business_context,
            session_type,
        };

        tracing::debug!(%url, "calling analyzer workflow");

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(EngineError::WorkflowFailed {
                analyzer: analyzer.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let body: WorkflowResponse = response.json().await?;

        if body.analysis.agent != analyzer {
            return Err(EngineError::WorkflowFailed {
                analyzer: analyzer.to_string(),
                reason: format!(
                    "workflow answered as {} instead of {analyzer}",
                    body.analysis.agent
                ),
            });
        }

        Ok(body.analysis)
    }
}

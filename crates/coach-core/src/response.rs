//! Request/response envelope and synthesis output types

use crate::{AgentAnalysis, AnalyzerId, BusinessContext, SessionType};
use serde::{Deserialize, Serialize};

/// Priority bucket for derived action items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ascending sort weight: critical sorts first
    pub fn weight(&self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
        }
    }
}

/// Concrete action derived from analyzer recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub timeline: String,
    pub frameworks: Vec<String>,
}

/// One query as submitted by the UI collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingRequest {
    pub query: String,
    pub business_context: BusinessContext,
    pub session_type: SessionType,
    pub user_id: String,
}

impl CoachingRequest {
    pub fn new(query: impl Into<String>, business_context: BusinessContext) -> Self {
        Self {
            query: query.into(),
            business_context,
            session_type: SessionType::default(),
            user_id: String::new(),
        }
    }

    pub fn with_session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = session_type;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }
}

/// Structured result returned to the UI collaborator; always well-formed,
/// degraded analyses appear as zero-confidence entries rather than errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingResponse {
    pub analysis: Vec<AgentAnalysis>,
    pub synthesis: String,
    pub action_items: Vec<ActionItem>,
    pub next_steps: Vec<String>,
    pub frameworks: Vec<String>,
}

/// An analyzer with a routing confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentScore {
    pub agent: AnalyzerId,
    pub confidence: f64,
}

/// Output of the routing decision engine; drives UI visualization only and
/// never feeds back into the conductor's analyzer selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub primary: AgentScore,
    pub secondary: Vec<AgentScore>,
    pub collaborative_mode: bool,
    pub execution_plan: String,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights_ascend() {
        assert!(Priority::Critical.weight() < Priority::High.weight());
        assert!(Priority::High.weight() < Priority::Medium.weight());
        assert!(Priority::Medium.weight() < Priority::Low.weight());
    }

    #[test]
    fn test_request_builder() {
        let req = CoachingRequest::new("fix my offer", BusinessContext::default())
            .with_session_type(SessionType::Strategic)
            .with_user_id("user-1");
        assert_eq!(req.session_type, SessionType::Strategic);
        assert_eq!(req.user_id, "user-1");
    }

    #[test]
    fn test_request_wire_shape() {
        let req = CoachingRequest::new("query", BusinessContext::default());
        let json = serde_json::to_value(&req).expect("serialize");
        assert!(json.get("businessContext").is_some());
        assert_eq!(json["sessionType"], "diagnostic");
    }
}

//! Delegating conductor: classify, fan out, synthesize
//!
//! The conductor owns the whole pipeline for one coaching query. Selected
//! analyzers run concurrently; each is raced against the configured
//! per-analyzer deadline, and any failure or timeout degrades to the
//! zero-confidence sentinel so one slow specialist never blocks or aborts
//! the response.

use crate::analyzers::default_registry;
use crate::classifier::QueryClassifier;
use crate::config::CoachConfig;
use crate::error::{EngineError, Result};
use crate::memory::ConversationMemory;
use crate::remote::WorkflowClient;
use crate::router::AgentRouter;
use crate::synthesis::Synthesizer;
use coach_core::{
    AgentAnalysis, Analyzer, AnalyzerId, CoachingRequest, CoachingResponse, RoutingDecision,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Orchestrates classification, parallel analysis, and synthesis
pub struct Conductor {
    config: CoachConfig,
    classifier: QueryClassifier,
    router: AgentRouter,
    registry: HashMap<AnalyzerId, Arc<dyn Analyzer>>,
    remote: Option<WorkflowClient>,
    synthesizer: Synthesizer,
    memory: ConversationMemory,
}

impl Conductor {
    /// Build a conductor from validated config
    pub fn new(config: CoachConfig) -> Result<Self> {
        config.validate()?;
        let remote = WorkflowClient::from_config(&config)?;
        if remote.is_some() {
            tracing::info!("analyzer workflows run remotely");
        } else {
            tracing::info!("analyzer workflows run in-process");
        }

        Ok(Self {
            classifier: QueryClassifier::new(),
            router: AgentRouter::new(),
            registry: default_registry(),
            remote,
            synthesizer: Synthesizer::new(config.max_action_items),
            memory: ConversationMemory::new(config.memory_turns),
            config,
        })
    }

    /// Process one coaching query end to end
    pub async fn coach(&self, request: &CoachingRequest) -> Result<CoachingResponse> {
        let request_id = uuid::Uuid::new_v4();
        let selected = self
            .classifier
            .select_analyzers(&request.query, request.session_type);
        tracing::info!(
            %request_id,
            query_len = request.query.len(),
            analyzers = selected.len(),
            session_type = ?request.session_type,
            "processing coaching query"
        );

        let analyses = self.run_analyzers(&selected, request).await;

        let recurring = self.memory.recurring_analyzers(&request.user_id, &selected);
        let (response, turn) = self.synthesizer.synthesize(request, analyses, &recurring);
        self.memory.record(&request.user_id, turn);

        Ok(response)
    }

    /// Routing decision for UI visualization; independent of `coach`
    pub fn route(&self, request: &CoachingRequest) -> RoutingDecision {
        self.router.route(&request.query, request.session_type)
    }

    /// Prior turn count for a user's session
    pub fn session_turns(&self, user_id: &str) -> usize {
        self.memory.turn_count(user_id)
    }

    /// Fan out over the selected analyzers; output order matches `selected`
    async fn run_analyzers(
        &self,
        selected: &[AnalyzerId],
        request: &CoachingRequest,
    ) -> Vec<AgentAnalysis> {
        let futures = selected.iter().map(|id| self.run_one(*id, request));
        join_all(futures).await
    }

    /// Run a single analyzer against the deadline; never fails, degrades
    /// to the sentinel instead
    async fn run_one(&self, id: AnalyzerId, request: &CoachingRequest) -> AgentAnalysis {
        let deadline = self.config.analyzer_timeout;
        let outcome = tokio::time::timeout(deadline, self.dispatch(id, request)).await;

        match outcome {
            Ok(Ok(analysis)) => analysis,
            Ok(Err(err)) => {
                tracing::warn!(analyzer = %id, error = %err, "analyzer failed, degrading");
                AgentAnalysis::unavailable(id)
            }
            Err(_) => {
                tracing::warn!(analyzer = %id, ?deadline, "analyzer timed out, degrading");
                AgentAnalysis::unavailable(id)
            }
        }
    }

    async fn dispatch(&self, id: AnalyzerId, request: &CoachingRequest) -> Result<AgentAnalysis> {
        if let Some(remote) = &self.remote {
            return remote
                .analyze(
                    id,
                    &request.query,
                    &request.business_context,
                    request.session_type,
                )
                .await;
        }

        let analyzer = self
            .registry
            .get(&id)
            .ok_or_else(|| EngineError::Other(format!("no analyzer registered for {id}")))?;
        Ok(analyzer.analyze(&request.query, &request.business_context).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::{BusinessContext, SessionType};

    fn conductor() -> Conductor {
        Conductor::new(CoachConfig::default()).expect("conductor")
    }

    fn context() -> BusinessContext {
        BusinessContext {
            cac: Some(100.0),
            ltv: Some(500.0),
            gross_margin: Some(70.0),
            current_revenue: Some(600_000.0),
            customer_count: Some(250),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_coach_produces_one_analysis_per_selected() {
        let conductor = conductor();
        let request = CoachingRequest::new("hello", context())
            .with_session_type(SessionType::Strategic)
            .with_user_id("u1");

        let response = conductor.coach(&request).await.expect("coach");
        let agents: Vec<AnalyzerId> = response.analysis.iter().map(|a| a.agent).collect();
        assert_eq!(agents, AnalyzerId::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_coach_is_idempotent() {
        let conductor = conductor();
        let request = CoachingRequest::new("Is my offer priced right given my CAC?", context());

        let a = conductor.coach(&request).await.expect("coach");
        let b = conductor.coach(&request).await.expect("coach");
        assert_eq!(a.analysis, b.analysis);
        assert_eq!(a.action_items, b.action_items);
    }

    #[tokio::test]
    async fn test_action_item_cap_respected() {
        let config = CoachConfig::builder().max_action_items(3).build().expect("config");
        let conductor = Conductor::new(config).expect("conductor");
        let request = CoachingRequest::new("full review please", context())
            .with_session_type(SessionType::Strategic);

        let response = conductor.coach(&request).await.expect("coach");
        assert!(response.action_items.len() <= 3);
    }

    #[tokio::test]
    async fn test_memory_records_turns_per_user() {
        let conductor = conductor();
        let request = CoachingRequest::new("what's my constraint", context()).with_user_id("u1");

        conductor.coach(&request).await.expect("coach");
        conductor.coach(&request).await.expect("coach");
        assert_eq!(conductor.session_turns("u1"), 2);
        assert_eq!(conductor.session_turns("u2"), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_degrades_to_sentinel() {
        // Unreachable endpoint: every analyzer degrades, response still forms
        let config = CoachConfig::builder()
            .workflow_endpoint("http://127.0.0.1:9")
            .request_timeout(std::time::Duration::from_millis(200))
            .analyzer_timeout(std::time::Duration::from_millis(500))
            .build()
            .expect("config");
        let conductor = Conductor::new(config).expect("conductor");
        let request = CoachingRequest::new("fix my pricing", context());

        let response = conductor.coach(&request).await.expect("coach");
        assert!(!response.analysis.is_empty());
        for analysis in &response.analysis {
            assert!((analysis.confidence - 0.0).abs() < f64::EPSILON);
            assert!(analysis.findings[0].contains("Error connecting"));
        }
        assert!(!response.synthesis.is_empty());
    }

    #[tokio::test]
    async fn test_offer_and_cac_query_runs_both_specialists() {
        let conductor = conductor();
        let request =
            CoachingRequest::new("Is my offer priced right given my CAC of $150?", context());

        let response = conductor.coach(&request).await.expect("coach");
        let agents: Vec<AnalyzerId> = response.analysis.iter().map(|a| a.agent).collect();
        assert!(agents.contains(&AnalyzerId::Offer));
        assert!(agents.contains(&AnalyzerId::Financial));
        assert!(!response.frameworks.is_empty());
        assert!(!response.next_steps.is_empty());
    }

    #[test]
    fn test_route_is_exposed() {
        let conductor = conductor();
        let request = CoachingRequest::new("improve my upsell and continuity", context());
        let decision = conductor.route(&request);
        assert_eq!(decision.primary.agent, AnalyzerId::MoneyModel);
    }
}

//! Coaching-methodology analyzer: how to run the session itself
//!
//! Maps the query onto a coaching focus (diagnose, strategize, or execute)
//! and names the frameworks worth walking through for the detected domains.

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, MethodologyMetrics,
    Result,
};

const DIAGNOSE_KEYWORDS: [&str; 5] = ["why", "diagnos", "stuck", "problem", "wrong"];
const EXECUTE_KEYWORDS: [&str; 5] = ["implement", "execute", "rollout", "how do i start", "plan"];

/// (framework, domain keywords that make it applicable)
const FRAMEWORK_MAP: [(&str, &[&str]); 5] = [
    ("Value Equation", &["offer", "pricing", "price", "value"]),
    ("Client-Financed Acquisition", &["cac", "ltv", "ads", "acquisition"]),
    ("4-Prong Money Model", &["upsell", "recurring", "continuity", "revenue"]),
    ("Theory of Constraints", &["constraint", "bottleneck", "stuck"]),
    ("Buyer Psychology", &["conversion", "urgency", "psychology", "objection"]),
];

/// Analyzer producing session-structure guidance
#[derive(Debug, Clone, Default)]
pub struct MethodologyAnalyzer;

impl MethodologyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn session_focus(query_lower: &str) -> &'static str {
        if contains_any(query_lower, &EXECUTE_KEYWORDS) {
            "execute"
        } else if contains_any(query_lower, &DIAGNOSE_KEYWORDS) {
            "diagnose"
        } else {
            "strategize"
        }
    }

    fn applicable_frameworks(query_lower: &str) -> Vec<String> {
        let matched: Vec<String> = FRAMEWORK_MAP
            .iter()
            .filter(|(_, keywords)| contains_any(query_lower, keywords))
            .map(|(framework, _)| (*framework).to_string())
            .collect();

        if matched.is_empty() {
            // Every session can at least be run through constraint discovery
            vec!["Theory of Constraints".to_string()]
        } else {
            matched
        }
    }

    /// Flat base 50, +5 when any numeric facts exist, capped at 60
    fn confidence(context: &BusinessContext) -> f64 {
        let mut confidence: f64 = 50.0;
        if context.known_field_count() > 0 {
            confidence += 5.0;
        }
        confidence.min(60.0)
    }
}

#[async_trait]
impl Analyzer for MethodologyAnalyzer {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let query_lower = query.to_lowercase();
        let metrics = MethodologyMetrics {
            session_focus: Self::session_focus(&query_lower).to_string(),
            applicable_frameworks: Self::applicable_frameworks(&query_lower),
        };

        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        analysis.findings.push(format!(
            "Session focus: {} ({} framework(s) applicable)",
            metrics.session_focus,
            metrics.applicable_frameworks.len()
        ));
        analysis.findings.push(format!(
            "Applicable frameworks: {}",
            metrics.applicable_frameworks.join(", ")
        ));

        analysis.recommendations.push(match metrics.session_focus.as_str() {
            "diagnose" => {
                "Run a discovery pass first: metrics review, then constraint questions".to_string()
            }
            "execute" => {
                "Keep the session to one decision and one committed next action".to_string()
            }
            _ => "Walk the applicable frameworks in order before picking a direction".to_string(),
        });
        if let Some(first) = metrics.applicable_frameworks.first() {
            analysis
                .recommendations
                .push(format!("Start with the {first} framework"));
        }

        analysis.metrics = Some(AnalysisMetrics::Methodology(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::Methodology
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}

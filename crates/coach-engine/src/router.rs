//! Routing decision engine for UI visualization
//!
//! This is deliberately a second, independent classifier over the same
//! query: it scores per-domain keyword density and overall complexity to
//! produce a `RoutingDecision` (primary agent, scored secondaries,
//! collaborative-mode flag). Its output drives visualization only and never
//! feeds back into the conductor's analyzer selection.

use crate::classifier::ClassifierKeywords;
use coach_core::{AgentScore, AnalyzerId, RoutingDecision, SessionType};

/// Collaborative mode engages at or above this complexity score
const COLLABORATIVE_THRESHOLD: u32 = 6;

/// Scores query complexity and produces routing decisions
#[derive(Debug, Clone, Default)]
pub struct AgentRouter {
    keywords: ClassifierKeywords,
}

impl AgentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(keywords: ClassifierKeywords) -> Self {
        Self { keywords }
    }

    /// Produce a routing decision for a query
    pub fn route(&self, query: &str, session_type: SessionType) -> RoutingDecision {
        let query_lower = query.to_lowercase();
        let mut scored = self.score_domains(&query_lower);

        // Highest keyword density wins; ties resolve to canonical order
        // because the scoring pass walks AnalyzerId::ALL
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let complexity = self.complexity(&query_lower, &scored, session_type);
        let collaborative = complexity >= COLLABORATIVE_THRESHOLD
            || scored.iter().filter(|(_, hits)| *hits >= 2).count() >= 2;

        let (primary_id, primary_hits) = scored[0];
        let primary = AgentScore {
            agent: primary_id,
            confidence: hit_confidence(primary_hits),
        };

        let secondary: Vec<AgentScore> = scored[1..]
            .iter()
            .filter(|(_, hits)| *hits > 0)
            .take(3)
            .map(|(agent, hits)| AgentScore {
                agent: *agent,
                confidence: hit_confidence(*hits),
            })
            .collect();

        let execution_plan = if collaborative {
            let mut agents = vec![primary.agent];
            agents.extend(secondary.iter().map(|s| s.agent));
            format!(
                "Run {} in parallel, then merge into a single prioritized response",
                agents
                    .iter()
                    .map(AnalyzerId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        } else {
            format!("Run {} alone", primary.agent)
        };

        let reasoning = format!(
            "complexity {} ({} domain hits, {} words); primary {} with {} keyword hits",
            complexity,
            scored.iter().filter(|(_, hits)| *hits > 0).count(),
            query_lower.split_whitespace().count(),
            primary.agent,
            primary_hits,
        );

        tracing::debug!(%reasoning, collaborative, "routing decision");

        RoutingDecision {
            primary,
            secondary,
            collaborative_mode: collaborative,
            execution_plan,
            reasoning,
        }
    }

    /// Keyword hits per analyzer domain, canonical order preserved
    fn score_domains(&self, query_lower: &str) -> Vec<(AnalyzerId, u32)> {
        let tables: [(AnalyzerId, &[String]); 7] = [
            (AnalyzerId::Offer, &self.keywords.offer),
            (AnalyzerId::Financial, &self.keywords.financial),
            (AnalyzerId::MoneyModel, &self.keywords.money_model),
            (AnalyzerId::Psychology, &self.keywords.psychology),
            (AnalyzerId::Implementation, &self.keywords.implementation),
            (AnalyzerId::Constraint, &self.keywords.constraint),
            (AnalyzerId::Methodology, &self.keywords.methodology),
        ];

        tables
            .into_iter()
            .map(|(id, table)| {
                let hits = table
                    .iter()
                    .filter(|kw| query_lower.contains(kw.as_str()))
                    .count() as u32;
                (id, hits)
            })
            .collect()
    }

    /// Complexity: total keyword hits, plus one per 15 words of query,
    /// plus two for strategic sessions
    fn complexity(
        &self,
        query_lower: &str,
        scored: &[(AnalyzerId, u32)],
        session_type: SessionType,
    ) -> u32 {
        let keyword_hits: u32 = scored.iter().map(|(_, hits)| hits).sum();
        let length_factor = (query_lower.split_whitespace().count() / 15) as u32;
        let session_factor = if session_type == SessionType::Strategic {
            2
        } else {
            0
        };
        keyword_hits + length_factor + session_factor
    }
}

/// Map a keyword hit count to a display confidence
fn hit_confidence(hits: u32) -> f64 {
    (40.0 + 15.0 * f64::from(hits)).min(95.0)
}

//! Synthesizer: merges independent analyzer outputs into one response
//!
//! Leverage identification uses a fixed precedence: CFA-not-achieved beats
//! offer weakness beats generic money-model architecture. Action items are
//! derived from the flattened recommendations by keyword bucketing, sorted
//! by priority weight, and capped.

use crate::memory::ConversationTurn;
use chrono::Utc;
use coach_core::{
    ActionItem, AgentAnalysis, AnalysisMetrics, AnalyzerId, CoachingRequest, CoachingResponse,
    Priority,
};

/// Keywords that mark a recommendation as cash-flow critical
const CRITICAL_KEYWORDS: [&str; 5] = ["cfa", "cash flow", "payback", "acquisition cost", "cac"];
/// Keywords that mark a recommendation as offer-economics work
const HIGH_KEYWORDS: [&str; 5] = ["offer", "pricing", "price", "upsell", "guarantee"];

/// Where the biggest lever sits, by fixed precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leverage {
    Cfa,
    Offer,
    MoneyModel,
}

/// Merges analyzer outputs into the final `CoachingResponse`
#[derive(Debug, Clone)]
pub struct Synthesizer {
    max_action_items: usize,
}

impl Synthesizer {
    pub fn new(max_action_items: usize) -> Self {
        Self { max_action_items }
    }

    /// Build the final response; also returns the turn to append to memory
    pub fn synthesize(
        &self,
        request: &CoachingRequest,
        analyses: Vec<AgentAnalysis>,
        recurring: &[AnalyzerId],
    ) -> (CoachingResponse, ConversationTurn) {
        let leverage = Self::identify_leverage(&analyses);
        let action_items = self.generate_action_items(&analyses);
        let frameworks = Self::identify_frameworks(&analyses);
        let next_steps = Self::next_steps(leverage, &action_items, recurring);
        let synthesis = Self::narrative(leverage, &analyses);

        let turn = ConversationTurn {
            query: request.query.clone(),
            analyzers: analyses.iter().map(|a| a.agent).collect(),
            synthesis: synthesis.clone(),
            timestamp: Utc::now(),
        };

        let response = CoachingResponse {
            analysis: analyses,
            synthesis,
            action_items,
            next_steps,
            frameworks,
        };

        (response, turn)
    }

    /// Fixed precedence: CFA work, then offer work, then money model
    fn identify_leverage(analyses: &[AgentAnalysis]) -> Leverage {
        let needs_cfa_work = analyses.iter().any(|a| {
            matches!(
                &a.metrics,
                Some(AnalysisMetrics::Cfa(cfa)) if !cfa.achieves_cfa
            )
        });
        if needs_cfa_work {
            return Leverage::Cfa;
        }

        let needs_offer_work = analyses.iter().any(|a| {
            matches!(
                &a.metrics,
                Some(AnalysisMetrics::Offer(offer)) if offer.overall_score < 5.0
            )
        });
        if needs_offer_work {
            return Leverage::Offer;
        }

        Leverage::MoneyModel
    }

    fn priority_for(recommendation_lower: &str) -> Priority {
        if CRITICAL_KEYWORDS
            .iter()
            .any(|kw| recommendation_lower.contains(kw))
        {
            Priority::Critical
        } else if HIGH_KEYWORDS
            .iter()
            .any(|kw| recommendation_lower.contains(kw))
        {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    fn timeline_for(recommendation_lower: &str) -> &'static str {
        if recommendation_lower.contains("test") {
            "1-2 weeks"
        } else if recommendation_lower.contains("implement")
            || recommendation_lower.contains("build")
        {
            "2-4 weeks"
        } else {
            "1-2 weeks"
        }
    }

    fn title_for(recommendation: &str) -> String {
        let first_sentence = recommendation
            .split(['.', ':'])
            .next()
            .unwrap_or(recommendation)
            .trim();
        if first_sentence.chars().count() > 60 {
            let truncated: String = first_sentence.chars().take(57).collect();
            format!("{}...", truncated.trim_end())
        } else {
            first_sentence.to_string()
        }
    }

    /// Flatten recommendations into prioritized action items, capped
    fn generate_action_items(&self, analyses: &[AgentAnalysis]) -> Vec<ActionItem> {
        let mut items: Vec<ActionItem> = analyses
            .iter()
            .flat_map(|analysis| {
                analysis.recommendations.iter().map(|rec| {
                    let rec_lower = rec.to_lowercase();
                    ActionItem {
                        title: Self::title_for(rec),
                        description: rec.clone(),
                        priority: Self::priority_for(&rec_lower),
                        timeline: Self::timeline_for(&rec_lower).to_string(),
                        frameworks: Self::frameworks_for(analysis.agent)
                            .iter()
                            .map(|f| (*f).to_string())
                            .collect(),
                    }
                })
            })
            .collect();

        // Stable sort keeps analyzer order within a priority bucket
        items.sort_by_key(|item| item.priority.weight());
        items.truncate(self.max_action_items);
        items
    }

    /// Framework attribution table, exhaustive over the analyzer set so no
    /// analyzer silently contributes nothing
    fn frameworks_for(agent: AnalyzerId) -> &'static [&'static str] {
        match agent {
            AnalyzerId::Offer => &["Grand Slam Offer", "Value Equation"],
            AnalyzerId::Financial => &["Client-Financed Acquisition", "Advertising Levels"],
            AnalyzerId::MoneyModel => &["4-Prong Money Model", "Value Ladder"],
            AnalyzerId::Psychology => &["Buyer Psychology", "Upsell Timing"],
            AnalyzerId::Implementation => &["Phased Rollout"],
            AnalyzerId::Constraint => &["Theory of Constraints"],
            AnalyzerId::Methodology => &["Coaching Cadence"],
        }
    }

    /// Deduplicated frameworks across every analyzer that produced output
    fn identify_frameworks(analyses: &[AgentAnalysis]) -> Vec<String> {
        let mut frameworks: Vec<String> = Vec::new();
        for analysis in analyses {
            for framework in Self::frameworks_for(analysis.agent) {
                if !frameworks.iter().any(|f| f == framework) {
                    frameworks.push((*framework).to_string());
                }
            }
        }
        frameworks
    }

    fn next_steps(
        leverage: Leverage,
        action_items: &[ActionItem],
        recurring: &[AnalyzerId],
    ) -> Vec<String> {
        let mut steps = vec![match leverage {
            Leverage::Cfa => {
                "Get 30-day gross profit above CAC before anything else; that unlocks paid scale"
                    .to_string()
            }
            Leverage::Offer => {
                "Rebuild the offer against the value equation; distribution can wait".to_string()
            }
            Leverage::MoneyModel => {
                "Economics hold; expand the money-model architecture for the next revenue layer"
                    .to_string()
            }
        }];

        if let Some(top) = action_items.first() {
            steps.push(format!("Start with: {} ({})", top.title, top.timeline));
        }
        if !recurring.is_empty() {
            steps.push(format!(
                "Revisit earlier {} work from this session and note what changed",
                recurring
                    .iter()
                    .map(AnalyzerId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        steps.push("Re-run the analysis once this month's numbers land".to_string());
        steps
    }

    fn narrative(leverage: Leverage, analyses: &[AgentAnalysis]) -> String {
        let usable = analyses.iter().filter(|a| a.confidence > 0.0).count();
        let degraded = analyses.len() - usable;
        let avg_confidence = if analyses.is_empty() {
            0.0
        } else {
            analyses.iter().map(|a| a.confidence).sum::<f64>() / analyses.len() as f64
        };

        let mut narrative = match leverage {
            Leverage::Cfa => {
                "The biggest lever is cash-flow mechanics: acquisition is not yet \
                 client-financed, so growth burns capital."
                    .to_string()
            }
            Leverage::Offer => {
                "The biggest lever is the offer itself: the value equation scores weak, \
                 and everything downstream inherits that weakness."
                    .to_string()
            }
            Leverage::MoneyModel => {
                "Core economics hold; the opportunity is in money-model architecture - \
                 deepening how each customer is monetized."
                    .to_string()
            }
        };

        narrative.push_str(&format!(
            " Based on {} analyzer(s) at {:.0}% average confidence.",
            usable, avg_confidence
        ));
        if degraded > 0 {
            narrative.push_str(&format!(
                " {degraded} analyzer(s) were unavailable; their findings are degraded."
            ));
        }

        if let Some(best) = analyses
            .iter()
            .filter(|a| a.confidence > 0.0)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        {
            if let Some(finding) = best.findings.first() {
                narrative.push_str(&format!(" Key finding: {finding}"));
            }
        }

        narrative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::{BusinessContext, CfaMetrics, OfferMetrics};
    use coach_core::{AdvertisingLevel, PricingStrategy, ValueDimension};

    fn cfa_analysis(achieves: bool) -> AgentAnalysis {
        AgentAnalysis::new(AnalyzerId::Financial, 80.0).with_metrics(AnalysisMetrics::Cfa(
            CfaMetrics {
                cac: 100.0,
                ltv_cac_ratio: 3.0,
                thirty_day_gross_profit: if achieves { 150.0 } else { 80.0 },
                cfa_ratio: if achieves { 1.5 } else { 0.8 },
                achieves_cfa: achieves,
                time_to_breakeven_days: 20.0,
                advertising_level: AdvertisingLevel::BasicViability,
            },
        ))
    }

    fn offer_analysis(score: f64) -> AgentAnalysis {
        AgentAnalysis::new(AnalyzerId::Offer, 60.0).with_metrics(AnalysisMetrics::Offer(
            OfferMetrics {
                dream_outcome: 5,
                perceived_likelihood: 5,
                time_delay: 5,
                effort_sacrifice: 5,
                overall_score: score,
                weakest_dimension: ValueDimension::DreamOutcome,
                pricing_strategy: PricingStrategy::Optimal,
            },
        ))
    }

    fn request() -> CoachingRequest {
        CoachingRequest::new("query", BusinessContext::default())
    }

    #[test]
    fn test_cfa_beats_offer_leverage() {
        let leverage =
            Synthesizer::identify_leverage(&[cfa_analysis(false), offer_analysis(2.0)]);
        assert_eq!(leverage, Leverage::Cfa);
    }

    #[test]
    fn test_offer_beats_money_model_leverage() {
        let leverage =
            Synthesizer::identify_leverage(&[cfa_analysis(true), offer_analysis(2.0)]);
        assert_eq!(leverage, Leverage::Offer);
    }

    #[test]
    fn test_money_model_fallback_leverage() {
        let leverage =
            Synthesizer::identify_leverage(&[cfa_analysis(true), offer_analysis(8.0)]);
        assert_eq!(leverage, Leverage::MoneyModel);
    }

    #[test]
    fn test_priority_buckets() {
        assert_eq!(
            Synthesizer::priority_for("fix your cac payback window"),
            Priority::Critical
        );
        assert_eq!(
            Synthesizer::priority_for("test a price increase"),
            Priority::High
        );
        assert_eq!(
            Synthesizer::priority_for("document the sales script"),
            Priority::Medium
        );
    }

    #[test]
    fn test_timeline_verbs() {
        assert_eq!(Synthesizer::timeline_for("test a new headline"), "1-2 weeks");
        assert_eq!(Synthesizer::timeline_for("implement continuity"), "2-4 weeks");
        assert_eq!(Synthesizer::timeline_for("build the funnel"), "2-4 weeks");
        assert_eq!(Synthesizer::timeline_for("review the metrics"), "1-2 weeks");
    }

    #[test]
    fn test_action_items_sorted_and_capped() {
        let synthesizer = Synthesizer::new(8);
        let mut analyses = Vec::new();
        for _ in 0..4 {
            analyses.push(
                AgentAnalysis::new(AnalyzerId::Constraint, 50.0)
                    .with_recommendation("document the process")
                    .with_recommendation("fix the cac payback")
                    .with_recommendation("test new pricing"),
            );
        }
        let items = synthesizer.generate_action_items(&analyses);
        assert_eq!(items.len(), 8);
        // All criticals sort ahead of highs, highs ahead of mediums
        let weights: Vec<u8> = items.iter().map(|i| i.priority.weight()).collect();
        let mut sorted = weights.clone();
        sorted.sort_unstable();
        assert_eq!(weights, sorted);
        assert_eq!(items[0].priority, Priority::Critical);
    }

    #[test]
    fn test_title_truncation() {
        let long = "Restructure the entire front-end acquisition offer so that every new \
                    customer finances the next one";
        let title = Synthesizer::title_for(long);
        assert!(title.chars().count() <= 60);
        assert!(title.ends_with("..."));

        assert_eq!(
            Synthesizer::title_for("Raise prices. Then measure churn."),
            "Raise prices"
        );
    }

    #[test]
    fn test_framework_attribution_is_total() {
        for id in AnalyzerId::ALL {
            assert!(
                !Synthesizer::frameworks_for(id).is_empty(),
                "no frameworks for {id}"
            );
        }
    }

    #[test]
    fn test_frameworks_deduplicated() {
        let analyses = vec![
            AgentAnalysis::new(AnalyzerId::Offer, 50.0),
            AgentAnalysis::new(AnalyzerId::Offer, 50.0),
            AgentAnalysis::new(AnalyzerId::Constraint, 50.0),
        ];
        let frameworks = Synthesizer::identify_frameworks(&analyses);
        assert_eq!(
            frameworks,
            vec![
                "Grand Slam Offer".to_string(),
                "Value Equation".to_string(),
                "Theory of Constraints".to_string()
            ]
        );
    }

    #[test]
    fn test_full_synthesis_shape() {
        let synthesizer = Synthesizer::new(8);
        let (response, turn) = synthesizer.synthesize(
            &request(),
            vec![cfa_analysis(false), offer_analysis(3.0)],
            &[],
        );
        assert!(response.synthesis.contains("client-financed"));
        assert!(!response.next_steps.is_empty());
        assert!(response.frameworks.contains(&"Advertising Levels".to_string()));
        assert_eq!(turn.analyzers, vec![AnalyzerId::Financial, AnalyzerId::Offer]);
    }

    #[test]
    fn test_degraded_analyses_noted() {
        let synthesizer = Synthesizer::new(8);
        let (response, _) = synthesizer.synthesize(
            &request(),
            vec![AgentAnalysis::unavailable(AnalyzerId::Psychology), cfa_analysis(true)],
            &[],
        );
        assert!(response.synthesis.contains("unavailable"));
    }
}

//! Offer analyzer: value-equation scoring and pricing-strategy heuristic
//!
//! Scores four sub-dimensions 1-10 from literal substring triggers in the
//! lower-cased query. Time delay and effort/sacrifice are lower-is-better;
//! they are inverted (`11 - score`) before the weakest dimension is picked.

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, OfferMetrics,
    PricingStrategy, Result, ValueDimension,
};
use serde::{Deserialize, Serialize};

/// Substring triggers for the four value-equation dimensions
///
/// Injected rather than global so the tables can be versioned and tested
/// on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueEquationTriggers {
    pub version: u32,
    /// (trigger, score) pairs; first hit wins within a dimension
    pub dream_outcome: Vec<(String, u8)>,
    pub perceived_likelihood: Vec<(String, u8)>,
    pub time_delay: Vec<(String, u8)>,
    pub effort_sacrifice: Vec<(String, u8)>,
}

fn table(entries: &[(&str, u8)]) -> Vec<(String, u8)> {
    entries
        .iter()
        .map(|(trigger, score)| ((*trigger).to_string(), *score))
        .collect()
}

impl Default for ValueEquationTriggers {
    fn default() -> Self {
        Self {
            version: 1,
            dream_outcome: table(&[
                ("transform", 9),
                ("revolutionary", 9),
                ("breakthrough", 9),
                ("double", 8),
                ("improve", 7),
                ("grow", 7),
            ]),
            perceived_likelihood: table(&[
                ("guarantee", 9),
                ("proven", 9),
                ("case stud", 8),
                ("track record", 8),
                ("testimonial", 8),
            ]),
            time_delay: table(&[
                ("instant", 2),
                ("immediate", 2),
                ("fast", 3),
                ("quick", 3),
                ("months", 8),
                ("long-term", 8),
            ]),
            effort_sacrifice: table(&[
                ("done for you", 2),
                ("automated", 2),
                ("hands-off", 3),
                ("turnkey", 3),
                ("do it yourself", 8),
                ("diy", 8),
            ]),
        }
    }
}

const DEFAULT_SCORE: u8 = 5;

/// Analyzer scoring offer attractiveness with the value equation
#[derive(Debug, Clone, Default)]
pub struct OfferAnalyzer {
    triggers: ValueEquationTriggers,
}

impl OfferAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_triggers(triggers: ValueEquationTriggers) -> Self {
        Self { triggers }
    }

    fn score_dimension(query_lower: &str, table: &[(String, u8)]) -> u8 {
        table
            .iter()
            .find(|(trigger, _)| query_lower.contains(trigger.as_str()))
            .map_or(DEFAULT_SCORE, |(_, score)| *score)
    }

    /// Strength of a dimension for weakest-link comparison; the
    /// lower-is-better axes are inverted so every axis reads higher-is-better
    fn strengths(metrics: &OfferMetrics) -> [(ValueDimension, u8); 4] {
        [
            (ValueDimension::DreamOutcome, metrics.dream_outcome),
            (
                ValueDimension::PerceivedLikelihood,
                metrics.perceived_likelihood,
            ),
            (ValueDimension::TimeDelay, 11 - metrics.time_delay),
            (ValueDimension::EffortSacrifice, 11 - metrics.effort_sacrifice),
        ]
    }

    fn classify_pricing(overall_score: f64, gross_margin: f64) -> PricingStrategy {
        if overall_score > 7.0 && gross_margin < 80.0 {
            PricingStrategy::Underpriced
        } else if overall_score < 4.0 && gross_margin > 70.0 {
            PricingStrategy::Overpriced
        } else {
            PricingStrategy::Optimal
        }
    }

    /// Base 40, +15 gross margin, +15 ltv, +10 revenue, capped at 80
    fn confidence(context: &BusinessContext) -> f64 {
        let mut confidence: f64 = 40.0;
        if context.gross_margin.is_some() {
            confidence += 15.0;
        }
        if context.ltv.is_some() {
            confidence += 15.0;
        }
        if context.current_revenue.is_some() {
            confidence += 10.0;
        }
        confidence.min(80.0)
    }

    /// Score a query without building the full analysis envelope
    pub fn score(&self, query: &str, context: &BusinessContext) -> OfferMetrics {
        let query_lower = query.to_lowercase();

        let dream_outcome = Self::score_dimension(&query_lower, &self.triggers.dream_outcome);
        let perceived_likelihood =
            Self::score_dimension(&query_lower, &self.triggers.perceived_likelihood);
        let time_delay = Self::score_dimension(&query_lower, &self.triggers.time_delay);
        let effort_sacrifice =
            Self::score_dimension(&query_lower, &self.triggers.effort_sacrifice);

        let raw = f64::from(dream_outcome) * f64::from(perceived_likelihood)
            / (f64::from(time_delay) * f64::from(effort_sacrifice))
            * 10.0;
        let overall_score = (raw * 100.0).round() / 100.0;

        let mut metrics = OfferMetrics {
            dream_outcome,
            perceived_likelihood,
            time_delay,
            effort_sacrifice,
            overall_score,
            weakest_dimension: ValueDimension::DreamOutcome,
            pricing_strategy: PricingStrategy::Optimal,
        };

        // min_by_key keeps the first minimum, giving a fixed tie-break order
        metrics.weakest_dimension = Self::strengths(&metrics)
            .into_iter()
            .min_by_key(|(_, strength)| *strength)
            .map(|(dimension, _)| dimension)
            .unwrap_or(ValueDimension::DreamOutcome);

        metrics.pricing_strategy =
            Self::classify_pricing(overall_score, context.gross_margin_or_default());

        metrics
    }
}

#[async_trait]
impl Analyzer for OfferAnalyzer {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let metrics = self.score(query, context);
        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        analysis.findings.push(format!(
            "Value equation score {:.2} (dream {}, likelihood {}, delay {}, effort {})",
            metrics.overall_score,
            metrics.dream_outcome,
            metrics.perceived_likelihood,
            metrics.time_delay,
            metrics.effort_sacrifice
        ));
        analysis.findings.push(format!(
            "Weakest dimension: {}",
            metrics.weakest_dimension.label()
        ));
        analysis.findings.push(match metrics.pricing_strategy {
            PricingStrategy::Underpriced => {
                "Offer appears underpriced for the value it delivers".to_string()
            }
            PricingStrategy::Overpriced => {
                "Offer appears overpriced relative to its perceived value".to_string()
            }
            PricingStrategy::Optimal => "Pricing sits in a defensible range".to_string(),
        });

        analysis.recommendations.push(match metrics.weakest_dimension {
            ValueDimension::DreamOutcome => {
                "Sharpen the promised outcome: name the specific before/after the buyer gets"
                    .to_string()
            }
            ValueDimension::PerceivedLikelihood => {
                "Stack proof: add a guarantee, case studies, and named results".to_string()
            }
            ValueDimension::TimeDelay => {
                "Pull value forward: deliver a visible win in the first week".to_string()
            }
            ValueDimension::EffortSacrifice => {
                "Reduce buyer effort: add done-for-you components or automate onboarding"
                    .to_string()
            }
        });
        if metrics.pricing_strategy == PricingStrategy::Underpriced {
            analysis
                .recommendations
                .push("Test a price increase of 20-30% on new customers".to_string());
        }

        analysis.metrics = Some(AnalysisMetrics::Offer(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::Offer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_query_scores_default() {
        let analyzer = OfferAnalyzer::new();
        let metrics = analyzer.score("help with my offer", &BusinessContext::default());
        assert_eq!(metrics.dream_outcome, 5);
        assert_eq!(metrics.time_delay, 5);
        // (5*5)/(5*5)*10 = 10.0
        assert!((metrics.overall_score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_trigger_scoring() {
        let analyzer = OfferAnalyzer::new();
        let metrics = analyzer.score(
            "a transformative, done for you system with instant results and a guarantee",
            &BusinessContext::default(),
        );
        assert_eq!(metrics.dream_outcome, 9); // "transform"
        assert_eq!(metrics.perceived_likelihood, 9); // "guarantee"
        assert_eq!(metrics.time_delay, 2); // "instant"
        assert_eq!(metrics.effort_sacrifice, 2); // "done for you"
        // (9*9)/(2*2)*10 = 202.5
        assert!((metrics.overall_score - 202.5).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_two_decimals() {
        let analyzer = OfferAnalyzer::new();
        // dream 7 ("improve"), likelihood 5, delay 3 ("fast"), effort 5
        // (7*5)/(3*5)*10 = 23.333... -> 23.33
        let metrics = analyzer.score("improve results fast", &BusinessContext::default());
        assert!((metrics.overall_score - 23.33).abs() < 1e-9);
    }

    #[test]
    fn test_weakest_dimension_inverts_lower_is_better() {
        let analyzer = OfferAnalyzer::new();
        // delay 8 ("months") -> strength 3; everything else strength >= 5
        let metrics = analyzer.score(
            "proven program that takes months",
            &BusinessContext::default(),
        );
        assert_eq!(metrics.weakest_dimension, ValueDimension::TimeDelay);
    }

    #[test]
    fn test_weakest_tie_break_is_first_dimension() {
        let analyzer = OfferAnalyzer::new();
        // All dimensions at default: strengths are 5,5,6,6 so dream outcome
        // and likelihood tie; dream outcome wins by order
        let metrics = analyzer.score("generic question", &BusinessContext::default());
        assert_eq!(metrics.weakest_dimension, ValueDimension::DreamOutcome);
    }

    #[test]
    fn test_pricing_underpriced() {
        let ctx = BusinessContext {
            gross_margin: Some(60.0),
            ..Default::default()
        };
        let analyzer = OfferAnalyzer::new();
        let metrics = analyzer.score("proven transformation, instant and done for you", &ctx);
        assert!(metrics.overall_score > 7.0);
        assert_eq!(metrics.pricing_strategy, PricingStrategy::Underpriced);
    }

    #[test]
    fn test_pricing_overpriced() {
        let ctx = BusinessContext {
            gross_margin: Some(85.0),
            ..Default::default()
        };
        let analyzer = OfferAnalyzer::new();
        // dream 5 * likelihood 5 / (delay 8 * effort 8) * 10 = 3.91
        let metrics = analyzer.score("takes months of diy work", &ctx);
        assert!(metrics.overall_score < 4.0);
        assert_eq!(metrics.pricing_strategy, PricingStrategy::Overpriced);
    }

    #[test]
    fn test_pricing_optimal_default_margin() {
        let analyzer = OfferAnalyzer::new();
        let metrics = analyzer.score("takes months of diy work", &BusinessContext::default());
        // margin defaults to 50, below the 70 floor for overpriced
        assert_eq!(metrics.pricing_strategy, PricingStrategy::Optimal);
    }

    #[tokio::test]
    async fn test_analysis_envelope() {
        let analyzer = OfferAnalyzer::new();
        let analysis = analyzer
            .analyze("improve my guarantee", &BusinessContext::default())
            .await
            .expect("analyze");
        assert_eq!(analysis.agent, AnalyzerId::Offer);
        assert!(!analysis.findings.is_empty());
        assert!(!analysis.recommendations.is_empty());
        assert!(matches!(
            analysis.metrics,
            Some(AnalysisMetrics::Offer(_))
        ));
        assert!((analysis.confidence - 40.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let analyzer = OfferAnalyzer::new();
        let ctx = BusinessContext {
            gross_margin: Some(60.0),
            ..Default::default()
        };
        let a = analyzer.analyze("fix my offer", &ctx).await.expect("analyze");
        let b = analyzer.analyze("fix my offer", &ctx).await.expect("analyze");
        assert_eq!(a, b);
    }
}

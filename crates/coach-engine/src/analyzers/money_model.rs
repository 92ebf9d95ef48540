//! Money-model architect: 4-prong assessment and customer journey
//!
//! Evaluates attraction, upsell, downsell, and continuity independently,
//! builds a synthetic 4-stage customer journey, and estimates a
//! revenue-optimization potential as a multiplicative stack. The stack is
//! explicitly heuristic, not empirical: +30% per fully-missing prong, +15%
//! per quick win.

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, BusinessStage,
    JourneyStage, MoneyModelMetrics, ProngAssessment, Result,
};

/// A prong counts as a quick win when it exists but scores at or below this
const QUICK_WIN_EFFECTIVENESS: u8 = 5;

/// Journey-stage benchmarks: (name, conversion rate, benchmark multiple of
/// current stage revenue)
const JOURNEY_STAGES: [(&str, f64, f64); 4] = [
    ("Attraction", 0.03, 1.4),
    ("Core Offer", 0.25, 1.6),
    ("Upsell", 0.30, 2.0),
    ("Continuity", 0.40, 1.8),
];

/// Analyzer assessing the 4-prong money model
#[derive(Debug, Clone, Default)]
pub struct MoneyModelArchitect;

impl MoneyModelArchitect {
    pub fn new() -> Self {
        Self
    }

    fn attraction(query_lower: &str, context: &BusinessContext) -> ProngAssessment {
        let exists = contains_any(query_lower, &["lead magnet", "free", "front-end", "attraction"])
            || context.customer_count.unwrap_or(0) > 0;
        let effectiveness = if exists {
            if matches!(
                context.business_stage,
                BusinessStage::Growth | BusinessStage::Scale | BusinessStage::Mature
            ) {
                7
            } else {
                6
            }
        } else {
            3
        };
        let recommendations = if exists {
            vec!["Tighten the attraction offer around one specific painful problem".to_string()]
        } else {
            vec![
                "Build an attraction offer: a low-friction front-end that acquires customers at breakeven"
                    .to_string(),
            ]
        };
        ProngAssessment {
            exists,
            effectiveness,
            recommendations,
        }
    }

    fn upsell(query_lower: &str, context: &BusinessContext) -> ProngAssessment {
        let exists = contains_any(query_lower, &["upsell", "premium", "upgrade", "add-on"]);
        let high_ltv = match (context.ltv, context.cac) {
            (Some(ltv), Some(cac)) if cac > 0.0 => ltv / cac >= 3.0,
            _ => false,
        };
        let effectiveness = if exists {
            if high_ltv { 7 } else { 6 }
        } else {
            2
        };
        let recommendations = if exists {
            vec!["Move the upsell to the moment of purchase, not a week later".to_string()]
        } else {
            vec!["Add an immediate upsell at the point of sale to lift 30-day revenue".to_string()]
        };
        ProngAssessment {
            exists,
            effectiveness,
            recommendations,
        }
    }

    fn downsell(query_lower: &str) -> ProngAssessment {
        let exists = contains_any(
            query_lower,
            &["downsell", "payment plan", "lite version", "starter tier"],
        );
        let effectiveness = if exists { 6 } else { 2 };
        let recommendations = if exists {
            vec!["Present the downsell only after a clear no on the core offer".to_string()]
        } else {
            vec!["Add a downsell (payment plan or lite tier) to recover declined buyers".to_string()]
        };
        ProngAssessment {
            exists,
            effectiveness,
            recommendations,
        }
    }

    fn continuity(query_lower: &str, context: &BusinessContext) -> ProngAssessment {
        let exists = contains_any(
            query_lower,
            &["recurring", "subscription", "membership", "retainer", "continuity"],
        ) || context.business_stage == BusinessStage::Scale;
        let effectiveness = if exists { 8 } else { 3 };
        let recommendations = if exists {
            vec!["Anchor continuity to an ongoing outcome, not ongoing access".to_string()]
        } else {
            vec!["Introduce a continuity component so revenue stops resetting each month".to_string()]
        };
        ProngAssessment {
            exists,
            effectiveness,
            recommendations,
        }
    }

    /// Synthetic 4-stage journey with per-stage revenue estimates
    ///
    /// Potential is the stage benchmark capped at 1.5x current; a stage is
    /// underperforming when the cap engages, i.e. the uncapped benchmark
    /// sits at least 50% above current.
    fn journey(context: &BusinessContext) -> Vec<JourneyStage> {
        let monthly_revenue = context.estimated_monthly_revenue_per_customer();

        JOURNEY_STAGES
            .iter()
            .map(|(name, conversion, benchmark_multiple)| {
                let current = monthly_revenue * conversion;
                let benchmark = current * benchmark_multiple;
                let potential = benchmark.min(current * 1.5);
                let underperforming = benchmark >= current * 1.5 && current > 0.0;
                JourneyStage {
                    name: (*name).to_string(),
                    conversion_rate: *conversion,
                    monthly_revenue: current,
                    potential_revenue: potential,
                    underperforming,
                }
            })
            .collect()
    }

    /// Multiplicative uplift stack: x1.30 per missing prong, x1.15 per quick win
    fn revenue_uplift_pct(prongs: &[&ProngAssessment]) -> f64 {
        let mut multiplier = 1.0_f64;
        for prong in prongs {
            if !prong.exists {
                multiplier *= 1.30;
            } else if prong.effectiveness <= QUICK_WIN_EFFECTIVENESS {
                multiplier *= 1.15;
            }
        }
        (multiplier - 1.0) * 100.0
    }

    /// Base 35, +15 revenue, +15 customer count, +10 ltv, capped at 75
    fn confidence(context: &BusinessContext) -> f64 {
        let mut confidence: f64 = 35.0;
        if context.current_revenue.is_some() {
            confidence += 15.0;
        }
        if context.customer_count.is_some() {
            confidence += 15.0;
        }
        if context.ltv.is_some() {
            confidence += 10.0;
        }
        confidence.min(75.0)
    }

    pub fn assess(&self, query: &str, context: &BusinessContext) -> MoneyModelMetrics {
        let query_lower = query.to_lowercase();

        let attraction = Self::attraction(&query_lower, context);
        let upsell = Self::upsell(&query_lower, context);
        let downsell = Self::downsell(&query_lower);
        let continuity = Self::continuity(&query_lower, context);

        let mean = f64::from(
            u32::from(attraction.effectiveness)
                + u32::from(upsell.effectiveness)
                + u32::from(downsell.effectiveness)
                + u32::from(continuity.effectiveness),
        ) / 4.0;
        let overall_maturity = mean.round() as u8;

        let revenue_uplift_pct =
            Self::revenue_uplift_pct(&[&attraction, &upsell, &downsell, &continuity]);

        MoneyModelMetrics {
            attraction,
            upsell,
            downsell,
            continuity,
            overall_maturity,
            journey: Self::journey(context),
            revenue_uplift_pct,
        }
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}

#[async_trait]
impl Analyzer for MoneyModelArchitect {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let metrics = self.assess(query, context);
        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        let missing: Vec<&str> = metrics
            .prongs()
            .into_iter()
            .filter(|(_, prong)| !prong.exists)
            .map(|(name, _)| name)
            .collect();

        analysis.findings.push(format!(
            "Money-model maturity {}/10 across the four prongs",
            metrics.overall_maturity
        ));
        if missing.is_empty() {
            analysis
                .findings
                .push("All four prongs are present; optimize effectiveness next".to_string());
        } else {
            analysis
                .findings
                .push(format!("Missing prongs: {}", missing.join(", ")));
        }
        for stage in metrics.journey.iter().filter(|s| s.underperforming) {
            analysis.findings.push(format!(
                "Journey stage '{}' is underperforming: ${:.0}/customer vs ${:.0} potential",
                stage.name, stage.monthly_revenue, stage.potential_revenue
            ));
        }
        analysis.findings.push(format!(
            "Estimated revenue-optimization potential: +{:.0}%",
            metrics.revenue_uplift_pct
        ));

        for (_, prong) in metrics.prongs() {
            analysis
                .recommendations
                .extend(prong.recommendations.iter().cloned());
        }

        analysis.metrics = Some(AnalysisMetrics::MoneyModel(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::MoneyModel
    }
}

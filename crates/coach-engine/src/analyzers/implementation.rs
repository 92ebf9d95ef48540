//! Implementation planner: phased rollout, priority matrix, risk register
//!
//! Builds Foundation -> Quick Wins -> conditional focus phases -> Optimization
//! with fixed per-phase durations, buckets a static action catalog by
//! first-match-wins urgency/impact thresholds, and unrolls the phases into a
//! week-by-week timeline.

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, ImplementationMetrics,
    PlanPhase, Result, Risk,
};

/// Static catalog of candidate actions: (action, urgency, impact)
const ACTION_CATALOG: [(&str, u8, u8); 8] = [
    ("Instrument CAC, LTV, and gross margin tracking", 9, 9),
    ("Launch an immediate point-of-sale upsell", 8, 9),
    ("Rewrite the core offer around the value equation", 7, 9),
    ("Add a continuity tier to stabilize revenue", 6, 8),
    ("Stand up a win-back campaign for lapsed customers", 6, 6),
    ("Document the sales script and objection handling", 5, 6),
    ("Refresh creative on the top acquisition channel", 4, 5),
    ("Tidy internal reporting dashboards", 2, 3),
];

/// Fixed risk register: (risk, probability, impact, mitigation)
const RISK_REGISTER: [(&str, u8, u8, &str); 5] = [
    (
        "Price changes churn existing customers",
        5,
        7,
        "Grandfather current customers; apply new pricing to new cohorts only",
    ),
    (
        "Team bandwidth stalls the rollout",
        7,
        6,
        "Cap work in progress to one phase at a time",
    ),
    (
        "New upsell cannibalizes the core offer",
        4,
        6,
        "Position the upsell as acceleration, not replacement",
    ),
    (
        "Ad spend scales ahead of payback",
        5,
        8,
        "Hold budget increases until CFA ratio clears 1.0",
    ),
    (
        "Metrics are wrong and decisions follow them",
        3,
        9,
        "Reconcile tracked CAC/LTV against bank statements monthly",
    ),
];

const OFFER_FOCUS: [&str; 4] = ["offer", "pricing", "price", "guarantee"];
const CFA_FOCUS: [&str; 5] = ["cac", "ltv", "cash flow", "advertising", "paid ads"];
const MONEY_MODEL_FOCUS: [&str; 4] = ["upsell", "continuity", "recurring", "money model"];

/// Analyzer producing the phased rollout plan
#[derive(Debug, Clone, Default)]
pub struct ImplementationPlanner;

impl ImplementationPlanner {
    pub fn new() -> Self {
        Self
    }

    fn phases(query_lower: &str) -> Vec<PlanPhase> {
        let mut phases = vec![
            PlanPhase {
                name: "Foundation".to_string(),
                duration_weeks: 2,
                activities: vec![
                    "Baseline CAC, LTV, margin, and conversion metrics".to_string(),
                    "Agree on the single constraint to attack first".to_string(),
                ],
            },
            PlanPhase {
                name: "Quick Wins".to_string(),
                duration_weeks: 2,
                activities: vec![
                    "Ship the highest-urgency action from the priority matrix".to_string(),
                    "Test one pricing or upsell change on new customers".to_string(),
                ],
            },
        ];

        if contains_any(query_lower, &CFA_FOCUS) {
            phases.push(PlanPhase {
                name: "Client-Financed Acquisition".to_string(),
                duration_weeks: 3,
                activities: vec![
                    "Restructure the front-end offer to recover CAC in 30 days".to_string(),
                    "Re-test advertising level after the payback change".to_string(),
                ],
            });
        }
        if contains_any(query_lower, &OFFER_FOCUS) {
            phases.push(PlanPhase {
                name: "Offer Rebuild".to_string(),
                duration_weeks: 3,
                activities: vec![
                    "Rework the offer against the four value-equation dimensions".to_string(),
                    "Add risk reversal and proof elements".to_string(),
                ],
            });
        }
        if contains_any(query_lower, &MONEY_MODEL_FOCUS) {
            phases.push(PlanPhase {
                name: "Money-Model Expansion".to_string(),
                duration_weeks: 4,
                activities: vec![
                    "Fill the missing prongs: upsell, downsell, continuity".to_string(),
                    "Wire the upsell into the point of sale".to_string(),
                ],
            });
        }

        phases.push(PlanPhase {
            name: "Optimization".to_string(),
            duration_weeks: 4,
            activities: vec![
                "Review metric movement against the baseline".to_string(),
                "Double down on the highest-leverage change".to_string(),
            ],
        });

        phases
    }

    /// First-match-wins bucket assignment, mutually exclusive
    fn bucket(urgency: u8, impact: u8) -> usize {
        if urgency >= 8 && impact >= 8 {
            0 // critical
        } else if urgency >= 8 || impact >= 8 {
            1 // high
        } else if urgency >= 5 || impact >= 5 {
            2 // medium
        } else {
            3 // low
        }
    }

    fn timeline(phases: &[PlanPhase]) -> Vec<(u8, String)> {
        let mut timeline = Vec::new();
        let mut week = 1_u8;
        for phase in phases {
            for _ in 0..phase.duration_weeks {
                timeline.push((week, phase.name.clone()));
                week = week.saturating_add(1);
            }
        }
        timeline
    }

    fn risks() -> Vec<Risk> {
        RISK_REGISTER
            .iter()
            .map(|(name, probability, impact, mitigation)| Risk {
                name: (*name).to_string(),
                probability: *probability,
                impact: *impact,
                score: probability * impact,
                mitigation: (*mitigation).to_string(),
            })
            .collect()
    }

    /// Base 45, +10 revenue, +10 customer count, capped at 70
    fn confidence(context: &BusinessContext) -> f64 {
        let mut confidence: f64 = 45.0;
        if context.current_revenue.is_some() {
            confidence += 10.0;
        }
        if context.customer_count.is_some() {
            confidence += 10.0;
        }
        confidence.min(70.0)
    }

    pub fn plan(&self, query: &str) -> ImplementationMetrics {
        let query_lower = query.to_lowercase();
        let phases = Self::phases(&query_lower);

        let mut buckets: [Vec<String>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for (action, urgency, impact) in ACTION_CATALOG {
            buckets[Self::bucket(urgency, impact)].push(action.to_string());
        }
        let [critical, high, medium, low] = buckets;

        let timeline = Self::timeline(&phases);

        ImplementationMetrics {
            phases,
            critical,
            high,
            medium,
            low,
            timeline,
            risks: Self::risks(),
        }
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}

#[async_trait]
impl Analyzer for ImplementationPlanner {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let metrics = self.plan(query);
        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        let total_weeks: u32 = metrics
            .phases
            .iter()
            .map(|p| u32::from(p.duration_weeks))
            .sum();
        analysis.findings.push(format!(
            "{}-phase rollout over {} weeks: {}",
            metrics.phases.len(),
            total_weeks,
            metrics
                .phases
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        ));
        analysis.findings.push(format!(
            "Priority matrix: {} critical, {} high, {} medium, {} low",
            metrics.critical.len(),
            metrics.high.len(),
            metrics.medium.len(),
            metrics.low.len()
        ));
        if let Some(top_risk) = metrics.risks.iter().max_by_key(|r| r.score) {
            analysis.findings.push(format!(
                "Top risk: {} (score {})",
                top_risk.name, top_risk.score
            ));
        }

        for action in &metrics.critical {
            analysis
                .recommendations
                .push(format!("Start this week: {action}"));
        }
        if let Some(first_high) = metrics.high.first() {
            analysis
                .recommendations
                .push(format!("Schedule next: {first_high}"));
        }

        analysis.metrics = Some(AnalysisMetrics::Implementation(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::Implementation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_phases_always_present() {
        let planner = ImplementationPlanner::new();
        let metrics = planner.plan("help me execute");
        let names: Vec<&str> = metrics.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Foundation", "Quick Wins", "Optimization"]);
    }

    #[test]
    fn test_focus_phases_are_conditional() {
        let planner = ImplementationPlanner::new();
        let metrics = planner.plan("roadmap to fix my cac and my offer");
        let names: Vec<&str> = metrics.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Foundation",
                "Quick Wins",
                "Client-Financed Acquisition",
                "Offer Rebuild",
                "Optimization"
            ]
        );
    }

    #[test]
    fn test_priority_buckets_first_match_wins() {
        // 9/9 -> critical; 8/9 -> critical; 7/9 -> high; 6/8 -> high;
        // 6/6 -> medium; 2/3 -> low
        assert_eq!(ImplementationPlanner::bucket(9, 9), 0);
        assert_eq!(ImplementationPlanner::bucket(8, 9), 0);
        assert_eq!(ImplementationPlanner::bucket(7, 9), 1);
        assert_eq!(ImplementationPlanner::bucket(6, 8), 1);
        assert_eq!(ImplementationPlanner::bucket(6, 6), 2);
        assert_eq!(ImplementationPlanner::bucket(2, 3), 3);
    }

    #[test]
    fn test_catalog_buckets() {
        let planner = ImplementationPlanner::new();
        let metrics = planner.plan("plain");
        assert_eq!(metrics.critical.len(), 2);
        assert_eq!(metrics.high.len(), 2);
        assert_eq!(metrics.medium.len(), 3);
        assert_eq!(metrics.low.len(), 1);
        // Every catalog entry lands in exactly one bucket
        assert_eq!(
            metrics.critical.len() + metrics.high.len() + metrics.medium.len() + metrics.low.len(),
            ACTION_CATALOG.len()
        );
    }

    #[test]
    fn test_timeline_unrolls_phase_durations() {
        let planner = ImplementationPlanner::new();
        let metrics = planner.plan("plain");
        // 2 + 2 + 4 weeks
        assert_eq!(metrics.timeline.len(), 8);
        assert_eq!(metrics.timeline[0], (1, "Foundation".to_string()));
        assert_eq!(metrics.timeline[4], (5, "Optimization".to_string()));
        assert_eq!(metrics.timeline[7], (8, "Optimization".to_string()));
    }

    #[test]
    fn test_risk_register_is_static() {
        let planner = ImplementationPlanner::new();
        let metrics = planner.plan("anything");
        assert_eq!(metrics.risks.len(), 5);
        for risk in &metrics.risks {
            assert_eq!(risk.score, risk.probability * risk.impact);
        }
    }

    #[tokio::test]
    async fn test_envelope_and_idempotence() {
        let planner = ImplementationPlanner::new();
        let ctx = BusinessContext {
            current_revenue: Some(300_000.0),
            ..Default::default()
        };
        let a = planner.analyze("rollout plan", &ctx).await.expect("analyze");
        let b = planner.analyze("rollout plan", &ctx).await.expect("analyze");
        assert_eq!(a, b);
        assert_eq!(a.agent, AnalyzerId::Implementation);
        // 45 + 10 = 55
        assert!((a.confidence - 55.0).abs() < f64::EPSILON);
    }
}

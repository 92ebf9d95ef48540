//! Analyzer identifiers, uniform analysis output, and typed metrics
//!
//! Every analyzer produces the same envelope (`AgentAnalysis`) and a typed
//! metrics payload (`AnalysisMetrics`) that downstream consumers match on
//! exhaustively, so an unregistered analyzer identifier cannot slip through
//! attribution unnoticed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of analyzer identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalyzerId {
    /// Offer / value-equation scoring
    #[serde(rename = "offer")]
    Offer,
    /// CFA and advertising-level financial classification
    #[serde(rename = "financial")]
    Financial,
    /// 4-prong money-model assessment
    #[serde(rename = "money-model")]
    MoneyModel,
    /// Upsell timing and behavioral triggers
    #[serde(rename = "psychology")]
    Psychology,
    /// Phased rollout planning
    #[serde(rename = "implementation")]
    Implementation,
    /// Bottleneck identification; the default analyzer
    #[serde(rename = "constraint-analyzer")]
    Constraint,
    /// Session-structure and framework guidance
    #[serde(rename = "coaching-methodology")]
    Methodology,
}

impl AnalyzerId {
    /// Every analyzer, in canonical order
    pub const ALL: [AnalyzerId; 7] = [
        Self::Offer,
        Self::Financial,
        Self::MoneyModel,
        Self::Psychology,
        Self::Implementation,
        Self::Constraint,
        Self::Methodology,
    ];

    /// Stable string identifier, also the remote endpoint path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Financial => "financial",
            Self::MoneyModel => "money-model",
            Self::Psychology => "psychology",
            Self::Implementation => "implementation",
            Self::Constraint => "constraint-analyzer",
            Self::Methodology => "coaching-methodology",
        }
    }
}

impl fmt::Display for AnalyzerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output envelope produced once per analyzer invocation, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAnalysis {
    /// Which analyzer produced this
    #[serde(rename = "agentType")]
    pub agent: AnalyzerId,
    /// Observations about the business
    pub findings: Vec<String>,
    /// Suggested actions, consumed by action-item derivation
    pub recommendations: Vec<String>,
    /// Typed metrics payload, absent for degraded results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<AnalysisMetrics>,
    /// 0-100, computed from how many context fields were present
    pub confidence: f64,
}

impl AgentAnalysis {
    pub fn new(agent: AnalyzerId, confidence: f64) -> Self {
        Self {
            agent,
            findings: Vec::new(),
            recommendations: Vec::new(),
            metrics: None,
            confidence: confidence.clamp(0.0, 100.0),
        }
    }

    /// Zero-confidence sentinel substituted when an analyzer invocation fails
    pub fn unavailable(agent: AnalyzerId) -> Self {
        Self {
            agent,
            findings: vec![format!("Error connecting to {agent} workflow")],
            recommendations: Vec::new(),
            metrics: None,
            confidence: 0.0,
        }
    }

    pub fn with_finding(mut self, finding: impl Into<String>) -> Self {
        self.findings.push(finding.into());
        self
    }

    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendations.push(rec.into());
        self
    }

    pub fn with_metrics(mut self, metrics: AnalysisMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Per-analyzer typed metrics, tagged for the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnalysisMetrics {
    Cfa(CfaMetrics),
    Offer(OfferMetrics),
    MoneyModel(MoneyModelMetrics),
    Psychology(PsychologyMetrics),
    Implementation(ImplementationMetrics),
    Constraint(ConstraintMetrics),
    Methodology(MethodologyMetrics),
}

/// Four ordered advertising-capability levels derived from LTV/CAC and the
/// CFA ratio. Ordering is meaningful: higher level means safer paid scale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AdvertisingLevel {
    /// Level 0: LTV does not cover CAC
    Unprofitable,
    /// Level 1: unit economics work but CFA is not achieved
    BasicViability,
    /// Level 2: CFA achieved, ratio under 2x
    SelfFundingGrowth,
    /// Level 3: CFA achieved at 2x or better
    UnlimitedScale,
}

impl AdvertisingLevel {
    pub fn level(&self) -> u8 {
        match self {
            Self::Unprofitable => 0,
            Self::BasicViability => 1,
            Self::SelfFundingGrowth => 2,
            Self::UnlimitedScale => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unprofitable => "Unprofitable",
            Self::BasicViability => "Basic Viability",
            Self::SelfFundingGrowth => "Self-Funding Growth",
            Self::UnlimitedScale => "Unlimited Scale",
        }
    }

    /// Static requirement description for the level
    pub fn requirement(&self) -> &'static str {
        match self {
            Self::Unprofitable => "LTV must exceed CAC before any paid acquisition makes sense",
            Self::BasicViability => {
                "LTV exceeds CAC, but 30-day gross profit does not yet cover acquisition cost"
            }
            Self::SelfFundingGrowth => {
                "30-day gross profit covers CAC; each customer finances the next one"
            }
            Self::UnlimitedScale => {
                "30-day gross profit is at least double CAC; ad spend compounds safely"
            }
        }
    }

    /// Static actions to reach the next level; empty at the top
    pub fn next_level_actions(&self) -> &'static [&'static str] {
        match self {
            Self::Unprofitable => &[
                "Raise prices or add an upsell to lift LTV above CAC",
                "Cut acquisition cost by tightening targeting and creative",
                "Fix churn before spending another dollar on ads",
            ],
            Self::BasicViability => &[
                "Pull revenue forward with an immediate upsell or paid-in-full offer",
                "Improve gross margin so early revenue converts to gross profit",
                "Shorten time-to-value so customers pay back faster",
            ],
            Self::SelfFundingGrowth => &[
                "Push the 30-day gross profit toward 2x CAC with order bumps",
                "Expand continuity revenue to deepen the payback cushion",
            ],
            Self::UnlimitedScale => &[],
        }
    }
}

/// Client-Financed Acquisition math and level classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfaMetrics {
    pub cac: f64,
    pub ltv_cac_ratio: f64,
    pub thirty_day_gross_profit: f64,
    pub cfa_ratio: f64,
    pub achieves_cfa: bool,
    /// `f64::INFINITY` when 30-day gross profit is zero
    pub time_to_breakeven_days: f64,
    pub advertising_level: AdvertisingLevel,
}

/// Value-equation sub-dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDimension {
    DreamOutcome,
    PerceivedLikelihood,
    TimeDelay,
    EffortSacrifice,
}

impl ValueDimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DreamOutcome => "dream outcome",
            Self::PerceivedLikelihood => "perceived likelihood",
            Self::TimeDelay => "time delay",
            Self::EffortSacrifice => "effort and sacrifice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    Underpriced,
    Optimal,
    Overpriced,
}

/// Value-equation scores; time delay and effort are lower-is-better
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferMetrics {
    pub dream_outcome: u8,
    pub perceived_likelihood: u8,
    pub time_delay: u8,
    pub effort_sacrifice: u8,
    pub overall_score: f64,
    pub weakest_dimension: ValueDimension,
    pub pricing_strategy: PricingStrategy,
}

/// One prong of the 4-prong money model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProngAssessment {
    pub exists: bool,
    pub effectiveness: u8,
    pub recommendations: Vec<String>,
}

/// One stage of the synthetic customer journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStage {
    pub name: String,
    pub conversion_rate: f64,
    pub monthly_revenue: f64,
    pub potential_revenue: f64,
    pub underperforming: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyModelMetrics {
    pub attraction: ProngAssessment,
    pub upsell: ProngAssessment,
    pub downsell: ProngAssessment,
    pub continuity: ProngAssessment,
    pub overall_maturity: u8,
    pub journey: Vec<JourneyStage>,
    /// Heuristic revenue-optimization potential as a percentage uplift
    pub revenue_uplift_pct: f64,
}

impl MoneyModelMetrics {
    pub fn prongs(&self) -> [(&'static str, &ProngAssessment); 4] {
        [
            ("attraction", &self.attraction),
            ("upsell", &self.upsell),
            ("downsell", &self.downsell),
            ("continuity", &self.continuity),
        ]
    }
}

/// One of the five canonical upsell moments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellMoment {
    pub moment: String,
    pub effectiveness: u8,
    pub currently_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAssessment {
    pub trigger: String,
    pub present: bool,
    pub effectiveness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    HyperBuyer,
    Deliberate,
    PriceSensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyingCycle {
    Active,
    Dormant,
    Research,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychologyMetrics {
    pub moments: Vec<UpsellMoment>,
    pub timing_score: u8,
    pub triggers: Vec<TriggerAssessment>,
    pub customer_type: CustomerType,
    pub buying_cycle: BuyingCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPhase {
    pub name: String,
    pub duration_weeks: u8,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub name: String,
    pub probability: u8,
    pub impact: u8,
    pub score: u8,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationMetrics {
    pub phases: Vec<PlanPhase>,
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
    /// Week-by-week unroll of phase durations: (week number, phase name)
    pub timeline: Vec<(u8, String)>,
    pub risks: Vec<Risk>,
}

/// The four classic growth constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Leads,
    Sales,
    Delivery,
    Profit,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 4] =
        [Self::Leads, Self::Sales, Self::Delivery, Self::Profit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Sales => "sales",
            Self::Delivery => "delivery",
            Self::Profit => "profit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMetrics {
    pub primary: ConstraintKind,
    /// Score per constraint in canonical order
    pub scores: Vec<(ConstraintKind, u8)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodologyMetrics {
    pub session_focus: String,
    pub applicable_frameworks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_id_round_trip() {
        for id in AnalyzerId::ALL {
            let json = serde_json::to_string(&id).expect("serialize");
            assert_eq!(json, format!("\"{}\"", id.as_str()));
            let back: AnalyzerId = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, id);
        }
    }

    #[test]
    fn test_unavailable_sentinel() {
        let sentinel = AgentAnalysis::unavailable(AnalyzerId::Financial);
        assert_eq!(sentinel.confidence, 0.0);
        assert_eq!(
            sentinel.findings,
            vec!["Error connecting to financial workflow".to_string()]
        );
        assert!(sentinel.metrics.is_none());
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(AgentAnalysis::new(AnalyzerId::Offer, 140.0).confidence, 100.0);
        assert_eq!(AgentAnalysis::new(AnalyzerId::Offer, -5.0).confidence, 0.0);
    }

    #[test]
    fn test_advertising_level_ordering() {
        assert!(AdvertisingLevel::Unprofitable < AdvertisingLevel::BasicViability);
        assert!(AdvertisingLevel::SelfFundingGrowth < AdvertisingLevel::UnlimitedScale);
        assert_eq!(AdvertisingLevel::UnlimitedScale.level(), 3);
        assert!(AdvertisingLevel::UnlimitedScale.next_level_actions().is_empty());
        assert!(!AdvertisingLevel::Unprofitable.next_level_actions().is_empty());
    }

    #[test]
    fn test_agent_type_wire_name() {
        let analysis = AgentAnalysis::new(AnalyzerId::Constraint, 50.0);
        let json = serde_json::to_value(&analysis).expect("serialize");
        assert_eq!(json["agentType"], "constraint-analyzer");
    }
}

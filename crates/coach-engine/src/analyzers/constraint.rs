//! Constraint analyzer: which of the four growth constraints binds first
//!
//! The default analyzer: it runs on nearly every query. Scores leads, sales,
//! delivery, and profit from query keywords plus context ratios and picks
//! the highest score as the primary constraint, with a fixed tie-break
//! order (leads > sales > delivery > profit).

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, ConstraintKind,
    ConstraintMetrics, Result,
};

const LEADS_KEYWORDS: [&str; 6] = ["leads", "traffic", "marketing", "audience", "attention", "ads"];
const SALES_KEYWORDS: [&str; 6] = ["sales", "close", "conversion", "pipeline", "objection", "calls"];
const DELIVERY_KEYWORDS: [&str; 6] =
    ["churn", "fulfillment", "delivery", "capacity", "onboarding", "retention"];
const PROFIT_KEYWORDS: [&str; 5] = ["profit", "margin", "costs", "cash", "expenses"];

/// Small customer base threshold for the leads signal
const SMALL_CUSTOMER_BASE: u64 = 100;
/// Thin-margin threshold for the profit signal
const THIN_MARGIN: f64 = 30.0;

/// Analyzer identifying the primary growth constraint
#[derive(Debug, Clone, Default)]
pub struct ConstraintAnalyzer;

impl ConstraintAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn keyword_score(query_lower: &str, keywords: &[&str]) -> u8 {
        keywords
            .iter()
            .filter(|kw| query_lower.contains(*kw))
            .count() as u8
            * 2
    }

    fn scores(query_lower: &str, context: &BusinessContext) -> Vec<(ConstraintKind, u8)> {
        let mut leads = Self::keyword_score(query_lower, &LEADS_KEYWORDS);
        let mut sales = Self::keyword_score(query_lower, &SALES_KEYWORDS);
        let delivery = Self::keyword_score(query_lower, &DELIVERY_KEYWORDS);
        let mut profit = Self::keyword_score(query_lower, &PROFIT_KEYWORDS);

        // Context signals stack on top of the keyword evidence
        if context.customer_count.is_some_and(|count| count < SMALL_CUSTOMER_BASE) {
            leads += 2;
        }
        if context.gross_margin.is_some_and(|margin| margin < THIN_MARGIN) {
            profit += 3;
        }
        if let (Some(ltv), Some(cac)) = (context.ltv, context.cac) {
            if cac > 0.0 && ltv / cac <= 1.0 {
                profit += 3;
            }
        }
        if context.current_revenue.is_some() && context.customer_count.is_some() {
            // Revenue per customer far below stage norms points at sales
            let per_customer = context.estimated_monthly_revenue_per_customer();
            let norm = context
                .business_stage
                .fallback_monthly_revenue_per_customer();
            if per_customer < norm / 2.0 {
                sales += 2;
            }
        }

        vec![
            (ConstraintKind::Leads, leads),
            (ConstraintKind::Sales, sales),
            (ConstraintKind::Delivery, delivery),
            (ConstraintKind::Profit, profit),
        ]
    }

    fn findings_for(primary: ConstraintKind) -> (&'static str, &'static [&'static str]) {
        match primary {
            ConstraintKind::Leads => (
                "Not enough qualified demand is entering the pipeline",
                &[
                    "Commit to one acquisition channel and post daily for 30 days",
                    "Build an attraction offer that converts cold attention",
                ],
            ),
            ConstraintKind::Sales => (
                "Demand exists but too little of it converts to revenue",
                &[
                    "Script the sales conversation and track close rate per objection",
                    "Test a risk-reversal guarantee to remove purchase anxiety",
                ],
            ),
            ConstraintKind::Delivery => (
                "Fulfillment quality or capacity is capping growth",
                &[
                    "Document delivery into a repeatable checklist before hiring",
                    "Fix the top churn driver before adding new customers",
                ],
            ),
            ConstraintKind::Profit => (
                "Unit economics leak cash even when revenue grows",
                &[
                    "Raise prices or cut delivery cost to restore margin",
                    "Stop paid acquisition until LTV comfortably exceeds CAC",
                ],
            ),
        }
    }

    /// Base 35, +10 per known numeric field, capped at 80
    fn confidence(context: &BusinessContext) -> f64 {
        (35.0 + 10.0 * context.known_field_count() as f64).min(80.0)
    }

    pub fn identify(&self, query: &str, context: &BusinessContext) -> ConstraintMetrics {
        let query_lower = query.to_lowercase();
        let scores = Self::scores(&query_lower, context);

        // max_by_key returns the last maximum; iterate in reverse so ties
        // resolve to the earlier constraint in canonical order
        let primary = scores
            .iter()
            .rev()
            .max_by_key(|(_, score)| *score)
            .map(|(kind, _)| *kind)
            .unwrap_or(ConstraintKind::Leads);

        ConstraintMetrics { primary, scores }
    }
}

#[async_trait]
impl Analyzer for ConstraintAnalyzer {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let metrics = self.identify(query, context);
        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        let (finding, recommendations) = Self::findings_for(metrics.primary);
        analysis.findings.push(format!(
            "Primary constraint: {} - {}",
            metrics.primary.label(),
            finding
        ));
        analysis.findings.push(format!(
            "Constraint scores: {}",
            metrics
                .scores
                .iter()
                .map(|(kind, score)| format!("{} {}", kind.label(), score))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for rec in recommendations {
            analysis.recommendations.push((*rec).to_string());
        }

        analysis.metrics = Some(AnalysisMetrics::Constraint(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::Constraint
    }
}

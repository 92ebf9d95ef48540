//! Psychology optimizer: upsell timing, behavioral triggers, buyer profile
//!
//! Scores the five canonical upsell moments against a fixed
//! base-effectiveness table, checks which are currently used via keyword
//! presence, and independently assesses five behavioral triggers. Customer
//! type and buying cycle come from disjoint keyword sets with a fixed
//! priority order: price-sensitivity keywords are checked before premium
//! keywords.

use async_trait::async_trait;
use coach_core::{
    AgentAnalysis, AnalysisMetrics, Analyzer, AnalyzerId, BusinessContext, BusinessStage,
    BuyingCycle, CustomerType, PsychologyMetrics, Result, TriggerAssessment, UpsellMoment,
};

/// LTV at or above this counts as high-LTV for the moment adjustment
const HIGH_LTV: f64 = 1000.0;

/// (moment, base effectiveness, usage keywords)
const MOMENTS: [(&str, u8, &[&str]); 5] = [
    (
        "immediately",
        9,
        &["at checkout", "order bump", "point of sale", "immediately after purchase"],
    ),
    (
        "next_step",
        7,
        &["onboarding", "welcome sequence", "after signup", "next step"],
    ),
    (
        "big_win",
        8,
        &["milestone", "first result", "big win", "success moment"],
    ),
    ("halfway", 6, &["halfway", "midpoint", "mid-program"]),
    (
        "last_chance",
        7,
        &["last chance", "renewal", "expiring", "win back", "before they cancel"],
    ),
];

/// (trigger, base effectiveness, presence keywords)
const TRIGGERS: [(&str, u8, &[&str]); 5] = [
    ("scarcity", 8, &["limited", "only a few", "spots", "scarcity"]),
    ("urgency", 8, &["deadline", "expires", "today only", "urgent"]),
    (
        "social proof",
        9,
        &["testimonial", "review", "social proof", "case study"],
    ),
    ("authority", 7, &["expert", "certified", "award", "authority"]),
    ("reciprocity", 7, &["free gift", "bonus", "value first", "giveaway"]),
];

const PRICE_SENSITIVE_KEYWORDS: [&str; 5] =
    ["cheap", "afford", "budget", "too expensive", "discount"];
const HYPER_BUYER_KEYWORDS: [&str; 5] =
    ["premium", "vip", "exclusive", "best of the best", "whatever it takes"];
const ACTIVE_CYCLE_KEYWORDS: [&str; 4] = ["ready to buy", "buy now", "purchase", "sign up"];
const DORMANT_CYCLE_KEYWORDS: [&str; 4] = ["lapsed", "inactive", "past customer", "win back"];

/// Analyzer for upsell timing and behavioral triggers
#[derive(Debug, Clone, Default)]
pub struct PsychologyOptimizer;

impl PsychologyOptimizer {
    pub fn new() -> Self {
        Self
    }

    fn moments(query_lower: &str, context: &BusinessContext) -> Vec<UpsellMoment> {
        let boost = context.business_stage == BusinessStage::Mature
            || context.ltv.unwrap_or(0.0) >= HIGH_LTV;

        MOMENTS
            .iter()
            .map(|(moment, base, keywords)| {
                let effectiveness = if boost { (base + 1).min(10) } else { *base };
                UpsellMoment {
                    moment: (*moment).to_string(),
                    effectiveness,
                    currently_used: contains_any(query_lower, keywords),
                }
            })
            .collect()
    }

    fn triggers(query_lower: &str) -> Vec<TriggerAssessment> {
        TRIGGERS
            .iter()
            .map(|(trigger, effectiveness, keywords)| TriggerAssessment {
                trigger: (*trigger).to_string(),
                present: contains_any(query_lower, keywords),
                effectiveness: *effectiveness,
            })
            .collect()
    }

    /// Price-sensitivity keywords take priority over premium keywords
    fn customer_type(query_lower: &str) -> CustomerType {
        if contains_any(query_lower, &PRICE_SENSITIVE_KEYWORDS) {
            CustomerType::PriceSensitive
        } else if contains_any(query_lower, &HYPER_BUYER_KEYWORDS) {
            CustomerType::HyperBuyer
        } else {
            CustomerType::Deliberate
        }
    }

    fn buying_cycle(query_lower: &str) -> BuyingCycle {
        if contains_any(query_lower, &ACTIVE_CYCLE_KEYWORDS) {
            BuyingCycle::Active
        } else if contains_any(query_lower, &DORMANT_CYCLE_KEYWORDS) {
            BuyingCycle::Dormant
        } else {
            BuyingCycle::Research
        }
    }

    /// Base 40, +10 customer count, +15 ltv, +10 revenue, capped at 75
    fn confidence(context: &BusinessContext) -> f64 {
        let mut confidence: f64 = 40.0;
        if context.customer_count.is_some() {
            confidence += 10.0;
        }
        if context.ltv.is_some() {
            confidence += 15.0;
        }
        if context.current_revenue.is_some() {
            confidence += 10.0;
        }
        confidence.min(75.0)
    }

    pub fn profile(&self, query: &str, context: &BusinessContext) -> PsychologyMetrics {
        let query_lower = query.to_lowercase();
        let moments = Self::moments(&query_lower, context);

        let used = moments.iter().filter(|m| m.currently_used).count();
        let timing_score = ((used as f64 / 5.0) * 10.0).round() as u8;

        PsychologyMetrics {
            moments,
            timing_score,
            triggers: Self::triggers(&query_lower),
            customer_type: Self::customer_type(&query_lower),
            buying_cycle: Self::buying_cycle(&query_lower),
        }
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}

#[async_trait]
impl Analyzer for PsychologyOptimizer {
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis> {
        let metrics = self.profile(query, context);
        let mut analysis = AgentAnalysis::new(self.id(), Self::confidence(context));

        let unused: Vec<&str> = metrics
            .moments
            .iter()
            .filter(|m| !m.currently_used)
            .map(|m| m.moment.as_str())
            .collect();

        analysis.findings.push(format!(
            "Upsell timing score {}/10: {} of 5 canonical moments in use",
            metrics.timing_score,
            5 - unused.len()
        ));
        if !unused.is_empty() {
            analysis
                .findings
                .push(format!("Unused upsell moments: {}", unused.join(", ")));
        }
        analysis.findings.push(format!(
            "Customer profile: {:?} buyer in a {:?} cycle",
            metrics.customer_type, metrics.buying_cycle
        ));
        let missing_triggers: Vec<&str> = metrics
            .triggers
            .iter()
            .filter(|t| !t.present)
            .map(|t| t.trigger.as_str())
            .collect();
        if !missing_triggers.is_empty() {
            analysis.findings.push(format!(
                "Behavioral triggers not in play: {}",
                missing_triggers.join(", ")
            ));
        }

        if let Some(best_unused) = metrics
            .moments
            .iter()
            .filter(|m| !m.currently_used)
            .max_by_key(|m| m.effectiveness)
        {
            analysis.recommendations.push(format!(
                "Test an upsell at the '{}' moment first; it has the highest expected effectiveness ({}/10)",
                best_unused.moment, best_unused.effectiveness
            ));
        }
        if metrics.customer_type == CustomerType::PriceSensitive {
            analysis
                .recommendations
                .push("Lead with a downsell path and payment plans for price-sensitive buyers".to_string());
        }
        if let Some(trigger) = metrics.triggers.iter().find(|t| !t.present) {
            analysis.recommendations.push(format!(
                "Implement {} elements in the next campaign",
                trigger.trigger
            ));
        }

        analysis.metrics = Some(AnalysisMetrics::Psychology(metrics));
        Ok(analysis)
    }

    fn id(&self) -> AnalyzerId {
        AnalyzerId::Psychology
    }
}

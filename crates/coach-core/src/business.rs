//! Business facts passed into every analyzer
//!
//! A `BusinessContext` is assembled once at session start and is read-only
//! for the remainder of the session. Absent fields are legal everywhere:
//! analyzers substitute documented fallbacks and lower their confidence
//! instead of erroring.

use serde::{Deserialize, Serialize};

/// Growth stage of the business, used for fallback revenue estimates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStage {
    #[default]
    Startup,
    Growth,
    Scale,
    Mature,
}

impl BusinessStage {
    /// Fallback estimate of 30-day revenue per customer when actual revenue
    /// and customer count are not both known
    pub fn fallback_monthly_revenue_per_customer(&self) -> f64 {
        match self {
            Self::Startup => 100.0,
            Self::Growth => 500.0,
            Self::Scale => 2000.0,
            Self::Mature => 5000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Growth => "growth",
            Self::Scale => "scale",
            Self::Mature => "mature",
        }
    }
}

/// Kind of coaching session the query arrives in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Find out what is wrong
    #[default]
    Diagnostic,
    /// Full-breadth planning session; forces every analyzer to run
    Strategic,
    /// Execution-focused follow-through session
    Implementation,
}

/// Normalized facts about a business, immutable input per query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    /// Industry label, free-form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Annual revenue in dollars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_revenue: Option<f64>,

    /// Active customer count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_count: Option<u64>,

    /// Customer acquisition cost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cac: Option<f64>,

    /// Customer lifetime value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltv: Option<f64>,

    /// Gross margin as a percentage, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_margin: Option<f64>,

    /// Growth stage
    #[serde(default)]
    pub business_stage: BusinessStage,
}

impl BusinessContext {
    pub fn new(stage: BusinessStage) -> Self {
        Self {
            business_stage: stage,
            ..Self::default()
        }
    }

    /// Estimated 30-day revenue per customer: actuals when both revenue and
    /// customer count are known, otherwise the stage-keyed fallback table
    pub fn estimated_monthly_revenue_per_customer(&self) -> f64 {
        match (self.current_revenue, self.customer_count) {
            (Some(revenue), Some(count)) if count > 0 => revenue / 12.0 / count as f64,
            _ => self.business_stage.fallback_monthly_revenue_per_customer(),
        }
    }

    /// Gross margin with the documented default of 50% when absent
    pub fn gross_margin_or_default(&self) -> f64 {
        self.gross_margin.unwrap_or(50.0)
    }

    /// Count of known numeric facts, used by analyzers for confidence
    pub fn known_field_count(&self) -> usize {
        [
            self.current_revenue.is_some(),
            self.customer_count.is_some(),
            self.cac.is_some(),
            self.ltv.is_some(),
            self.gross_margin.is_some(),
        ]
        .iter()
        .filter(|&&known| known)
        .count()
    }
}

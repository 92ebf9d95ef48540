//! Deterministic scoring analyzers
//!
//! One specialist per file. Each analyzer consumes `(query, BusinessContext)`
//! and produces a uniform `AgentAnalysis`; all scoring is rule-based and
//! idempotent, with missing context fields degrading confidence rather than
//! erroring.

mod constraint;
mod financial;
mod implementation;
mod methodology;
mod money_model;
mod offer;
mod psychology;

pub use constraint::ConstraintAnalyzer;
pub use financial::{CfaAnalysis, FinancialCalculator};
pub use implementation::ImplementationPlanner;
pub use methodology::MethodologyAnalyzer;
pub use money_model::MoneyModelArchitect;
pub use offer::OfferAnalyzer;
pub use psychology::PsychologyOptimizer;

use coach_core::{Analyzer, AnalyzerId};
use std::collections::HashMap;
use std::sync::Arc;

/// Build the full in-process analyzer registry
pub fn default_registry() -> HashMap<AnalyzerId, Arc<dyn Analyzer>> {
    let analyzers: [Arc<dyn Analyzer>; 7] = [
        Arc::new(OfferAnalyzer::new()),
        Arc::new(FinancialCalculator::new()),
        Arc::new(MoneyModelArchitect::new()),
        Arc::new(PsychologyOptimizer::new()),
        Arc::new(ImplementationPlanner::new()),
        Arc::new(ConstraintAnalyzer::new()),
        Arc::new(MethodologyAnalyzer::new()),
    ];

    analyzers
        .into_iter()
        .map(|analyzer| (analyzer.id(), analyzer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_id() {
        let registry = default_registry();
        for id in AnalyzerId::ALL {
            assert!(registry.contains_key(&id), "missing analyzer for {id}");
        }
        assert_eq!(registry.len(), AnalyzerId::ALL.len());
    }
}

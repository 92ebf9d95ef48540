//! Query classifier: maps a free-text query to the set of analyzers to run
//!
//! Matching is inclusive (OR): every keyword hit adds its analyzer, so a
//! broad query routinely activates three to five analyzers. There is no
//! ranking between keyword sets; ranking happens later in synthesis.

use coach_core::{AnalyzerId, SessionType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keyword tables for analyzer selection
///
/// Kept as an explicit, versioned value injected into the classifier rather
/// than module globals, so the tables can be tested and evolved
/// independently of the routing-decision engine's own keyword sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierKeywords {
    /// Table revision, bumped whenever a keyword set changes
    pub version: u32,
    pub offer: Vec<String>,
    pub money_model: Vec<String>,
    pub financial: Vec<String>,
    pub psychology: Vec<String>,
    pub implementation: Vec<String>,
    pub constraint: Vec<String>,
    pub methodology: Vec<String>,
    /// Phrases that opt out of the always-on constraint analyzer
    pub constraint_opt_out: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for ClassifierKeywords {
    fn default() -> Self {
        Self {
            version: 1,
            offer: owned(&[
                "offer",
                "pricing",
                "price",
                "value proposition",
                "guarantee",
                "grand slam",
                "bonus",
                "discount",
                "package",
            ]),
            money_model: owned(&[
                "upsell",
                "downsell",
                "cross-sell",
                "money model",
                "revenue model",
                "continuity",
                "subscription",
                "recurring",
                "monetization",
                "value ladder",
            ]),
            financial: owned(&[
                "cac",
                "ltv",
                "lifetime value",
                "acquisition cost",
                "cash flow",
                "unit economics",
                "margin",
                "breakeven",
                "paid ads",
                "advertising",
                "cfa",
            ]),
            psychology: owned(&[
                "psychology",
                "conversion",
                "persuasion",
                "urgency",
                "scarcity",
                "social proof",
                "objection",
                "trigger",
                "close rate",
            ]),
            implementation: owned(&[
                "implement",
                "roadmap",
                "rollout",
                "timeline",
                "execute",
                "step by step",
                "priorit",
            ]),
            constraint: owned(&[
                "constraint",
                "bottleneck",
                "stuck",
                "limiting",
                "plateau",
                "blocked",
                "growth ceiling",
            ]),
            methodology: owned(&[
                "coaching",
                "methodology",
                "framework",
                "diagnos",
                "session structure",
            ]),
            constraint_opt_out: owned(&["just tell me", "only need"]),
        }
    }
}

impl ClassifierKeywords {
    fn domain_tables(&self) -> [(AnalyzerId, &[String]); 7] {
        [
            (AnalyzerId::Offer, self.offer.as_slice()),
            (AnalyzerId::Financial, self.financial.as_slice()),
            (AnalyzerId::MoneyModel, self.money_model.as_slice()),
            (AnalyzerId::Psychology, self.psychology.as_slice()),
            (AnalyzerId::Implementation, self.implementation.as_slice()),
            (AnalyzerId::Constraint, self.constraint.as_slice()),
            (AnalyzerId::Methodology, self.methodology.as_slice()),
        ]
    }
}

/// Selects which analyzers a query requires
#[derive(Debug, Clone, Default)]
pub struct QueryClassifier {
    keywords: ClassifierKeywords,
}

impl QueryClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom keyword table
    pub fn with_keywords(keywords: ClassifierKeywords) -> Self {
        Self { keywords }
    }

    /// Select the analyzers required for a query
    ///
    /// Guarantees a non-empty result in canonical `AnalyzerId::ALL` order:
    /// strategic sessions force the full set, unmatched queries fall back to
    /// the constraint analyzer alone.
    pub fn select_analyzers(&self, query: &str, session_type: SessionType) -> Vec<AnalyzerId> {
        if session_type == SessionType::Strategic {
            tracing::debug!("strategic session: selecting all analyzers");
            return AnalyzerId::ALL.to_vec();
        }

        let query_lower = query.to_lowercase();
        let mut selected: HashSet<AnalyzerId> = HashSet::new();

        for (analyzer, table) in self.keywords.domain_tables() {
            if matches_any(&query_lower, table) {
                selected.insert(analyzer);
            }
        }

        // The constraint analyzer is always on unless the user opts out
        if !matches_any(&query_lower, &self.keywords.constraint_opt_out) {
            selected.insert(AnalyzerId::Constraint);
        }

        if selected.is_empty() {
            selected.insert(AnalyzerId::Constraint);
        }

        let ordered: Vec<AnalyzerId> = AnalyzerId::ALL
            .into_iter()
            .filter(|id| selected.contains(id))
            .collect();

        tracing::debug!(analyzers = ?ordered, "classified query");
        ordered
    }

    pub fn keywords(&self) -> &ClassifierKeywords {
        &self.keywords
    }
}

/// Check if query contains any of the keywords
fn matches_any(query: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| query.contains(kw.as_str()))
}

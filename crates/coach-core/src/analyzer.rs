//! Core Analyzer trait definition

use crate::{AgentAnalysis, AnalyzerId, BusinessContext, Result};
use async_trait::async_trait;

/// Core trait that all analyzers must implement
///
/// The trait is async so that remote-backed implementations can await their
/// workflow endpoint; the in-process scoring analyzers have no suspension
/// points and resolve immediately.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze a query against the business facts and produce findings,
    /// recommendations, and typed metrics
    ///
    /// Implementations must be deterministic: identical inputs produce an
    /// identical `AgentAnalysis`. Missing context fields degrade confidence,
    /// never produce an error.
    async fn analyze(&self, query: &str, context: &BusinessContext) -> Result<AgentAnalysis>;

    /// Identifier this analyzer answers to
    fn id(&self) -> AnalyzerId;
}

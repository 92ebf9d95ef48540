//! Business coaching analysis engine
//!
//! This crate provides query-driven business coaching through a multi-analyzer
//! architecture. It includes:
//!
//! - Keyword classification of free-text coaching queries
//! - Seven deterministic specialist analyzers (offer economics, client-financed
//!   acquisition, money-model architecture, buyer psychology, implementation
//!   planning, constraint identification, coaching methodology)
//! - Parallel fan-out with per-analyzer deadlines and graceful degradation
//! - Synthesis into one prioritized, action-oriented response
//! - A routing-decision engine for UI visualization
//! - Session-scoped conversation memory
//!
//! # Architecture
//!
//! The `Conductor` owns the pipeline: `QueryClassifier` picks the analyzer
//! set, analyzers run concurrently (in-process by default, or against remote
//! HTTP workflows when an endpoint is configured), and the `Synthesizer`
//! merges their outputs into a `CoachingResponse`.
//!
//! # Example
//!
//! ```rust,ignore
//! use coach_core::{BusinessContext, CoachingRequest};
//! use coach_engine::{CoachConfig, Conductor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let conductor = Conductor::new(CoachConfig::default())?;
//!
//!     let context = BusinessContext {
//!         cac: Some(150.0),
//!         ltv: Some(600.0),
//!         ..Default::default()
//!     };
//!     let request = CoachingRequest::new("Is my offer priced right?", context);
//!
//!     let response = conductor.coach(&request).await?;
//!     println!("{}", response.synthesis);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzers;
pub mod classifier;
pub mod conductor;
pub mod config;
pub mod error;
pub mod memory;
pub mod remote;
pub mod router;
pub mod synthesis;

// Re-export main types for convenience
pub use analyzers::{
    CfaAnalysis, ConstraintAnalyzer, FinancialCalculator, ImplementationPlanner,
    MethodologyAnalyzer, MoneyModelArchitect, OfferAnalyzer, PsychologyOptimizer,
};
pub use classifier::{ClassifierKeywords, QueryClassifier};
pub use conductor::Conductor;
pub use config::{CoachConfig, CoachConfigBuilder};
pub use error::{EngineError, Result};
pub use memory::{ConversationMemory, ConversationTurn};
pub use remote::WorkflowClient;
pub use router::AgentRouter;
pub use synthesis::Synthesizer;

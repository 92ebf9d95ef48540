//! Core abstractions and domain types for the coaching analysis engine
//!
//! This crate defines the fundamental traits and types shared across the
//! workspace: the `Analyzer` trait every scoring module implements, the
//! read-only `BusinessContext` fed into every analyzer, and the uniform
//! `AgentAnalysis` output with its per-analyzer typed metrics.

pub mod analysis;
pub mod analyzer;
pub mod business;
pub mod error;
pub mod response;

pub use analysis::{
    AdvertisingLevel, AgentAnalysis, AnalysisMetrics, AnalyzerId, BuyingCycle, CfaMetrics,
    ConstraintKind, ConstraintMetrics, CustomerType, ImplementationMetrics, JourneyStage,
    MethodologyMetrics, MoneyModelMetrics, OfferMetrics, PlanPhase, PricingStrategy,
    ProngAssessment, PsychologyMetrics, Risk, TriggerAssessment, UpsellMoment, ValueDimension,
};
pub use analyzer::Analyzer;
pub use business::{BusinessContext, BusinessStage, SessionType};
pub use error::{Error, Result};
pub use response::{
    ActionItem, AgentScore, CoachingRequest, CoachingResponse, Priority, RoutingDecision,
};

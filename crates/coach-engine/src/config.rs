//! Configuration for the coaching engine

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for conductor and remote workflow calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Base URL of the remote analyzer workflows; None runs everything
    /// in-process
    pub workflow_endpoint: Option<String>,

    /// HTTP request timeout for remote workflow calls
    pub request_timeout: Duration,

    /// Per-analyzer completion deadline; a slow analyzer is replaced by the
    /// zero-confidence sentinel rather than stalling the whole response
    pub analyzer_timeout: Duration,

    /// Maximum number of action items surfaced after ranking
    pub max_action_items: usize,

    /// How many prior conversation turns to keep per session
    pub memory_turns: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            workflow_endpoint: None,
            request_timeout: Duration::from_secs(30),
            analyzer_timeout: Duration::from_secs(30),
            max_action_items: 8,
            memory_turns: 20,
        }
    }
}

impl CoachConfig {
    /// Create a new configuration builder
    pub fn builder() -> CoachConfigBuilder {
        CoachConfigBuilder::default()
    }

    /// Load the workflow endpoint from the environment
    pub fn with_env_endpoint(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("COACH_WORKFLOW_ENDPOINT") {
            self.workflow_endpoint = Some(endpoint);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_action_items == 0 {
            return Err(EngineError::ConfigError(
                "max_action_items must be greater than 0".to_string(),
            ));
        }

        if let Some(endpoint) = &self.workflow_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(EngineError::ConfigError(format!(
                    "workflow_endpoint must be an http(s) URL, got {endpoint}"
                )));
            }
        }

        Ok(())
    }
}

/// Builder for CoachConfig
#[derive(Debug, Default)]
pub struct CoachConfigBuilder {
    workflow_endpoint: Option<String>,
    request_timeout: Option<Duration>,
    analyzer_timeout: Option<Duration>,
    max_action_items: Option<usize>,
    memory_turns: Option<usize>,
}

impl CoachConfigBuilder {
    /// Set the remote workflow endpoint
    pub fn workflow_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.workflow_endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the per-analyzer deadline
    pub fn analyzer_timeout(mut self, duration: Duration) -> Self {
        self.analyzer_timeout = Some(duration);
        self
    }

    /// Set the action item cap
    pub fn max_action_items(mut self, max: usize) -> Self {
        self.max_action_items = Some(max);
        self
    }

    /// Set the conversation memory retention
    pub fn memory_turns(mut self, turns: usize) -> Self {
        self.memory_turns = Some(turns);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CoachConfig> {
        let defaults = CoachConfig::default();

        let config = CoachConfig {
            workflow_endpoint: self.workflow_endpoint,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            analyzer_timeout: self.analyzer_timeout.unwrap_or(defaults.analyzer_timeout),
            max_action_items: self.max_action_items.unwrap_or(defaults.max_action_items),
            memory_turns: self.memory_turns.unwrap_or(defaults.memory_turns),
        };

        config.validate()?;
        Ok(config)
    }
}

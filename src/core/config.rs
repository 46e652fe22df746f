//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Settings for `EffectResolver`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Treat diagnosed anomalies as errors instead of falling back.
    ///
    /// Anomalies are unknown token/resource/citizen keys, missing
    /// comparison values, custom conditions without an evaluator and
    /// unknown `ForEach` targets. Lenient mode evaluates them as
    /// `false` (or zero iterations) and records a diagnostic.
    pub strict: bool,

    /// Maximum nesting depth of the effect tree (0 = unlimited).
    pub max_depth: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 0,
        }
    }
}

impl ResolverConfig {
    /// Strict configuration: every anomaly aborts resolution.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().with_strict(true)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether a node at `depth` is within the configured limit.
    #[must_use]
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth == 0 || depth <= self.max_depth
    }
}

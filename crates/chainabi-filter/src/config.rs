//! Filter pipeline configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Drop logs that do not match their event instead of keeping them with
    /// empty args
    #[serde(default)]
    pub strict: bool,
    /// Batches at least this large are decoded on the rayon pool (0 = never)
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize { 256 }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strict: false,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl FilterConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

//! Pipeline configuration
//!
//! One serde-friendly struct gathers the settings of every stage. Missing
//! fields fall back to their defaults, so a YAML document only needs to name
//! what it changes:
//!
//! ```yaml
//! grouping:
//!   kind: co_singers
//! louvain:
//!   resolution: 1.2
//! annotation:
//!   base_size: 4.0
//!   palette: ["#e41a1c", "#377eb8", "#4daf4a"]
//! ```

use crate::algo::LouvainConfig;
use crate::annotate::AnnotationConfig;
use crate::builder::GroupingPolicy;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Settings for every pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// How records become collaboration groups
    pub grouping: GroupingPolicy,
    /// Community detection settings
    pub louvain: LouvainConfig,
    /// Size, width and color settings
    pub annotation: AnnotationConfig,
}

impl PipelineConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a JSON document
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_grouping(mut self, grouping: GroupingPolicy) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_louvain(mut self, louvain: LouvainConfig) -> Self {
        self.louvain = louvain;
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationConfig) -> Self {
        self.annotation = annotation;
        self
    }

    /// Check every stage, reporting the first problem found
    pub fn validate(&self) -> ConfigResult<()> {
        self.grouping.validate()?;
        self.louvain.validate()?;
        self.annotation.validate()?;
        Ok(())
    }
}

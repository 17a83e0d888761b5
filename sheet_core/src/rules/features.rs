//! Feature definitions and per-class use scaling

use crate::benefit::UsesFormula;
use crate::types::RestType;
use serde::{Deserialize, Serialize};

/// A limited-use or passive feature as described in a rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Missing means passive (no uses to track)
    #[serde(default)]
    pub uses: Option<UsesFormula>,
    #[serde(default)]
    pub rest_type: RestType,
}

impl FeatureDefinition {
    /// A passive feature with no uses
    pub fn passive(name: impl Into<String>) -> Self {
        FeatureDefinition {
            name: name.into(),
            description: String::new(),
            uses: None,
            rest_type: RestType::None,
        }
    }

    /// A feature whose uses follow `uses`
    pub fn limited(name: impl Into<String>, uses: UsesFormula, rest_type: RestType) -> Self {
        FeatureDefinition {
            name: name.into(),
            description: String::new(),
            uses: Some(uses),
            rest_type,
        }
    }
}

/// Uses-per-level progression for one class feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingEntry {
    pub class: String,
    pub feature: String,
    /// `(minimum class level, uses)` pairs in ascending level order
    pub progression: Vec<(u32, i32)>,
}

/// Feature-use scaling table keyed by class and feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureScaling {
    entries: Vec<ScalingEntry>,
}

impl FeatureScaling {
    pub fn new(entries: Vec<ScalingEntry>) -> Self {
        FeatureScaling { entries }
    }

    pub fn insert(&mut self, entry: ScalingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScalingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uses at `level` for the class feature; the highest threshold not above
    /// `level` wins. `None` if the class/feature has no row or `level` is
    /// below the first threshold.
    pub fn lookup(&self, class: &str, feature: &str, level: u32) -> Option<i32> {
        let entry = self.entries.iter().find(|entry| {
            entry.class.eq_ignore_ascii_case(class) && entry.feature.eq_ignore_ascii_case(feature)
        })?;
        entry
            .progression
            .iter()
            .filter(|(threshold, _)| *threshold <= level)
            .max_by_key(|(threshold, _)| *threshold)
            .map(|(_, uses)| *uses)
    }
}

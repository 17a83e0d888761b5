//! BenefitLedger - ordered multiset of every granted benefit

use crate::types::{BenefitKind, SourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What granted a benefit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BenefitSource {
    pub kind: SourceKind,
    pub name: String,
}

impl BenefitSource {
    pub fn new(kind: SourceKind, name: impl Into<String>) -> Self {
        BenefitSource {
            kind,
            name: name.into(),
        }
    }

    pub fn feat(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Feat, name)
    }

    pub fn species(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Species, name)
    }

    pub fn origin(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Origin, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(SourceKind::Class, name)
    }

    /// Exact match on kind and name
    pub fn matches(&self, kind: SourceKind, name: &str) -> bool {
        self.kind == kind && self.name == name
    }

    /// Composite tag stored on features, e.g. "feat: Lucky"
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BenefitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.name)
    }
}

/// One ledger entry
///
/// `value` is the requested delta for additive kinds, the prior proficiency
/// for skills, a marker `1` for shared list grants, max uses for features and
/// quantity (or gold) for items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedBenefit {
    pub source: BenefitSource,
    pub benefit: BenefitKind,
    pub target: String,
    pub value: i32,
    #[serde(default)]
    pub description: String,
}

impl GrantedBenefit {
    pub fn new(
        source: &BenefitSource,
        benefit: BenefitKind,
        target: impl Into<String>,
        value: i32,
    ) -> Self {
        GrantedBenefit {
            source: source.clone(),
            benefit,
            target: target.into(),
            value,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Append/remove log of granted benefits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefitLedger {
    entries: Vec<GrantedBenefit>,
}

impl BenefitLedger {
    pub fn new() -> Self {
        BenefitLedger {
            entries: Vec::new(),
        }
    }

    /// Append unconditionally; duplicates are kept
    pub fn add(&mut self, entry: GrantedBenefit) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[GrantedBenefit] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrantedBenefit> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_source<'a>(
        &'a self,
        kind: SourceKind,
        name: &'a str,
    ) -> impl Iterator<Item = &'a GrantedBenefit> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.source.matches(kind, name))
    }

    pub fn by_kind(&self, benefit: BenefitKind) -> impl Iterator<Item = &GrantedBenefit> {
        self.entries
            .iter()
            .filter(move |entry| entry.benefit == benefit)
    }

    /// Remove every entry for the source, returning them in grant order
    pub fn remove_by_source(&mut self, kind: SourceKind, name: &str) -> Vec<GrantedBenefit> {
        let (matching, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.source.matches(kind, name));
        self.entries = remaining;
        matching
    }

    /// Remove the first entry equal to `entry`
    pub fn remove_entry(&mut self, entry: &GrantedBenefit) -> Option<GrantedBenefit> {
        let index = self.entries.iter().position(|existing| existing == entry)?;
        Some(self.entries.remove(index))
    }

    /// Entries of `benefit` whose target equals `target`, ignoring case
    pub fn count_matching(&self, benefit: BenefitKind, target: &str) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.benefit == benefit && entry.target.eq_ignore_ascii_case(target))
            .count()
    }

    /// Distinct sources in first-grant order
    pub fn sources(&self) -> Vec<&BenefitSource> {
        let mut sources: Vec<&BenefitSource> = Vec::new();
        for entry in &self.entries {
            if !sources.contains(&&entry.source) {
                sources.push(&entry.source);
            }
        }
        sources
    }

    pub fn has_source(&self, kind: SourceKind, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.source.matches(kind, name))
    }
}

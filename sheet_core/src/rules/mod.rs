//! Rule tables: read-only lookup data keyed by name
//!
//! `RuleTables` is built once (from a data directory, the embedded SRD
//! files, or by hand) and passed by reference into every operation that
//! needs it. Nothing here is process-global.

mod classes;
mod features;
mod feats;
mod grants;
mod items;
mod origins;
mod species;
mod styles;

pub use classes::{
    AbilityRequirement, ClassDefinition, ClassFeature, MulticlassDefinition, ProficiencySet,
    SkillChoices, SpellcastingDefinition, SubclassDefinition,
};
pub use features::{FeatureDefinition, FeatureScaling, ScalingEntry};
pub use feats::{FeatDefinition, FeatPrerequisite};
pub use grants::BenefitGrant;
pub use items::{ItemKind, ItemTemplate};
pub use origins::OriginDefinition;
pub use species::SpeciesDefinition;
pub use styles::FightingStyleDefinition;

use crate::config::{self, SheetConfig};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Anything stored in a `Table`
pub trait Named {
    fn name(&self) -> &str;
}

/// Name-keyed, read-only collection of definitions
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            entries: Vec::new(),
        }
    }
}

impl<T: Named> Table<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Table { entries }
    }

    /// Case-insensitive lookup
    pub fn get_by_name(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn all(&self) -> &[T] {
        &self.entries
    }

    /// Insert or replace the entry with the same name
    pub fn insert(&mut self, entry: T) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.name().eq_ignore_ascii_case(entry.name()))
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const CLASSES_FILE: &str = "classes.json";
const FEATS_FILE: &str = "feats.json";
const SPECIES_FILE: &str = "species.json";
const ORIGINS_FILE: &str = "origins.json";
const ITEMS_FILE: &str = "items.json";
const STYLES_FILE: &str = "fighting_styles.json";
const SCALING_FILE: &str = "feature_scaling.json";

/// Every rule table the engine consults, plus engine settings
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    pub config: SheetConfig,
    pub classes: Table<ClassDefinition>,
    pub feats: Table<FeatDefinition>,
    pub species: Table<SpeciesDefinition>,
    pub origins: Table<OriginDefinition>,
    pub items: Table<ItemTemplate>,
    pub fighting_styles: Table<FightingStyleDefinition>,
    pub feature_scaling: FeatureScaling,
    /// Where the tables were loaded from, for `reload`
    data_dir: Option<PathBuf>,
}

impl RuleTables {
    /// Empty tables with default settings
    pub fn new() -> Self {
        RuleTables {
            config: config::default_config(),
            ..Default::default()
        }
    }

    /// Load every table from `dir`
    ///
    /// A missing or malformed file leaves that table empty and logs a warning.
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut tables = RuleTables::new();
        tables.data_dir = Some(dir.to_path_buf());
        tables.read_dir(dir);
        tables
    }

    /// Load tables from the directory named in `config`
    pub fn load_with_config(config: SheetConfig) -> Self {
        let dir = config.tables.data_dir.clone();
        let mut tables = RuleTables::load_from_dir(&dir);
        tables.config = config;
        tables
    }

    /// The SRD tables shipped with the crate
    pub fn srd() -> Self {
        let mut tables = RuleTables::new();
        tables.classes = Table::new(parse_embedded(
            CLASSES_FILE,
            include_str!("../../data/classes.json"),
        ));
        tables.feats = Table::new(parse_embedded(FEATS_FILE, include_str!("../../data/feats.json")));
        tables.species = Table::new(parse_embedded(
            SPECIES_FILE,
            include_str!("../../data/species.json"),
        ));
        tables.origins = Table::new(parse_embedded(
            ORIGINS_FILE,
            include_str!("../../data/origins.json"),
        ));
        tables.items = Table::new(parse_embedded(ITEMS_FILE, include_str!("../../data/items.json")));
        tables.fighting_styles = Table::new(parse_embedded(
            STYLES_FILE,
            include_str!("../../data/fighting_styles.json"),
        ));
        tables.feature_scaling = FeatureScaling::new(parse_embedded(
            SCALING_FILE,
            include_str!("../../data/feature_scaling.json"),
        ));
        tables
    }

    /// Re-read every table from the directory it was loaded from
    ///
    /// Tables built by hand or from the embedded data have no directory and
    /// are left untouched.
    pub fn reload(&mut self) {
        if let Some(dir) = self.data_dir.clone() {
            debug!(dir = %dir.display(), "reloading rule tables");
            self.read_dir(&dir);
        }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    fn read_dir(&mut self, dir: &Path) {
        self.classes = Table::new(load_table(&dir.join(CLASSES_FILE)));
        self.feats = Table::new(load_table(&dir.join(FEATS_FILE)));
        self.species = Table::new(load_table(&dir.join(SPECIES_FILE)));
        self.origins = Table::new(load_table(&dir.join(ORIGINS_FILE)));
        self.items = Table::new(load_table(&dir.join(ITEMS_FILE)));
        self.fighting_styles = Table::new(load_table(&dir.join(STYLES_FILE)));
        self.feature_scaling = FeatureScaling::new(load_table(&dir.join(SCALING_FILE)));
    }

    // === Builders ===

    pub fn insert_class(&mut self, class: ClassDefinition) -> &mut Self {
        self.classes.insert(class);
        self
    }

    pub fn insert_feat(&mut self, feat: FeatDefinition) -> &mut Self {
        self.feats.insert(feat);
        self
    }

    pub fn insert_species(&mut self, species: SpeciesDefinition) -> &mut Self {
        self.species.insert(species);
        self
    }

    pub fn insert_origin(&mut self, origin: OriginDefinition) -> &mut Self {
        self.origins.insert(origin);
        self
    }

    pub fn insert_item(&mut self, item: ItemTemplate) -> &mut Self {
        self.items.insert(item);
        self
    }

    pub fn insert_fighting_style(&mut self, style: FightingStyleDefinition) -> &mut Self {
        self.fighting_styles.insert(style);
        self
    }

    pub fn insert_scaling(&mut self, entry: ScalingEntry) -> &mut Self {
        self.feature_scaling.insert(entry);
        self
    }

    // === Lookups ===

    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get_by_name(name)
    }

    pub fn feat(&self, name: &str) -> Option<&FeatDefinition> {
        self.feats.get_by_name(name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemTemplate> {
        self.items.get_by_name(name)
    }
}

/// Read a JSON array from disk, treating any failure as an empty table
fn load_table<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match config::load_json::<Vec<T>>(path) {
        Ok(entries) => {
            debug!(path = %path.display(), count = entries.len(), "loaded rule table");
            entries
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "rule table unavailable, using empty table");
            Vec::new()
        }
    }
}

fn parse_embedded<T: DeserializeOwned>(file: &str, content: &str) -> Vec<T> {
    serde_json::from_str(content).unwrap_or_else(|err| {
        warn!(file, error = %err, "embedded rule table failed to parse");
        Vec::new()
    })
}

//! Benefit Applier - mutate the character and record each grant
//!
//! Every method appends exactly one ledger entry, even when the grant
//! changes nothing (a second Expertise, a language already spoken). Removal
//! relies on those entries for reference counting.

use crate::benefit::{BenefitSource, GrantedBenefit};
use crate::character::{push_unique, Character, Feature, InventoryItem};
use crate::error::Result;
use crate::rules::{FeatureDefinition, FeatureScaling, ItemTemplate, Table};
use crate::types::{Ability, BenefitKind, Skill};
use tracing::debug;

/// Highest score an additive grant can reach
pub const ABILITY_SCORE_CAP: i32 = 20;

/// Parse "50 GP" style strings into a number of gold pieces
pub fn parse_gold(text: &str) -> Option<i64> {
    let lowered = text.trim().to_lowercase();
    let amount = lowered.strip_suffix("gp")?.trim();
    amount.parse::<i64>().ok().filter(|gold| *gold >= 0)
}

impl Character {
    fn record(&mut self, entry: GrantedBenefit) {
        debug!(
            source = %entry.source,
            benefit = %entry.benefit,
            target = %entry.target,
            value = entry.value,
            "benefit granted"
        );
        self.ledger.add(entry);
    }

    /// Raise an ability, capped at 20
    ///
    /// The ledger keeps the requested increase, so removing a grant that hit
    /// the cap subtracts more than was actually added.
    pub fn grant_ability_score(&mut self, source: &BenefitSource, ability: Ability, increase: i32) {
        let current = self.abilities.get(ability);
        self.abilities
            .set(ability, (current + increase).min(ABILITY_SCORE_CAP));
        self.record(
            GrantedBenefit::new(source, BenefitKind::AbilityScore, ability.name(), increase)
                .with_description(format!("+{} {}", increase, ability.name())),
        );
        self.recalculate();
    }

    /// `grant_ability_score` for free-text ability names
    pub fn grant_ability_score_named(
        &mut self,
        source: &BenefitSource,
        ability: &str,
        increase: i32,
    ) -> Result<()> {
        let ability: Ability = ability.parse()?;
        self.grant_ability_score(source, ability, increase);
        Ok(())
    }

    /// Upgrade a skill one step, remembering the prior level
    pub fn grant_skill(&mut self, source: &BenefitSource, skill: Skill) {
        let prior = self.skills.get(skill);
        self.skills.set(skill, prior.upgraded());
        self.record(
            GrantedBenefit::new(source, BenefitKind::SkillProficiency, skill.name(), prior.as_value())
                .with_description(format!("{} proficiency", skill.name())),
        );
        self.recalculate();
    }

    /// `grant_skill` for free-text skill names
    pub fn grant_skill_named(&mut self, source: &BenefitSource, skill: &str) -> Result<()> {
        let skill: Skill = skill.parse()?;
        self.grant_skill(source, skill);
        Ok(())
    }

    pub fn grant_language(&mut self, source: &BenefitSource, language: &str) {
        push_unique(&mut self.languages, language);
        self.record(GrantedBenefit::new(source, BenefitKind::Language, language, 1));
    }

    pub fn grant_resistance(&mut self, source: &BenefitSource, damage_type: &str) {
        push_unique(&mut self.resistances, damage_type);
        self.record(GrantedBenefit::new(source, BenefitKind::Resistance, damage_type, 1));
    }

    pub fn grant_tool(&mut self, source: &BenefitSource, tool: &str) {
        push_unique(&mut self.tool_proficiencies, tool);
        self.record(GrantedBenefit::new(source, BenefitKind::ToolProficiency, tool, 1));
    }

    /// Add an always-known spell
    pub fn grant_spell(&mut self, source: &BenefitSource, spell: &str) {
        self.spellbook.learn(spell);
        self.record(GrantedBenefit::new(source, BenefitKind::Spell, spell, 1));
    }

    pub fn grant_speed(&mut self, source: &BenefitSource, amount: i32) {
        self.speed += amount;
        self.record(GrantedBenefit::new(source, BenefitKind::Speed, "speed", amount));
        self.recalculate();
    }

    /// Raise max HP and heal to full
    pub fn grant_hit_points(&mut self, source: &BenefitSource, amount: i32) {
        self.max_hp += amount;
        self.current_hp = self.max_hp;
        self.record(GrantedBenefit::new(source, BenefitKind::HitPoints, "max_hp", amount));
        self.recalculate();
    }

    pub fn grant_initiative(&mut self, source: &BenefitSource, amount: i32) {
        self.initiative_bonus += amount;
        self.record(GrantedBenefit::new(source, BenefitKind::Initiative, "initiative", amount));
        self.recalculate();
    }

    pub fn grant_armor_class(&mut self, source: &BenefitSource, amount: i32) {
        self.ac_bonus += amount;
        self.record(GrantedBenefit::new(source, BenefitKind::ArmorClass, "armor_class", amount));
        self.recalculate();
    }

    /// Bonus to a passive score such as passive Perception
    pub fn grant_passive_bonus(&mut self, source: &BenefitSource, target: &str, amount: i32) {
        *self
            .passive_bonuses
            .entry(target.to_lowercase())
            .or_insert(0) += amount;
        self.record(GrantedBenefit::new(source, BenefitKind::PassiveBonus, target, amount));
    }

    /// Instantiate a feature, evaluating its uses formula now
    ///
    /// `class` names the class whose level drives "level" and scaling
    /// formulas. Returns the evaluated max uses.
    pub fn grant_feature(
        &mut self,
        source: &BenefitSource,
        definition: &FeatureDefinition,
        class: Option<&str>,
        scaling: &FeatureScaling,
    ) -> i32 {
        let feature = self.build_feature(source, definition, class, scaling);
        let max_uses = feature.max_uses;
        self.features.push(feature);
        self.record(
            GrantedBenefit::new(source, BenefitKind::Feature, &definition.name, max_uses)
                .with_description(definition.description.clone()),
        );
        self.recalculate();
        max_uses
    }

    /// A fully charged feature instance, not yet attached to the sheet
    pub(crate) fn build_feature(
        &self,
        source: &BenefitSource,
        definition: &FeatureDefinition,
        class: Option<&str>,
        scaling: &FeatureScaling,
    ) -> Feature {
        let max_uses = definition
            .uses
            .as_ref()
            .map(|formula| formula.evaluate(self, class, &definition.name, scaling))
            .unwrap_or(0)
            .max(0);
        Feature {
            name: definition.name.clone(),
            description: definition.description.clone(),
            max_uses,
            current_uses: max_uses,
            rest_type: definition.rest_type,
            source: source.tag(),
            uses: definition.uses.clone(),
            class: class.map(str::to_string),
        }
    }

    /// Add an item by template name, or credit gold for "<n> GP"
    pub fn grant_item(&mut self, source: &BenefitSource, name: &str, items: &Table<ItemTemplate>) {
        if let Some(gold) = parse_gold(name) {
            self.inventory.add_gold(gold);
            self.record(GrantedBenefit::new(
                source,
                BenefitKind::Item,
                name,
                gold.min(i32::MAX as i64) as i32,
            ));
            return;
        }
        let item = match items.get_by_name(name) {
            Some(template) => InventoryItem::from_template(template, 1),
            None => InventoryItem::generic(name, 1),
        };
        let target = item.name.clone();
        self.inventory.add(item);
        self.record(GrantedBenefit::new(source, BenefitKind::Item, target, 1));
        self.recalculate();
    }
}

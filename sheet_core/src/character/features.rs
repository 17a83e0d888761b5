//! Feature - a limited-use (or passive) ability held by the character

use crate::benefit::UsesFormula;
use crate::types::RestType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_uses: i32,
    pub current_uses: i32,
    pub rest_type: RestType,
    /// Composite tag "<source kind>: <source name>"
    pub source: String,
    /// Kept so max uses can be re-evaluated on level-up
    #[serde(default)]
    pub uses: Option<UsesFormula>,
    /// Class whose level drives `uses`, if any
    #[serde(default)]
    pub class: Option<String>,
}

impl Feature {
    /// Passive features have no uses to track
    pub fn is_passive(&self) -> bool {
        self.max_uses == 0
    }

    /// Spend one use; false when none remain
    pub fn use_once(&mut self) -> bool {
        if self.current_uses <= 0 {
            return false;
        }
        self.current_uses -= 1;
        true
    }

    /// Restore up to `amount` uses; false when already full
    pub fn restore(&mut self, amount: i32) -> bool {
        if self.current_uses >= self.max_uses || amount <= 0 {
            return false;
        }
        self.current_uses = (self.current_uses + amount).min(self.max_uses);
        true
    }

    pub fn recharge(&mut self) {
        self.current_uses = self.max_uses;
    }

    /// Change max uses, keeping the number already spent
    pub fn rescale(&mut self, max_uses: i32) {
        let spent = (self.max_uses - self.current_uses).max(0);
        self.max_uses = max_uses.max(0);
        self.current_uses = (self.max_uses - spent).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second_wind() -> Feature {
        Feature {
            name: "Second Wind".to_string(),
            description: String::new(),
            max_uses: 2,
            current_uses: 2,
            rest_type: RestType::Short,
            source: "class: Fighter".to_string(),
            uses: Some(UsesFormula::Constant(2)),
            class: Some("Fighter".to_string()),
        }
    }

    #[test]
    fn test_use_and_restore() {
        let mut feature = second_wind();
        assert!(feature.use_once());
        assert!(feature.use_once());
        assert!(!feature.use_once());
        assert!(feature.restore(5));
        assert_eq!(feature.current_uses, 2);
        assert!(!feature.restore(1));
    }

    #[test]
    fn test_rescale_keeps_spent() {
        let mut feature = second_wind();
        feature.use_once();
        feature.rescale(3);
        assert_eq!(feature.max_uses, 3);
        assert_eq!(feature.current_uses, 2);
    }
}

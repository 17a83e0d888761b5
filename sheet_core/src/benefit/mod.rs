//! Benefit ledger, applier and remover
//!
//! Every mechanical grant passes through here so it can be reversed exactly
//! later. `apply` adds methods to `Character` that mutate state and append a
//! ledger entry; `remove` pulls a source's entries back out and undoes them.

mod apply;
mod formula;
mod ledger;
mod remove;

pub use apply::{parse_gold, ABILITY_SCORE_CAP};
pub use formula::{FormulaParseError, FormulaTerm, PreparationFormula, UsesFormula};
pub use ledger::{BenefitLedger, BenefitSource, GrantedBenefit};
pub use remove::ABILITY_SCORE_FLOOR;

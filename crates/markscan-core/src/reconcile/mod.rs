pub mod engine;
pub mod outcome;

pub use engine::{reconcile, reconcile_in_place, reconcile_with_changes};
pub use outcome::RuleChange;

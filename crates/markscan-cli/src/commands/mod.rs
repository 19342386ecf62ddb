pub mod analyze;
pub mod answer;
pub mod reconcile;
pub mod rules;
pub mod validate;

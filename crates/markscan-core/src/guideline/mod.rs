pub mod analyzer;
pub(crate) mod signals;
pub mod summary;

pub use analyzer::{analyze, analyze_value};
pub use summary::{Abbreviation, JsonGuidelineSummary};

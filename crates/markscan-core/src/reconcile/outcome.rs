use serde::Serialize;
use std::fmt;

/// One setting the reconciler changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleChange {
    /// Dotted camelCase path, e.g. `answerStructure.validateMarks`.
    pub field: &'static str,
    pub from: String,
    pub to: String,
}

impl fmt::Display for RuleChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.from, self.to)
    }
}

/// Change accumulator for a single reconciliation pass.
#[derive(Debug, Default)]
pub(crate) struct ChangeLog {
    pub changes: Vec<RuleChange>,
}

impl ChangeLog {
    /// Turn `flag` on when `evidence` holds. Never turns a flag off.
    pub fn enable(&mut self, flag: &mut bool, field: &'static str, evidence: bool) {
        if evidence && !*flag {
            *flag = true;
            self.record(field, false, true);
        }
    }

    /// Overwrite `flag` with `value`.
    pub fn set(&mut self, flag: &mut bool, field: &'static str, value: bool) {
        if *flag != value {
            let from = *flag;
            *flag = value;
            self.record(field, from, value);
        }
    }

    pub fn record(&mut self, field: &'static str, from: impl ToString, to: impl ToString) {
        let change = RuleChange {
            field,
            from: from.to_string(),
            to: to.to_string(),
        };
        tracing::debug!(%change, "extraction rule updated");
        self.changes.push(change);
    }
}

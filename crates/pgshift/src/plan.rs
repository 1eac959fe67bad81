//! An ordered set of changes, rendered as migration scripts.

use crate::change::{Change, ChangeKind};
use indexmap::IndexMap;
use std::fmt;

/// The changes from one comparison, with the scripts a migration ledger stores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    changes: Vec<Change>,
}

impl Plan {
    pub fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Forward script: every change's SQL in apply order.
    pub fn up_sql(&self) -> String {
        self.changes
            .iter()
            .map(Change::sql)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Rollback script: every change's down SQL, last change first.
    pub fn down_sql(&self) -> String {
        self.changes
            .iter()
            .rev()
            .map(Change::down_sql)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn is_reversible(&self) -> bool {
        self.changes.iter().all(Change::is_reversible)
    }

    /// Changes whose down SQL cannot be executed.
    pub fn irreversible(&self) -> Vec<&Change> {
        self.changes.iter().filter(|c| !c.is_reversible()).collect()
    }

    /// blake3 hex digest of [`Plan::up_sql`].
    pub fn checksum(&self) -> String {
        pgshift_sql::checksum(&self.up_sql())
    }

    /// One-line description, e.g. `Create 2 tables, Alter 1 enum`.
    pub fn summary(&self) -> String {
        if self.changes.is_empty() {
            return "No changes".to_string();
        }
        let mut counts: IndexMap<ChangeKind, usize> = IndexMap::new();
        for change in &self.changes {
            *counts.entry(change.kind()).or_default() += 1;
        }
        counts
            .iter()
            .map(|(kind, n)| {
                let noun = if *n == 1 {
                    kind.object_kind().label().to_string()
                } else {
                    kind.object_kind().plural()
                };
                format!("{} {} {}", kind.action().label(), n, noun)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<Change>> for Plan {
    fn from(changes: Vec<Change>) -> Self {
        Self::new(changes)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            return writeln!(f, "No changes.");
        }
        writeln!(f, "{}:", self.summary())?;
        for change in &self.changes {
            writeln!(f, "  {}", change)?;
        }
        Ok(())
    }
}

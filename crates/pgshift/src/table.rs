//! Table reconciliation: column-level diffs of matched tables, dependency
//! ordered creates and drops.

use crate::alter::Alteration;
use crate::change::{Change, irreversible};
use crate::ddl::{column_definition, identity_options};
use crate::reconcile::partition;
use crate::sort;
use pgshift_schema::{Column, IdentityKind, Table};
use pgshift_sql::{qualified_name, quote_ident, types_equal};
use std::fmt;

/// Why a matched column needs altering. Variants are in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlterReason {
    Type,
    Nullability,
    Default,
    Identity,
    IdentityOptions,
    GeneratedExpression,
    GeneratedStorage,
}

impl AlterReason {
    pub fn label(&self) -> &'static str {
        match self {
            AlterReason::Type => "type",
            AlterReason::Nullability => "nullability",
            AlterReason::Default => "default",
            AlterReason::Identity => "identity",
            AlterReason::IdentityOptions => "identity options",
            AlterReason::GeneratedExpression => "generated expression",
            AlterReason::GeneratedStorage => "generated storage",
        }
    }
}

/// A column present on both sides whose definition changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAlter {
    pub name: String,
    pub from: Column,
    pub to: Column,
    pub reasons: Vec<AlterReason>,
}

impl ColumnAlter {
    /// Compare two definitions of the same column. `None` when nothing differs.
    pub fn between(from: &Column, to: &Column) -> Option<Self> {
        let mut reasons = Vec::new();

        if !types_equal(&from.type_name, &to.type_name) {
            reasons.push(AlterReason::Type);
        }
        if from.nullable != to.nullable {
            reasons.push(AlterReason::Nullability);
        }
        if from.default != to.default {
            reasons.push(AlterReason::Default);
        }
        if from.identity.kind != to.identity.kind {
            reasons.push(AlterReason::Identity);
        }
        if from.identity.is_identity()
            && to.identity.is_identity()
            && (from.identity.start != to.identity.start
                || from.identity.increment != to.identity.increment
                || from.identity.cache != to.identity.cache
                || from.identity.cycle != to.identity.cycle)
        {
            reasons.push(AlterReason::IdentityOptions);
        }
        let expression = |c: &Column| c.generated.as_ref().map(|g| g.expression.clone());
        if expression(from) != expression(to) {
            reasons.push(AlterReason::GeneratedExpression);
        }
        if let (Some(before), Some(after)) = (&from.generated, &to.generated)
            && before.storage != after.storage
        {
            reasons.push(AlterReason::GeneratedStorage);
        }

        if reasons.is_empty() {
            return None;
        }
        Some(Self {
            name: to.name.clone(),
            from: from.clone(),
            to: to.clone(),
            reasons,
        })
    }

    /// Why this change cannot be undone, if it cannot.
    ///
    /// Dropping a generation expression loses it. Making a plain column
    /// generated, or changing generated storage, has no in-place statement in
    /// either direction.
    fn irreversible_reason(&self) -> Option<&'static str> {
        let expression_changed = self.reasons.contains(&AlterReason::GeneratedExpression);
        match (&self.from.generated, &self.to.generated) {
            (Some(_), None) if expression_changed => {
                Some("generation expression cannot be restored")
            }
            (None, Some(_)) if expression_changed => {
                Some("cannot become a generated column in place")
            }
            _ if self.reasons.contains(&AlterReason::GeneratedStorage) => {
                Some("generated column storage cannot change in place")
            }
            _ => None,
        }
    }
}

/// Column-level changes to one existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableAlter {
    pub schema: String,
    pub name: String,
    /// Columns to add, in desired order
    pub add_columns: Vec<Column>,
    /// Columns to drop, in current order
    pub drop_columns: Vec<String>,
    /// Changed columns, in desired order
    pub alter_columns: Vec<ColumnAlter>,
    /// The table as it was before, when known
    pub prior: Option<Table>,
}

impl TableAlter {
    pub fn is_empty(&self) -> bool {
        self.add_columns.is_empty() && self.drop_columns.is_empty() && self.alter_columns.is_empty()
    }

    fn table_name(&self) -> String {
        qualified_name(&self.schema, &self.name)
    }

    /// Forward statements: adds, then drops, then alters.
    pub fn sql(&self) -> String {
        let table = self.table_name();
        let mut statements = Vec::new();
        for col in &self.add_columns {
            statements.push(format!(
                "ALTER TABLE {} ADD COLUMN {};",
                table,
                column_definition(col)
            ));
        }
        for col in &self.drop_columns {
            statements.push(format!(
                "ALTER TABLE {} DROP COLUMN {};",
                table,
                quote_ident(col)
            ));
        }
        for alter in &self.alter_columns {
            for reason in &alter.reasons {
                statements.push(alter_column_sql(&table, &alter.from, &alter.to, *reason));
            }
        }
        statements.join("\n")
    }

    pub fn is_reversible(&self) -> bool {
        self.drop_columns.is_empty()
            && self.prior.is_some()
            && self
                .alter_columns
                .iter()
                .all(|a| a.irreversible_reason().is_none())
    }

    /// Statements undoing [`TableAlter::sql`]: alterations reversed, then the
    /// added columns dropped, both in reverse order.
    pub fn down_sql(&self) -> String {
        let table = self.table_name();
        if !self.drop_columns.is_empty() {
            return irreversible(format_args!(
                "dropped columns of table {} cannot be restored: {}",
                table,
                self.drop_columns.join(", ")
            ));
        }
        if self.prior.is_none() {
            return irreversible(format_args!(
                "previous definition of table {} was not captured",
                table
            ));
        }
        for alter in &self.alter_columns {
            if let Some(reason) = alter.irreversible_reason() {
                return irreversible(format_args!(
                    "{}.{}: {}",
                    table,
                    quote_ident(&alter.name),
                    reason
                ));
            }
        }

        let mut statements = Vec::new();
        for alter in self.alter_columns.iter().rev() {
            for reason in alter.reasons.iter().rev() {
                statements.push(alter_column_sql(&table, &alter.to, &alter.from, *reason));
            }
        }
        for col in self.add_columns.iter().rev() {
            statements.push(format!(
                "ALTER TABLE {} DROP COLUMN {};",
                table,
                quote_ident(&col.name)
            ));
        }
        statements.join("\n")
    }

    /// Short description such as `+email, -legacy, ~name`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .add_columns
            .iter()
            .map(|c| format!("+{}", c.name))
            .chain(self.drop_columns.iter().map(|c| format!("-{}", c)))
            .chain(self.alter_columns.iter().map(|a| format!("~{}", a.name)))
            .collect();
        parts.join(", ")
    }
}

impl fmt::Display for ColumnAlter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<&str> = self.reasons.iter().map(|r| r.label()).collect();
        write!(f, "{} ({})", self.name, reasons.join(", "))
    }
}

/// One statement moving a column from `from` to `to` for a single reason.
fn alter_column_sql(table: &str, from: &Column, to: &Column, reason: AlterReason) -> String {
    let column = quote_ident(&to.name);
    let alter = |action: String| format!("ALTER TABLE {} ALTER COLUMN {} {};", table, column, action);

    match reason {
        AlterReason::Type => alter(format!("TYPE {}", to.type_name)),
        AlterReason::Nullability if to.nullable => alter("DROP NOT NULL".to_string()),
        AlterReason::Nullability => alter("SET NOT NULL".to_string()),
        AlterReason::Default => match &to.default {
            Some(default) => alter(format!("SET DEFAULT {}", default)),
            None => alter("DROP DEFAULT".to_string()),
        },
        AlterReason::Identity => match (from.identity.kind, to.identity.kind) {
            (_, IdentityKind::None) => alter("DROP IDENTITY".to_string()),
            (IdentityKind::None, kind) => {
                let options = identity_options(&to.identity);
                let options = if options.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", options)
                };
                alter(format!("ADD GENERATED {} AS IDENTITY{}", kind.to_sql(), options))
            }
            (_, kind) => alter(format!("SET GENERATED {}", kind.to_sql())),
        },
        AlterReason::IdentityOptions => {
            let (before, after) = (&from.identity, &to.identity);
            let mut parts = Vec::new();
            if before.start != after.start {
                parts.push(format!("RESTART WITH {}", after.start.unwrap_or(1)));
            }
            if before.increment != after.increment {
                parts.push(format!("SET INCREMENT BY {}", after.increment.unwrap_or(1)));
            }
            if before.cache != after.cache {
                parts.push(format!("SET CACHE {}", after.cache.unwrap_or(1)));
            }
            if before.cycle != after.cycle {
                parts.push(if after.cycle { "SET CYCLE" } else { "SET NO CYCLE" }.to_string());
            }
            alter(parts.join(" "))
        }
        AlterReason::GeneratedExpression => match (&from.generated, &to.generated) {
            (Some(_), Some(generated)) => {
                alter(format!("SET EXPRESSION AS ({})", generated.expression))
            }
            (Some(_), None) => alter("DROP EXPRESSION".to_string()),
            _ => format!(
                "-- cannot turn {}.{} into a generated column in place, recreate the column",
                table, column
            ),
        },
        AlterReason::GeneratedStorage => format!(
            "-- cannot change generated column storage of {}.{} in place, recreate the column",
            table, column
        ),
    }
}

/// Column-level diff of two definitions of the same table.
pub fn diff_table(current: &Table, desired: &Table) -> Option<TableAlter> {
    let add_columns: Vec<Column> = desired
        .columns
        .iter()
        .filter(|col| current.column(&col.name).is_none())
        .cloned()
        .collect();

    let drop_columns: Vec<String> = current
        .columns
        .iter()
        .filter(|col| desired.column(&col.name).is_none())
        .map(|col| col.name.clone())
        .collect();

    let alter_columns: Vec<ColumnAlter> = desired
        .columns
        .iter()
        .filter_map(|col| {
            current
                .column(&col.name)
                .and_then(|before| ColumnAlter::between(before, col))
        })
        .collect();

    let alter = TableAlter {
        schema: desired.schema.clone(),
        name: desired.name.clone(),
        add_columns,
        drop_columns,
        alter_columns,
        prior: Some(current.clone()),
    };
    (!alter.is_empty()).then_some(alter)
}

/// Reconcile tables: creates in dependency order, drops in reverse
/// dependency order, then column alterations sorted by key.
pub fn compare_tables(current: &[Table], desired: &[Table]) -> Vec<Change> {
    let keyed = partition(current, desired);
    let mut changes = Vec::new();

    for table in sort::creation_order(&keyed.created) {
        changes.push(Change::Create(table.clone().into()));
    }
    for table in sort::drop_order(&keyed.dropped) {
        changes.push(Change::Drop {
            object: table.clone().into(),
            captured: true,
        });
    }
    for (before, after) in keyed.matched {
        if let Some(alter) = diff_table(before, after) {
            changes.push(Change::Alter(Alteration::Table(alter)));
        }
    }
    changes
}

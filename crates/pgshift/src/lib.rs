//! Declarative Postgres schema reconciliation.
//!
//! Given a snapshot of the current database schema and a snapshot of the
//! desired one, [`compare`] returns the ordered [`Change`]s that turn the
//! first into the second. Every change renders its forward SQL and the SQL
//! that undoes it, and says whether undoing is possible at all.
//!
//! ```ignore
//! let current = pgshift::snapshot::load("current.json")?;
//! let desired = pgshift::snapshot::load("desired.json")?;
//! let plan = pgshift::plan(&current, &desired);
//! println!("{}", plan.up_sql());
//! ```
//!
//! Comparison is pure and never fails. Only the edges that touch the
//! filesystem ([`snapshot`], [`config`]) return [`Result`].

mod alter;
mod change;
mod compare;
pub mod config;
mod ddl;
mod error;
pub mod filter;
mod plan;
pub mod reconcile;
pub mod snapshot;
mod sort;
mod table;

pub use alter::{Alteration, EnumAlter, EnumPosition, EnumValue, Replace};
pub use change::{Change, ChangeAction, ChangeKind, IRREVERSIBLE, Object};
pub use compare::compare;
pub use ddl::Ddl;
pub use error::{Error, Result};
pub use plan::Plan;
pub use sort::{creation_order, drop_order};
pub use table::{AlterReason, ColumnAlter, TableAlter, diff_table};

pub use pgshift_config::{Config, Filter};
pub use pgshift_schema as schema;
pub use pgshift_schema::Schema;

/// [`compare`] after removing everything `filter` excludes from both sides.
pub fn compare_filtered(current: &Schema, desired: &Schema, filter: &Filter) -> Vec<Change> {
    compare(&filter::apply(current, filter), &filter::apply(desired, filter))
}

/// [`compare`], wrapped in a [`Plan`].
pub fn plan(current: &Schema, desired: &Schema) -> Plan {
    Plan::new(compare(current, desired))
}

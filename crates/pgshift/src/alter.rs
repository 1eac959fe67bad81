//! In-place alterations.

use crate::change::{ChangeKind, irreversible};
use crate::ddl::{
    Ddl, comment_sql, connection_limit, flag, function_sql, procedure_sql, view_sql,
};
use crate::table::TableAlter;
use pgshift_schema::{
    Comment, Function, MaterializedView, ObjectKind, Procedure, Role, SchemaObject, Sequence,
    View,
};
use pgshift_sql::{Lit, qualified_name, quote_ident};
use std::fmt;

/// The desired definition of an object, with the definition it replaces.
///
/// `prior` is `None` when the replaced definition is unknown; such an
/// alteration can be applied but not undone.
#[derive(Debug, Clone, PartialEq)]
pub struct Replace<T> {
    pub desired: T,
    pub prior: Option<T>,
}

impl<T> Replace<T> {
    pub fn new(prior: T, desired: T) -> Self {
        Self {
            desired,
            prior: Some(prior),
        }
    }
}

/// Where a new enum label goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumPosition {
    /// Appended after every existing label
    End,
    Before(String),
    After(String),
}

/// One label added to an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub value: String,
    pub position: EnumPosition,
}

/// Labels added to an existing enum, in the order they must be added.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumAlter {
    pub schema: String,
    pub name: String,
    pub added: Vec<EnumValue>,
}

impl EnumAlter {
    /// The added labels, in order.
    pub fn values(&self) -> Vec<&str> {
        self.added.iter().map(|v| v.value.as_str()).collect()
    }

    fn sql(&self) -> String {
        let name = qualified_name(&self.schema, &self.name);
        self.added
            .iter()
            .map(|v| {
                let position = match &v.position {
                    EnumPosition::End => String::new(),
                    EnumPosition::Before(other) => format!(" BEFORE {}", Lit(other)),
                    EnumPosition::After(other) => format!(" AFTER {}", Lit(other)),
                };
                format!("ALTER TYPE {} ADD VALUE {}{};", name, Lit(&v.value), position)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An in-place change to an existing object.
#[derive(Debug, Clone, PartialEq)]
pub enum Alteration {
    Enum(EnumAlter),
    Sequence(Replace<Sequence>),
    Table(TableAlter),
    View(Replace<View>),
    MaterializedView(Replace<MaterializedView>),
    Function(Replace<Function>),
    Procedure(Replace<Procedure>),
    Role(Replace<Role>),
    Comment(Replace<Comment>),
}

impl Alteration {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Alteration::Enum(_) => ChangeKind::AlterEnum,
            Alteration::Sequence(_) => ChangeKind::AlterSequence,
            Alteration::Table(_) => ChangeKind::AlterTable,
            Alteration::View(_) => ChangeKind::AlterView,
            Alteration::MaterializedView(_) => ChangeKind::AlterMaterializedView,
            Alteration::Function(_) => ChangeKind::AlterFunction,
            Alteration::Procedure(_) => ChangeKind::AlterProcedure,
            Alteration::Role(_) => ChangeKind::AlterRole,
            Alteration::Comment(_) => ChangeKind::AlterComment,
        }
    }

    pub fn object_kind(&self) -> ObjectKind {
        self.kind().object_kind()
    }

    pub fn object_name(&self) -> String {
        match self {
            Alteration::Enum(e) => qualified_name(&e.schema, &e.name),
            Alteration::Sequence(r) => r.desired.display_name(),
            Alteration::Table(t) => qualified_name(&t.schema, &t.name),
            Alteration::View(r) => r.desired.display_name(),
            Alteration::MaterializedView(r) => r.desired.display_name(),
            Alteration::Function(r) => r.desired.display_name(),
            Alteration::Procedure(r) => r.desired.display_name(),
            Alteration::Role(r) => r.desired.display_name(),
            Alteration::Comment(r) => r.desired.display_name(),
        }
    }

    pub fn sql(&self) -> String {
        match self {
            Alteration::Enum(e) => e.sql(),
            Alteration::Sequence(r) => {
                let base = r.prior.clone().unwrap_or_else(|| Sequence {
                    schema: r.desired.schema.clone(),
                    name: r.desired.name.clone(),
                    ..Sequence::default()
                });
                alter_sequence_sql(&base, &r.desired)
            }
            Alteration::Table(t) => t.sql(),
            Alteration::View(r) => view_sql(&r.desired, true),
            Alteration::MaterializedView(r) => recreate_materialized_view(&r.desired),
            Alteration::Function(r) => function_sql(&r.desired, true),
            Alteration::Procedure(r) => procedure_sql(&r.desired, true),
            Alteration::Role(r) => {
                let base = r.prior.clone().unwrap_or_else(|| Role {
                    name: r.desired.name.clone(),
                    ..Role::default()
                });
                alter_role_sql(&base, &r.desired)
            }
            Alteration::Comment(r) => r.desired.create_sql(),
        }
    }

    pub fn down_sql(&self) -> String {
        let missing_prior = || {
            irreversible(format_args!(
                "previous definition of {} {} was not captured",
                self.object_kind(),
                self.object_name()
            ))
        };
        match self {
            Alteration::Enum(e) => irreversible(format_args!(
                "labels cannot be removed from enum {}",
                qualified_name(&e.schema, &e.name)
            )),
            Alteration::Table(t) => t.down_sql(),
            Alteration::Sequence(r) => match &r.prior {
                Some(prior) => alter_sequence_sql(&r.desired, prior),
                None => missing_prior(),
            },
            Alteration::View(r) => match &r.prior {
                Some(prior) => view_sql(prior, true),
                None => missing_prior(),
            },
            Alteration::MaterializedView(r) => match &r.prior {
                Some(prior) => recreate_materialized_view(prior),
                None => missing_prior(),
            },
            Alteration::Function(r) => match &r.prior {
                Some(prior) => function_sql(prior, true),
                None => missing_prior(),
            },
            Alteration::Procedure(r) => match &r.prior {
                Some(prior) => procedure_sql(prior, true),
                None => missing_prior(),
            },
            Alteration::Role(r) => match &r.prior {
                Some(prior) => alter_role_sql(&r.desired, prior),
                None => missing_prior(),
            },
            Alteration::Comment(r) => match &r.prior {
                Some(prior) => comment_sql(prior, Some(&prior.text)),
                None => missing_prior(),
            },
        }
    }

    pub fn is_reversible(&self) -> bool {
        match self {
            Alteration::Enum(_) => false,
            Alteration::Table(t) => t.is_reversible(),
            Alteration::Sequence(r) => r.prior.is_some(),
            Alteration::View(r) => r.prior.is_some(),
            Alteration::MaterializedView(r) => r.prior.is_some(),
            Alteration::Function(r) => r.prior.is_some(),
            Alteration::Procedure(r) => r.prior.is_some(),
            Alteration::Role(r) => r.prior.is_some(),
            Alteration::Comment(r) => r.prior.is_some(),
        }
    }
}

impl fmt::Display for Alteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.object_kind(), self.object_name())?;
        match self {
            Alteration::Enum(e) => {
                let values: Vec<String> = e.added.iter().map(|v| Lit(&v.value).to_string()).collect();
                write!(f, " (+ {})", values.join(", "))
            }
            Alteration::Table(t) => write!(f, " ({})", t.summary()),
            _ => Ok(()),
        }
    }
}

/// Materialized views cannot be replaced in place.
fn recreate_materialized_view(view: &MaterializedView) -> String {
    format!("{}\n{}", view.drop_sql(), view.create_sql())
}

/// `ALTER SEQUENCE` moving `from` to `to`, naming only the differing options.
/// Unset options fall back to the server defaults.
fn alter_sequence_sql(from: &Sequence, to: &Sequence) -> String {
    let mut options = Vec::new();
    if from.data_type != to.data_type {
        options.push(format!("AS {}", to.data_type.as_deref().unwrap_or("bigint")));
    }
    if from.increment != to.increment {
        options.push(format!("INCREMENT BY {}", to.increment.unwrap_or(1)));
    }
    if from.min_value != to.min_value {
        options.push(match to.min_value {
            Some(min) => format!("MINVALUE {}", min),
            None => "NO MINVALUE".to_string(),
        });
    }
    if from.max_value != to.max_value {
        options.push(match to.max_value {
            Some(max) => format!("MAXVALUE {}", max),
            None => "NO MAXVALUE".to_string(),
        });
    }
    if from.start != to.start {
        options.push(format!("START WITH {}", to.start.unwrap_or(1)));
    }
    if from.cache != to.cache {
        options.push(format!("CACHE {}", to.cache.unwrap_or(1)));
    }
    if from.cycle != to.cycle {
        options.push(if to.cycle { "CYCLE" } else { "NO CYCLE" }.to_string());
    }
    if from.owned_by != to.owned_by {
        options.push(match &to.owned_by {
            Some(owner) => format!("OWNED BY {}", owner),
            None => "OWNED BY NONE".to_string(),
        });
    }
    format!(
        "ALTER SEQUENCE {} {};",
        qualified_name(&to.schema, &to.name),
        options.join(" ")
    )
}

/// `ALTER ROLE … WITH` naming only the attributes that differ.
fn alter_role_sql(from: &Role, to: &Role) -> String {
    let flags = [
        (from.superuser, to.superuser, "SUPERUSER"),
        (from.create_db, to.create_db, "CREATEDB"),
        (from.create_role, to.create_role, "CREATEROLE"),
        (from.inherit, to.inherit, "INHERIT"),
        (from.login, to.login, "LOGIN"),
        (from.replication, to.replication, "REPLICATION"),
        (from.bypass_rls, to.bypass_rls, "BYPASSRLS"),
    ];
    let mut options: Vec<String> = flags
        .iter()
        .filter(|(before, after, _)| before != after)
        .map(|(_, after, keyword)| flag(*after, keyword))
        .collect();
    if from.connection_limit != to.connection_limit {
        options.push(connection_limit(to.connection_limit));
    }
    format!("ALTER ROLE {} WITH {};", quote_ident(&to.name), options.join(" "))
}

//! Postgres schema model for pgshift.
//!
//! A [`Schema`] is a plain snapshot of every object the reconciler knows
//! about, one ordered list per kind. Snapshots are produced by introspection
//! (outside this workspace), deserialized with facet and never mutated by the
//! engine.
//!
//! Each object kind implements [`SchemaObject`], which names the identity key
//! used to match objects between two snapshots.

use facet::Facet;
use pgshift_sql::qualified_name;
use std::fmt;

mod access;
mod foreign;
mod replication;
mod routines;
mod table;
mod types;
mod views;

pub use access::*;
pub use foreign::*;
pub use replication::*;
pub use routines::*;
pub use table::*;
pub use types::*;
pub use views::*;

// =============================================================================
// Object kinds
// =============================================================================

/// Every kind of object a [`Schema`] carries, in reconciliation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Facet)]
#[repr(u8)]
pub enum ObjectKind {
    #[facet(rename = "namespace")]
    Namespace,
    #[facet(rename = "extension")]
    Extension,
    #[facet(rename = "enum")]
    Enum,
    #[facet(rename = "domain")]
    Domain,
    #[facet(rename = "composite_type")]
    CompositeType,
    #[facet(rename = "sequence")]
    Sequence,
    #[facet(rename = "table")]
    Table,
    #[facet(rename = "index")]
    Index,
    #[facet(rename = "view")]
    View,
    #[facet(rename = "materialized_view")]
    MaterializedView,
    #[facet(rename = "function")]
    Function,
    #[facet(rename = "procedure")]
    Procedure,
    #[facet(rename = "aggregate")]
    Aggregate,
    #[facet(rename = "trigger")]
    Trigger,
    #[facet(rename = "event_trigger")]
    EventTrigger,
    #[facet(rename = "rule")]
    Rule,
    #[facet(rename = "policy")]
    Policy,
    #[facet(rename = "collation")]
    Collation,
    #[facet(rename = "text_search_config")]
    TextSearchConfig,
    #[facet(rename = "publication")]
    Publication,
    #[facet(rename = "subscription")]
    Subscription,
    #[facet(rename = "foreign_data_wrapper")]
    ForeignDataWrapper,
    #[facet(rename = "foreign_server")]
    ForeignServer,
    #[facet(rename = "foreign_table")]
    ForeignTable,
    #[facet(rename = "operator")]
    Operator,
    #[facet(rename = "role")]
    Role,
    #[facet(rename = "role_grant")]
    RoleGrant,
    #[facet(rename = "default_privilege")]
    DefaultPrivilege,
    #[facet(rename = "comment")]
    Comment,
}

impl ObjectKind {
    /// All kinds, in the order changes are emitted.
    pub const ALL: [ObjectKind; 29] = [
        ObjectKind::Namespace,
        ObjectKind::Extension,
        ObjectKind::Enum,
        ObjectKind::Domain,
        ObjectKind::CompositeType,
        ObjectKind::Sequence,
        ObjectKind::Table,
        ObjectKind::Index,
        ObjectKind::View,
        ObjectKind::MaterializedView,
        ObjectKind::Function,
        ObjectKind::Procedure,
        ObjectKind::Aggregate,
        ObjectKind::Trigger,
        ObjectKind::EventTrigger,
        ObjectKind::Rule,
        ObjectKind::Policy,
        ObjectKind::Collation,
        ObjectKind::TextSearchConfig,
        ObjectKind::Publication,
        ObjectKind::Subscription,
        ObjectKind::ForeignDataWrapper,
        ObjectKind::ForeignServer,
        ObjectKind::ForeignTable,
        ObjectKind::Operator,
        ObjectKind::Role,
        ObjectKind::RoleGrant,
        ObjectKind::DefaultPrivilege,
        ObjectKind::Comment,
    ];

    /// Human-readable singular name.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Namespace => "schema",
            ObjectKind::Extension => "extension",
            ObjectKind::Enum => "enum",
            ObjectKind::Domain => "domain",
            ObjectKind::CompositeType => "composite type",
            ObjectKind::Sequence => "sequence",
            ObjectKind::Table => "table",
            ObjectKind::Index => "index",
            ObjectKind::View => "view",
            ObjectKind::MaterializedView => "materialized view",
            ObjectKind::Function => "function",
            ObjectKind::Procedure => "procedure",
            ObjectKind::Aggregate => "aggregate",
            ObjectKind::Trigger => "trigger",
            ObjectKind::EventTrigger => "event trigger",
            ObjectKind::Rule => "rule",
            ObjectKind::Policy => "policy",
            ObjectKind::Collation => "collation",
            ObjectKind::TextSearchConfig => "text search configuration",
            ObjectKind::Publication => "publication",
            ObjectKind::Subscription => "subscription",
            ObjectKind::ForeignDataWrapper => "foreign-data wrapper",
            ObjectKind::ForeignServer => "foreign server",
            ObjectKind::ForeignTable => "foreign table",
            ObjectKind::Operator => "operator",
            ObjectKind::Role => "role",
            ObjectKind::RoleGrant => "grant",
            ObjectKind::DefaultPrivilege => "default privilege",
            ObjectKind::Comment => "comment",
        }
    }

    /// Human-readable plural name.
    pub fn plural(&self) -> String {
        match self {
            ObjectKind::Namespace => "schemas".to_string(),
            ObjectKind::Index => "indexes".to_string(),
            ObjectKind::Policy => "policies".to_string(),
            ObjectKind::DefaultPrivilege => "default privileges".to_string(),
            other => format!("{}s", other.label()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Identity
// =============================================================================

/// An object that can be matched between two snapshots.
pub trait SchemaObject: Clone + fmt::Debug + PartialEq {
    /// Identity key. Two objects with equal keys are the same object,
    /// possibly at different versions.
    type Key: Ord + Clone + fmt::Debug;

    const KIND: ObjectKind;

    fn key(&self) -> Self::Key;

    /// Name used in change summaries and `IRREVERSIBLE` notes.
    fn display_name(&self) -> String;

    /// Schema the object lives in, or `None` for cluster-wide objects.
    fn schema_name(&self) -> Option<&str> {
        None
    }
}

/// The schema used for identity: an empty schema means `public`.
pub fn effective_schema(schema: &str) -> &str {
    if schema.is_empty() { "public" } else { schema }
}

macro_rules! schema_qualified {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl SchemaObject for $ty {
                type Key = (String, String);
                const KIND: ObjectKind = ObjectKind::$kind;

                fn key(&self) -> Self::Key {
                    (effective_schema(&self.schema).to_string(), self.name.clone())
                }

                fn display_name(&self) -> String {
                    qualified_name(&self.schema, &self.name)
                }

                fn schema_name(&self) -> Option<&str> {
                    Some(effective_schema(&self.schema))
                }
            }
        )*
    };
}

schema_qualified! {
    Enum => Enum,
    Domain => Domain,
    CompositeType => CompositeType,
    Sequence => Sequence,
    Table => Table,
    Index => Index,
    View => View,
    MaterializedView => MaterializedView,
    Collation => Collation,
    TextSearchConfig => TextSearchConfig,
    ForeignTable => ForeignTable,
}

macro_rules! cluster_wide {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl SchemaObject for $ty {
                type Key = String;
                const KIND: ObjectKind = ObjectKind::$kind;

                fn key(&self) -> Self::Key {
                    self.name.clone()
                }

                fn display_name(&self) -> String {
                    pgshift_sql::quote_ident(&self.name)
                }
            }
        )*
    };
}

cluster_wide! {
    Extension => Extension,
    EventTrigger => EventTrigger,
    Publication => Publication,
    Subscription => Subscription,
    ForeignDataWrapper => ForeignDataWrapper,
    ForeignServer => ForeignServer,
    Role => Role,
}

impl SchemaObject for Namespace {
    type Key = String;
    const KIND: ObjectKind = ObjectKind::Namespace;

    fn key(&self) -> Self::Key {
        self.name.clone()
    }

    fn display_name(&self) -> String {
        pgshift_sql::quote_ident(&self.name)
    }

    fn schema_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl SchemaObject for Function {
    type Key = (String, String);
    const KIND: ObjectKind = ObjectKind::Function;

    fn key(&self) -> Self::Key {
        (effective_schema(&self.schema).to_string(), self.name.clone())
    }

    fn display_name(&self) -> String {
        format!("{}({})", qualified_name(&self.schema, &self.name), self.arguments)
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

impl SchemaObject for Aggregate {
    type Key = (String, String);
    const KIND: ObjectKind = ObjectKind::Aggregate;

    fn key(&self) -> Self::Key {
        (effective_schema(&self.schema).to_string(), self.name.clone())
    }

    fn display_name(&self) -> String {
        format!("{}({})", qualified_name(&self.schema, &self.name), self.arguments)
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

/// Procedures are keyed with their argument list so that overloads stay apart.
impl SchemaObject for Procedure {
    type Key = (String, String, String);
    const KIND: ObjectKind = ObjectKind::Procedure;

    fn key(&self) -> Self::Key {
        (
            effective_schema(&self.schema).to_string(),
            self.name.clone(),
            self.arguments.clone(),
        )
    }

    fn display_name(&self) -> String {
        format!("{}({})", qualified_name(&self.schema, &self.name), self.arguments)
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

macro_rules! table_scoped {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl SchemaObject for $ty {
                type Key = (String, String, String);
                const KIND: ObjectKind = ObjectKind::$kind;

                fn key(&self) -> Self::Key {
                    (
                        effective_schema(&self.schema).to_string(),
                        self.table.clone(),
                        self.name.clone(),
                    )
                }

                fn display_name(&self) -> String {
                    format!(
                        "{} on {}",
                        pgshift_sql::quote_ident(&self.name),
                        qualified_name(&self.schema, &self.table)
                    )
                }

                fn schema_name(&self) -> Option<&str> {
                    Some(effective_schema(&self.schema))
                }
            }
        )*
    };
}

table_scoped! {
    Trigger => Trigger,
    Rule => Rule,
    Policy => Policy,
}

/// Operators are overloaded on their operand types.
impl SchemaObject for Operator {
    type Key = (String, String, Option<String>, Option<String>);
    const KIND: ObjectKind = ObjectKind::Operator;

    fn key(&self) -> Self::Key {
        (
            effective_schema(&self.schema).to_string(),
            self.name.clone(),
            self.left_type.clone(),
            self.right_type.clone(),
        )
    }

    fn display_name(&self) -> String {
        format!(
            "{}.{}({}, {})",
            pgshift_sql::quote_ident(effective_schema(&self.schema)),
            self.name,
            self.left_type.as_deref().unwrap_or("NONE"),
            self.right_type.as_deref().unwrap_or("NONE"),
        )
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

impl SchemaObject for RoleGrant {
    type Key = (String, String, String, String);
    const KIND: ObjectKind = ObjectKind::RoleGrant;

    fn key(&self) -> Self::Key {
        (
            effective_schema(&self.schema).to_string(),
            self.object.clone(),
            self.privilege.clone(),
            self.grantee.clone(),
        )
    }

    fn display_name(&self) -> String {
        format!(
            "{} on {} to {}",
            self.privilege,
            qualified_name(&self.schema, &self.object),
            pgshift_sql::quote_ident(&self.grantee)
        )
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

impl SchemaObject for DefaultPrivilege {
    /// The `FOR ROLE` role is part of the key: each role has its own defaults.
    type Key = (String, String, String, Option<String>);
    const KIND: ObjectKind = ObjectKind::DefaultPrivilege;

    fn key(&self) -> Self::Key {
        (
            effective_schema(&self.schema).to_string(),
            self.object_type.clone(),
            self.grantee.clone(),
            self.role.clone(),
        )
    }

    fn display_name(&self) -> String {
        let name = format!(
            "{} in {} for {}",
            self.object_type.to_lowercase(),
            pgshift_sql::quote_ident(effective_schema(&self.schema)),
            pgshift_sql::quote_ident(&self.grantee)
        );
        match &self.role {
            Some(role) => format!("{} by {}", name, pgshift_sql::quote_ident(role)),
            None => name,
        }
    }

    fn schema_name(&self) -> Option<&str> {
        Some(effective_schema(&self.schema))
    }
}

impl SchemaObject for Comment {
    type Key = (CommentTarget, String, String, Option<String>);
    const KIND: ObjectKind = ObjectKind::Comment;

    fn key(&self) -> Self::Key {
        (
            self.target,
            effective_schema(&self.schema).to_string(),
            self.name.clone(),
            self.column.clone(),
        )
    }

    fn display_name(&self) -> String {
        let object = match self.target {
            CommentTarget::Schema => pgshift_sql::quote_ident(&self.name),
            CommentTarget::Function => {
                format!("{}.{}", pgshift_sql::quote_ident(effective_schema(&self.schema)), self.name)
            }
            _ => qualified_name(&self.schema, &self.name),
        };
        match &self.column {
            Some(column) => format!(
                "{} {}.{}",
                self.target.to_sql().to_lowercase(),
                object,
                pgshift_sql::quote_ident(column)
            ),
            None => format!("{} {}", self.target.to_sql().to_lowercase(), object),
        }
    }

    fn schema_name(&self) -> Option<&str> {
        match self.target {
            CommentTarget::Schema => Some(&self.name),
            _ => Some(effective_schema(&self.schema)),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A complete database schema snapshot.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Schema {
    #[facet(default)]
    pub namespaces: Vec<Namespace>,
    #[facet(default)]
    pub extensions: Vec<Extension>,
    #[facet(default)]
    pub enums: Vec<Enum>,
    #[facet(default)]
    pub domains: Vec<Domain>,
    #[facet(default)]
    pub composite_types: Vec<CompositeType>,
    #[facet(default)]
    pub sequences: Vec<Sequence>,
    #[facet(default)]
    pub tables: Vec<Table>,
    #[facet(default)]
    pub indexes: Vec<Index>,
    #[facet(default)]
    pub views: Vec<View>,
    #[facet(default)]
    pub materialized_views: Vec<MaterializedView>,
    #[facet(default)]
    pub functions: Vec<Function>,
    #[facet(default)]
    pub procedures: Vec<Procedure>,
    #[facet(default)]
    pub aggregates: Vec<Aggregate>,
    #[facet(default)]
    pub triggers: Vec<Trigger>,
    #[facet(default)]
    pub event_triggers: Vec<EventTrigger>,
    #[facet(default)]
    pub rules: Vec<Rule>,
    #[facet(default)]
    pub policies: Vec<Policy>,
    #[facet(default)]
    pub collations: Vec<Collation>,
    #[facet(default)]
    pub text_search_configs: Vec<TextSearchConfig>,
    #[facet(default)]
    pub publications: Vec<Publication>,
    #[facet(default)]
    pub subscriptions: Vec<Subscription>,
    #[facet(default)]
    pub foreign_data_wrappers: Vec<ForeignDataWrapper>,
    #[facet(default)]
    pub foreign_servers: Vec<ForeignServer>,
    #[facet(default)]
    pub foreign_tables: Vec<ForeignTable>,
    #[facet(default)]
    pub operators: Vec<Operator>,
    #[facet(default)]
    pub roles: Vec<Role>,
    #[facet(default)]
    pub role_grants: Vec<RoleGrant>,
    #[facet(default)]
    pub default_privileges: Vec<DefaultPrivilege>,
    #[facet(default)]
    pub comments: Vec<Comment>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a table by schema and name (`""` and `public` are interchangeable).
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        let schema = effective_schema(schema);
        self.tables
            .iter()
            .find(|t| effective_schema(&t.schema) == schema && t.name == name)
    }

    /// Number of objects of one kind.
    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Namespace => self.namespaces.len(),
            ObjectKind::Extension => self.extensions.len(),
            ObjectKind::Enum => self.enums.len(),
            ObjectKind::Domain => self.domains.len(),
            ObjectKind::CompositeType => self.composite_types.len(),
            ObjectKind::Sequence => self.sequences.len(),
            ObjectKind::Table => self.tables.len(),
            ObjectKind::Index => self.indexes.len(),
            ObjectKind::View => self.views.len(),
            ObjectKind::MaterializedView => self.materialized_views.len(),
            ObjectKind::Function => self.functions.len(),
            ObjectKind::Procedure => self.procedures.len(),
            ObjectKind::Aggregate => self.aggregates.len(),
            ObjectKind::Trigger => self.triggers.len(),
            ObjectKind::EventTrigger => self.event_triggers.len(),
            ObjectKind::Rule => self.rules.len(),
            ObjectKind::Policy => self.policies.len(),
            ObjectKind::Collation => self.collations.len(),
            ObjectKind::TextSearchConfig => self.text_search_configs.len(),
            ObjectKind::Publication => self.publications.len(),
            ObjectKind::Subscription => self.subscriptions.len(),
            ObjectKind::ForeignDataWrapper => self.foreign_data_wrappers.len(),
            ObjectKind::ForeignServer => self.foreign_servers.len(),
            ObjectKind::ForeignTable => self.foreign_tables.len(),
            ObjectKind::Operator => self.operators.len(),
            ObjectKind::Role => self.roles.len(),
            ObjectKind::RoleGrant => self.role_grants.len(),
            ObjectKind::DefaultPrivilege => self.default_privileges.len(),
            ObjectKind::Comment => self.comments.len(),
        }
    }

    /// Total number of objects across all kinds.
    pub fn object_count(&self) -> usize {
        ObjectKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }
}

#[cfg(test)]
mod tests;

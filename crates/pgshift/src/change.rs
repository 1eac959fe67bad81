//! Changes produced by comparing two schemas.
//!
//! A [`Change`] is one of three things: an object that has to be created, an
//! object that has to be dropped, or an in-place [`Alteration`]. Every change
//! renders its forward SQL and the SQL that undoes it; when undoing is not
//! possible the down SQL is an `-- IRREVERSIBLE:` comment and
//! [`Change::is_reversible`] says so.

use crate::alter::Alteration;
use crate::ddl::Ddl;
use pgshift_schema::*;
use pgshift_sql::qualified_name;
use std::fmt;

/// Prefix of every down script that cannot be executed.
pub const IRREVERSIBLE: &str = "-- IRREVERSIBLE:";

pub(crate) fn irreversible(reason: impl fmt::Display) -> String {
    format!("{} {}", IRREVERSIBLE, reason)
}

/// Whether a change creates, drops or alters its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeAction {
    Create,
    Drop,
    Alter,
}

impl ChangeAction {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeAction::Create => "Create",
            ChangeAction::Drop => "Drop",
            ChangeAction::Alter => "Alter",
        }
    }
}

macro_rules! objects {
    ($($variant:ident => $create:ident, $drop:ident;)*) => {
        /// A schema object of any kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Object {
            $($variant($variant),)*
        }

        $(
            impl From<$variant> for Object {
                fn from(object: $variant) -> Self {
                    Object::$variant(object)
                }
            }
        )*

        impl Object {
            pub fn kind(&self) -> ObjectKind {
                match self {
                    $(Object::$variant(_) => ObjectKind::$variant,)*
                }
            }

            /// Display name, schema-qualified where the kind has a schema.
            pub fn name(&self) -> String {
                match self {
                    $(Object::$variant(o) => o.display_name(),)*
                }
            }

            pub fn create_sql(&self) -> String {
                match self {
                    $(Object::$variant(o) => o.create_sql(),)*
                }
            }

            pub fn drop_sql(&self) -> String {
                match self {
                    $(Object::$variant(o) => o.drop_sql(),)*
                }
            }

            fn create_kind(&self) -> ChangeKind {
                match self {
                    $(Object::$variant(_) => ChangeKind::$create,)*
                }
            }

            fn drop_kind(&self) -> ChangeKind {
                match self {
                    $(Object::$variant(_) => ChangeKind::$drop,)*
                }
            }
        }

        /// Every kind of change, one discriminant per action and object kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ChangeKind {
            $($create, $drop,)*
            AlterEnum,
            AlterSequence,
            AlterTable,
            AlterView,
            AlterMaterializedView,
            AlterFunction,
            AlterProcedure,
            AlterRole,
            AlterComment,
        }

        impl ChangeKind {
            /// Every change kind: creates and drops per object kind, then alters.
            pub const ALL: &'static [ChangeKind] = &[
                $(ChangeKind::$create, ChangeKind::$drop,)*
                ChangeKind::AlterEnum,
                ChangeKind::AlterSequence,
                ChangeKind::AlterTable,
                ChangeKind::AlterView,
                ChangeKind::AlterMaterializedView,
                ChangeKind::AlterFunction,
                ChangeKind::AlterProcedure,
                ChangeKind::AlterRole,
                ChangeKind::AlterComment,
            ];

            pub fn action(&self) -> ChangeAction {
                match self {
                    $(
                        ChangeKind::$create => ChangeAction::Create,
                        ChangeKind::$drop => ChangeAction::Drop,
                    )*
                    _ => ChangeAction::Alter,
                }
            }

            pub fn object_kind(&self) -> ObjectKind {
                match self {
                    $(ChangeKind::$create | ChangeKind::$drop => ObjectKind::$variant,)*
                    ChangeKind::AlterEnum => ObjectKind::Enum,
                    ChangeKind::AlterSequence => ObjectKind::Sequence,
                    ChangeKind::AlterTable => ObjectKind::Table,
                    ChangeKind::AlterView => ObjectKind::View,
                    ChangeKind::AlterMaterializedView => ObjectKind::MaterializedView,
                    ChangeKind::AlterFunction => ObjectKind::Function,
                    ChangeKind::AlterProcedure => ObjectKind::Procedure,
                    ChangeKind::AlterRole => ObjectKind::Role,
                    ChangeKind::AlterComment => ObjectKind::Comment,
                }
            }
        }
    };
}

impl Object {
    /// SQL recreating the object after a drop. Unlike [`Object::create_sql`]
    /// this also restores a sequence's `OWNED BY`, since its table exists
    /// again by the time the down script reaches the sequence.
    pub fn restore_sql(&self) -> String {
        let sql = self.create_sql();
        match self {
            Object::Sequence(Sequence {
                schema,
                name,
                owned_by: Some(owner),
                ..
            }) => format!(
                "{}\nALTER SEQUENCE {} OWNED BY {};",
                sql,
                qualified_name(schema, name),
                owner
            ),
            _ => sql,
        }
    }
}

objects! {
    Namespace => CreateNamespace, DropNamespace;
    Extension => CreateExtension, DropExtension;
    Enum => CreateEnum, DropEnum;
    Domain => CreateDomain, DropDomain;
    CompositeType => CreateCompositeType, DropCompositeType;
    Sequence => CreateSequence, DropSequence;
    Table => CreateTable, DropTable;
    Index => CreateIndex, DropIndex;
    View => CreateView, DropView;
    MaterializedView => CreateMaterializedView, DropMaterializedView;
    Function => CreateFunction, DropFunction;
    Procedure => CreateProcedure, DropProcedure;
    Aggregate => CreateAggregate, DropAggregate;
    Trigger => CreateTrigger, DropTrigger;
    EventTrigger => CreateEventTrigger, DropEventTrigger;
    Rule => CreateRule, DropRule;
    Policy => CreatePolicy, DropPolicy;
    Collation => CreateCollation, DropCollation;
    TextSearchConfig => CreateTextSearchConfig, DropTextSearchConfig;
    Publication => CreatePublication, DropPublication;
    Subscription => CreateSubscription, DropSubscription;
    ForeignDataWrapper => CreateForeignDataWrapper, DropForeignDataWrapper;
    ForeignServer => CreateForeignServer, DropForeignServer;
    ForeignTable => CreateForeignTable, DropForeignTable;
    Operator => CreateOperator, DropOperator;
    Role => CreateRole, DropRole;
    RoleGrant => CreateRoleGrant, DropRoleGrant;
    DefaultPrivilege => CreateDefaultPrivilege, DropDefaultPrivilege;
    Comment => CreateComment, DropComment;
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action().label(), self.object_kind())
    }
}

/// A single schema change.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Create an object that only exists in the desired schema.
    Create(Object),
    /// Drop an object that only exists in the current schema.
    ///
    /// `captured` says whether `object` is the complete prior definition. Only
    /// a captured drop can be undone.
    Drop { object: Object, captured: bool },
    /// Change an object in place.
    Alter(Alteration),
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Create(object) => object.create_kind(),
            Change::Drop { object, .. } => object.drop_kind(),
            Change::Alter(alteration) => alteration.kind(),
        }
    }

    pub fn object_kind(&self) -> ObjectKind {
        self.kind().object_kind()
    }

    pub fn object_name(&self) -> String {
        match self {
            Change::Create(object) | Change::Drop { object, .. } => object.name(),
            Change::Alter(alteration) => alteration.object_name(),
        }
    }

    /// Forward SQL.
    pub fn sql(&self) -> String {
        match self {
            Change::Create(object) => object.create_sql(),
            Change::Drop { object, .. } => object.drop_sql(),
            Change::Alter(alteration) => alteration.sql(),
        }
    }

    /// SQL that undoes [`Change::sql`], or an `-- IRREVERSIBLE:` comment.
    pub fn down_sql(&self) -> String {
        match self {
            Change::Create(object) => object.drop_sql(),
            Change::Drop {
                object,
                captured: true,
            } => object.restore_sql(),
            Change::Drop {
                object,
                captured: false,
            } => irreversible(format_args!(
                "cannot recreate dropped {} {}, its definition was not captured",
                object.kind(),
                object.name()
            )),
            Change::Alter(alteration) => alteration.down_sql(),
        }
    }

    pub fn is_reversible(&self) -> bool {
        match self {
            Change::Create(_) => true,
            Change::Drop { captured, .. } => *captured,
            Change::Alter(alteration) => alteration.is_reversible(),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Create(object) => write!(f, "+ {} {}", object.kind(), object.name()),
            Change::Drop { object, .. } => write!(f, "- {} {}", object.kind(), object.name()),
            Change::Alter(alteration) => write!(f, "~ {}", alteration),
        }
    }
}

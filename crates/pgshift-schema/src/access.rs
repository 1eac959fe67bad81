use facet::Facet;

/// A cluster role.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Role {
    pub name: String,
    #[facet(default)]
    pub superuser: bool,
    #[facet(default)]
    pub create_db: bool,
    #[facet(default)]
    pub create_role: bool,
    #[facet(default)]
    pub inherit: bool,
    #[facet(default)]
    pub login: bool,
    #[facet(default)]
    pub replication: bool,
    #[facet(default)]
    pub bypass_rls: bool,
    /// `-1` is unlimited
    #[facet(default)]
    pub connection_limit: Option<i32>,
}

/// A privilege granted on one object.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct RoleGrant {
    #[facet(default)]
    pub schema: String,
    /// `TABLE`, `SEQUENCE`, `FUNCTION`, `SCHEMA`, …
    pub object_type: String,
    pub object: String,
    /// `SELECT`, `INSERT`, `USAGE`, `ALL`, …
    pub privilege: String,
    pub grantee: String,
    #[facet(default)]
    pub with_grant_option: bool,
}

/// `ALTER DEFAULT PRIVILEGES` entry.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct DefaultPrivilege {
    /// Role whose future objects are affected (`FOR ROLE`)
    #[facet(default)]
    pub role: Option<String>,
    #[facet(default)]
    pub schema: String,
    /// `TABLES`, `SEQUENCES`, `FUNCTIONS`, `TYPES` or `SCHEMAS`
    pub object_type: String,
    pub grantee: String,
    #[facet(default)]
    pub privileges: Vec<String>,
}

/// Command a row-level security policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum PolicyCommand {
    #[default]
    #[facet(rename = "all")]
    All,
    #[facet(rename = "select")]
    Select,
    #[facet(rename = "insert")]
    Insert,
    #[facet(rename = "update")]
    Update,
    #[facet(rename = "delete")]
    Delete,
}

impl PolicyCommand {
    pub fn to_sql(&self) -> &'static str {
        match self {
            PolicyCommand::All => "ALL",
            PolicyCommand::Select => "SELECT",
            PolicyCommand::Insert => "INSERT",
            PolicyCommand::Update => "UPDATE",
            PolicyCommand::Delete => "DELETE",
        }
    }
}

/// A row-level security policy.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Policy {
    #[facet(default)]
    pub schema: String,
    pub table: String,
    pub name: String,
    /// `false` renders `AS RESTRICTIVE`
    #[facet(default)]
    pub permissive: bool,
    #[facet(default)]
    pub command: PolicyCommand,
    /// Roles the policy applies to; empty means `PUBLIC`
    #[facet(default)]
    pub roles: Vec<String>,
    #[facet(default)]
    pub using: Option<String>,
    #[facet(default)]
    pub with_check: Option<String>,
}

/// Kind of object a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Facet)]
#[repr(u8)]
pub enum CommentTarget {
    #[default]
    #[facet(rename = "table")]
    Table,
    #[facet(rename = "column")]
    Column,
    #[facet(rename = "view")]
    View,
    #[facet(rename = "materialized_view")]
    MaterializedView,
    #[facet(rename = "index")]
    Index,
    #[facet(rename = "sequence")]
    Sequence,
    #[facet(rename = "type")]
    Type,
    #[facet(rename = "domain")]
    Domain,
    #[facet(rename = "function")]
    Function,
    #[facet(rename = "schema")]
    Schema,
}

impl CommentTarget {
    pub fn to_sql(&self) -> &'static str {
        match self {
            CommentTarget::Table => "TABLE",
            CommentTarget::Column => "COLUMN",
            CommentTarget::View => "VIEW",
            CommentTarget::MaterializedView => "MATERIALIZED VIEW",
            CommentTarget::Index => "INDEX",
            CommentTarget::Sequence => "SEQUENCE",
            CommentTarget::Type => "TYPE",
            CommentTarget::Domain => "DOMAIN",
            CommentTarget::Function => "FUNCTION",
            CommentTarget::Schema => "SCHEMA",
        }
    }
}

/// A comment on an object.
///
/// For `Function` targets `name` carries the full signature, e.g.
/// `add(integer, integer)`, and is written verbatim.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Comment {
    #[facet(default)]
    pub target: CommentTarget,
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// Column name, for `Column` targets (`name` is then the table)
    #[facet(default)]
    pub column: Option<String>,
    pub text: String,
}

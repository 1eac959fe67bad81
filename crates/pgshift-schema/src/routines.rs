use facet::Facet;

/// Function volatility category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum Volatility {
    #[default]
    #[facet(rename = "volatile")]
    Volatile,
    #[facet(rename = "stable")]
    Stable,
    #[facet(rename = "immutable")]
    Immutable,
}

impl Volatility {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Volatility::Volatile => "VOLATILE",
            Volatility::Stable => "STABLE",
            Volatility::Immutable => "IMMUTABLE",
        }
    }
}

/// A function.
///
/// `arguments` is the argument list as Postgres prints it
/// (`a integer, b text DEFAULT ''::text`) and is part of the signature used
/// in `DROP FUNCTION`.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Function {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    #[facet(default)]
    pub arguments: String,
    /// Return type, including `SETOF` / `TABLE (…)` forms
    pub returns: String,
    pub language: String,
    /// Function body, without dollar quoting
    pub body: String,
    #[facet(default)]
    pub volatility: Volatility,
    #[facet(default)]
    pub security_definer: bool,
    #[facet(default)]
    pub strict: bool,
}

/// A procedure.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Procedure {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    #[facet(default)]
    pub arguments: String,
    pub language: String,
    pub body: String,
    #[facet(default)]
    pub security_definer: bool,
}

/// An aggregate function.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Aggregate {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// Argument types, e.g. `integer` or `*`
    #[facet(default)]
    pub arguments: String,
    pub state_function: String,
    pub state_type: String,
    #[facet(default)]
    pub final_function: Option<String>,
    #[facet(default)]
    pub combine_function: Option<String>,
    #[facet(default)]
    pub initial_condition: Option<String>,
}

/// An operator. Prefix operators have no left type.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Operator {
    #[facet(default)]
    pub schema: String,
    /// Operator symbol, e.g. `===`
    pub name: String,
    #[facet(default)]
    pub left_type: Option<String>,
    #[facet(default)]
    pub right_type: Option<String>,
    pub function: String,
    #[facet(default)]
    pub commutator: Option<String>,
    #[facet(default)]
    pub negator: Option<String>,
    #[facet(default)]
    pub restrict: Option<String>,
    #[facet(default)]
    pub join: Option<String>,
    #[facet(default)]
    pub hashes: bool,
    #[facet(default)]
    pub merges: bool,
}

/// When a trigger fires relative to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum TriggerTiming {
    #[default]
    #[facet(rename = "before")]
    Before,
    #[facet(rename = "after")]
    After,
    #[facet(rename = "instead_of")]
    InsteadOf,
}

impl TriggerTiming {
    pub fn to_sql(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
            TriggerTiming::InsteadOf => "INSTEAD OF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum TriggerEvent {
    #[facet(rename = "insert")]
    Insert,
    #[facet(rename = "update")]
    Update,
    #[facet(rename = "delete")]
    Delete,
    #[facet(rename = "truncate")]
    Truncate,
}

impl TriggerEvent {
    pub fn to_sql(&self) -> &'static str {
        match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
            TriggerEvent::Truncate => "TRUNCATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum TriggerLevel {
    #[default]
    #[facet(rename = "row")]
    Row,
    #[facet(rename = "statement")]
    Statement,
}

impl TriggerLevel {
    pub fn to_sql(&self) -> &'static str {
        match self {
            TriggerLevel::Row => "ROW",
            TriggerLevel::Statement => "STATEMENT",
        }
    }
}

/// A table trigger.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Trigger {
    #[facet(default)]
    pub schema: String,
    pub table: String,
    pub name: String,
    #[facet(default)]
    pub timing: TriggerTiming,
    #[facet(default)]
    pub events: Vec<TriggerEvent>,
    /// Columns for `UPDATE OF`
    #[facet(default)]
    pub update_columns: Vec<String>,
    #[facet(default)]
    pub level: TriggerLevel,
    /// `WHEN (…)` condition
    #[facet(default)]
    pub when: Option<String>,
    /// Trigger function, possibly schema-qualified, without parentheses
    pub function: String,
}

/// A database-wide event trigger.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct EventTrigger {
    pub name: String,
    /// `ddl_command_start`, `ddl_command_end`, `sql_drop` or `table_rewrite`
    pub event: String,
    /// Command tags for the `WHEN TAG IN (…)` filter
    #[facet(default)]
    pub tags: Vec<String>,
    pub function: String,
    /// `None` means enabled
    #[facet(default)]
    pub enabled: Option<bool>,
}

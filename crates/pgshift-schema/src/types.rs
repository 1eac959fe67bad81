use facet::Facet;

/// A schema (namespace).
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Namespace {
    pub name: String,
    #[facet(default)]
    pub owner: Option<String>,
}

/// An installed extension.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Extension {
    pub name: String,
    /// Schema the extension's objects are installed into
    #[facet(default)]
    pub schema: Option<String>,
    #[facet(default)]
    pub version: Option<String>,
}

/// An enum type.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Enum {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// Labels, in sort order
    #[facet(default)]
    pub values: Vec<String>,
}

/// A named CHECK on a domain.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct DomainCheck {
    #[facet(default)]
    pub name: Option<String>,
    pub expression: String,
}

/// A domain over a base type.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Domain {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    pub base_type: String,
    #[facet(default)]
    pub not_null: bool,
    #[facet(default)]
    pub default: Option<String>,
    #[facet(default)]
    pub collation: Option<String>,
    #[facet(default)]
    pub checks: Vec<DomainCheck>,
}

/// One attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct CompositeAttribute {
    pub name: String,
    pub type_name: String,
    #[facet(default)]
    pub collation: Option<String>,
}

/// A composite (row) type.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct CompositeType {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    #[facet(default)]
    pub attributes: Vec<CompositeAttribute>,
}

/// A standalone sequence.
///
/// Options left as `None` fall back to the server defaults, both when
/// creating and when comparing.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Sequence {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// `AS` data type (`bigint` when unset)
    #[facet(default)]
    pub data_type: Option<String>,
    #[facet(default)]
    pub start: Option<i64>,
    #[facet(default)]
    pub increment: Option<i64>,
    #[facet(default)]
    pub min_value: Option<i64>,
    #[facet(default)]
    pub max_value: Option<i64>,
    #[facet(default)]
    pub cache: Option<i64>,
    #[facet(default)]
    pub cycle: bool,
    /// `table.column` the sequence is owned by
    #[facet(default)]
    pub owned_by: Option<String>,
}

/// A collation.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Collation {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// `libc`, `icu` or `builtin`
    #[facet(default)]
    pub provider: Option<String>,
    #[facet(default)]
    pub locale: Option<String>,
    #[facet(default)]
    pub lc_collate: Option<String>,
    #[facet(default)]
    pub lc_ctype: Option<String>,
    /// `None` means deterministic
    #[facet(default)]
    pub deterministic: Option<bool>,
}

/// One `ALTER MAPPING FOR token_types WITH dictionaries` entry.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct TextSearchMapping {
    pub token_type: String,
    #[facet(default)]
    pub dictionaries: Vec<String>,
}

/// A text search configuration.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct TextSearchConfig {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// Parser, e.g. `pg_catalog.default`
    pub parser: String,
    #[facet(default)]
    pub mappings: Vec<TextSearchMapping>,
}

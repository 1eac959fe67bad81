use crate::Column;
use facet::Facet;

/// One `key 'value'` entry of an `OPTIONS (…)` list.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct GenericOption {
    pub key: String,
    pub value: String,
}

/// A foreign-data wrapper.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct ForeignDataWrapper {
    pub name: String,
    #[facet(default)]
    pub handler: Option<String>,
    #[facet(default)]
    pub validator: Option<String>,
    #[facet(default)]
    pub options: Vec<GenericOption>,
}

/// A foreign server.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct ForeignServer {
    pub name: String,
    pub wrapper: String,
    #[facet(default)]
    pub server_type: Option<String>,
    #[facet(default)]
    pub version: Option<String>,
    #[facet(default)]
    pub options: Vec<GenericOption>,
}

/// A foreign table.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct ForeignTable {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    pub server: String,
    #[facet(default)]
    pub columns: Vec<Column>,
    #[facet(default)]
    pub options: Vec<GenericOption>,
}

use facet::Facet;

/// A logical replication publication.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Publication {
    pub name: String,
    /// `FOR ALL TABLES`
    #[facet(default)]
    pub all_tables: bool,
    /// Published tables, possibly schema-qualified, when not `all_tables`
    #[facet(default)]
    pub tables: Vec<String>,
    /// Published operations (`insert`, `update`, `delete`, `truncate`); empty means all
    #[facet(default)]
    pub publish: Vec<String>,
}

/// A logical replication subscription.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Subscription {
    pub name: String,
    /// Connection string (opaque)
    pub connection: String,
    #[facet(default)]
    pub publications: Vec<String>,
    /// `None` means enabled
    #[facet(default)]
    pub enabled: Option<bool>,
    #[facet(default)]
    pub slot_name: Option<String>,
}

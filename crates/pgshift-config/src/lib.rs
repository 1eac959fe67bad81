//! Configuration types for pgshift.
//!
//! The file lives at `.config/pgshift.json`:
//!
//! ```json
//! {
//!   "filter": {
//!     "include_schemas": ["public", "billing"],
//!     "exclude_schemas": ["billing_archive"],
//!     "exclude_kinds": ["role", "role_grant"]
//!   }
//! }
//! ```

use facet::Facet;
use pgshift_schema::ObjectKind;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Config {
    /// Which objects take part in a comparison
    #[facet(default)]
    pub filter: Filter,
}

/// Object filter applied to both snapshots before comparing.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Filter {
    /// Only these schemas are compared (empty means all)
    #[facet(default)]
    pub include_schemas: Vec<String>,
    /// These schemas are never compared, even when included
    #[facet(default)]
    pub exclude_schemas: Vec<String>,
    /// Object kinds that are never compared
    #[facet(default)]
    pub exclude_kinds: Vec<ObjectKind>,
}

impl Filter {
    /// Whether this filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.include_schemas.is_empty()
            && self.exclude_schemas.is_empty()
            && self.exclude_kinds.is_empty()
    }

    /// Whether objects in `schema` are compared.
    pub fn allows_schema(&self, schema: &str) -> bool {
        let included =
            self.include_schemas.is_empty() || self.include_schemas.iter().any(|s| s == schema);
        included && !self.exclude_schemas.iter().any(|s| s == schema)
    }

    /// Whether objects of `kind` are compared.
    pub fn allows_kind(&self, kind: ObjectKind) -> bool {
        !self.exclude_kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert!(filter.allows_schema("public"));
        assert!(filter.allows_kind(ObjectKind::Role));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = Filter {
            include_schemas: vec!["public".into(), "audit".into()],
            exclude_schemas: vec!["audit".into()],
            exclude_kinds: vec![ObjectKind::Role],
        };
        assert!(filter.allows_schema("public"));
        assert!(!filter.allows_schema("audit"));
        assert!(!filter.allows_schema("billing"));
        assert!(!filter.allows_kind(ObjectKind::Role));
        assert!(filter.allows_kind(ObjectKind::Table));
    }
}

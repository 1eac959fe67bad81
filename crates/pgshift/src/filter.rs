//! Restricting a snapshot to the objects a [`Filter`] lets through.

use pgshift_config::Filter;
use pgshift_schema::{Schema, SchemaObject};

fn keep<T: SchemaObject>(objects: &[T], filter: &Filter) -> Vec<T> {
    if !filter.allows_kind(T::KIND) {
        return Vec::new();
    }
    objects
        .iter()
        .filter(|o| o.schema_name().is_none_or(|schema| filter.allows_schema(schema)))
        .cloned()
        .collect()
}

/// A copy of `schema` holding only the objects `filter` allows.
///
/// Cluster-wide objects (roles, extensions, publications, …) are only removed
/// by kind. Schemas themselves are filtered by their own name.
pub fn apply(schema: &Schema, filter: &Filter) -> Schema {
    if filter.is_empty() {
        return schema.clone();
    }
    Schema {
        namespaces: keep(&schema.namespaces, filter),
        extensions: keep(&schema.extensions, filter),
        enums: keep(&schema.enums, filter),
        domains: keep(&schema.domains, filter),
        composite_types: keep(&schema.composite_types, filter),
        sequences: keep(&schema.sequences, filter),
        tables: keep(&schema.tables, filter),
        indexes: keep(&schema.indexes, filter),
        views: keep(&schema.views, filter),
        materialized_views: keep(&schema.materialized_views, filter),
        functions: keep(&schema.functions, filter),
        procedures: keep(&schema.procedures, filter),
        aggregates: keep(&schema.aggregates, filter),
        triggers: keep(&schema.triggers, filter),
        event_triggers: keep(&schema.event_triggers, filter),
        rules: keep(&schema.rules, filter),
        policies: keep(&schema.policies, filter),
        collations: keep(&schema.collations, filter),
        text_search_configs: keep(&schema.text_search_configs, filter),
        publications: keep(&schema.publications, filter),
        subscriptions: keep(&schema.subscriptions, filter),
        foreign_data_wrappers: keep(&schema.foreign_data_wrappers, filter),
        foreign_servers: keep(&schema.foreign_servers, filter),
        foreign_tables: keep(&schema.foreign_tables, filter),
        operators: keep(&schema.operators, filter),
        roles: keep(&schema.roles, filter),
        role_grants: keep(&schema.role_grants, filter),
        default_privileges: keep(&schema.default_privileges, filter),
        comments: keep(&schema.comments, filter),
    }
}

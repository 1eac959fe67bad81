//! Whole-schema comparison.

use crate::change::Change;
use crate::reconcile::*;
use pgshift_schema::{ObjectKind, Schema};

macro_rules! compare_kinds {
    ($current:ident, $desired:ident, $changes:ident; $($kind:ident: $field:ident => $compare:ident,)*) => {
        $(
            let batch = $compare(&$current.$field, &$desired.$field);
            if !batch.is_empty() {
                tracing::debug!(kind = %ObjectKind::$kind, changes = batch.len(), "reconciled");
            }
            $changes.extend(batch);
        )*
    };
}

/// Every change that turns `current` into `desired`, in apply order.
///
/// Kinds are reconciled in [`ObjectKind::ALL`] order so that schemas, types
/// and sequences exist before the tables using them, tables before their
/// indexes and views, and roles before the grants naming them. Undo a plan by
/// applying each change's [`Change::down_sql`] in reverse order.
pub fn compare(current: &Schema, desired: &Schema) -> Vec<Change> {
    let span = tracing::debug_span!(
        "compare",
        current = current.object_count(),
        desired = desired.object_count(),
    );
    let _enter = span.enter();

    let mut changes = Vec::new();
    compare_kinds! {
        current, desired, changes;
        Namespace: namespaces => compare_namespaces,
        Extension: extensions => compare_extensions,
        Enum: enums => compare_enums,
        Domain: domains => compare_domains,
        CompositeType: composite_types => compare_composite_types,
        Sequence: sequences => compare_sequences,
        Table: tables => compare_tables,
        Index: indexes => compare_indexes,
        View: views => compare_views,
        MaterializedView: materialized_views => compare_materialized_views,
        Function: functions => compare_functions,
        Procedure: procedures => compare_procedures,
        Aggregate: aggregates => compare_aggregates,
        Trigger: triggers => compare_triggers,
        EventTrigger: event_triggers => compare_event_triggers,
        Rule: rules => compare_rules,
        Policy: policies => compare_policies,
        Collation: collations => compare_collations,
        TextSearchConfig: text_search_configs => compare_text_search_configs,
        Publication: publications => compare_publications,
        Subscription: subscriptions => compare_subscriptions,
        ForeignDataWrapper: foreign_data_wrappers => compare_foreign_data_wrappers,
        ForeignServer: foreign_servers => compare_foreign_servers,
        ForeignTable: foreign_tables => compare_foreign_tables,
        Operator: operators => compare_operators,
        Role: roles => compare_roles,
        RoleGrant: role_grants => compare_role_grants,
        DefaultPrivilege: default_privileges => compare_default_privileges,
        Comment: comments => compare_comments,
    }
    tracing::debug!(total = changes.len(), "comparison finished");
    changes
}

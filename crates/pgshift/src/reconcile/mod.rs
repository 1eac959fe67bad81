//! Per-kind reconciliation.
//!
//! Both snapshots are keyed by [`SchemaObject::key`]. Keys only in the desired
//! snapshot become creates, keys only in the current snapshot become drops
//! carrying the full prior definition, and matched keys are compared for the
//! kinds that can be altered in place. Within one kind the output is creates,
//! then drops, then alters, each sorted by key.

mod enums;

pub use crate::table::compare_tables;
pub use enums::enum_alter;

use crate::alter::{Alteration, Replace};
use crate::change::{Change, Object};
use pgshift_schema::*;
use pgshift_sql::definitions_equal;
use std::collections::BTreeMap;

/// Objects of one kind split by which snapshot holds their key.
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Only in the desired snapshot, sorted by key
    pub created: Vec<&'a T>,
    /// Only in the current snapshot, sorted by key
    pub dropped: Vec<&'a T>,
    /// In both, as `(current, desired)`, sorted by key
    pub matched: Vec<(&'a T, &'a T)>,
}

/// Split two lists of objects by key. When a snapshot repeats a key the last
/// object with that key wins.
pub fn partition<'a, T: SchemaObject>(current: &'a [T], desired: &'a [T]) -> Partition<'a, T> {
    let current: BTreeMap<T::Key, &T> = current.iter().map(|o| (o.key(), o)).collect();
    let desired: BTreeMap<T::Key, &T> = desired.iter().map(|o| (o.key(), o)).collect();

    let mut result = Partition {
        created: Vec::new(),
        dropped: Vec::new(),
        matched: Vec::new(),
    };
    for (key, after) in &desired {
        match current.get(key) {
            Some(before) => result.matched.push((*before, *after)),
            None => result.created.push(*after),
        }
    }
    for (key, before) in &current {
        if !desired.contains_key(key) {
            result.dropped.push(*before);
        }
    }
    result
}

/// Creates, drops, then whatever `alter` makes of each matched pair.
fn reconcile<T>(
    current: &[T],
    desired: &[T],
    alter: impl Fn(&T, &T) -> Option<Alteration>,
) -> Vec<Change>
where
    T: SchemaObject + Into<Object>,
{
    let keyed = partition(current, desired);
    let mut changes = Vec::with_capacity(keyed.created.len() + keyed.dropped.len());
    changes.extend(keyed.created.into_iter().map(|o| Change::Create(o.clone().into())));
    changes.extend(keyed.dropped.into_iter().map(|o| Change::Drop {
        object: o.clone().into(),
        captured: true,
    }));
    changes.extend(
        keyed
            .matched
            .into_iter()
            .filter_map(|(before, after)| alter(before, after).map(Change::Alter)),
    );
    changes
}

/// Matched objects of these kinds are never altered.
macro_rules! create_drop_only {
    ($($fn_name:ident => $ty:ty),* $(,)?) => {
        $(
            pub fn $fn_name(current: &[$ty], desired: &[$ty]) -> Vec<Change> {
                reconcile(current, desired, |_, _| None)
            }
        )*
    };
}

create_drop_only! {
    compare_namespaces => Namespace,
    compare_extensions => Extension,
    compare_domains => Domain,
    compare_composite_types => CompositeType,
    compare_indexes => Index,
    compare_aggregates => Aggregate,
    compare_triggers => Trigger,
    compare_event_triggers => EventTrigger,
    compare_rules => Rule,
    compare_policies => Policy,
    compare_collations => Collation,
    compare_text_search_configs => TextSearchConfig,
    compare_publications => Publication,
    compare_subscriptions => Subscription,
    compare_foreign_data_wrappers => ForeignDataWrapper,
    compare_foreign_servers => ForeignServer,
    compare_foreign_tables => ForeignTable,
    compare_operators => Operator,
    compare_role_grants => RoleGrant,
    compare_default_privileges => DefaultPrivilege,
}

pub fn compare_enums(current: &[Enum], desired: &[Enum]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        enum_alter(before, after).map(Alteration::Enum)
    })
}

pub fn compare_sequences(current: &[Sequence], desired: &[Sequence]) -> Vec<Change> {
    // Schemas already matched by key; "" and "public" must not diff.
    let options = |s: &Sequence| Sequence {
        schema: String::new(),
        ..s.clone()
    };
    reconcile(current, desired, |before, after| {
        (options(before) != options(after))
            .then(|| Alteration::Sequence(Replace::new(before.clone(), after.clone())))
    })
}

pub fn compare_views(current: &[View], desired: &[View]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        let changed = !definitions_equal(&before.definition, &after.definition)
            || before.check_option != after.check_option;
        changed.then(|| Alteration::View(Replace::new(before.clone(), after.clone())))
    })
}

pub fn compare_materialized_views(
    current: &[MaterializedView],
    desired: &[MaterializedView],
) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        (!definitions_equal(&before.definition, &after.definition)).then(|| {
            Alteration::MaterializedView(Replace::new(before.clone(), after.clone()))
        })
    })
}

/// Functions are replaced when anything `CREATE OR REPLACE` can change differs.
pub fn compare_functions(current: &[Function], desired: &[Function]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        let changed = before.body != after.body
            || before.language != after.language
            || before.volatility != after.volatility
            || before.strict != after.strict
            || before.security_definer != after.security_definer;
        changed.then(|| Alteration::Function(Replace::new(before.clone(), after.clone())))
    })
}

pub fn compare_procedures(current: &[Procedure], desired: &[Procedure]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        let changed = before.body != after.body
            || before.language != after.language
            || before.security_definer != after.security_definer;
        changed.then(|| Alteration::Procedure(Replace::new(before.clone(), after.clone())))
    })
}

pub fn compare_roles(current: &[Role], desired: &[Role]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        (before != after).then(|| Alteration::Role(Replace::new(before.clone(), after.clone())))
    })
}

pub fn compare_comments(current: &[Comment], desired: &[Comment]) -> Vec<Change> {
    reconcile(current, desired, |before, after| {
        (before.text != after.text)
            .then(|| Alteration::Comment(Replace::new(before.clone(), after.clone())))
    })
}

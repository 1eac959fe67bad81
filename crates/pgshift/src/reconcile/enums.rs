use crate::alter::{EnumAlter, EnumPosition, EnumValue};
use pgshift_schema::Enum;
use pgshift_sql::qualified_name;

/// Labels to add to `current` so that it becomes `desired`.
///
/// Postgres can only add enum labels. When `desired` drops or reorders an
/// existing label nothing is returned and a warning is logged.
pub fn enum_alter(current: &Enum, desired: &Enum) -> Option<EnumAlter> {
    if current.values == desired.values {
        return None;
    }

    if !is_subsequence(&current.values, &desired.values) {
        tracing::warn!(
            name = %qualified_name(&desired.schema, &desired.name),
            current = ?current.values,
            desired = ?desired.values,
            "enum labels were removed or reordered, which cannot be migrated; skipping"
        );
        return None;
    }

    let existing = |value: &String| current.values.contains(value);
    let mut added = Vec::new();
    for (i, value) in desired.values.iter().enumerate() {
        if existing(value) {
            continue;
        }
        let next_existing = desired.values[i + 1..].iter().find(|v| existing(v));
        let position = match next_existing {
            None => EnumPosition::End,
            Some(_) if i > 0 => EnumPosition::After(desired.values[i - 1].clone()),
            Some(next) => EnumPosition::Before(next.clone()),
        };
        added.push(EnumValue {
            value: value.clone(),
            position,
        });
    }

    Some(EnumAlter {
        schema: desired.schema.clone(),
        name: desired.name.clone(),
        added,
    })
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

//! Dependency ordering of tables.
//!
//! A table depends on every table it has a foreign key to and on the table it
//! is a partition of. Only dependencies inside the batch being ordered count;
//! self-references and tables outside the batch are ignored.

use pgshift_schema::{Partitioning, SchemaObject, Table, effective_schema};
use pgshift_sql::qualified_name;
use std::collections::BTreeMap;

type TableKey = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Keys of the tables `table` depends on, in constraint order.
fn dependencies(table: &Table) -> Vec<TableKey> {
    let mut deps: Vec<TableKey> = table
        .foreign_keys()
        .map(|(_, fk)| {
            (
                effective_schema(&fk.references_schema).to_string(),
                fk.references_table.clone(),
            )
        })
        .collect();
    if let Some(Partitioning::PartitionOf {
        parent_schema,
        parent,
        ..
    }) = &table.partition
    {
        deps.push((effective_schema(parent_schema).to_string(), parent.clone()));
    }
    deps
}

/// Order `tables` so that every table comes after the tables it depends on.
///
/// Roots are visited in key order. A dependency cycle does not fail: the edge
/// closing the cycle is skipped and logged.
pub fn creation_order<'a>(tables: &[&'a Table]) -> Vec<&'a Table> {
    let by_key: BTreeMap<TableKey, &'a Table> = tables.iter().map(|t| (t.key(), *t)).collect();
    let mut marks: BTreeMap<TableKey, Mark> =
        by_key.keys().map(|k| (k.clone(), Mark::Unvisited)).collect();
    let mut ordered = Vec::with_capacity(by_key.len());

    for key in by_key.keys() {
        visit(key, &by_key, &mut marks, &mut ordered);
    }
    ordered
}

/// Order `tables` so that every table comes before the tables it depends on.
pub fn drop_order<'a>(tables: &[&'a Table]) -> Vec<&'a Table> {
    let mut ordered = creation_order(tables);
    ordered.reverse();
    ordered
}

fn visit<'a>(
    key: &TableKey,
    by_key: &BTreeMap<TableKey, &'a Table>,
    marks: &mut BTreeMap<TableKey, Mark>,
    ordered: &mut Vec<&'a Table>,
) {
    let Some(&table) = by_key.get(key) else {
        return;
    };
    if marks.get(key) != Some(&Mark::Unvisited) {
        return;
    }
    marks.insert(key.clone(), Mark::InProgress);

    for dep in dependencies(table) {
        if &dep == key {
            continue;
        }
        let mark = marks.get(&dep).copied();
        match mark {
            Some(Mark::Unvisited) => visit(&dep, by_key, marks, ordered),
            Some(Mark::InProgress) => {
                tracing::warn!(
                    from = %qualified_name(&key.0, &key.1),
                    to = %qualified_name(&dep.0, &dep.1),
                    "foreign key cycle between new tables; ordering may need manual adjustment"
                );
            }
            Some(Mark::Done) | None => {}
        }
    }

    marks.insert(key.clone(), Mark::Done);
    ordered.push(table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgshift_schema::{Column, Constraint};

    fn table(name: &str, references: &[&str]) -> Table {
        let mut t = Table::new("", name).with_column(Column::new("id", "bigint"));
        for target in references {
            t = t.with_constraint(Constraint::foreign_key(
                format!("{}_{}_fkey", name, target),
                &["id"],
                *target,
                &["id"],
            ));
        }
        t
    }

    fn names(tables: &[&Table]) -> Vec<String> {
        tables.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_referenced_tables_first() {
        let orders = table("orders", &["users", "products"]);
        let users = table("users", &[]);
        let products = table("products", &[]);
        let items = table("items", &["orders"]);
        let ordered = creation_order(&[&orders, &users, &products, &items]);
        assert_eq!(names(&ordered), vec!["users", "products", "orders", "items"]);
        assert_eq!(
            names(&drop_order(&[&orders, &users, &products, &items])),
            vec!["items", "orders", "products", "users"]
        );
    }

    #[test]
    fn test_self_reference_and_outside_batch_ignored() {
        let employees = table("employees", &["employees", "departments"]);
        let ordered = creation_order(&[&employees]);
        assert_eq!(names(&ordered), vec!["employees"]);
    }

    #[test]
    fn test_cycle_does_not_fail() {
        let a = table("a", &["b"]);
        let b = table("b", &["a"]);
        let ordered = creation_order(&[&a, &b]);
        assert_eq!(names(&ordered), vec!["b", "a"]);
    }

    #[test]
    fn test_partition_after_parent() {
        let parent = table("zz_events", &[]);
        let mut child = table("events_2024", &[]);
        child.partition = Some(Partitioning::PartitionOf {
            parent_schema: "".into(),
            parent: "zz_events".into(),
            bound: "DEFAULT".into(),
        });
        let ordered = creation_order(&[&child, &parent]);
        assert_eq!(names(&ordered), vec!["zz_events", "events_2024"]);
    }

    #[test]
    fn test_schema_qualified_references() {
        let accounts = Table::new("billing", "accounts");
        let mut fk = Constraint::foreign_key("fk", &["account_id"], "accounts", &["id"]);
        if let pgshift_schema::ConstraintKind::ForeignKey(details) = &mut fk.kind {
            details.references_schema = "billing".into();
        }
        let invoices = Table::new("", "aa_invoices").with_constraint(fk);
        let ordered = creation_order(&[&invoices, &accounts]);
        assert_eq!(names(&ordered), vec!["accounts", "aa_invoices"]);
    }
}

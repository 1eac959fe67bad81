//! Properties that hold for any pair of snapshots.

use pgshift::schema::*;
use pgshift::{Change, ChangeAction, Filter, compare, filter};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const TYPES: &[&str] = &["int4", "integer", "int8", "text", "varchar(20)", "bool"];
const VIEW_BODIES: &[&str] = &["SELECT 1", "select  1;", "SELECT 2"];
const ARGUMENTS: &[&str] = &["", "integer", "text", "integer, text"];
const OPERATOR_NAMES: &[&str] = &["=", "<>"];
const OPERAND_TYPES: &[Option<&str>] = &[None, Some("int4"), Some("text")];

fn column() -> impl Strategy<Value = Column> {
    (
        "[a-d]",
        prop::sample::select(TYPES),
        any::<bool>(),
        prop::option::of("0|1|now\\(\\)"),
    )
        .prop_map(|(name, type_name, nullable, default)| Column {
            nullable,
            default,
            ..Column::new(name, type_name)
        })
}

fn table() -> impl Strategy<Value = Table> {
    ("[a-f]", prop::collection::vec(column(), 0..4)).prop_map(|(name, columns)| {
        let mut table = Table::new("", name);
        for col in columns {
            if table.column(&col.name).is_none() {
                table.columns.push(col);
            }
        }
        table
    })
}

fn view() -> impl Strategy<Value = View> {
    ("[a-f]", prop::sample::select(VIEW_BODIES)).prop_map(
        |(name, definition)| View {
            name,
            definition: definition.to_string(),
            ..Default::default()
        },
    )
}

fn enumeration() -> impl Strategy<Value = Enum> {
    ("[a-c]", prop::collection::btree_set("[p-u]", 0..4)).prop_map(|(name, values)| Enum {
        name,
        values: values.into_iter().collect(),
        ..Default::default()
    })
}

fn schema() -> impl Strategy<Value = Schema> {
    (
        prop::collection::vec(table(), 0..5),
        prop::collection::vec(view(), 0..4),
        prop::collection::vec(enumeration(), 0..3),
    )
        .prop_map(|(tables, views, enums)| {
            let mut schema = Schema::new();
            schema.tables = dedup(tables, |t| t.name.clone());
            schema.views = dedup(views, |v| v.name.clone());
            schema.enums = dedup(enums, |e| e.name.clone());
            schema
        })
}

fn procedure() -> impl Strategy<Value = Procedure> {
    ("[ab]", prop::sample::select(ARGUMENTS), "[xy]").prop_map(|(name, arguments, body)| {
        Procedure {
            name,
            arguments: arguments.to_string(),
            language: "sql".into(),
            body,
            ..Default::default()
        }
    })
}

fn operator() -> impl Strategy<Value = Operator> {
    (
        prop::sample::select(OPERATOR_NAMES),
        prop::sample::select(OPERAND_TYPES),
        prop::sample::select(OPERAND_TYPES),
    )
        .prop_filter("an operator needs an operand", |(_, l, r)| {
            l.is_some() || r.is_some()
        })
        .prop_map(|(name, left, right)| Operator {
            name: name.to_string(),
            left_type: left.map(str::to_string),
            right_type: right.map(str::to_string),
            function: "op_impl".into(),
            ..Default::default()
        })
}

/// One object of every kind, with the keys of the kinds that are not keyed
/// on their name filled in.
fn one_of_every_kind() -> Schema {
    let mut s = Schema::new();
    s.namespaces.push(Namespace {
        name: "app".into(),
        owner: None,
    });
    s.extensions.push(Extension {
        name: "pgcrypto".into(),
        ..Default::default()
    });
    s.enums.push(Enum {
        name: "status".into(),
        values: vec!["pending".into(), "done".into()],
        ..Default::default()
    });
    s.domains.push(Domain {
        name: "email".into(),
        base_type: "text".into(),
        ..Default::default()
    });
    s.composite_types.push(CompositeType {
        name: "money_amount".into(),
        attributes: vec![CompositeAttribute {
            name: "cents".into(),
            type_name: "bigint".into(),
            collation: None,
        }],
        ..Default::default()
    });
    s.sequences.push(Sequence {
        name: "invoice_no".into(),
        owned_by: Some("users.id".into()),
        ..Default::default()
    });
    s.tables.push(
        Table::new("", "users")
            .with_column(Column::new("id", "bigint").not_null())
            .with_column(Column::new("email", "text")),
    );
    s.indexes.push(Index {
        name: "users_email_idx".into(),
        table: "users".into(),
        columns: vec!["email".into()],
        ..Default::default()
    });
    s.views.push(View {
        name: "user_emails".into(),
        definition: "SELECT email FROM users".into(),
        ..Default::default()
    });
    s.materialized_views.push(MaterializedView {
        name: "user_count".into(),
        definition: "SELECT count(*) FROM users".into(),
        with_data: true,
        ..Default::default()
    });
    s.functions.push(Function {
        name: "touch".into(),
        returns: "trigger".into(),
        language: "plpgsql".into(),
        body: "BEGIN RETURN NEW; END".into(),
        ..Default::default()
    });
    s.procedures.push(Procedure {
        name: "archive".into(),
        arguments: "days integer".into(),
        language: "sql".into(),
        body: "DELETE FROM users".into(),
        ..Default::default()
    });
    s.aggregates.push(Aggregate {
        name: "total".into(),
        arguments: "bigint".into(),
        state_function: "int8pl".into(),
        state_type: "bigint".into(),
        ..Default::default()
    });
    s.triggers.push(Trigger {
        table: "users".into(),
        name: "users_touch".into(),
        events: vec![TriggerEvent::Update],
        function: "touch".into(),
        ..Default::default()
    });
    s.event_triggers.push(EventTrigger {
        name: "log_ddl".into(),
        event: "ddl_command_end".into(),
        function: "touch".into(),
        ..Default::default()
    });
    s.rules.push(Rule {
        table: "users".into(),
        name: "no_delete".into(),
        event: RuleEvent::Delete,
        instead: true,
        ..Default::default()
    });
    s.policies.push(Policy {
        table: "users".into(),
        name: "own_rows".into(),
        permissive: true,
        using: Some("id = 1".into()),
        ..Default::default()
    });
    s.collations.push(Collation {
        name: "nocase".into(),
        provider: Some("icu".into()),
        locale: Some("und-u-ks-level2".into()),
        ..Default::default()
    });
    s.text_search_configs.push(TextSearchConfig {
        name: "plain".into(),
        parser: "pg_catalog.default".into(),
        ..Default::default()
    });
    s.publications.push(Publication {
        name: "everything".into(),
        all_tables: true,
        ..Default::default()
    });
    s.subscriptions.push(Subscription {
        name: "replica".into(),
        connection: "host=primary".into(),
        publications: vec!["everything".into()],
        ..Default::default()
    });
    s.foreign_data_wrappers.push(ForeignDataWrapper {
        name: "files".into(),
        ..Default::default()
    });
    s.foreign_servers.push(ForeignServer {
        name: "archive".into(),
        wrapper: "files".into(),
        ..Default::default()
    });
    s.foreign_tables.push(ForeignTable {
        name: "old_users".into(),
        server: "archive".into(),
        columns: vec![Column::new("id", "bigint")],
        ..Default::default()
    });
    s.operators.push(Operator {
        name: "===".into(),
        left_type: Some("email".into()),
        right_type: Some("email".into()),
        function: "email_eq".into(),
        ..Default::default()
    });
    s.roles.push(Role {
        name: "reader".into(),
        login: true,
        ..Default::default()
    });
    s.role_grants.push(RoleGrant {
        object_type: "TABLE".into(),
        object: "users".into(),
        privilege: "SELECT".into(),
        grantee: "reader".into(),
        ..Default::default()
    });
    s.default_privileges.push(DefaultPrivilege {
        role: Some("app_owner".into()),
        object_type: "TABLES".into(),
        grantee: "reader".into(),
        privileges: vec!["SELECT".into()],
        ..Default::default()
    });
    s.comments.push(Comment {
        target: CommentTarget::Column,
        name: "users".into(),
        column: Some("email".into()),
        text: "Login address".into(),
        ..Default::default()
    });
    s
}

fn without_kinds(schema: &Schema, kinds: &[ObjectKind]) -> Schema {
    filter::apply(
        schema,
        &Filter {
            exclude_kinds: kinds.to_vec(),
            ..Default::default()
        },
    )
}

fn dedup<T>(items: Vec<T>, key: impl Fn(&T) -> String) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items.into_iter().filter(|i| seen.insert(key(i))).collect()
}

fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> BTreeSet<String> {
    items.iter().map(|i| name(i).to_string()).collect()
}

fn display_names<T: SchemaObject>(items: &[T]) -> BTreeSet<String> {
    items.iter().map(SchemaObject::display_name).collect()
}

fn touched(changes: &[Change], kind: ObjectKind, action: ChangeAction) -> BTreeSet<String> {
    changes
        .iter()
        .filter(|c| c.object_kind() == kind && c.kind().action() == action)
        .map(Change::object_name)
        .collect()
}

proptest! {
    #[test]
    fn comparing_a_schema_with_itself_is_empty(schema in schema()) {
        prop_assert!(compare(&schema, &schema).is_empty());
    }

    #[test]
    fn public_and_empty_schema_are_interchangeable(schema in schema()) {
        let mut explicit = schema.clone();
        for table in &mut explicit.tables {
            table.schema = "public".into();
        }
        for view in &mut explicit.views {
            view.schema = "public".into();
        }
        prop_assert!(compare(&schema, &explicit).is_empty());
    }

    #[test]
    fn changes_partition_the_keys(current in schema(), desired in schema()) {
        let changes = compare(&current, &desired);

        let before = names(&current.tables, |t| &t.name);
        let after = names(&desired.tables, |t| &t.name);
        prop_assert_eq!(
            touched(&changes, ObjectKind::Table, ChangeAction::Create),
            after.difference(&before).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            touched(&changes, ObjectKind::Table, ChangeAction::Drop),
            before.difference(&after).cloned().collect::<BTreeSet<_>>()
        );
        for name in touched(&changes, ObjectKind::Table, ChangeAction::Alter) {
            let old = current.table("", &name);
            let new = desired.table("", &name);
            prop_assert!(old.is_some() && new.is_some());
            prop_assert_ne!(old, new);
        }

        let before = names(&current.views, |v| &v.name);
        let after = names(&desired.views, |v| &v.name);
        prop_assert_eq!(
            touched(&changes, ObjectKind::View, ChangeAction::Create),
            after.difference(&before).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            touched(&changes, ObjectKind::View, ChangeAction::Drop),
            before.difference(&after).cloned().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn reversibility_follows_change_kind(current in schema(), desired in schema()) {
        for change in compare(&current, &desired) {
            let down = change.down_sql();
            match change.kind().action() {
                ChangeAction::Create => prop_assert!(change.is_reversible()),
                // Drops from snapshots always carry their definition.
                ChangeAction::Drop => prop_assert!(change.is_reversible()),
                ChangeAction::Alter if change.object_kind() == ObjectKind::Enum => {
                    prop_assert!(!change.is_reversible());
                }
                ChangeAction::Alter => {}
            }
            prop_assert_eq!(change.is_reversible(), !down.starts_with(pgshift::IRREVERSIBLE));
        }
    }

    #[test]
    fn referenced_tables_are_created_first(
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..10),
        rotation in 0usize..6,
    ) {
        // Only edges from a higher to a lower index, so the graph is acyclic.
        let mut tables: Vec<Table> = (0..6)
            .map(|i| Table::new("", format!("t{}", i)).with_column(Column::new("id", "int8")))
            .collect();
        for (n, (from, to)) in edges.into_iter().enumerate() {
            if from > to {
                tables[from] = tables[from].clone().with_constraint(Constraint::foreign_key(
                    format!("fk{}", n),
                    &["id"],
                    format!("t{}", to),
                    &["id"],
                ));
            }
        }
        tables.rotate_left(rotation);

        let mut desired = Schema::new();
        desired.tables = tables.clone();
        let position: BTreeMap<String, usize> = compare(&Schema::new(), &desired)
            .iter()
            .enumerate()
            .map(|(i, c)| (c.object_name(), i))
            .collect();

        for table in &tables {
            for (_, fk) in table.foreign_keys() {
                prop_assert!(position[&fk.references_table] < position[&table.name]);
            }
        }
    }

    #[test]
    fn every_kind_partitions_by_presence(
        in_current in prop::collection::vec(any::<bool>(), ObjectKind::ALL.len()),
        in_desired in prop::collection::vec(any::<bool>(), ObjectKind::ALL.len()),
    ) {
        let full = one_of_every_kind();
        let absent = |present: &[bool]| -> Vec<ObjectKind> {
            ObjectKind::ALL
                .iter()
                .zip(present)
                .filter(|(_, present)| !**present)
                .map(|(kind, _)| *kind)
                .collect()
        };
        let current = without_kinds(&full, &absent(&in_current));
        let desired = without_kinds(&full, &absent(&in_desired));
        let changes = compare(&current, &desired);

        for (i, kind) in ObjectKind::ALL.iter().enumerate() {
            let of_kind: Vec<&Change> =
                changes.iter().filter(|c| c.object_kind() == *kind).collect();
            let expected = match (in_current[i], in_desired[i]) {
                (false, true) => Some(ChangeAction::Create),
                (true, false) => Some(ChangeAction::Drop),
                _ => None,
            };
            match expected {
                Some(action) => {
                    prop_assert_eq!(of_kind.len(), 1, "{}", kind);
                    prop_assert_eq!(of_kind[0].kind().action(), action);
                    prop_assert!(of_kind[0].is_reversible());
                }
                None => prop_assert!(of_kind.is_empty(), "{}", kind),
            }
        }
    }

    #[test]
    fn procedure_overloads_partition_by_signature(
        current in prop::collection::vec(procedure(), 0..6),
        desired in prop::collection::vec(procedure(), 0..6),
    ) {
        let signature = |p: &Procedure| format!("{}({})", p.name, p.arguments);
        let mut before = Schema::new();
        before.procedures = dedup(current, signature);
        let mut after = Schema::new();
        after.procedures = dedup(desired, signature);

        let changes = compare(&before, &after);
        let old = display_names(&before.procedures);
        let new = display_names(&after.procedures);
        prop_assert_eq!(
            touched(&changes, ObjectKind::Procedure, ChangeAction::Create),
            new.difference(&old).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            touched(&changes, ObjectKind::Procedure, ChangeAction::Drop),
            old.difference(&new).cloned().collect::<BTreeSet<_>>()
        );
        for name in touched(&changes, ObjectKind::Procedure, ChangeAction::Alter) {
            let body = |s: &Schema| {
                s.procedures
                    .iter()
                    .find(|p| p.display_name() == name)
                    .map(|p| p.body.clone())
            };
            prop_assert!(body(&before).is_some());
            prop_assert_ne!(body(&before), body(&after));
        }
    }

    #[test]
    fn operators_partition_by_operand_types(
        current in prop::collection::vec(operator(), 0..6),
        desired in prop::collection::vec(operator(), 0..6),
    ) {
        let mut before = Schema::new();
        before.operators = dedup(current, Operator::display_name);
        let mut after = Schema::new();
        after.operators = dedup(desired, Operator::display_name);

        let changes = compare(&before, &after);
        prop_assert!(compare(&after, &after).is_empty());
        let old = display_names(&before.operators);
        let new = display_names(&after.operators);
        prop_assert_eq!(
            touched(&changes, ObjectKind::Operator, ChangeAction::Create),
            new.difference(&old).cloned().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(
            touched(&changes, ObjectKind::Operator, ChangeAction::Drop),
            old.difference(&new).cloned().collect::<BTreeSet<_>>()
        );
    }
}

#[test]
fn every_kind_compares_equal_to_itself() {
    let schema = one_of_every_kind();
    for kind in ObjectKind::ALL {
        assert_eq!(schema.count(kind), 1, "{}", kind);
    }
    assert!(compare(&schema, &schema).is_empty());
}

#[test]
fn every_kind_round_trips_through_create_and_drop() {
    let schema = one_of_every_kind();

    let created = compare(&Schema::new(), &schema);
    assert_eq!(created.len(), ObjectKind::ALL.len());
    let kinds: Vec<ObjectKind> = created.iter().map(Change::object_kind).collect();
    assert_eq!(kinds, ObjectKind::ALL.to_vec());
    assert!(created.iter().all(Change::is_reversible));

    let dropped = compare(&schema, &Schema::new());
    assert_eq!(dropped.len(), ObjectKind::ALL.len());
    for change in &dropped {
        assert_eq!(change.kind().action(), ChangeAction::Drop);
        assert!(change.is_reversible(), "{}", change);
        assert!(!change.down_sql().starts_with(pgshift::IRREVERSIBLE));
    }
}

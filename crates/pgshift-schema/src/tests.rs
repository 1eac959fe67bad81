use super::*;

#[test]
fn test_kinds_are_listed_once_in_order() {
    let mut sorted = ObjectKind::ALL.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ObjectKind::ALL.len());
    // Declaration order doubles as reconciliation order.
    assert_eq!(sorted, ObjectKind::ALL.to_vec());
}

#[test]
fn test_kind_labels() {
    assert_eq!(ObjectKind::MaterializedView.label(), "materialized view");
    assert_eq!(ObjectKind::Index.plural(), "indexes");
    assert_eq!(ObjectKind::Policy.plural(), "policies");
    assert_eq!(ObjectKind::Table.plural(), "tables");
    assert_eq!(ObjectKind::Namespace.to_string(), "schema");
}

#[test]
fn test_empty_schema_means_public() {
    let a = Table::new("", "users");
    let b = Table::new("public", "users");
    assert_eq!(a.key(), b.key());
    assert_eq!(a.display_name(), "users");
    assert_eq!(a.schema_name(), Some("public"));
}

#[test]
fn test_schema_qualified_display() {
    let t = Table::new("billing", "order");
    assert_eq!(t.display_name(), "billing.\"order\"");
    assert_eq!(t.key(), ("billing".to_string(), "order".to_string()));
}

#[test]
fn test_table_scoped_keys() {
    let on_users = Trigger {
        table: "users".into(),
        name: "touch".into(),
        function: "touch_updated_at".into(),
        ..Default::default()
    };
    let on_orders = Trigger {
        table: "orders".into(),
        ..on_users.clone()
    };
    assert_ne!(on_users.key(), on_orders.key());
    assert_eq!(on_users.display_name(), "touch on users");
}

#[test]
fn test_operator_key_includes_operand_types() {
    let int_eq = Operator {
        name: "===".into(),
        left_type: Some("integer".into()),
        right_type: Some("integer".into()),
        function: "int_eq".into(),
        ..Default::default()
    };
    let text_eq = Operator {
        left_type: Some("text".into()),
        right_type: Some("text".into()),
        ..int_eq.clone()
    };
    let prefix = Operator {
        left_type: None,
        ..int_eq.clone()
    };
    assert_ne!(int_eq.key(), text_eq.key());
    assert_ne!(int_eq.key(), prefix.key());
    assert_eq!(prefix.display_name(), "public.===(NONE, integer)");
}

#[test]
fn test_procedure_key_includes_arguments() {
    let a = Procedure {
        name: "archive".into(),
        arguments: "days integer".into(),
        language: "sql".into(),
        body: "select 1".into(),
        ..Default::default()
    };
    let b = Procedure {
        arguments: "".into(),
        ..a.clone()
    };
    assert_ne!(a.key(), b.key());
    assert_eq!(a.display_name(), "archive(days integer)");
}

#[test]
fn test_grant_and_default_privilege_keys() {
    let grant = RoleGrant {
        object_type: "TABLE".into(),
        object: "users".into(),
        privilege: "SELECT".into(),
        grantee: "reader".into(),
        ..Default::default()
    };
    assert_eq!(
        grant.key(),
        (
            "public".to_string(),
            "users".to_string(),
            "SELECT".to_string(),
            "reader".to_string()
        )
    );
    assert_eq!(grant.display_name(), "SELECT on users to reader");

    let dp = DefaultPrivilege {
        object_type: "TABLES".into(),
        grantee: "reader".into(),
        privileges: vec!["SELECT".into()],
        ..Default::default()
    };
    assert_eq!(dp.display_name(), "tables in public for reader");

    let for_owner = DefaultPrivilege {
        role: Some("owner".into()),
        ..dp.clone()
    };
    assert_ne!(dp.key(), for_owner.key());
    assert_eq!(for_owner.display_name(), "tables in public for reader by owner");
}

#[test]
fn test_comment_keys() {
    let on_table = Comment {
        target: CommentTarget::Table,
        name: "users".into(),
        text: "People".into(),
        ..Default::default()
    };
    let on_column = Comment {
        target: CommentTarget::Column,
        column: Some("email".into()),
        ..on_table.clone()
    };
    assert_ne!(on_table.key(), on_column.key());
    assert_eq!(on_table.display_name(), "table users");
    assert_eq!(on_column.display_name(), "column users.email");
}

#[test]
fn test_cluster_wide_objects_have_no_schema() {
    let role = Role {
        name: "app".into(),
        ..Default::default()
    };
    assert_eq!(role.schema_name(), None);
    let ns = Namespace {
        name: "audit".into(),
        owner: None,
    };
    assert_eq!(ns.schema_name(), Some("audit"));
}

#[test]
fn test_schema_counts_and_lookup() {
    let mut schema = Schema::new();
    assert!(schema.is_empty());
    schema
        .tables
        .push(Table::new("public", "users").with_column(Column::new("id", "bigint").not_null()));
    schema.enums.push(Enum {
        name: "mood".into(),
        values: vec!["happy".into(), "sad".into()],
        ..Default::default()
    });
    assert_eq!(schema.object_count(), 2);
    assert_eq!(schema.count(ObjectKind::Table), 1);
    assert!(schema.table("", "users").is_some());
    assert!(schema.table("app", "users").is_none());
    let users = schema.table("public", "users").unwrap();
    assert!(!users.column("id").unwrap().nullable);
}

#[test]
fn test_foreign_keys_iterator() {
    let orders = Table::new("", "orders")
        .with_column(Column::new("id", "bigint").not_null())
        .with_column(Column::new("user_id", "bigint"))
        .with_constraint(Constraint::primary_key("orders_pkey", &["id"]))
        .with_constraint(Constraint::foreign_key(
            "orders_user_id_fkey",
            &["user_id"],
            "users",
            &["id"],
        ));
    let fks: Vec<_> = orders.foreign_keys().collect();
    assert_eq!(fks.len(), 1);
    assert_eq!(fks[0].0.name, "orders_user_id_fkey");
    assert_eq!(fks[0].1.references_table, "users");
}

#[test]
fn test_identity_column_is_not_null() {
    let col = Column::new("id", "bigint").with_identity(IdentityKind::Always);
    assert!(col.identity.is_identity());
    assert!(!col.nullable);
    assert_eq!(col.identity.kind.to_sql(), "ALWAYS");
}

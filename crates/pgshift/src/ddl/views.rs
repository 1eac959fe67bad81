use super::Ddl;
use pgshift_schema::{CheckOption, MaterializedView, Rule, View};
use pgshift_sql::{qualified_name, quote_ident};

/// Body of a view definition without its trailing semicolon.
fn body(definition: &str) -> &str {
    let trimmed = definition.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end()
}

/// `CREATE [OR REPLACE] VIEW` for `view`.
pub(crate) fn view_sql(view: &View, or_replace: bool) -> String {
    let verb = if or_replace {
        "CREATE OR REPLACE VIEW"
    } else {
        "CREATE VIEW"
    };
    let mut sql = format!(
        "{} {} AS\n{}",
        verb,
        qualified_name(&view.schema, &view.name),
        body(&view.definition)
    );
    match view.check_option {
        Some(CheckOption::Local) => sql.push_str("\nWITH LOCAL CHECK OPTION"),
        Some(CheckOption::Cascaded) => sql.push_str("\nWITH CASCADED CHECK OPTION"),
        None => {}
    }
    sql.push(';');
    sql
}

impl Ddl for View {
    fn create_sql(&self) -> String {
        view_sql(self, false)
    }

    fn drop_sql(&self) -> String {
        format!("DROP VIEW {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for MaterializedView {
    fn create_sql(&self) -> String {
        let data = if self.with_data {
            "WITH DATA"
        } else {
            "WITH NO DATA"
        };
        format!(
            "CREATE MATERIALIZED VIEW {} AS\n{}\n{};",
            qualified_name(&self.schema, &self.name),
            body(&self.definition),
            data
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP MATERIALIZED VIEW {};",
            qualified_name(&self.schema, &self.name)
        )
    }
}

impl Ddl for Rule {
    fn create_sql(&self) -> String {
        let mut sql = format!(
            "CREATE RULE {} AS ON {} TO {}",
            quote_ident(&self.name),
            self.event.to_sql(),
            qualified_name(&self.schema, &self.table)
        );
        if let Some(condition) = &self.condition {
            sql.push_str(&format!(" WHERE {}", condition));
        }
        sql.push_str(if self.instead { " DO INSTEAD " } else { " DO ALSO " });
        let actions: Vec<&str> = self.actions.iter().map(|a| body(a)).collect();
        match actions.as_slice() {
            [] => sql.push_str("NOTHING"),
            [single] => sql.push_str(single),
            many => sql.push_str(&format!("({})", many.join("; "))),
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP RULE IF EXISTS {} ON {};",
            quote_ident(&self.name),
            qualified_name(&self.schema, &self.table)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgshift_schema::RuleEvent;

    #[test]
    fn test_view_sql() {
        let view = View {
            schema: "reporting".into(),
            name: "active_users".into(),
            definition: " SELECT id FROM users WHERE active; ".into(),
            check_option: Some(CheckOption::Local),
        };
        insta::assert_snapshot!(view.create_sql(), @r"
        CREATE VIEW reporting.active_users AS
        SELECT id FROM users WHERE active
        WITH LOCAL CHECK OPTION;
        ");
        assert!(view_sql(&view, true).starts_with("CREATE OR REPLACE VIEW reporting.active_users AS"));
        assert_eq!(view.drop_sql(), "DROP VIEW reporting.active_users;");
    }

    #[test]
    fn test_materialized_view_sql() {
        let mv = MaterializedView {
            schema: "".into(),
            name: "daily_totals".into(),
            definition: "SELECT day, sum(amount) FROM payments GROUP BY day".into(),
            with_data: false,
        };
        insta::assert_snapshot!(mv.create_sql(), @r"
        CREATE MATERIALIZED VIEW daily_totals AS
        SELECT day, sum(amount) FROM payments GROUP BY day
        WITH NO DATA;
        ");
        assert_eq!(mv.drop_sql(), "DROP MATERIALIZED VIEW daily_totals;");
    }

    #[test]
    fn test_rule_sql() {
        let mut rule = Rule {
            schema: "".into(),
            table: "audit_log".into(),
            name: "no_delete".into(),
            event: RuleEvent::Delete,
            instead: true,
            condition: None,
            actions: vec![],
        };
        assert_eq!(
            rule.create_sql(),
            "CREATE RULE no_delete AS ON DELETE TO audit_log DO INSTEAD NOTHING;"
        );
        assert_eq!(rule.drop_sql(), "DROP RULE IF EXISTS no_delete ON audit_log;");

        rule.instead = false;
        rule.actions = vec![
            "NOTIFY audit_log;".into(),
            "INSERT INTO audit_trail VALUES (OLD.id)".into(),
        ];
        assert_eq!(
            rule.create_sql(),
            "CREATE RULE no_delete AS ON DELETE TO audit_log DO ALSO (NOTIFY audit_log; INSERT INTO audit_trail VALUES (OLD.id));"
        );
    }
}

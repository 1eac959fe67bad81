use super::{Ddl, dollar_quote};
use pgshift_schema::{
    Aggregate, EventTrigger, Function, Operator, Procedure, Trigger, TriggerEvent,
    effective_schema,
};
use pgshift_sql::{Lit, ident_list, qualified_name, quote_ident};

/// `CREATE [OR REPLACE] FUNCTION` for `function`.
pub(crate) fn function_sql(function: &Function, or_replace: bool) -> String {
    let verb = if or_replace {
        "CREATE OR REPLACE FUNCTION"
    } else {
        "CREATE FUNCTION"
    };
    let mut attributes = vec![function.volatility.to_sql()];
    if function.strict {
        attributes.push("STRICT");
    }
    if function.security_definer {
        attributes.push("SECURITY DEFINER");
    }
    format!(
        "{} {}({})\nRETURNS {}\nLANGUAGE {}\n{}\nAS {};",
        verb,
        qualified_name(&function.schema, &function.name),
        function.arguments,
        function.returns,
        function.language,
        attributes.join(" "),
        dollar_quote(&function.body, "function")
    )
}

/// `CREATE [OR REPLACE] PROCEDURE` for `procedure`.
pub(crate) fn procedure_sql(procedure: &Procedure, or_replace: bool) -> String {
    let verb = if or_replace {
        "CREATE OR REPLACE PROCEDURE"
    } else {
        "CREATE PROCEDURE"
    };
    let security = if procedure.security_definer {
        "\nSECURITY DEFINER"
    } else {
        ""
    };
    format!(
        "{} {}({})\nLANGUAGE {}{}\nAS {};",
        verb,
        qualified_name(&procedure.schema, &procedure.name),
        procedure.arguments,
        procedure.language,
        security,
        dollar_quote(&procedure.body, "procedure")
    )
}

impl Ddl for Function {
    fn create_sql(&self) -> String {
        function_sql(self, false)
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP FUNCTION {}({});",
            qualified_name(&self.schema, &self.name),
            self.arguments
        )
    }
}

impl Ddl for Procedure {
    fn create_sql(&self) -> String {
        procedure_sql(self, false)
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP PROCEDURE {}({});",
            qualified_name(&self.schema, &self.name),
            self.arguments
        )
    }
}

impl Ddl for Aggregate {
    fn create_sql(&self) -> String {
        let mut options = vec![
            format!("SFUNC = {}", self.state_function),
            format!("STYPE = {}", self.state_type),
        ];
        if let Some(f) = &self.final_function {
            options.push(format!("FINALFUNC = {}", f));
        }
        if let Some(f) = &self.combine_function {
            options.push(format!("COMBINEFUNC = {}", f));
        }
        if let Some(init) = &self.initial_condition {
            options.push(format!("INITCOND = {}", Lit(init)));
        }
        format!(
            "CREATE AGGREGATE {}({}) ({});",
            qualified_name(&self.schema, &self.name),
            self.arguments,
            options.join(", ")
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP AGGREGATE {}({});",
            qualified_name(&self.schema, &self.name),
            self.arguments
        )
    }
}

/// Operator symbols are never quoted; only the schema is.
fn operator_name(operator: &Operator) -> String {
    if effective_schema(&operator.schema) == "public" {
        operator.name.clone()
    } else {
        format!("{}.{}", quote_ident(&operator.schema), operator.name)
    }
}

impl Ddl for Operator {
    fn create_sql(&self) -> String {
        let mut options = vec![format!("FUNCTION = {}", self.function)];
        if let Some(left) = &self.left_type {
            options.push(format!("LEFTARG = {}", left));
        }
        if let Some(right) = &self.right_type {
            options.push(format!("RIGHTARG = {}", right));
        }
        if let Some(c) = &self.commutator {
            options.push(format!("COMMUTATOR = {}", c));
        }
        if let Some(n) = &self.negator {
            options.push(format!("NEGATOR = {}", n));
        }
        if let Some(r) = &self.restrict {
            options.push(format!("RESTRICT = {}", r));
        }
        if let Some(j) = &self.join {
            options.push(format!("JOIN = {}", j));
        }
        if self.hashes {
            options.push("HASHES".to_string());
        }
        if self.merges {
            options.push("MERGES".to_string());
        }
        format!(
            "CREATE OPERATOR {} ({});",
            operator_name(self),
            options.join(", ")
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP OPERATOR {} ({}, {});",
            operator_name(self),
            self.left_type.as_deref().unwrap_or("NONE"),
            self.right_type.as_deref().unwrap_or("NONE")
        )
    }
}

impl Ddl for Trigger {
    fn create_sql(&self) -> String {
        let events: Vec<String> = self
            .events
            .iter()
            .map(|event| match event {
                TriggerEvent::Update if !self.update_columns.is_empty() => {
                    format!("UPDATE OF {}", ident_list(&self.update_columns))
                }
                other => other.to_sql().to_string(),
            })
            .collect();
        let mut sql = format!(
            "CREATE TRIGGER {} {} {} ON {} FOR EACH {}",
            quote_ident(&self.name),
            self.timing.to_sql(),
            events.join(" OR "),
            qualified_name(&self.schema, &self.table),
            self.level.to_sql()
        );
        if let Some(when) = &self.when {
            sql.push_str(&format!(" WHEN ({})", when));
        }
        sql.push_str(&format!(" EXECUTE FUNCTION {}();", self.function));
        sql
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP TRIGGER IF EXISTS {} ON {};",
            quote_ident(&self.name),
            qualified_name(&self.schema, &self.table)
        )
    }
}

impl Ddl for EventTrigger {
    fn create_sql(&self) -> String {
        let name = quote_ident(&self.name);
        let mut sql = format!("CREATE EVENT TRIGGER {} ON {}", name, self.event);
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| Lit(t).to_string()).collect();
            sql.push_str(&format!(" WHEN TAG IN ({})", tags.join(", ")));
        }
        sql.push_str(&format!(" EXECUTE FUNCTION {}();", self.function));
        if self.enabled == Some(false) {
            sql.push_str(&format!("\nALTER EVENT TRIGGER {} DISABLE;", name));
        }
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP EVENT TRIGGER {};", quote_ident(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgshift_schema::{TriggerLevel, TriggerTiming, Volatility};

    fn add() -> Function {
        Function {
            schema: "".into(),
            name: "add".into(),
            arguments: "a integer, b integer".into(),
            returns: "integer".into(),
            language: "sql".into(),
            body: "SELECT a + b".into(),
            volatility: Volatility::Immutable,
            security_definer: false,
            strict: true,
        }
    }

    #[test]
    fn test_function_sql() {
        insta::assert_snapshot!(add().create_sql(), @r"
        CREATE FUNCTION add(a integer, b integer)
        RETURNS integer
        LANGUAGE sql
        IMMUTABLE STRICT
        AS $function$SELECT a + b$function$;
        ");
        assert!(function_sql(&add(), true).starts_with("CREATE OR REPLACE FUNCTION add("));
        assert_eq!(add().drop_sql(), "DROP FUNCTION add(a integer, b integer);");
    }

    #[test]
    fn test_procedure_sql() {
        let p = Procedure {
            schema: "ops".into(),
            name: "purge".into(),
            arguments: "days integer".into(),
            language: "plpgsql".into(),
            body: "BEGIN DELETE FROM logs WHERE at < now() - days * interval '1 day'; END".into(),
            security_definer: true,
        };
        insta::assert_snapshot!(p.create_sql(), @r"
        CREATE PROCEDURE ops.purge(days integer)
        LANGUAGE plpgsql
        SECURITY DEFINER
        AS $procedure$BEGIN DELETE FROM logs WHERE at < now() - days * interval '1 day'; END$procedure$;
        ");
        assert_eq!(p.drop_sql(), "DROP PROCEDURE ops.purge(days integer);");
    }

    #[test]
    fn test_aggregate_sql() {
        let agg = Aggregate {
            schema: "".into(),
            name: "product".into(),
            arguments: "numeric".into(),
            state_function: "numeric_mul".into(),
            state_type: "numeric".into(),
            final_function: None,
            combine_function: Some("numeric_mul".into()),
            initial_condition: Some("1".into()),
        };
        assert_eq!(
            agg.create_sql(),
            "CREATE AGGREGATE product(numeric) (SFUNC = numeric_mul, STYPE = numeric, COMBINEFUNC = numeric_mul, INITCOND = '1');"
        );
        assert_eq!(agg.drop_sql(), "DROP AGGREGATE product(numeric);");
    }

    #[test]
    fn test_operator_sql() {
        let op = Operator {
            schema: "util".into(),
            name: "===".into(),
            left_type: Some("text".into()),
            right_type: Some("text".into()),
            function: "util.text_eq_ci".into(),
            commutator: Some("===".into()),
            hashes: true,
            ..Default::default()
        };
        assert_eq!(
            op.create_sql(),
            "CREATE OPERATOR util.=== (FUNCTION = util.text_eq_ci, LEFTARG = text, RIGHTARG = text, COMMUTATOR = ===, HASHES);"
        );
        assert_eq!(op.drop_sql(), "DROP OPERATOR util.=== (text, text);");

        let prefix = Operator {
            schema: "".into(),
            name: "!!".into(),
            left_type: None,
            right_type: Some("bigint".into()),
            function: "factorial".into(),
            ..Default::default()
        };
        assert_eq!(prefix.drop_sql(), "DROP OPERATOR !! (NONE, bigint);");
    }

    #[test]
    fn test_trigger_sql() {
        let trigger = Trigger {
            schema: "".into(),
            table: "users".into(),
            name: "users_touch".into(),
            timing: TriggerTiming::Before,
            events: vec![TriggerEvent::Insert, TriggerEvent::Update],
            update_columns: vec!["email".into()],
            level: TriggerLevel::Row,
            when: Some("NEW.email IS NOT NULL".into()),
            function: "touch_updated_at".into(),
        };
        assert_eq!(
            trigger.create_sql(),
            "CREATE TRIGGER users_touch BEFORE INSERT OR UPDATE OF email ON users FOR EACH ROW WHEN (NEW.email IS NOT NULL) EXECUTE FUNCTION touch_updated_at();"
        );
        assert_eq!(
            trigger.drop_sql(),
            "DROP TRIGGER IF EXISTS users_touch ON users;"
        );
    }

    #[test]
    fn test_event_trigger_sql() {
        let et = EventTrigger {
            name: "no_drops".into(),
            event: "sql_drop".into(),
            tags: vec!["DROP TABLE".into()],
            function: "forbid_drop".into(),
            enabled: Some(false),
        };
        insta::assert_snapshot!(et.create_sql(), @r"
        CREATE EVENT TRIGGER no_drops ON sql_drop WHEN TAG IN ('DROP TABLE') EXECUTE FUNCTION forbid_drop();
        ALTER EVENT TRIGGER no_drops DISABLE;
        ");
        assert_eq!(et.drop_sql(), "DROP EVENT TRIGGER no_drops;");
    }
}

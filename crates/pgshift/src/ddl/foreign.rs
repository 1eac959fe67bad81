use super::{Ddl, column_definition, options_clause};
use pgshift_schema::{ForeignDataWrapper, ForeignServer, ForeignTable};
use pgshift_sql::{Lit, qualified_name, quote_ident};

impl Ddl for ForeignDataWrapper {
    fn create_sql(&self) -> String {
        let mut sql = format!("CREATE FOREIGN DATA WRAPPER {}", quote_ident(&self.name));
        if let Some(handler) = &self.handler {
            sql.push_str(&format!(" HANDLER {}", handler));
        }
        if let Some(validator) = &self.validator {
            sql.push_str(&format!(" VALIDATOR {}", validator));
        }
        sql.push_str(&options_clause(&self.options));
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP FOREIGN DATA WRAPPER {};", quote_ident(&self.name))
    }
}

impl Ddl for ForeignServer {
    fn create_sql(&self) -> String {
        let mut sql = format!("CREATE SERVER {}", quote_ident(&self.name));
        if let Some(server_type) = &self.server_type {
            sql.push_str(&format!(" TYPE {}", Lit(server_type)));
        }
        if let Some(version) = &self.version {
            sql.push_str(&format!(" VERSION {}", Lit(version)));
        }
        sql.push_str(&format!(
            " FOREIGN DATA WRAPPER {}",
            quote_ident(&self.wrapper)
        ));
        sql.push_str(&options_clause(&self.options));
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP SERVER {};", quote_ident(&self.name))
    }
}

impl Ddl for ForeignTable {
    fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|col| format!("    {}", column_definition(col)))
            .collect();
        format!(
            "CREATE FOREIGN TABLE {} (\n{}\n) SERVER {}{};",
            qualified_name(&self.schema, &self.name),
            columns.join(",\n"),
            quote_ident(&self.server),
            options_clause(&self.options)
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP FOREIGN TABLE {};",
            qualified_name(&self.schema, &self.name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgshift_schema::{Column, GenericOption};

    fn option(key: &str, value: &str) -> GenericOption {
        GenericOption {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_wrapper_and_server_sql() {
        let fdw = ForeignDataWrapper {
            name: "postgres_fdw".into(),
            handler: Some("postgres_fdw_handler".into()),
            validator: Some("postgres_fdw_validator".into()),
            options: vec![],
        };
        assert_eq!(
            fdw.create_sql(),
            "CREATE FOREIGN DATA WRAPPER postgres_fdw HANDLER postgres_fdw_handler VALIDATOR postgres_fdw_validator;"
        );

        let server = ForeignServer {
            name: "warehouse".into(),
            wrapper: "postgres_fdw".into(),
            server_type: None,
            version: Some("16".into()),
            options: vec![option("host", "wh.internal"), option("dbname", "wh")],
        };
        assert_eq!(
            server.create_sql(),
            "CREATE SERVER warehouse VERSION '16' FOREIGN DATA WRAPPER postgres_fdw OPTIONS (host 'wh.internal', dbname 'wh');"
        );
        assert_eq!(server.drop_sql(), "DROP SERVER warehouse;");
    }

    #[test]
    fn test_foreign_table_sql() {
        let table = ForeignTable {
            schema: "remote".into(),
            name: "orders".into(),
            server: "warehouse".into(),
            columns: vec![
                Column::new("id", "bigint").not_null(),
                Column::new("total", "numeric"),
            ],
            options: vec![option("table_name", "orders")],
        };
        insta::assert_snapshot!(table.create_sql(), @r"
        CREATE FOREIGN TABLE remote.orders (
            id bigint NOT NULL,
            total numeric
        ) SERVER warehouse OPTIONS (table_name 'orders');
        ");
        assert_eq!(table.drop_sql(), "DROP FOREIGN TABLE remote.orders;");
    }
}

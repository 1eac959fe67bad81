use super::Ddl;
use pgshift_schema::{
    Column, Constraint, ConstraintKind, ForeignKey, Identity, Index, Partitioning,
    ReferentialAction, Table,
};
use pgshift_sql::{ident_list, qualified_name, quote_ident};

impl Ddl for Table {
    fn create_sql(&self) -> String {
        let name = qualified_name(&self.schema, &self.name);

        if let Some(Partitioning::PartitionOf {
            parent_schema,
            parent,
            bound,
        }) = &self.partition
        {
            // Columns and constraints are inherited from the parent.
            return format!(
                "CREATE TABLE {} PARTITION OF {} {};",
                name,
                qualified_name(parent_schema, parent),
                bound
            );
        }

        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|col| format!("    {}", column_definition(col)))
            .collect();
        for constraint in &self.constraints {
            parts.push(format!("    {}", constraint_sql(constraint)));
        }

        let mut sql = format!("CREATE TABLE {} (\n", name);
        sql.push_str(&parts.join(",\n"));
        sql.push_str("\n)");
        if let Some(Partitioning::Partitioned { strategy, key }) = &self.partition {
            sql.push_str(&format!(" PARTITION BY {} ({})", strategy.to_sql(), key));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP TABLE {};", qualified_name(&self.schema, &self.name))
    }
}

/// Full column definition as used in `CREATE TABLE` and `ADD COLUMN`.
pub(crate) fn column_definition(col: &Column) -> String {
    let mut def = format!("{} {}", quote_ident(&col.name), col.type_name);

    if let Some(collation) = &col.collation {
        def.push_str(&format!(" COLLATE {}", quote_ident(collation)));
    }

    if let Some(default) = &col.default {
        def.push_str(&format!(" DEFAULT {}", default));
    }

    if let Some(generated) = &col.generated {
        def.push_str(&format!(
            " GENERATED ALWAYS AS ({}) {}",
            generated.expression,
            generated.storage.to_sql()
        ));
    }

    if col.identity.is_identity() {
        def.push_str(&format!(
            " GENERATED {} AS IDENTITY",
            col.identity.kind.to_sql()
        ));
        let options = identity_options(&col.identity);
        if !options.is_empty() {
            def.push_str(&format!(" ({})", options));
        }
    }

    if !col.nullable {
        match &col.not_null_constraint {
            Some(name) => def.push_str(&format!(" CONSTRAINT {} NOT NULL", quote_ident(name))),
            None => def.push_str(" NOT NULL"),
        }
    }

    def
}

/// Sequence options of an identity column, space separated. Unset options
/// are left to the server defaults.
pub(crate) fn identity_options(identity: &Identity) -> String {
    let mut parts = Vec::new();
    if let Some(start) = identity.start {
        parts.push(format!("START WITH {}", start));
    }
    if let Some(increment) = identity.increment {
        parts.push(format!("INCREMENT BY {}", increment));
    }
    if let Some(min) = identity.min_value {
        parts.push(format!("MINVALUE {}", min));
    }
    if let Some(max) = identity.max_value {
        parts.push(format!("MAXVALUE {}", max));
    }
    if let Some(cache) = identity.cache {
        parts.push(format!("CACHE {}", cache));
    }
    if identity.cycle {
        parts.push("CYCLE".to_string());
    }
    parts.join(" ")
}

/// A table constraint as it appears inside `CREATE TABLE`.
pub(crate) fn constraint_sql(constraint: &Constraint) -> String {
    let name = quote_ident(&constraint.name);
    match &constraint.kind {
        ConstraintKind::PrimaryKey { without_overlaps } => format!(
            "CONSTRAINT {} PRIMARY KEY ({})",
            name,
            key_columns(&constraint.columns, without_overlaps.as_deref())
        ),
        ConstraintKind::Unique {
            without_overlaps,
            nulls_not_distinct,
        } => {
            let nulls = if *nulls_not_distinct {
                " NULLS NOT DISTINCT"
            } else {
                ""
            };
            format!(
                "CONSTRAINT {} UNIQUE{} ({})",
                name,
                nulls,
                key_columns(&constraint.columns, without_overlaps.as_deref())
            )
        }
        ConstraintKind::ForeignKey(fk) => {
            format!("CONSTRAINT {} {}", name, foreign_key_sql(&constraint.columns, fk))
        }
        ConstraintKind::Check {
            expression,
            no_inherit,
        } => {
            let no_inherit = if *no_inherit { " NO INHERIT" } else { "" };
            format!("CONSTRAINT {} CHECK ({}){}", name, expression, no_inherit)
        }
        ConstraintKind::Exclusion(exclusion) => {
            let elements: Vec<String> = exclusion
                .elements
                .iter()
                .map(|e| format!("{} WITH {}", e.column, e.operator))
                .collect();
            let mut sql = format!(
                "CONSTRAINT {} EXCLUDE USING {} ({})",
                name,
                exclusion.using,
                elements.join(", ")
            );
            if let Some(predicate) = &exclusion.where_clause {
                sql.push_str(&format!(" WHERE ({})", predicate));
            }
            sql
        }
    }
}

fn key_columns(columns: &[String], without_overlaps: Option<&str>) -> String {
    let mut cols = ident_list(columns);
    if let Some(period) = without_overlaps {
        if !cols.is_empty() {
            cols.push_str(", ");
        }
        cols.push_str(&format!("{} WITHOUT OVERLAPS", quote_ident(period)));
    }
    cols
}

fn foreign_key_sql(columns: &[String], fk: &ForeignKey) -> String {
    let period = |cols: String| match &fk.period {
        Some(p) if cols.is_empty() => format!("PERIOD {}", quote_ident(p)),
        Some(p) => format!("{}, PERIOD {}", cols, quote_ident(p)),
        None => cols,
    };

    let mut sql = format!(
        "FOREIGN KEY ({}) REFERENCES {} ({})",
        period(ident_list(columns)),
        qualified_name(&fk.references_schema, &fk.references_table),
        period(ident_list(&fk.references_columns))
    );
    if fk.on_delete != ReferentialAction::NoAction {
        sql.push_str(&format!(" ON DELETE {}", fk.on_delete.to_sql()));
    }
    if fk.on_update != ReferentialAction::NoAction {
        sql.push_str(&format!(" ON UPDATE {}", fk.on_update.to_sql()));
    }
    if fk.not_enforced {
        sql.push_str(" NOT ENFORCED");
    }
    // NOT VALID is only accepted by ALTER TABLE … ADD CONSTRAINT; a table
    // created here has no rows to skip.
    sql
}

impl Ddl for Index {
    fn create_sql(&self) -> String {
        let unique = if self.unique { "UNIQUE " } else { "" };
        let mut sql = format!(
            "CREATE {}INDEX {} ON {}",
            unique,
            quote_ident(&self.name),
            qualified_name(&self.schema, &self.table)
        );
        if !self.method.is_empty() && !self.method.eq_ignore_ascii_case("btree") {
            sql.push_str(&format!(" USING {}", self.method));
        }
        sql.push_str(&format!(" ({})", self.columns.join(", ")));
        if !self.include.is_empty() {
            sql.push_str(&format!(" INCLUDE ({})", ident_list(&self.include)));
        }
        if self.nulls_not_distinct {
            sql.push_str(" NULLS NOT DISTINCT");
        }
        if let Some(predicate) = &self.where_clause {
            sql.push_str(&format!(" WHERE {}", predicate));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP INDEX IF EXISTS {};",
            qualified_name(&self.schema, &self.name)
        )
    }
}

use super::Ddl;
use pgshift_schema::{
    Collation, CompositeType, Domain, Enum, Extension, Namespace, Sequence, TextSearchConfig,
};
use pgshift_sql::{Lit, ident_list, qualified_name, quote_ident};

impl Ddl for Namespace {
    fn create_sql(&self) -> String {
        match &self.owner {
            Some(owner) => format!(
                "CREATE SCHEMA {} AUTHORIZATION {};",
                quote_ident(&self.name),
                quote_ident(owner)
            ),
            None => format!("CREATE SCHEMA {};", quote_ident(&self.name)),
        }
    }

    fn drop_sql(&self) -> String {
        format!("DROP SCHEMA {};", quote_ident(&self.name))
    }
}

impl Ddl for Extension {
    fn create_sql(&self) -> String {
        let mut sql = format!("CREATE EXTENSION {}", quote_ident(&self.name));
        if let Some(schema) = &self.schema {
            sql.push_str(&format!(" SCHEMA {}", quote_ident(schema)));
        }
        if let Some(version) = &self.version {
            sql.push_str(&format!(" VERSION {}", Lit(version)));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP EXTENSION {};", quote_ident(&self.name))
    }
}

impl Ddl for Enum {
    fn create_sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(|v| Lit(v).to_string()).collect();
        format!(
            "CREATE TYPE {} AS ENUM ({});",
            qualified_name(&self.schema, &self.name),
            values.join(", ")
        )
    }

    fn drop_sql(&self) -> String {
        format!("DROP TYPE {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for Domain {
    fn create_sql(&self) -> String {
        let mut sql = format!(
            "CREATE DOMAIN {} AS {}",
            qualified_name(&self.schema, &self.name),
            self.base_type
        );
        if let Some(collation) = &self.collation {
            sql.push_str(&format!(" COLLATE {}", quote_ident(collation)));
        }
        if let Some(default) = &self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        for check in &self.checks {
            match &check.name {
                Some(name) => sql.push_str(&format!(
                    " CONSTRAINT {} CHECK ({})",
                    quote_ident(name),
                    check.expression
                )),
                None => sql.push_str(&format!(" CHECK ({})", check.expression)),
            }
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP DOMAIN {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for CompositeType {
    fn create_sql(&self) -> String {
        let attributes: Vec<String> = self
            .attributes
            .iter()
            .map(|a| match &a.collation {
                Some(c) => format!("{} {} COLLATE {}", quote_ident(&a.name), a.type_name, quote_ident(c)),
                None => format!("{} {}", quote_ident(&a.name), a.type_name),
            })
            .collect();
        format!(
            "CREATE TYPE {} AS ({});",
            qualified_name(&self.schema, &self.name),
            attributes.join(", ")
        )
    }

    fn drop_sql(&self) -> String {
        format!("DROP TYPE {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for Sequence {
    /// `OWNED BY` is not rendered here: sequences are created before the
    /// tables that would own them. Captured drops restore it separately.
    fn create_sql(&self) -> String {
        let mut sql = format!(
            "CREATE SEQUENCE {}",
            qualified_name(&self.schema, &self.name)
        );
        if let Some(data_type) = &self.data_type {
            sql.push_str(&format!(" AS {}", data_type));
        }
        if let Some(increment) = self.increment {
            sql.push_str(&format!(" INCREMENT BY {}", increment));
        }
        if let Some(min) = self.min_value {
            sql.push_str(&format!(" MINVALUE {}", min));
        }
        if let Some(max) = self.max_value {
            sql.push_str(&format!(" MAXVALUE {}", max));
        }
        if let Some(start) = self.start {
            sql.push_str(&format!(" START WITH {}", start));
        }
        if let Some(cache) = self.cache {
            sql.push_str(&format!(" CACHE {}", cache));
        }
        if self.cycle {
            sql.push_str(" CYCLE");
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP SEQUENCE {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for Collation {
    fn create_sql(&self) -> String {
        let mut options = Vec::new();
        if let Some(provider) = &self.provider {
            options.push(format!("PROVIDER = {}", provider));
        }
        if let Some(locale) = &self.locale {
            options.push(format!("LOCALE = {}", Lit(locale)));
        }
        if let Some(lc_collate) = &self.lc_collate {
            options.push(format!("LC_COLLATE = {}", Lit(lc_collate)));
        }
        if let Some(lc_ctype) = &self.lc_ctype {
            options.push(format!("LC_CTYPE = {}", Lit(lc_ctype)));
        }
        if self.deterministic == Some(false) {
            options.push("DETERMINISTIC = false".to_string());
        }
        format!(
            "CREATE COLLATION {} ({});",
            qualified_name(&self.schema, &self.name),
            options.join(", ")
        )
    }

    fn drop_sql(&self) -> String {
        format!("DROP COLLATION {};", qualified_name(&self.schema, &self.name))
    }
}

impl Ddl for TextSearchConfig {
    fn create_sql(&self) -> String {
        let name = qualified_name(&self.schema, &self.name);
        let mut statements = vec![format!(
            "CREATE TEXT SEARCH CONFIGURATION {} (PARSER = {});",
            name, self.parser
        )];
        for mapping in &self.mappings {
            statements.push(format!(
                "ALTER TEXT SEARCH CONFIGURATION {} ADD MAPPING FOR {} WITH {};",
                name,
                mapping.token_type,
                ident_list(&mapping.dictionaries)
            ));
        }
        statements.join("\n")
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP TEXT SEARCH CONFIGURATION {};",
            qualified_name(&self.schema, &self.name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgshift_schema::{CompositeAttribute, DomainCheck, TextSearchMapping};

    #[test]
    fn test_namespace_and_extension() {
        let ns = Namespace {
            name: "audit".into(),
            owner: Some("admin".into()),
        };
        assert_eq!(ns.create_sql(), "CREATE SCHEMA audit AUTHORIZATION admin;");
        assert_eq!(ns.drop_sql(), "DROP SCHEMA audit;");

        let ext = Extension {
            name: "pgcrypto".into(),
            schema: Some("extensions".into()),
            version: Some("1.3".into()),
        };
        assert_eq!(
            ext.create_sql(),
            "CREATE EXTENSION pgcrypto SCHEMA extensions VERSION '1.3';"
        );
        assert_eq!(ext.drop_sql(), "DROP EXTENSION pgcrypto;");
    }

    #[test]
    fn test_enum_sql() {
        let e = Enum {
            schema: "public".into(),
            name: "status".into(),
            values: vec!["pending".into(), "it's done".into()],
        };
        assert_eq!(
            e.create_sql(),
            "CREATE TYPE status AS ENUM ('pending', 'it''s done');"
        );
        assert_eq!(e.drop_sql(), "DROP TYPE status;");
    }

    #[test]
    fn test_domain_sql() {
        let d = Domain {
            schema: "app".into(),
            name: "email".into(),
            base_type: "text".into(),
            not_null: true,
            default: None,
            collation: None,
            checks: vec![DomainCheck {
                name: Some("email_has_at".into()),
                expression: "VALUE ~ '@'".into(),
            }],
        };
        assert_eq!(
            d.create_sql(),
            "CREATE DOMAIN app.email AS text NOT NULL CONSTRAINT email_has_at CHECK (VALUE ~ '@');"
        );
    }

    #[test]
    fn test_composite_sql() {
        let t = CompositeType {
            schema: "".into(),
            name: "money_amount".into(),
            attributes: vec![
                CompositeAttribute {
                    name: "amount".into(),
                    type_name: "numeric(12,2)".into(),
                    collation: None,
                },
                CompositeAttribute {
                    name: "currency".into(),
                    type_name: "char(3)".into(),
                    collation: None,
                },
            ],
        };
        assert_eq!(
            t.create_sql(),
            "CREATE TYPE money_amount AS (amount numeric(12,2), currency char(3));"
        );
    }

    #[test]
    fn test_sequence_sql() {
        let s = Sequence {
            name: "invoice_no".into(),
            data_type: Some("integer".into()),
            start: Some(1000),
            increment: Some(1),
            cycle: true,
            owned_by: Some("invoices.no".into()),
            ..Default::default()
        };
        assert_eq!(
            s.create_sql(),
            "CREATE SEQUENCE invoice_no AS integer INCREMENT BY 1 START WITH 1000 CYCLE;"
        );
        assert_eq!(s.drop_sql(), "DROP SEQUENCE invoice_no;");
    }

    #[test]
    fn test_collation_sql() {
        let c = Collation {
            name: "case_insensitive".into(),
            provider: Some("icu".into()),
            locale: Some("und-u-ks-level2".into()),
            deterministic: Some(false),
            ..Default::default()
        };
        assert_eq!(
            c.create_sql(),
            "CREATE COLLATION case_insensitive (PROVIDER = icu, LOCALE = 'und-u-ks-level2', DETERMINISTIC = false);"
        );
    }

    #[test]
    fn test_text_search_config_sql() {
        let cfg = TextSearchConfig {
            schema: "".into(),
            name: "english_unaccent".into(),
            parser: "pg_catalog.default".into(),
            mappings: vec![TextSearchMapping {
                token_type: "word".into(),
                dictionaries: vec!["unaccent".into(), "english_stem".into()],
            }],
        };
        insta::assert_snapshot!(cfg.create_sql(), @r"
        CREATE TEXT SEARCH CONFIGURATION english_unaccent (PARSER = pg_catalog.default);
        ALTER TEXT SEARCH CONFIGURATION english_unaccent ADD MAPPING FOR word WITH unaccent, english_stem;
        ");
    }
}

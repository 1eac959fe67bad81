use super::Ddl;
use pgshift_schema::{Publication, Subscription};
use pgshift_sql::{Lit, ident_list, quote_ident};

impl Ddl for Publication {
    fn create_sql(&self) -> String {
        let mut sql = format!("CREATE PUBLICATION {}", quote_ident(&self.name));
        if self.all_tables {
            sql.push_str(" FOR ALL TABLES");
        } else if !self.tables.is_empty() {
            // Table names may already carry a schema and are written verbatim.
            sql.push_str(&format!(" FOR TABLE {}", self.tables.join(", ")));
        }
        if !self.publish.is_empty() {
            sql.push_str(&format!(
                " WITH (publish = {})",
                Lit(self.publish.join(", "))
            ));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP PUBLICATION {};", quote_ident(&self.name))
    }
}

impl Ddl for Subscription {
    fn create_sql(&self) -> String {
        let mut sql = format!(
            "CREATE SUBSCRIPTION {} CONNECTION {} PUBLICATION {}",
            quote_ident(&self.name),
            Lit(&self.connection),
            ident_list(&self.publications)
        );
        let mut options = Vec::new();
        if self.enabled == Some(false) {
            options.push("enabled = false".to_string());
        }
        if let Some(slot) = &self.slot_name {
            options.push(format!("slot_name = {}", Lit(slot)));
        }
        if !options.is_empty() {
            sql.push_str(&format!(" WITH ({})", options.join(", ")));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!("DROP SUBSCRIPTION {};", quote_ident(&self.name))
    }
}

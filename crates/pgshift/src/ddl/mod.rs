//! DDL rendering for every object kind.
//!
//! Each model type renders the statement that creates it from nothing and the
//! statement that removes it. Both are complete, `;`-terminated SQL and may
//! span several lines.

mod access;
mod foreign;
mod replication;
mod routines;
mod table;
mod types;
mod views;

pub(crate) use access::{comment_sql, connection_limit, flag};
pub(crate) use routines::{function_sql, procedure_sql};
pub(crate) use table::{column_definition, identity_options};
pub(crate) use views::view_sql;

use pgshift_schema::GenericOption;
use pgshift_sql::{Lit, quote_ident};

/// CREATE / DROP rendering for a schema object.
pub trait Ddl {
    /// Statement(s) that create this object.
    fn create_sql(&self) -> String;

    /// Statement(s) that remove this object.
    fn drop_sql(&self) -> String;
}

/// Wrap a routine body in dollar quotes whose tag does not occur in the body.
pub(crate) fn dollar_quote(body: &str, tag: &str) -> String {
    let mut delimiter = format!("${}$", tag);
    let mut n = 0;
    while body.contains(&delimiter) {
        n += 1;
        delimiter = format!("${}_{}$", tag, n);
    }
    format!("{}{}{}", delimiter, body, delimiter)
}

/// Render an `OPTIONS (key 'value', …)` clause, or nothing for no options.
pub(crate) fn options_clause(options: &[GenericOption]) -> String {
    if options.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = options
        .iter()
        .map(|o| format!("{} {}", quote_ident(&o.key), Lit(&o.value)))
        .collect();
    format!(" OPTIONS ({})", parts.join(", "))
}

/// A grantee, with `PUBLIC` kept as the keyword.
pub(crate) fn grantee(name: &str) -> String {
    if name.eq_ignore_ascii_case("public") {
        "PUBLIC".to_string()
    } else {
        quote_ident(name)
    }
}

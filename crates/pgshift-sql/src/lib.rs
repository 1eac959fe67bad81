//! SQL text helpers shared by the pgshift crates.
//!
//! Nothing in here parses SQL. Identifiers are quoted only when Postgres
//! would otherwise fold or reject them, type names are canonicalized so that
//! introspected and hand-written spellings compare equal, and definitions are
//! normalized with a purely textual pass before comparison.

mod reserved;
pub use reserved::*;

mod types;
pub use types::*;

/// A PostgreSQL string literal wrapper.
///
/// Display writes the value escaped and quoted with single quotes.
///
/// # Example
/// ```
/// use pgshift_sql::Lit;
/// assert_eq!(format!("{}", Lit("foo")), "'foo'");
/// assert_eq!(format!("{}", Lit("it's")), "'it''s'");
/// ```
pub struct Lit<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for Lit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'")?;
        for c in self.0.as_ref().chars() {
            if c == '\'' {
                write!(f, "''")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "'")
    }
}

/// A PostgreSQL identifier wrapper.
///
/// Display writes the identifier bare when it is a plain lower-case name, and
/// double-quoted (with embedded quotes doubled) otherwise.
///
/// # Example
/// ```
/// use pgshift_sql::Ident;
/// assert_eq!(format!("{}", Ident("users")), "users");
/// assert_eq!(format!("{}", Ident("user")), "\"user\"");
/// assert_eq!(format!("{}", Ident("bla\"h")), "\"bla\"\"h\"");
/// ```
pub struct Ident<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> std::fmt::Display for Ident<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.0.as_ref();
        if !needs_quoting(name) {
            return write!(f, "{}", name);
        }
        write!(f, "\"")?;
        for c in name.chars() {
            if c == '"' {
                write!(f, "\"\"")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, "\"")
    }
}

/// Escape a string literal for SQL.
pub fn escape_string(s: &str) -> String {
    format!("{}", Lit(s))
}

/// Quote a PostgreSQL identifier if it needs it.
///
/// A name is left bare when it matches `[a-z_][a-z0-9_]*` and is not a
/// reserved word.
pub fn quote_ident(name: &str) -> String {
    format!("{}", Ident(name))
}

/// Whether `name` must be double-quoted to survive as written.
pub fn needs_quoting(name: &str) -> bool {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    };
    !plain || is_reserved(name)
}

/// Render a possibly schema-qualified name.
///
/// The schema prefix is omitted when the schema is empty or `public`.
///
/// # Examples
///
/// ```
/// use pgshift_sql::qualified_name;
/// assert_eq!(qualified_name("public", "users"), "users");
/// assert_eq!(qualified_name("", "users"), "users");
/// assert_eq!(qualified_name("billing", "order"), "billing.\"order\"");
/// ```
pub fn qualified_name(schema: &str, name: &str) -> String {
    if schema.is_empty() || schema == "public" {
        quote_ident(name)
    } else {
        format!("{}.{}", quote_ident(schema), quote_ident(name))
    }
}

/// Quote and join a list of identifiers with `", "`.
pub fn ident_list(names: &[impl AsRef<str>]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalize a SQL definition (view body, materialized view body) for comparison.
///
/// Trims, collapses whitespace runs to one space, strips one trailing
/// semicolon and lower-cases. This is textual only: two bodies that differ in
/// wording but not meaning still compare unequal.
pub fn normalize_definition(sql: &str) -> String {
    let collapsed = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = collapsed.strip_suffix(';').unwrap_or(&collapsed);
    stripped.trim_end().to_lowercase()
}

/// Whether two definitions are equal after [`normalize_definition`].
pub fn definitions_equal(a: &str, b: &str) -> bool {
    normalize_definition(a) == normalize_definition(b)
}

/// Stable content checksum (blake3, hex) for a rendered migration script.
pub fn checksum(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_stay_bare() {
        assert_eq!(quote_ident("users"), "users");
        assert_eq!(quote_ident("_tmp1"), "_tmp1");
        assert_eq!(quote_ident("created_at"), "created_at");
    }

    #[test]
    fn test_identifiers_that_need_quotes() {
        assert_eq!(quote_ident("Users"), "\"Users\"");
        assert_eq!(quote_ident("1st"), "\"1st\"");
        assert_eq!(quote_ident("first name"), "\"first name\"");
        assert_eq!(quote_ident("order"), "\"order\"");
        assert_eq!(quote_ident("ORDER"), "\"ORDER\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_ident(""), "\"\"");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("public", "users"), "users");
        assert_eq!(qualified_name("", "users"), "users");
        assert_eq!(qualified_name("app", "users"), "app.users");
        assert_eq!(qualified_name("App", "user"), "\"App\".\"user\"");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("plain"), "'plain'");
        assert_eq!(escape_string("o'clock"), "'o''clock'");
        assert_eq!(escape_string(""), "''");
    }

    #[test]
    fn test_ident_list() {
        assert_eq!(ident_list(&["id", "user", "Name"]), "id, \"user\", \"Name\"");
        let none: [&str; 0] = [];
        assert_eq!(ident_list(&none), "");
    }

    #[test]
    fn test_normalize_definition() {
        assert_eq!(
            normalize_definition("  SELECT   id\n\tFROM users;  "),
            "select id from users"
        );
        assert!(definitions_equal(
            "SELECT   id FROM users",
            "select id from users;"
        ));
        assert!(!definitions_equal(
            "SELECT id FROM users",
            "SELECT users.id FROM users"
        ));
    }

    #[test]
    fn test_normalize_strips_only_one_semicolon() {
        assert_eq!(normalize_definition("select 1;;"), "select 1;");
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = checksum("CREATE TABLE users (id int8);");
        let b = checksum("CREATE TABLE users (id int8);");
        let c = checksum("CREATE TABLE users (id int4);");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalization_is_idempotent(s in "[ a-zA-Z0-9;\t\n]{0,40}") {
                let once = normalize_definition(&s);
                let twice = normalize_definition(&once);
                // A second pass may only strip another trailing semicolon.
                prop_assert!(twice == once || once.ends_with(';'));
            }

            #[test]
            fn prop_quoted_identifiers_roundtrip(s in "[a-zA-Z0-9_ \"]{1,16}") {
                let quoted = quote_ident(&s);
                if quoted.starts_with('"') {
                    let inner = &quoted[1..quoted.len() - 1];
                    prop_assert_eq!(inner.replace("\"\"", "\""), s);
                } else {
                    prop_assert_eq!(quoted, s);
                }
            }
        }
    }
}

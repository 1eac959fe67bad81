use super::{Ddl, grantee};
use pgshift_schema::{
    Comment, CommentTarget, DefaultPrivilege, Policy, Role, RoleGrant, effective_schema,
};
use pgshift_sql::{Lit, qualified_name, quote_ident};

/// Attribute keywords for a role flag.
pub(crate) fn flag(on: bool, keyword: &str) -> String {
    if on {
        keyword.to_string()
    } else {
        format!("NO{}", keyword)
    }
}

/// `CONNECTION LIMIT n`, with no limit rendered as `-1`.
pub(crate) fn connection_limit(limit: Option<i32>) -> String {
    format!("CONNECTION LIMIT {}", limit.unwrap_or(-1))
}

impl Ddl for Role {
    fn create_sql(&self) -> String {
        let mut options = vec![
            flag(self.superuser, "SUPERUSER"),
            flag(self.create_db, "CREATEDB"),
            flag(self.create_role, "CREATEROLE"),
            flag(self.inherit, "INHERIT"),
            flag(self.login, "LOGIN"),
            flag(self.replication, "REPLICATION"),
            flag(self.bypass_rls, "BYPASSRLS"),
        ];
        if self.connection_limit.is_some() {
            options.push(connection_limit(self.connection_limit));
        }
        format!(
            "CREATE ROLE {} WITH {};",
            quote_ident(&self.name),
            options.join(" ")
        )
    }

    fn drop_sql(&self) -> String {
        format!("DROP ROLE {};", quote_ident(&self.name))
    }
}

/// The object clause of a GRANT / REVOKE: `TABLE users`, `SCHEMA app`, …
fn grant_target(grant: &RoleGrant) -> String {
    let object_type = grant.object_type.to_uppercase();
    let object = match object_type.as_str() {
        "SCHEMA" => quote_ident(&grant.object),
        // Routine objects carry their signature and are written verbatim.
        "FUNCTION" | "PROCEDURE" | "ROUTINE" => format!(
            "{}.{}",
            quote_ident(effective_schema(&grant.schema)),
            grant.object
        ),
        _ => qualified_name(&grant.schema, &grant.object),
    };
    format!("{} {}", object_type, object)
}

impl Ddl for RoleGrant {
    fn create_sql(&self) -> String {
        let option = if self.with_grant_option {
            " WITH GRANT OPTION"
        } else {
            ""
        };
        format!(
            "GRANT {} ON {} TO {}{};",
            self.privilege,
            grant_target(self),
            grantee(&self.grantee),
            option
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "REVOKE {} ON {} FROM {};",
            self.privilege,
            grant_target(self),
            grantee(&self.grantee)
        )
    }
}

fn default_privileges_prefix(dp: &DefaultPrivilege) -> String {
    let mut sql = "ALTER DEFAULT PRIVILEGES".to_string();
    if let Some(role) = &dp.role {
        sql.push_str(&format!(" FOR ROLE {}", quote_ident(role)));
    }
    sql.push_str(&format!(
        " IN SCHEMA {}",
        quote_ident(effective_schema(&dp.schema))
    ));
    sql
}

impl Ddl for DefaultPrivilege {
    fn create_sql(&self) -> String {
        format!(
            "{} GRANT {} ON {} TO {};",
            default_privileges_prefix(self),
            self.privileges.join(", "),
            self.object_type.to_uppercase(),
            grantee(&self.grantee)
        )
    }

    fn drop_sql(&self) -> String {
        format!(
            "{} REVOKE {} ON {} FROM {};",
            default_privileges_prefix(self),
            self.privileges.join(", "),
            self.object_type.to_uppercase(),
            grantee(&self.grantee)
        )
    }
}

impl Ddl for Policy {
    fn create_sql(&self) -> String {
        let mut sql = format!(
            "CREATE POLICY {} ON {}",
            quote_ident(&self.name),
            qualified_name(&self.schema, &self.table)
        );
        if !self.permissive {
            sql.push_str(" AS RESTRICTIVE");
        }
        sql.push_str(&format!(" FOR {}", self.command.to_sql()));
        if self.roles.is_empty() {
            sql.push_str(" TO PUBLIC");
        } else {
            let roles: Vec<String> = self.roles.iter().map(|r| grantee(r)).collect();
            sql.push_str(&format!(" TO {}", roles.join(", ")));
        }
        if let Some(using) = &self.using {
            sql.push_str(&format!(" USING ({})", using));
        }
        if let Some(check) = &self.with_check {
            sql.push_str(&format!(" WITH CHECK ({})", check));
        }
        sql.push(';');
        sql
    }

    fn drop_sql(&self) -> String {
        format!(
            "DROP POLICY IF EXISTS {} ON {};",
            quote_ident(&self.name),
            qualified_name(&self.schema, &self.table)
        )
    }
}

/// `COMMENT ON … IS 'text'`, or `IS NULL` to remove the comment.
pub(crate) fn comment_sql(comment: &Comment, text: Option<&str>) -> String {
    let object = match comment.target {
        CommentTarget::Schema => quote_ident(&comment.name),
        CommentTarget::Function => format!(
            "{}.{}",
            quote_ident(effective_schema(&comment.schema)),
            comment.name
        ),
        CommentTarget::Column => format!(
            "{}.{}",
            qualified_name(&comment.schema, &comment.name),
            quote_ident(comment.column.as_deref().unwrap_or_default())
        ),
        _ => qualified_name(&comment.schema, &comment.name),
    };
    let text = match text {
        Some(text) => Lit(text).to_string(),
        None => "NULL".to_string(),
    };
    format!("COMMENT ON {} {} IS {};", comment.target.to_sql(), object, text)
}

impl Ddl for Comment {
    fn create_sql(&self) -> String {
        comment_sql(self, Some(&self.text))
    }

    fn drop_sql(&self) -> String {
        comment_sql(self, None)
    }
}

//! Type-alias canonicalization.
//!
//! Introspection reports `integer`, `character varying(255)` and
//! `timestamp with time zone`, while hand-written schema files tend to say
//! `int4`, `varchar(255)` and `timestamptz`. Both sides are reduced to the
//! short internal spelling before any type comparison.

/// Synonym → canonical spelling, applied to the base name after the type
/// modifier and array suffix are split off.
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("character varying", "varchar"),
    ("integer", "int4"),
    ("int", "int4"),
    ("bigint", "int8"),
    ("smallint", "int2"),
    ("boolean", "bool"),
    ("double precision", "float8"),
    ("real", "float4"),
    ("decimal", "numeric"),
    ("timestamp without time zone", "timestamp"),
    ("timestamp with time zone", "timestamptz"),
    ("time without time zone", "time"),
    ("time with time zone", "timetz"),
];

/// Canonicalize a type name for comparison.
///
/// Lower-cases, collapses whitespace and rewrites known synonyms while keeping
/// the type modifier (`(255)`, `(10,2)`) and any array suffix.
///
/// # Examples
///
/// ```
/// use pgshift_sql::canonical_type;
/// assert_eq!(canonical_type("CHARACTER VARYING(255)"), "varchar(255)");
/// assert_eq!(canonical_type("timestamp(3) with time zone"), "timestamptz(3)");
/// assert_eq!(canonical_type("integer[]"), "int4[]");
/// ```
pub fn canonical_type(ty: &str) -> String {
    let lower = ty.trim().to_lowercase();

    let mut rest = lower.as_str();
    let mut array_suffix = String::new();
    while let Some(stripped) = rest.trim_end().strip_suffix("[]") {
        array_suffix.push_str("[]");
        rest = stripped;
    }

    let (base, modifier) = split_modifier(rest);
    let base = base.split_whitespace().collect::<Vec<_>>().join(" ");
    let base = TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == base)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(base);

    format!("{}{}{}", base, modifier, array_suffix)
}

/// Whether two type spellings name the same type after canonicalization.
pub fn types_equal(a: &str, b: &str) -> bool {
    canonical_type(a) == canonical_type(b)
}

/// Pull a `( … )` modifier out of a type name, wherever it sits.
///
/// `timestamp(3) with time zone` has its modifier in the middle, so this
/// returns the remaining words joined back together plus the modifier with
/// its inner whitespace removed.
fn split_modifier(ty: &str) -> (String, String) {
    let (Some(open), Some(close)) = (ty.find('('), ty.rfind(')')) else {
        return (ty.to_string(), String::new());
    };
    if close < open {
        return (ty.to_string(), String::new());
    }
    let modifier: String = ty[open..=close]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let base = format!("{} {}", &ty[..open], &ty[close + 1..]);
    (base, modifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_aliases() {
        assert_eq!(canonical_type("integer"), "int4");
        assert_eq!(canonical_type("INT"), "int4");
        assert_eq!(canonical_type("bigint"), "int8");
        assert_eq!(canonical_type("smallint"), "int2");
        assert_eq!(canonical_type("boolean"), "bool");
        assert_eq!(canonical_type("double  precision"), "float8");
        assert_eq!(canonical_type("real"), "float4");
        assert_eq!(canonical_type("text"), "text");
    }

    #[test]
    fn test_canonical_time_types() {
        assert_eq!(canonical_type("timestamp without time zone"), "timestamp");
        assert_eq!(canonical_type("timestamp with time zone"), "timestamptz");
        assert_eq!(canonical_type("time with time zone"), "timetz");
        assert_eq!(canonical_type("time without time zone"), "time");
        assert_eq!(
            canonical_type("timestamp(6) without time zone"),
            "timestamp(6)"
        );
    }

    #[test]
    fn test_canonical_keeps_modifiers_and_arrays() {
        assert_eq!(canonical_type("numeric(10, 2)"), "numeric(10,2)");
        assert_eq!(canonical_type("character varying(64)[]"), "varchar(64)[]");
        assert_eq!(canonical_type("bigint[][]"), "int8[][]");
        assert_eq!(canonical_type("public.mood"), "public.mood");
    }

    #[test]
    fn test_types_equal() {
        assert!(types_equal("character varying(255)", "varchar(255)"));
        assert!(types_equal("timestamptz", "timestamp with time zone"));
        assert!(!types_equal("varchar(255)", "varchar(100)"));
        assert!(!types_equal("int4", "int8"));
    }
}

use facet::Facet;
use pgshift_sql::qualified_name;

/// A database table definition.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Table {
    /// Schema the table lives in (`""` and `public` are equivalent for rendering)
    #[facet(default)]
    pub schema: String,
    /// Table name
    pub name: String,
    /// Columns, in attribute order
    #[facet(default)]
    pub columns: Vec<Column>,
    /// Table constraints, in declaration order
    #[facet(default)]
    pub constraints: Vec<Constraint>,
    /// Partitioning descriptor, if the table is partitioned or is a partition
    #[facet(default)]
    pub partition: Option<Partitioning>,
}

impl Table {
    /// Create an empty table.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The rendered, possibly schema-qualified name.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.schema, &self.name)
    }

    /// Foreign key constraints of this table.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Constraint, &ForeignKey)> {
        self.constraints.iter().filter_map(|c| match &c.kind {
            ConstraintKind::ForeignKey(fk) => Some((c, fk)),
            _ => None,
        })
    }
}

/// A database column definition.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Raw type string as introspected or written (`integer`, `varchar(255)`, ...)
    pub type_name: String,
    /// Whether the column allows NULL
    #[facet(default)]
    pub nullable: bool,
    /// Default value expression (opaque SQL)
    #[facet(default)]
    pub default: Option<String>,
    /// Identity descriptor (kind `None` when the column is not an identity column)
    #[facet(default)]
    pub identity: Identity,
    /// Generation expression, for generated columns
    #[facet(default)]
    pub generated: Option<Generated>,
    /// Name of an explicitly named NOT NULL constraint
    #[facet(default)]
    pub not_null_constraint: Option<String>,
    /// Column collation, if not the type's default
    #[facet(default)]
    pub collation: Option<String>,
}

impl Column {
    /// Create a nullable column with no default.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: true,
            ..Self::default()
        }
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set the default expression.
    pub fn with_default(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Make the column an identity column.
    pub fn with_identity(mut self, kind: IdentityKind) -> Self {
        self.identity.kind = kind;
        self.nullable = false;
        self
    }

    /// Make the column a generated column.
    pub fn generated(mut self, expression: impl Into<String>, storage: GeneratedStorage) -> Self {
        self.generated = Some(Generated {
            expression: expression.into(),
            storage,
        });
        self
    }
}

/// Identity column kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum IdentityKind {
    /// Not an identity column
    #[default]
    #[facet(rename = "none")]
    None,
    /// `GENERATED ALWAYS AS IDENTITY`
    #[facet(rename = "always")]
    Always,
    /// `GENERATED BY DEFAULT AS IDENTITY`
    #[facet(rename = "by_default")]
    ByDefault,
}

impl IdentityKind {
    /// The `GENERATED …` keyword for this kind, or empty for `None`.
    pub fn to_sql(&self) -> &'static str {
        match self {
            IdentityKind::None => "",
            IdentityKind::Always => "ALWAYS",
            IdentityKind::ByDefault => "BY DEFAULT",
        }
    }
}

/// Identity descriptor of a column, with its backing sequence options.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Identity {
    #[facet(default)]
    pub kind: IdentityKind,
    #[facet(default)]
    pub start: Option<i64>,
    #[facet(default)]
    pub increment: Option<i64>,
    #[facet(default)]
    pub min_value: Option<i64>,
    #[facet(default)]
    pub max_value: Option<i64>,
    #[facet(default)]
    pub cache: Option<i64>,
    #[facet(default)]
    pub cycle: bool,
}

impl Identity {
    /// Whether this column is an identity column at all.
    pub fn is_identity(&self) -> bool {
        self.kind != IdentityKind::None
    }
}

/// Storage of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum GeneratedStorage {
    #[default]
    #[facet(rename = "stored")]
    Stored,
    #[facet(rename = "virtual")]
    Virtual,
}

impl GeneratedStorage {
    pub fn to_sql(&self) -> &'static str {
        match self {
            GeneratedStorage::Stored => "STORED",
            GeneratedStorage::Virtual => "VIRTUAL",
        }
    }
}

/// Generation expression of a generated column.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Generated {
    /// SQL expression (opaque)
    pub expression: String,
    #[facet(default)]
    pub storage: GeneratedStorage,
}

/// A table constraint.
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Constraint {
    /// Constraint name
    pub name: String,
    /// Constrained columns (empty for table-level CHECK)
    #[facet(default)]
    pub columns: Vec<String>,
    /// Kind-specific details
    pub kind: ConstraintKind,
}

impl Constraint {
    /// A primary key over `columns`.
    pub fn primary_key(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            kind: ConstraintKind::PrimaryKey {
                without_overlaps: None,
            },
        }
    }

    /// A foreign key from `columns` to `table(ref_columns)`, unqualified.
    pub fn foreign_key(
        name: impl Into<String>,
        columns: &[&str],
        table: impl Into<String>,
        ref_columns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            kind: ConstraintKind::ForeignKey(ForeignKey {
                references_table: table.into(),
                references_columns: ref_columns.iter().map(|c| c.to_string()).collect(),
                ..ForeignKey::default()
            }),
        }
    }
}

/// Constraint kind with its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Facet)]
#[repr(u8)]
pub enum ConstraintKind {
    /// `PRIMARY KEY`, optionally temporal (`WITHOUT OVERLAPS` on a period column)
    #[facet(rename = "primary_key")]
    PrimaryKey { without_overlaps: Option<String> },
    /// `UNIQUE`, optionally temporal
    #[facet(rename = "unique")]
    Unique {
        without_overlaps: Option<String>,
        nulls_not_distinct: bool,
    },
    #[facet(rename = "foreign_key")]
    ForeignKey(ForeignKey),
    /// `CHECK (expression)`
    #[facet(rename = "check")]
    Check { expression: String, no_inherit: bool },
    #[facet(rename = "exclusion")]
    Exclusion(Exclusion),
}

/// Referential action for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum ReferentialAction {
    #[default]
    #[facet(rename = "no_action")]
    NoAction,
    #[facet(rename = "restrict")]
    Restrict,
    #[facet(rename = "cascade")]
    Cascade,
    #[facet(rename = "set_null")]
    SetNull,
    #[facet(rename = "set_default")]
    SetDefault,
}

impl ReferentialAction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// Foreign key details.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct ForeignKey {
    /// Schema of the referenced table (empty means `public`)
    #[facet(default)]
    pub references_schema: String,
    /// Referenced table
    pub references_table: String,
    /// Referenced column(s)
    #[facet(default)]
    pub references_columns: Vec<String>,
    #[facet(default)]
    pub on_delete: ReferentialAction,
    #[facet(default)]
    pub on_update: ReferentialAction,
    /// Added `NOT VALID` (existing rows not checked)
    #[facet(default)]
    pub not_valid: bool,
    /// Declared `NOT ENFORCED`
    #[facet(default)]
    pub not_enforced: bool,
    /// Period column for temporal foreign keys (`PERIOD col`)
    #[facet(default)]
    pub period: Option<String>,
}

/// One `column WITH operator` element of an exclusion constraint.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct ExclusionElement {
    /// Column name or parenthesized expression
    pub column: String,
    /// Operator, e.g. `&&` or `=`
    pub operator: String,
}

/// Exclusion constraint details.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Exclusion {
    /// Index access method, e.g. `gist`
    pub using: String,
    #[facet(default)]
    pub elements: Vec<ExclusionElement>,
    /// Predicate for a partial exclusion constraint
    #[facet(default)]
    pub where_clause: Option<String>,
}

/// Partitioning strategy of a partitioned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum PartitionStrategy {
    #[facet(rename = "range")]
    Range,
    #[facet(rename = "list")]
    List,
    #[facet(rename = "hash")]
    Hash,
}

impl PartitionStrategy {
    pub fn to_sql(&self) -> &'static str {
        match self {
            PartitionStrategy::Range => "RANGE",
            PartitionStrategy::List => "LIST",
            PartitionStrategy::Hash => "HASH",
        }
    }
}

/// Partitioning descriptor.
#[derive(Debug, Clone, PartialEq, Facet)]
#[repr(u8)]
pub enum Partitioning {
    /// The table is partitioned: `PARTITION BY strategy (key)`
    #[facet(rename = "partitioned")]
    Partitioned {
        strategy: PartitionStrategy,
        key: String,
    },
    /// The table is a partition: `PARTITION OF parent bound`
    #[facet(rename = "partition_of")]
    PartitionOf {
        parent_schema: String,
        parent: String,
        /// Bound spec as introspected, e.g. `FOR VALUES FROM ('2024-01-01') TO ('2025-01-01')`
        bound: String,
    },
}

/// A database index.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Index {
    #[facet(default)]
    pub schema: String,
    /// Index name
    pub name: String,
    /// Indexed table (same schema as the index)
    pub table: String,
    /// Key columns or expressions, rendered verbatim
    #[facet(default)]
    pub columns: Vec<String>,
    /// Whether this is a unique index
    #[facet(default)]
    pub unique: bool,
    /// Access method; empty means btree
    #[facet(default)]
    pub method: String,
    /// `INCLUDE` columns
    #[facet(default)]
    pub include: Vec<String>,
    /// Optional WHERE clause for partial indexes
    #[facet(default)]
    pub where_clause: Option<String>,
    #[facet(default)]
    pub nulls_not_distinct: bool,
}

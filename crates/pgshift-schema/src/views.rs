use facet::Facet;

/// `WITH … CHECK OPTION` on an updatable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[repr(u8)]
pub enum CheckOption {
    #[facet(rename = "local")]
    Local,
    #[facet(rename = "cascaded")]
    Cascaded,
}

/// A view.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct View {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    /// The `SELECT` body (opaque, compared after normalization)
    pub definition: String,
    #[facet(default)]
    pub check_option: Option<CheckOption>,
}

/// A materialized view.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct MaterializedView {
    #[facet(default)]
    pub schema: String,
    pub name: String,
    pub definition: String,
    /// Populate on creation (`WITH DATA`); `false` renders `WITH NO DATA`
    #[facet(default)]
    pub with_data: bool,
}

/// Event a rule fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Facet)]
#[repr(u8)]
pub enum RuleEvent {
    #[default]
    #[facet(rename = "select")]
    Select,
    #[facet(rename = "insert")]
    Insert,
    #[facet(rename = "update")]
    Update,
    #[facet(rename = "delete")]
    Delete,
}

impl RuleEvent {
    pub fn to_sql(&self) -> &'static str {
        match self {
            RuleEvent::Select => "SELECT",
            RuleEvent::Insert => "INSERT",
            RuleEvent::Update => "UPDATE",
            RuleEvent::Delete => "DELETE",
        }
    }
}

/// A rewrite rule on a table or view.
#[derive(Debug, Clone, PartialEq, Default, Facet)]
pub struct Rule {
    #[facet(default)]
    pub schema: String,
    pub table: String,
    pub name: String,
    #[facet(default)]
    pub event: RuleEvent,
    /// `DO INSTEAD` rather than `DO ALSO`
    #[facet(default)]
    pub instead: bool,
    #[facet(default)]
    pub condition: Option<String>,
    /// Action statements; empty means `NOTHING`
    #[facet(default)]
    pub actions: Vec<String>,
}

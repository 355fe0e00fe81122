//! Cobertura document tree produced by the conversion.

/// Line rate, branch rate and complexity of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    pub line_rate: f64,
    pub branch_rate: f64,
    pub complexity: f64,
}

impl Rates {
    pub fn of<C: crate::model::jacoco::Counters + ?Sized>(node: &C) -> Self {
        Self {
            line_rate: node.line_rate(),
            branch_rate: node.branch_rate(),
            complexity: node.complexity(),
        }
    }
}

/// Root `<coverage>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    /// Seconds since the epoch.
    pub timestamp: i64,
    pub sources: Vec<String>,
    pub packages: Vec<Package>,
    pub rates: Rates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    pub name: String,
    pub classes: Vec<Class>,
    pub rates: Rates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Class {
    pub name: String,
    /// `<package>/<source file>`.
    pub filename: String,
    pub methods: Vec<Method>,
    /// Lines of all methods, ordered by number, each number once.
    pub lines: Vec<Line>,
    pub rates: Rates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Method {
    pub name: String,
    pub signature: String,
    pub lines: Vec<Line>,
    pub rates: Rates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub number: u32,
    pub hits: u32,
    pub branch: bool,
    pub condition_coverage: Option<String>,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub number: u32,
    pub kind: String,
    pub coverage: String,
}

impl Condition {
    /// The aggregate jump condition carried by every branching line.
    pub fn jump(coverage: String) -> Self {
        Self {
            number: 0,
            kind: "jump".to_string(),
            coverage,
        }
    }
}

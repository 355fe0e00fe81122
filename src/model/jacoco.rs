//! JaCoCo report tree, as read from a JaCoCo XML report.
//!
//! Every attribute the format marks optional is an `Option` here; defaults
//! are applied when mapping to Cobertura, not while loading.

use super::rate;

/// Kind tag of a `<counter>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterKind {
    Instruction,
    Branch,
    Line,
    Complexity,
    Method,
    Class,
    /// Any tag we do not compute rates from, kept verbatim.
    Other(String),
}

impl CounterKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "INSTRUCTION" => CounterKind::Instruction,
            "BRANCH" => CounterKind::Branch,
            "LINE" => CounterKind::Line,
            "COMPLEXITY" => CounterKind::Complexity,
            "METHOD" => CounterKind::Method,
            "CLASS" => CounterKind::Class,
            other => CounterKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CounterKind::Instruction => "INSTRUCTION",
            CounterKind::Branch => "BRANCH",
            CounterKind::Line => "LINE",
            CounterKind::Complexity => "COMPLEXITY",
            CounterKind::Method => "METHOD",
            CounterKind::Class => "CLASS",
            CounterKind::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (missed, covered) pair for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub kind: CounterKind,
    pub missed: u64,
    pub covered: u64,
}

impl Counter {
    pub fn new(kind: CounterKind, missed: u64, covered: u64) -> Self {
        Self {
            kind,
            missed,
            covered,
        }
    }

    pub fn total(&self) -> u64 {
        self.covered.saturating_add(self.missed)
    }
}

/// Rate statistics derived from a node's own counters.
///
/// Only the first counter of a kind is consulted. A missing counter yields
/// `0.0`, never an error.
pub trait Counters {
    fn counters(&self) -> &[Counter];

    fn counter(&self, kind: &CounterKind) -> Option<&Counter> {
        self.counters().iter().find(|c| &c.kind == kind)
    }

    #[must_use]
    fn line_rate(&self) -> f64 {
        self.counter(&CounterKind::Line)
            .map_or(0.0, |c| rate(c.covered, c.total()))
    }

    #[must_use]
    fn branch_rate(&self) -> f64 {
        self.counter(&CounterKind::Branch)
            .map_or(0.0, |c| rate(c.covered, c.total()))
    }

    /// Complexity is a plain sum, not a ratio.
    #[must_use]
    fn complexity(&self) -> f64 {
        self.counter(&CounterKind::Complexity)
            .map_or(0.0, |c| c.total() as f64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    pub id: Option<String>,
    /// Session start, milliseconds since the epoch, as written in the report.
    pub start: Option<String>,
    pub dump: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub name: Option<String>,
    pub sessions: Vec<SessionInfo>,
    pub packages: Vec<Package>,
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Slash separated, e.g. `com/example`.
    pub name: Option<String>,
    pub classes: Vec<Class>,
    pub source_files: Vec<SourceFile>,
    pub counters: Vec<Counter>,
}

impl Package {
    /// Fold a same-named package from another `<group>` into this one.
    /// Counters of the same kind are summed.
    pub fn merge(&mut self, other: Package) {
        self.classes.extend(other.classes);
        self.source_files.extend(other.source_files);
        for counter in other.counters {
            match self.counters.iter_mut().find(|c| c.kind == counter.kind) {
                Some(c) => {
                    c.missed = c.missed.saturating_add(counter.missed);
                    c.covered = c.covered.saturating_add(counter.covered);
                }
                None => self.counters.push(counter),
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Class {
    pub name: Option<String>,
    pub source_file_name: Option<String>,
    pub methods: Vec<Method>,
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default)]
pub struct Method {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub line: Option<u32>,
    pub counters: Vec<Counter>,
}

#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub name: Option<String>,
    pub lines: Vec<Line>,
    pub counters: Vec<Counter>,
}

/// One `<line>` of a source file. `nr == 0` is never a real line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line {
    pub nr: u32,
    /// Missed instructions.
    pub mi: u64,
    /// Covered instructions.
    pub ci: u64,
    /// Missed branches.
    pub mb: u64,
    /// Covered branches.
    pub cb: u64,
}

impl Line {
    pub fn branches(&self) -> u64 {
        self.mb.saturating_add(self.cb)
    }
}

macro_rules! impl_counters {
    ($($ty:ty),*) => {
        $(
            impl Counters for $ty {
                fn counters(&self) -> &[Counter] {
                    &self.counters
                }
            }
        )*
    };
}

impl_counters!(Report, Package, Class, Method, SourceFile);

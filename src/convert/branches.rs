//! Per-line hit and branch condition fields.

use crate::model::cobertura::{self, Condition};
use crate::model::jacoco::Line;

/// Branch outcomes of one line that has at least one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchCoverage {
    pub covered: u64,
    pub total: u64,
}

impl BranchCoverage {
    /// `None` for lines without branches.
    pub fn of(line: &Line) -> Option<Self> {
        let total = line.branches();
        (total > 0).then_some(Self {
            covered: line.cb,
            total,
        })
    }

    /// Covered share in percent, truncated.
    pub fn percentage(&self) -> u64 {
        let percent = 100 * u128::from(self.covered) / u128::from(self.total);
        u64::try_from(percent).unwrap_or(u64::MAX)
    }

    /// e.g. `50% (1/2)`.
    pub fn summary(&self) -> String {
        format!("{}% ({}/{})", self.percentage(), self.covered, self.total)
    }

    pub fn condition(&self) -> Condition {
        Condition::jump(format!("{}%", self.percentage()))
    }
}

pub fn map_line(line: &Line) -> cobertura::Line {
    let hits = u32::from(line.ci > 0);
    match BranchCoverage::of(line) {
        Some(branches) => cobertura::Line {
            number: line.nr,
            hits,
            branch: true,
            condition_coverage: Some(branches.summary()),
            conditions: vec![branches.condition()],
        },
        None => cobertura::Line {
            number: line.nr,
            hits,
            ..Default::default()
        },
    }
}

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::status::CaseStatus;

/// One observed test execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub suite: String,
    pub status: CaseStatus,
    /// Seconds, `0.0` when the report did not say.
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl Totals {
    /// Counts cases by status. Cases with an unrecognized status only add to `total`.
    pub fn tally<'a, I: IntoIterator<Item = &'a CaseResult>>(cases: I) -> Self {
        cases.into_iter().fold(Totals::default(), |mut totals, case| {
            totals.total += 1;
            match case.status {
                CaseStatus::Passed => totals.passed += 1,
                CaseStatus::Failed => totals.failed += 1,
                CaseStatus::Error => totals.errors += 1,
                CaseStatus::Skipped => totals.skipped += 1,
                CaseStatus::Other(..) => (),
            }
            totals
        })
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// The format independent result of parsing one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Seconds.
    pub time: f64,
    pub cases: Vec<CaseResult>,
}

impl ResultSummary {
    pub fn totals(&self) -> Totals {
        Totals {
            total: self.total,
            passed: self.passed,
            failed: self.failed,
            skipped: self.skipped,
            errors: self.errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// Collects cases and, for dialects that report them, authoritative totals.
/// Without authoritative totals the counts are tallied from the cases.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    totals: Option<Totals>,
    time: f64,
    cases: Vec<CaseResult>,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_case(&mut self, case: CaseResult) {
        self.cases.push(case);
    }

    pub fn add_totals(&mut self, totals: Totals) {
        *self.totals.get_or_insert_with(Totals::default) += totals;
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn build(self) -> ResultSummary {
        let Totals {
            total,
            passed,
            failed,
            skipped,
            errors,
        } = self.totals.unwrap_or_else(|| Totals::tally(&self.cases));
        ResultSummary {
            total,
            passed,
            failed,
            skipped,
            errors,
            time: self.time,
            cases: self.cases,
        }
    }
}

use std::{fmt, str::FromStr};

use constants::{JUNIT_FORMAT, NUNIT_FORMAT, XUNIT_FORMAT};
use serde::{Deserialize, Serialize};

use crate::{
    dialect::{Dialect, JunitDialect, NunitDialect, XunitDialect},
    error::ReportError,
    input,
    summary::ResultSummary,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Junit,
    Xunit,
    Nunit,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Junit => JUNIT_FORMAT,
            ReportFormat::Xunit => XUNIT_FORMAT,
            ReportFormat::Nunit => NUNIT_FORMAT,
        }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            ReportFormat::Junit => &JunitDialect,
            ReportFormat::Xunit => &XunitDialect,
            ReportFormat::Nunit => &NunitDialect,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            JUNIT_FORMAT => Ok(ReportFormat::Junit),
            XUNIT_FORMAT => Ok(ReportFormat::Xunit),
            NUNIT_FORMAT => Ok(ReportFormat::Nunit),
            _ => Err(ReportError::UnsupportedFormat(String::from(selector))),
        }
    }
}

/// Parses reports of one format from a path or from the report XML itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportParser {
    format: ReportFormat,
}

impl ReportParser {
    /// Fails with [`ReportError::UnsupportedFormat`] for anything but `junit`,
    /// `xunit` or `nunit`.
    pub fn new(selector: &str) -> Result<Self, ReportError> {
        selector.parse::<ReportFormat>().map(Self::from)
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn parse(&self, input: &str) -> Result<ResultSummary, ReportError> {
        let root = input::resolve(input)?;
        let dialect = self.format.dialect();
        let summary = dialect.summarize(&root);
        tracing::info!(
            format = %dialect.format(),
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            errors = summary.errors,
            cases = summary.cases.len(),
            "parsed test report"
        );
        Ok(summary)
    }
}

impl From<ReportFormat> for ReportParser {
    fn from(format: ReportFormat) -> Self {
        Self { format }
    }
}

/// Parses `input` as a report in the format named by `selector`.
pub fn parse_report(selector: &str, input: &str) -> Result<ResultSummary, ReportError> {
    ReportParser::new(selector)?.parse(input)
}

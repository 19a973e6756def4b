//! Normalizes the JUnit, xUnit and NUnit style XML reports written by chart
//! testing tools into a single [`ResultSummary`].
//!
//! ```no_run
//! let summary = report::parse_report("junit", "reports/junit.xml")?;
//! println!("{} of {} tests passed", summary.passed, summary.total);
//! # Ok::<(), report::ReportError>(())
//! ```

pub mod dialect;
pub mod elapsed;
pub mod error;
pub mod input;
pub mod parser;
pub mod status;
pub mod summary;
pub mod xml;

pub use error::{InputOrigin, ReportError};
pub use parser::{parse_report, ReportFormat, ReportParser};
pub use status::CaseStatus;
pub use summary::{CaseResult, ResultSummary, Totals};

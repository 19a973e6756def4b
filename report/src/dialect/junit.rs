use constants::UNKNOWN_NAME;

use super::{parse_attr, trimmed_message, Dialect};
use crate::{
    elapsed,
    parser::ReportFormat,
    status::CaseStatus,
    summary::{CaseResult, ResultSummary, SummaryBuilder},
    xml::XmlElement,
};

const TAG_REPORT: &str = "testsuites";
const TAG_TEST_SUITE: &str = "testsuite";
const TAG_TEST_CASE: &str = "testcase";
const TAG_TEST_CASE_STATUS_FAILURE: &str = "failure";
const TAG_TEST_CASE_STATUS_ERROR: &str = "error";
const TAG_TEST_CASE_STATUS_SKIPPED: &str = "skipped";

/// JUnit style reports: a `testsuites` root, a lone `testsuite` root, or any other
/// root with `testsuite` elements somewhere beneath it. Counts are tallied from
/// the test cases because the suites' own counters are not trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct JunitDialect;

impl Dialect for JunitDialect {
    fn format(&self) -> ReportFormat {
        ReportFormat::Junit
    }

    fn summarize(&self, root: &XmlElement) -> ResultSummary {
        let test_suites: Vec<&XmlElement> = match root.name() {
            TAG_REPORT => root.children(TAG_TEST_SUITE).collect(),
            TAG_TEST_SUITE => vec![root],
            _ => root.outermost(TAG_TEST_SUITE),
        };

        let mut summary = SummaryBuilder::new();

        let report_time = if root.name() == TAG_REPORT {
            parse_attr::time(root)
        } else {
            None
        };
        summary.set_time(elapsed::total_or_sum(
            report_time,
            test_suites.iter().map(|test_suite| test_suite.attr("time")),
        ));

        for test_suite in test_suites {
            let test_suite_name = parse_attr::name(test_suite, UNKNOWN_NAME);
            for test_case in test_suite.descendants(TAG_TEST_CASE) {
                summary.add_case(case_result(test_case, &test_suite_name));
            }
        }

        summary.build()
    }
}

fn case_result(test_case: &XmlElement, test_suite_name: &str) -> CaseResult {
    let (status, message) = [
        (TAG_TEST_CASE_STATUS_FAILURE, CaseStatus::Failed),
        (TAG_TEST_CASE_STATUS_ERROR, CaseStatus::Error),
        (TAG_TEST_CASE_STATUS_SKIPPED, CaseStatus::Skipped),
    ]
    .into_iter()
    .find_map(|(tag, status)| {
        test_case
            .child(tag)
            .map(|status_element| (status, status_message(status_element)))
    })
    .unwrap_or((CaseStatus::Passed, None));

    CaseResult {
        name: parse_attr::name(test_case, UNKNOWN_NAME),
        suite: String::from(test_suite_name),
        status,
        time: parse_attr::time_or_default(test_case),
        message,
    }
}

/// The `message` attribute, or the element's text when the attribute is blank.
fn status_message(status_element: &XmlElement) -> Option<String> {
    status_element
        .attr("message")
        .and_then(trimmed_message)
        .or_else(|| trimmed_message(status_element.text()))
}

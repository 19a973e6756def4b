use constants::{UNKNOWN_NAME, UNKNOWN_RESULT};

use super::{nested_message, parse_attr, Dialect};
use crate::{
    elapsed,
    parser::ReportFormat,
    status::CaseStatus,
    summary::{CaseResult, ResultSummary, SummaryBuilder, Totals},
    xml::XmlElement,
};

const TAG_REPORT: &str = "test-results";
const TAG_TEST_SUITE: &str = "test-suite";
const TAG_RESULTS: &str = "results";
const TAG_TEST_CASE: &str = "test-case";
const TAG_FAILURE: &str = "failure";
const TAG_REASON: &str = "reason";

/// NUnit 2.x reports. The `test-results` root carries the authoritative counters;
/// NUnit never writes a passed count, so it is derived from the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct NunitDialect;

impl Dialect for NunitDialect {
    fn format(&self) -> ReportFormat {
        ReportFormat::Nunit
    }

    fn summarize(&self, root: &XmlElement) -> ResultSummary {
        let mut summary = SummaryBuilder::new();
        if root.name() != TAG_REPORT {
            tracing::warn!(
                root = root.name(),
                "expected a `{}` root element, report has no results",
                TAG_REPORT
            );
            return summary.build();
        }

        summary.add_totals(report_totals(root));

        // Older NUnit writers put the wall clock time of day in `time`, which is
        // approximated by the top-level suite durations instead.
        let report_time = parse_attr::time(root).filter(|time| *time > 0.0);
        summary.set_time(elapsed::total_or_sum(
            report_time,
            root.outermost(TAG_TEST_SUITE)
                .iter()
                .map(|test_suite| test_suite.attr("time")),
        ));

        for test_suite in root.descendants(TAG_TEST_SUITE) {
            let test_suite_name = parse_attr::name(test_suite, UNKNOWN_NAME);
            let test_cases = test_suite
                .child(TAG_RESULTS)
                .into_iter()
                .flat_map(|results| results.children(TAG_TEST_CASE));
            for test_case in test_cases {
                summary.add_case(case_result(test_case, &test_suite_name));
            }
        }

        summary.build()
    }
}

fn report_totals(root: &XmlElement) -> Totals {
    let total = parse_attr::count(root, "total");
    let errors = parse_attr::count(root, "errors");
    let failed = parse_attr::count(root, "failures");
    let skipped = parse_attr::count(root, "skipped")
        + parse_attr::count(root, "ignored")
        + parse_attr::count(root, "not-run");
    let passed = total
        .saturating_sub(failed)
        .saturating_sub(errors)
        .saturating_sub(skipped);
    Totals {
        total,
        passed,
        failed,
        skipped,
        errors,
    }
}

fn case_result(test_case: &XmlElement, test_suite_name: &str) -> CaseResult {
    let message = test_case
        .child(TAG_FAILURE)
        .and_then(nested_message)
        .or_else(|| test_case.child(TAG_REASON).and_then(nested_message));

    CaseResult {
        name: parse_attr::name(test_case, UNKNOWN_NAME),
        suite: String::from(test_suite_name),
        status: CaseStatus::normalize(test_case.attr("result").unwrap_or(UNKNOWN_RESULT)),
        time: parse_attr::time_or_default(test_case),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocumentReader;

    fn summarize(xml: &str) -> ResultSummary {
        let root = XmlDocumentReader::new().read(xml.as_bytes()).unwrap();
        NunitDialect.summarize(&root)
    }

    #[test]
    fn skipped_sums_every_vocabulary_and_passed_is_derived() {
        let summary = summarize(
            r#"<test-results total="10" failures="2" errors="1" skipped="1" ignored="2" not-run="1" time="3"/>"#,
        );

        assert_eq!(
            summary.totals(),
            Totals {
                total: 10,
                passed: 3,
                failed: 2,
                skipped: 4,
                errors: 1,
            }
        );
        assert_eq!(summary.time, 3.0);
    }

    #[test]
    fn all_skipped_and_inconsistent_reports_never_go_negative() {
        assert_eq!(
            summarize(r#"<test-results total="2" ignored="2"/>"#).passed,
            0
        );
        assert_eq!(
            summarize(r#"<test-results total="1" failures="3"/>"#).passed,
            0
        );
        assert_eq!(summarize(r#"<test-results total="4"/>"#).passed, 4);
    }

    #[test]
    fn timestamp_time_falls_back_to_top_level_suites() {
        let summary = summarize(
            r#"<test-results total="2" date="2024-05-01" time="20:10:11">
                <test-suite name="a" time="1.5">
                    <results><test-suite name="a.nested" time="1.5"/></results>
                </test-suite>
                <test-suite name="b" time="0.25"/>
                <test-suite name="c"/>
            </test-results>"#,
        );
        assert_eq!(summary.time, 1.75);
    }

    #[test]
    fn zero_or_missing_time_falls_back_to_suites() {
        assert_eq!(
            summarize(r#"<test-results time="0"><test-suite time="2"/></test-results>"#).time,
            2.0
        );
        assert_eq!(
            summarize(r#"<test-results><test-suite time="0.5"/></test-results>"#).time,
            0.5
        );
    }

    #[test]
    fn cases_belong_to_the_suite_whose_results_hold_them() {
        let summary = summarize(
            r#"<test-results total="3">
                <test-suite name="outer">
                    <results>
                        <test-suite name="inner">
                            <results><test-case name="one" result="Success" time="0.1"/></results>
                        </test-suite>
                        <test-case name="two" result="Error"/>
                    </results>
                </test-suite>
                <test-suite name="loose"><test-case name="ignored-no-results" result="Success"/></test-suite>
            </test-results>"#,
        );

        let cases: Vec<(&str, &str, &CaseStatus)> = summary
            .cases
            .iter()
            .map(|case| (case.name.as_str(), case.suite.as_str(), &case.status))
            .collect();
        assert_eq!(
            cases,
            vec![
                ("two", "outer", &CaseStatus::Error),
                ("one", "inner", &CaseStatus::Passed),
            ]
        );
    }

    #[test]
    fn messages_come_from_failure_or_reason_message_elements() {
        let summary = summarize(
            r#"<test-results total="4"><test-suite name="s"><results>
                <test-case name="a" result="Failure"><failure><message><![CDATA[ expected 1 ]]></message><stack-trace>at x</stack-trace></failure></test-case>
                <test-case name="b" result="Failure"><failure>no message element</failure></test-case>
                <test-case name="c" result="Ignored"><reason><message>not on this cluster</message></reason></test-case>
                <test-case name="d" result="Success"/>
            </results></test-suite></test-results>"#,
        );

        let messages: Vec<Option<&str>> = summary
            .cases
            .iter()
            .map(|case| case.message.as_deref())
            .collect();
        assert_eq!(
            messages,
            vec![Some("expected 1"), None, Some("not on this cluster"), None]
        );
        assert_eq!(summary.cases[2].status, CaseStatus::Skipped);
    }

    #[test]
    fn other_roots_yield_an_empty_summary() {
        let summary = summarize(
            r#"<test-run total="3"><test-suite><results><test-case result="Passed"/></results></test-suite></test-run>"#,
        );
        assert_eq!(summary, ResultSummary::default());
    }
}

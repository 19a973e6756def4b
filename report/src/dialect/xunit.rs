use constants::{UNKNOWN_RESULT, UNKNOWN_XUNIT_COLLECTION_NAME, UNKNOWN_XUNIT_TEST_NAME};

use super::{nested_message, parse_attr, Dialect};
use crate::{
    parser::ReportFormat,
    status::CaseStatus,
    summary::{CaseResult, ResultSummary, SummaryBuilder, Totals},
    xml::XmlElement,
};

const TAG_ASSEMBLY: &str = "assembly";
const TAG_COLLECTION: &str = "collection";
const TAG_TEST: &str = "test";
const TAG_FAILURE: &str = "failure";

/// xUnit style reports. Every `assembly` carries authoritative counters and a
/// duration, which are summed as-is; `test` elements only provide the case list.
#[derive(Debug, Clone, Copy, Default)]
pub struct XunitDialect;

impl Dialect for XunitDialect {
    fn format(&self) -> ReportFormat {
        ReportFormat::Xunit
    }

    fn summarize(&self, root: &XmlElement) -> ResultSummary {
        let assemblies = if root.name() == TAG_ASSEMBLY {
            vec![root]
        } else {
            root.descendants(TAG_ASSEMBLY)
        };

        let mut summary = SummaryBuilder::new();
        let mut time = 0.0;

        for assembly in assemblies {
            summary.add_totals(Totals {
                total: parse_attr::count(assembly, "total"),
                passed: parse_attr::count(assembly, "passed"),
                failed: parse_attr::count(assembly, "failed"),
                skipped: parse_attr::count(assembly, "skipped"),
                errors: parse_attr::count(assembly, "errors"),
            });
            time += parse_attr::time_or_default(assembly);

            for collection in assembly.descendants(TAG_COLLECTION) {
                let collection_name = parse_attr::name(collection, UNKNOWN_XUNIT_COLLECTION_NAME);
                for test in collection.descendants(TAG_TEST) {
                    summary.add_case(case_result(test, &collection_name));
                }
            }
        }

        summary.set_time(time);
        summary.build()
    }
}

fn case_result(test: &XmlElement, collection_name: &str) -> CaseResult {
    CaseResult {
        name: parse_attr::name(test, UNKNOWN_XUNIT_TEST_NAME),
        suite: String::from(collection_name),
        status: CaseStatus::normalize(test.attr("result").unwrap_or(UNKNOWN_RESULT)),
        time: parse_attr::time_or_default(test),
        message: test
            .descendants(TAG_FAILURE)
            .first()
            .and_then(|failure| nested_message(failure)),
    }
}

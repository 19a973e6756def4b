use std::fs;

use assert_matches::assert_matches;
use report::{
    parse_report, xml::XmlError, CaseStatus, InputOrigin, ReportError, ReportFormat, ReportParser,
    Totals,
};
use tempfile::TempDir;

const JUNIT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites time="1.5">
    <testsuite name="Suite 1" time="1.0">
        <testcase name="Test 1" time="0.6" />
        <testcase name="Test 2" time="0.4">
            <failure message="Assertion failed">Details</failure>
        </testcase>
    </testsuite>
    <testsuite name="Suite 2" time="0.5">
        <testcase name="Test 3" time="0.5">
            <skipped message="Ignored" />
        </testcase>
    </testsuite>
</testsuites>
"#;

const XUNIT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<assemblies>
    <assembly name="Asm 1" total="2" passed="1" failed="1" skipped="0" errors="0" time="1.2">
        <collection name="Coll 1">
            <test name="Test 1" result="Pass" time="0.7" />
            <test name="Test 2" result="Fail" time="0.5">
                <failure message="Error found" />
            </test>
        </collection>
    </assembly>
</assemblies>
"#;

const NUNIT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<test-results total="3" failures="1" errors="0" skipped="1" time="2.0">
    <test-suite name="Suite 1" time="1.0">
        <results>
            <test-case name="Test 1" result="Success" time="0.5" />
            <test-case name="Test 2" result="Failure" time="0.5">
                <failure>
                    <message>Fail Message</message>
                </failure>
            </test-case>
        </results>
    </test-suite>
    <test-suite name="Suite 2" time="1.0">
        <results>
            <test-case name="Test 3" result="Ignored" time="0.0" />
        </results>
    </test-suite>
</test-results>
"#;

fn write_report(dir: &TempDir, file_name: &str, contents: &str) -> String {
    let path = dir.path().join(file_name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn parse_junit_string() {
    let summary = parse_report("junit", JUNIT_XML).unwrap();

    assert_eq!(
        summary.totals(),
        Totals {
            total: 3,
            passed: 1,
            failed: 1,
            skipped: 1,
            errors: 0,
        }
    );
    assert_eq!(summary.time, 1.5);
    assert_eq!(summary.cases.len(), 3);

    assert_eq!(summary.cases[0].name, "Test 1");
    assert_eq!(summary.cases[0].suite, "Suite 1");
    assert_eq!(summary.cases[0].status, CaseStatus::Passed);
    assert_eq!(summary.cases[0].message, None);
    assert_eq!(summary.cases[1].status, CaseStatus::Failed);
    assert!(summary.cases[1]
        .message
        .as_deref()
        .unwrap()
        .contains("Assertion failed"));
    assert_eq!(summary.cases[2].suite, "Suite 2");
    assert_eq!(summary.cases[2].status, CaseStatus::Skipped);
    assert_eq!(summary.cases[2].message.as_deref(), Some("Ignored"));
}

#[test]
fn parse_junit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&dir, "fake_report.xml", JUNIT_XML);

    let from_file = parse_report("junit", &path).unwrap();
    let from_string = parse_report("junit", JUNIT_XML).unwrap();
    pretty_assertions::assert_eq!(from_file, from_string);
}

#[test]
fn parse_xunit_string() {
    let summary = parse_report("xunit", XUNIT_XML).unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.time, 1.2);
    assert_eq!(summary.cases[0].suite, "Coll 1");
    assert_eq!(summary.cases[1].status, CaseStatus::Failed);
    // the failure element carries no nested message element
    assert_eq!(summary.cases[1].message, None);
}

#[test]
fn parse_nunit_string() {
    let summary = parse_report("nunit", NUNIT_XML).unwrap();

    assert_eq!(
        summary.totals(),
        Totals {
            total: 3,
            passed: 1,
            failed: 1,
            skipped: 1,
            errors: 0,
        }
    );
    assert_eq!(summary.time, 2.0);
    assert_eq!(summary.cases[0].status, CaseStatus::Passed);
    assert_eq!(summary.cases[1].status, CaseStatus::Failed);
    assert_eq!(summary.cases[1].message.as_deref(), Some("Fail Message"));
    assert_eq!(summary.cases[2].status, CaseStatus::Skipped);
}

#[test]
fn nunit_timestamp_time_uses_suite_times() {
    let xml = NUNIT_XML.replace(r#"time="2.0""#, r#"date="2024-05-01" time="20:10:11""#);
    let summary = parse_report("nunit", &xml).unwrap();
    assert_eq!(summary.time, 2.0);
    assert_eq!(summary.total, 3);
}

#[test]
fn nunit_passed_is_derived_even_when_everything_is_skipped() {
    let summary = parse_report(
        "nunit",
        r#"<test-results total="2" failures="0" errors="0" ignored="1" not-run="1" time="0.1">
            <test-suite name="s"><results>
                <test-case name="a" result="Ignored"/>
                <test-case name="b" result="NotRun"/>
            </results></test-suite>
        </test-results>"#,
    )
    .unwrap();

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.passed, 0);
    assert_eq!(summary.cases[1].status, CaseStatus::Other(String::from("notrun")));

    let summary = parse_report("nunit", r#"<test-results total="2"/>"#).unwrap();
    assert_eq!(summary.passed, summary.total);
}

#[test]
fn xunit_totals_are_not_reconciled_with_cases() {
    let summary = parse_report(
        "xunit",
        r#"<assemblies><assembly total="5" passed="5" time="1">
            <collection name="c"><test name="only" result="Fail"/></collection>
        </assembly></assemblies>"#,
    )
    .unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.passed, 5);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.cases.len(), 1);
    assert_eq!(summary.cases[0].status, CaseStatus::Failed);
}

#[test]
fn junit_totals_always_add_up() {
    let summary = parse_report(
        "junit",
        r#"<testsuites>
            <testsuite name="s" tests="99" failures="42">
                <testcase name="a"/>
                <testcase name="b"><error message="timeout"/></testcase>
                <testcase name="c"><skipped/></testcase>
                <testcase name="d"><failure/></testcase>
            </testsuite>
        </testsuites>"#,
    )
    .unwrap();

    assert_eq!(summary.total, 4);
    assert_eq!(
        summary.total,
        summary.passed + summary.failed + summary.errors + summary.skipped
    );
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.cases[1].message.as_deref(), Some("timeout"));
}

#[test]
fn parsing_is_idempotent() {
    for (format, xml) in [("junit", JUNIT_XML), ("xunit", XUNIT_XML), ("nunit", NUNIT_XML)] {
        let parser = ReportParser::new(format).unwrap();
        pretty_assertions::assert_eq!(parser.parse(xml).unwrap(), parser.parse(xml).unwrap());
    }
}

#[test]
fn parse_invalid_xml() {
    for format in ["junit", "xunit", "nunit"] {
        for input in ["Not even XML", "", "<testsuites><testsuite>", "<a></b>"] {
            assert_matches!(
                parse_report(format, input),
                Err(ReportError::MalformedDocument {
                    origin: InputOrigin::Literal,
                    ..
                }),
                "format `{}`, input `{}`",
                format,
                input
            );
        }
    }
}

#[test]
fn deeply_nested_documents_are_malformed() {
    let nested = |depth: usize| {
        format!(
            r#"<testsuite name="Deep">{}<testcase name="Test 1"/>{}</testsuite>"#,
            "<g>".repeat(depth),
            "</g>".repeat(depth)
        )
    };

    for format in ["junit", "xunit", "nunit"] {
        assert_matches!(
            parse_report(format, &nested(100_000)),
            Err(ReportError::MalformedDocument {
                origin: InputOrigin::Literal,
                source: XmlError::TooDeep(..),
            }),
            "format `{}`",
            format
        );
    }

    let summary = parse_report("junit", &nested(200)).unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.passed, 1);
}

#[test]
fn malformed_file_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&dir, "broken.xml", "<testsuites><testsuite>");

    let err = parse_report("junit", &path).unwrap_err();
    assert_matches!(&err, ReportError::MalformedDocument { origin: InputOrigin::File(..), .. });
    assert!(err.to_string().contains("broken.xml"), "{err}");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xml");
    let path = path.to_str().unwrap();

    assert_matches!(
        parse_report("junit", path),
        Err(ReportError::NotFound(p)) if p == path
    );
    assert_matches!(
        parse_report("nunit", "results/nunit"),
        Err(ReportError::NotFound(..))
    );
}

#[test]
fn parser_unsupported_type() {
    let err = parse_report("invalid", "<xml/>").unwrap_err();
    assert_matches!(&err, ReportError::UnsupportedFormat(s) if s == "invalid");
    assert!(err.to_string().contains("unsupported report format"));
}

#[test]
fn unsupported_type_is_reported_before_reading_input() {
    // an existing malformed file would otherwise fail as malformed
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&dir, "broken.xml", "<<<");

    assert_matches!(
        parse_report("yaml", &path),
        Err(ReportError::UnsupportedFormat(..))
    );
    assert_matches!(
        parse_report("yaml", "does/not/exist.xml"),
        Err(ReportError::UnsupportedFormat(..))
    );
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = ReportParser::from(ReportFormat::Junit);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || parser.parse(JUNIT_XML).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().total, 3);
    }
}

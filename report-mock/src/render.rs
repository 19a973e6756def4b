use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{MockCase, MockRun, MockStatus, MockSuite};

const TEST_FRAMEWORK: &str = "helm-unittest";

fn seconds(duration: Duration) -> String {
    format!("{:.4}", duration.as_secs_f64())
}

fn element<'a>(name: &'a str, attributes: &[(&str, String)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute((*key, value.as_str()));
    }
    start
}

fn write_nested<W, F>(writer: &mut Writer<W>, start: BytesStart<'_>, inner: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut Writer<W>) -> Result<()>,
{
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    inner(writer)?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

/// `<name><message>text</message></name>`
fn write_message<W: Write>(writer: &mut Writer<W>, name: &str, message: &str) -> Result<()> {
    write_nested(writer, BytesStart::new(name), |writer| {
        write_nested(writer, BytesStart::new("message"), |writer| {
            writer.write_event(Event::Text(BytesText::new(message)))?;
            Ok(())
        })
    })
}

fn write_declaration<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(())
}

pub(crate) fn write_junit<W: Write>(run: &MockRun, writer: W) -> Result<()> {
    let mut report = Report::new(run.chart_name.as_str());
    report.set_timestamp(run.timestamp);
    report.set_time(run.duration());

    for suite in &run.suites {
        let mut test_suite = TestSuite::new(suite.name.as_str());
        test_suite.set_timestamp(run.timestamp);
        test_suite.set_time(suite.duration());
        for case in &suite.cases {
            let mut test_case = TestCase::new(case.name.as_str(), junit_status(&case.status));
            test_case.set_classname(suite.name.as_str());
            test_case.set_time(case.duration);
            test_suite.add_test_case(test_case);
        }
        report.add_test_suite(test_suite);
    }

    report.serialize(writer)?;
    Ok(())
}

fn junit_status(status: &MockStatus) -> TestCaseStatus {
    match status {
        MockStatus::Passed => TestCaseStatus::success(),
        MockStatus::Skipped { message } => {
            let mut status = TestCaseStatus::skipped();
            status.set_message(message.as_str());
            status
        }
        MockStatus::Failed { message } => TestCaseStatus::NonSuccess {
            kind: NonSuccessKind::Failure,
            message: Some(message.as_str().into()),
            ty: None,
            description: None,
            reruns: Vec::new(),
        },
        MockStatus::Errored { message } => TestCaseStatus::NonSuccess {
            kind: NonSuccessKind::Error,
            message: Some(message.as_str().into()),
            ty: None,
            description: None,
            reruns: Vec::new(),
        },
    }
}

/// One `assembly` per test file. xUnit has no errored result, errors are written as failures.
pub(crate) fn write_xunit<W: Write>(run: &MockRun, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);
    write_declaration(&mut writer)?;

    write_nested(&mut writer, BytesStart::new("assemblies"), |writer| {
        for suite in &run.suites {
            let counters = xunit_counters(suite);
            let mut assembly_attributes = vec![
                ("name", suite.file.clone()),
                ("test-framework", String::from(TEST_FRAMEWORK)),
                ("run-date", run.timestamp.format("%Y-%m-%d").to_string()),
                ("run-time", run.timestamp.format("%H:%M:%S").to_string()),
                ("time", seconds(suite.duration())),
            ];
            assembly_attributes.extend(counters.iter().cloned());
            assembly_attributes.push(("errors", String::from("0")));

            write_nested(writer, element("assembly", &assembly_attributes), |writer| {
                let mut collection_attributes = vec![
                    ("name", suite.name.clone()),
                    ("time", seconds(suite.duration())),
                ];
                collection_attributes.extend(counters.iter().cloned());

                write_nested(writer, element("collection", &collection_attributes), |writer| {
                    for case in &suite.cases {
                        write_xunit_test(writer, suite, case)?;
                    }
                    Ok(())
                })
            })?;
        }
        Ok(())
    })
}

fn xunit_counters(suite: &MockSuite) -> [(&'static str, String); 4] {
    [
        ("total", suite.cases.len().to_string()),
        (
            "passed",
            suite
                .count(|status| matches!(status, MockStatus::Passed))
                .to_string(),
        ),
        (
            "failed",
            suite
                .count(|status| {
                    matches!(status, MockStatus::Failed { .. } | MockStatus::Errored { .. })
                })
                .to_string(),
        ),
        (
            "skipped",
            suite
                .count(|status| matches!(status, MockStatus::Skipped { .. }))
                .to_string(),
        ),
    ]
}

fn write_xunit_test<W: Write>(
    writer: &mut Writer<W>,
    suite: &MockSuite,
    case: &MockCase,
) -> Result<()> {
    let result = match case.status {
        MockStatus::Passed => "Pass",
        MockStatus::Skipped { .. } => "Skip",
        MockStatus::Failed { .. } | MockStatus::Errored { .. } => "Fail",
    };
    let start = element(
        "test",
        &[
            ("name", case.name.clone()),
            ("type", suite.name.clone()),
            ("method", String::from(TEST_FRAMEWORK)),
            ("time", seconds(case.duration)),
            ("result", String::from(result)),
        ],
    );

    match &case.status {
        MockStatus::Passed => {
            writer.write_event(Event::Empty(start))?;
            Ok(())
        }
        MockStatus::Skipped { message } => write_nested(writer, start, |writer| {
            write_nested(writer, BytesStart::new("reason"), |writer| {
                writer.write_event(Event::Text(BytesText::new(message)))?;
                Ok(())
            })
        }),
        MockStatus::Failed { message } | MockStatus::Errored { message } => {
            write_nested(writer, start, |writer| {
                write_message(writer, "failure", message)
            })
        }
    }
}

/// NUnit 2.5 layout: the root `time` is the time of day the run started, not a duration.
pub(crate) fn write_nunit<W: Write>(run: &MockRun, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);
    write_declaration(&mut writer)?;

    let errors = run.count(|status| matches!(status, MockStatus::Errored { .. }));
    let failures = run.count(|status| matches!(status, MockStatus::Failed { .. }));
    let ignored = run.count(|status| matches!(status, MockStatus::Skipped { .. }));
    let root = element(
        "test-results",
        &[
            ("name", run.chart_name.clone()),
            ("total", run.case_count().to_string()),
            ("errors", errors.to_string()),
            ("failures", failures.to_string()),
            ("not-run", String::from("0")),
            ("inconclusive", String::from("0")),
            ("ignored", ignored.to_string()),
            ("skipped", String::from("0")),
            ("invalid", String::from("0")),
            ("date", run.timestamp.format("%Y-%m-%d").to_string()),
            ("time", run.timestamp.format("%H:%M:%S").to_string()),
        ],
    );

    write_nested(&mut writer, root, |writer| {
        for suite in &run.suites {
            let succeeded = suite.count(|status| {
                matches!(status, MockStatus::Failed { .. } | MockStatus::Errored { .. })
            }) == 0;
            let start = element(
                "test-suite",
                &[
                    ("type", String::from("TestFixture")),
                    ("name", suite.name.clone()),
                    ("executed", String::from("True")),
                    (
                        "result",
                        String::from(if succeeded { "Success" } else { "Failure" }),
                    ),
                    ("success", nunit_bool(succeeded)),
                    ("time", seconds(suite.duration())),
                    ("asserts", String::from("0")),
                    ("description", suite.file.clone()),
                ],
            );
            write_nested(writer, start, |writer| {
                write_nested(writer, BytesStart::new("results"), |writer| {
                    for case in &suite.cases {
                        write_nunit_test_case(writer, suite, case)?;
                    }
                    Ok(())
                })
            })?;
        }
        Ok(())
    })
}

fn nunit_bool(value: bool) -> String {
    String::from(if value { "True" } else { "False" })
}

fn write_nunit_test_case<W: Write>(
    writer: &mut Writer<W>,
    suite: &MockSuite,
    case: &MockCase,
) -> Result<()> {
    let (result, executed) = match case.status {
        MockStatus::Passed => ("Success", true),
        MockStatus::Skipped { .. } => ("Ignored", false),
        MockStatus::Failed { .. } => ("Failure", true),
        MockStatus::Errored { .. } => ("Error", true),
    };
    let start = element(
        "test-case",
        &[
            ("name", case.name.clone()),
            ("description", format!("{}.{}", suite.name, case.name)),
            ("executed", nunit_bool(executed)),
            ("result", String::from(result)),
            ("success", nunit_bool(case.status == MockStatus::Passed)),
            ("time", seconds(case.duration)),
            ("asserts", String::from("0")),
        ],
    );

    match &case.status {
        MockStatus::Passed => {
            writer.write_event(Event::Empty(start))?;
            Ok(())
        }
        MockStatus::Skipped { message } => write_nested(writer, start, |writer| {
            write_message(writer, "reason", message)
        }),
        MockStatus::Failed { message } | MockStatus::Errored { message } => {
            write_nested(writer, start, |writer| {
                write_message(writer, "failure", message)
            })
        }
    }
}

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::Parser;
use constants::{JUNIT_FORMAT, NUNIT_FORMAT, REPORT_FILE_EXTENSION, XUNIT_FORMAT};
use fake::Fake;
use rand::prelude::*;
use rand::rngs::StdRng;

mod render;

macro_rules! percentages_parser {
    ($func_name:ident, $num_percentages:literal) => {
        fn $func_name(argument: &str) -> std::result::Result<Vec<u8>, clap::Error> {
            argument
                .split(',')
                .enumerate()
                .try_fold((0_u8, Vec::new()), |mut acc, (i, percentage_str)| {
                    if i >= $num_percentages {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            format!("More than {} percentages provided", $num_percentages),
                        ));
                    }
                    let percentage = percentage_str
                        .trim()
                        .parse::<u8>()
                        .map_err(|e| clap::Error::raw(clap::error::ErrorKind::InvalidValue, e))?;

                    if percentage > 100 {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            format!("Percentage at index {} is greater than 100", i),
                        ));
                    }

                    acc.0 += percentage;

                    if acc.0 > 100 {
                        return Err(clap::Error::raw(
                            clap::error::ErrorKind::InvalidValue,
                            "Sum of percentages are greater than 100",
                        ));
                    }

                    acc.1.push(percentage);

                    Ok(acc)
                })
                .map(|v| v.1)
        }
    };
}

#[derive(Debug, Parser, Clone)]
pub struct Options {
    #[command(flatten, next_help_heading = "Global Options")]
    pub global: GlobalOptions,

    #[command(flatten, next_help_heading = "Test Suite Options")]
    pub test_suite: TestSuiteOptions,

    #[command(flatten, next_help_heading = "Test Case Options")]
    pub test_case: TestCaseOptions,
}

impl Default for Options {
    fn default() -> Self {
        Options::try_parse_from([""]).expect("default options must parse")
    }
}

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct GlobalOptions {
    /// Seed for all generated data, defaults to randomly generated seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Timestamp the run starts at, defaults to now
    #[arg(long)]
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// Name of the chart under test
    #[arg(long, default_value = "release-name-example")]
    pub chart_name: String,
}

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct TestSuiteOptions {
    /// A list of test suite names to generate (conflicts with --test-suite-random-count)
    #[arg(
        long,
        value_delimiter = ',',
        conflicts_with = "test_suite_random_count"
    )]
    pub test_suite_names: Option<Vec<String>>,

    /// The number of test suites with random names to generate (conflicts with --test-suite-names)
    #[arg(long, conflicts_with = "test_suite_names", default_value = "5")]
    pub test_suite_random_count: usize,
}

percentages_parser!(four_percentages_parser, 4);

#[derive(Debug, Parser, Clone)]
#[group()]
pub struct TestCaseOptions {
    /// Inclusive range of the number of test cases in each test suite
    #[arg(long, num_args = 1..=2, value_names = ["COUNT_RANGE_START", "COUNT_RANGE_END"], default_values = ["1", "4"])]
    pub test_case_count_range: Vec<usize>,

    /// Inclusive range of the time a test case takes
    #[arg(long, num_args = 1..=2, value_names = ["DURATION_RANGE_START", "DURATION_RANGE_END"], default_values = ["1ms", "50ms"])]
    pub test_case_duration_range: Vec<humantime::Duration>,

    /// The chance of a test case passing, skipping, failing, and erroring (whatever is left passes)
    #[arg(long, value_parser = four_percentages_parser, default_value = "70,10,15,5")]
    pub test_case_pass_to_skip_to_fail_to_error_percentage: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStatus {
    Passed,
    Skipped { message: String },
    Failed { message: String },
    Errored { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCase {
    pub name: String,
    pub status: MockStatus,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSuite {
    pub name: String,
    /// Test file the suite was read from, e.g. `tests/deployment_test.yaml`.
    pub file: String,
    pub cases: Vec<MockCase>,
}

impl MockSuite {
    pub fn duration(&self) -> Duration {
        self.cases.iter().map(|case| case.duration).sum()
    }

    pub fn count<F: Fn(&MockStatus) -> bool>(&self, predicate: F) -> usize {
        self.cases
            .iter()
            .filter(|case| predicate(&case.status))
            .count()
    }
}

/// One generated chart test run, renderable in every supported report format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRun {
    pub chart_name: String,
    pub timestamp: DateTime<FixedOffset>,
    pub suites: Vec<MockSuite>,
}

impl MockRun {
    pub fn duration(&self) -> Duration {
        self.suites.iter().map(MockSuite::duration).sum()
    }

    pub fn count<F: Fn(&MockStatus) -> bool + Copy>(&self, predicate: F) -> usize {
        self.suites.iter().map(|suite| suite.count(predicate)).sum()
    }

    pub fn case_count(&self) -> usize {
        self.count(|_| true)
    }

    pub fn to_junit_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        render::write_junit(self, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn to_xunit_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        render::write_xunit(self, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn to_nunit_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        render::write_nunit(self, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[derive(Debug, Clone)]
pub struct ReportMock {
    seed: u64,
    options: Options,

    rng: StdRng,
}

impl ReportMock {
    pub fn new(options: Options) -> Self {
        let seed = options.global.seed.unwrap_or_else(rand::random);
        Self {
            seed,
            options,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn generate_run(&mut self) -> MockRun {
        let timestamp = self
            .options
            .global
            .timestamp
            .unwrap_or_else(|| chrono::Utc::now().fixed_offset());

        MockRun {
            chart_name: self.options.global.chart_name.clone(),
            timestamp,
            suites: self.generate_test_suites(),
        }
    }

    /// Writes `junit.xml`, `xunit.xml` and `nunit.xml` for the same run.
    pub fn write_reports_to_dir<T: AsRef<Path>>(
        &self,
        directory: T,
        run: &MockRun,
    ) -> Result<Vec<PathBuf>> {
        let report_path =
            |format: &str| directory.as_ref().join(format!("{format}{REPORT_FILE_EXTENSION}"));

        let junit_path = report_path(JUNIT_FORMAT);
        render::write_junit(run, File::create(&junit_path)?)?;
        let xunit_path = report_path(XUNIT_FORMAT);
        render::write_xunit(run, File::create(&xunit_path)?)?;
        let nunit_path = report_path(NUNIT_FORMAT);
        render::write_nunit(run, File::create(&nunit_path)?)?;

        Ok(vec![junit_path, xunit_path, nunit_path])
    }

    fn generate_test_suites(&mut self) -> Vec<MockSuite> {
        self.options
            .test_suite
            .test_suite_names
            .as_ref()
            .cloned()
            .map(|mut test_suite_names| {
                test_suite_names.shuffle(&mut self.rng);
                test_suite_names
            })
            .unwrap_or_else(|| {
                (0..self.options.test_suite.test_suite_random_count)
                    .map(|_| {
                        let resource: String =
                            fake::faker::company::en::Buzzword().fake_with_rng(&mut self.rng);
                        format!("test {}", resource.to_lowercase())
                    })
                    .collect()
            })
            .into_iter()
            .map(|test_suite_name| {
                let file = format!(
                    "tests/{}_test.yaml",
                    test_suite_name
                        .trim_start_matches("test ")
                        .replace(char::is_whitespace, "_")
                );
                MockSuite {
                    cases: self.generate_test_cases(),
                    name: test_suite_name,
                    file,
                }
            })
            .collect()
    }

    fn generate_test_cases(&mut self) -> Vec<MockCase> {
        let count_range = &self.options.test_case.test_case_count_range;
        let range_start = count_range.first().copied().unwrap_or_default();
        let range_end = count_range
            .get(1)
            .copied()
            .unwrap_or(range_start)
            .max(range_start);
        let count = self.rng.gen_range(range_start..=range_end);

        (0..count)
            .map(|_| {
                let words: Vec<String> =
                    fake::faker::lorem::en::Words(2..5).fake_with_rng(&mut self.rng);
                let status = self.generate_test_case_status();
                let duration = match status {
                    MockStatus::Skipped { .. } => Duration::ZERO,
                    _ => self.fake_duration(self.options.test_case.test_case_duration_range.clone()),
                };
                MockCase {
                    name: format!("should render {}", words.join(" ")),
                    status,
                    duration,
                }
            })
            .collect()
    }

    fn generate_test_case_status(&mut self) -> MockStatus {
        let rand_percentage = self.rand_percentage();
        let mut total = 0_u8;
        let percentages: Vec<u8> = self
            .options
            .test_case
            .test_case_pass_to_skip_to_fail_to_error_percentage
            .iter()
            .flatten()
            .copied()
            .collect();
        for (i, percentage) in percentages.into_iter().enumerate() {
            let new_total = total + percentage;
            if (total..new_total).contains(&rand_percentage) {
                return match i {
                    1 => MockStatus::Skipped {
                        message: self.fake_sentence(),
                    },
                    2 => MockStatus::Failed {
                        message: self.fake_sentence(),
                    },
                    3 => MockStatus::Errored {
                        message: self.fake_sentence(),
                    },
                    _ => MockStatus::Passed,
                };
            }
            total = new_total;
        }
        MockStatus::Passed
    }

    fn fake_sentence(&mut self) -> String {
        fake::faker::lorem::en::Sentence(3..8).fake_with_rng(&mut self.rng)
    }

    fn fake_duration<T: AsRef<[humantime::Duration]>>(&mut self, range: T) -> Duration {
        let range_start = range
            .as_ref()
            .first()
            .map(|duration| duration.as_nanos())
            .unwrap_or_default();
        let range_end = range
            .as_ref()
            .get(1)
            .map(|duration| duration.as_nanos())
            .unwrap_or(range_start)
            .max(range_start);
        let rand_duration_ns = self.rng.gen_range(range_start..=range_end);
        Duration::from_nanos(u64::try_from(rand_duration_ns).unwrap_or(u64::MAX))
    }

    /// Uniform in `0..100`, so a percentage of `0` is never picked.
    fn rand_percentage(&mut self) -> u8 {
        self.rng.gen_range(0..100)
    }
}

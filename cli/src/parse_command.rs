use std::io::Read;

use clap::Args;
use constants::{CHART_TEST_REPORT_FORMAT_ENV, EXIT_FAILURE, EXIT_SUCCESS};
use report::{ReportError, ReportParser};

use crate::print::{print_error, print_json, print_summary};

/// Reads the report text from stdin instead of treating the input as a path or XML.
pub const STDIN_INPUT: &str = "-";

#[derive(Args, Clone, Debug)]
pub struct ParseArgs {
    #[arg(
        long,
        short,
        env = CHART_TEST_REPORT_FORMAT_ENV,
        value_parser = clap::builder::NonEmptyStringValueParser::new(),
        help = "Report format: junit, xunit or nunit."
    )]
    pub format: String,
    #[arg(long, help = "Print the summary as JSON.")]
    pub json: bool,
    #[arg(
        required = true,
        help = "Path to the report file, the report XML itself, or `-` to read it from stdin."
    )]
    pub input: String,
}

pub fn run_parse(parse_args: ParseArgs) -> anyhow::Result<i32> {
    let ParseArgs {
        format,
        json,
        input,
    } = parse_args;

    // an unknown format is reported before stdin is read
    let parser = match ReportParser::new(&format) {
        Ok(parser) => parser,
        Err(e) => {
            print_error(&e);
            return Ok(exit_code(&e));
        }
    };

    let input = if input == STDIN_INPUT {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        input
    };

    let summary = match parser.parse(&input) {
        Ok(summary) => summary,
        Err(e) => {
            print_error(&e);
            return Ok(exit_code(&e));
        }
    };

    if json {
        print_json(&summary)?;
    } else {
        print_summary(parser.format(), &summary);
    }

    Ok(if summary.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

pub fn exit_code(error: &ReportError) -> i32 {
    match error {
        ReportError::UnsupportedFormat(..) => exitcode::USAGE,
        ReportError::NotFound(..) => exitcode::NOINPUT,
        ReportError::MalformedDocument { .. } => exitcode::DATAERR,
        ReportError::Io { .. } => exitcode::IOERR,
    }
}

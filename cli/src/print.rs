use colored::{ColoredString, Colorize};
use console::Emoji;
use pluralizer::pluralize;
use report::{CaseStatus, ReportError, ReportFormat, ResultSummary};

pub fn print_summary(format: ReportFormat, summary: &ResultSummary) {
    println!(
        "Parsed {} report with {} in {:.3}s",
        format,
        pluralize("test", summary.total as isize, true),
        summary.time,
    );

    let non_passing: Vec<_> = summary
        .cases
        .iter()
        .filter(|case| case.status != CaseStatus::Passed)
        .collect();
    if !non_passing.is_empty() {
        println!();
    }
    for case in non_passing {
        match &case.message {
            Some(message) => println!(
                "  {} - {} > {}: {}",
                print_status(&case.status),
                case.suite,
                case.name,
                first_line(message),
            ),
            None => println!(
                "  {} - {} > {}",
                print_status(&case.status),
                case.suite,
                case.name
            ),
        }
    }

    let counts = format!(
        "{} passed, {} failed, {} skipped, {}",
        summary.passed,
        summary.failed,
        summary.skipped,
        pluralize("error", summary.errors as isize, true),
    );
    if summary.is_success() {
        println!("\n{}{}", counts.green(), Emoji(" ✅", ""));
    } else {
        println!("\n{}{}", counts.red(), Emoji(" ❌", ""));
    }
}

pub fn print_json(summary: &ResultSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn print_error(error: &ReportError) {
    eprintln!("{} {}", "error:".red(), error);
}

fn print_status(status: &CaseStatus) -> ColoredString {
    let label = status.as_str().to_uppercase();
    match status {
        CaseStatus::Failed | CaseStatus::Error => label.red(),
        CaseStatus::Skipped => label.yellow(),
        CaseStatus::Passed => label.green(),
        CaseStatus::Other(..) => label.normal(),
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default().trim_end()
}

pub mod junit;
pub mod nunit;
pub mod xunit;

use crate::{parser::ReportFormat, summary::ResultSummary, xml::XmlElement};

pub use junit::JunitDialect;
pub use nunit::NunitDialect;
pub use xunit::XunitDialect;

/// One report grammar. Each dialect owns how it walks its elements, where its
/// totals come from and how it resolves elapsed time.
pub trait Dialect: Send + Sync {
    fn format(&self) -> ReportFormat;

    fn summarize(&self, root: &XmlElement) -> ResultSummary;
}

mod parse_attr {
    use std::str::FromStr;

    use crate::{elapsed, xml::XmlElement};

    pub fn name(e: &XmlElement, default: &str) -> String {
        String::from(e.attr("name").unwrap_or(default))
    }

    pub fn time(e: &XmlElement) -> Option<f64> {
        elapsed::seconds(e.attr("time"))
    }

    pub fn time_or_default(e: &XmlElement) -> f64 {
        elapsed::seconds_or_default(e.attr("time"))
    }

    pub fn count(e: &XmlElement, attr_name: &str) -> usize {
        parse_string_attr_into_other_type(e, attr_name).unwrap_or_default()
    }

    fn parse_string_attr_into_other_type<T: FromStr>(
        e: &XmlElement,
        attr_name: &str,
    ) -> Option<T> {
        e.attr(attr_name).and_then(|value| value.trim().parse::<T>().ok())
    }
}

/// Trimmed text, `None` when nothing but whitespace is left.
fn trimmed_message<T: AsRef<str>>(text: T) -> Option<String> {
    let text = text.as_ref().trim();
    (!text.is_empty()).then(|| String::from(text))
}

/// Text of the `message` element directly inside `e`, as NUnit and xUnit nest it.
fn nested_message(e: &XmlElement) -> Option<String> {
    e.child("message")
        .and_then(|message| trimmed_message(message.text()))
}

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub const JUNIT_FORMAT: &str = "junit";
pub const XUNIT_FORMAT: &str = "xunit";
pub const NUNIT_FORMAT: &str = "nunit";

/// Conventional extension of a report file, used to tell a mistyped path from bad XML.
pub const REPORT_FILE_EXTENSION: &str = ".xml";

/// Inputs this long are never treated as file paths.
pub const MAX_PATH_LEN: usize = 4096;

/// Deepest element nesting a report document may have.
pub const MAX_XML_DEPTH: usize = 256;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_XUNIT_TEST_NAME: &str = "Unknown Test";
pub const UNKNOWN_XUNIT_COLLECTION_NAME: &str = "Unknown Collection";
pub const UNKNOWN_RESULT: &str = "Unknown";

pub const CHART_TEST_REPORT_LOG_ENV: &str = "CHART_TEST_REPORT_LOG";
pub const CHART_TEST_REPORT_FORMAT_ENV: &str = "CHART_TEST_REPORT_FORMAT";

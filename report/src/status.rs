use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical outcome of a test case. Tokens no dialect vocabulary maps onto are
/// kept, lowercased, in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    #[default]
    Passed,
    Failed,
    Error,
    Skipped,
    Other(String),
}

impl CaseStatus {
    /// Maps a raw result token from any dialect, case-insensitively. The first
    /// matching rule wins, so `"NotPassed"` is still passed.
    pub fn normalize<T: AsRef<str>>(token: T) -> Self {
        let token = token.as_ref().to_lowercase();
        if token.contains("success") || token.contains("pass") {
            CaseStatus::Passed
        } else if token.contains("fail") {
            CaseStatus::Failed
        } else if token.contains("error") {
            CaseStatus::Error
        } else if token.contains("skip") || token.contains("ignore") {
            CaseStatus::Skipped
        } else {
            CaseStatus::Other(token)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::Error => "error",
            CaseStatus::Skipped => "skipped",
            CaseStatus::Other(token) => token,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CaseStatus {
    fn from(token: String) -> Self {
        CaseStatus::normalize(token)
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        status.as_str().to_string()
    }
}

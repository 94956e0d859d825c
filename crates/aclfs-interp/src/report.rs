//! Per-line result reports.
//!
//! The text form is tab separated:
//!
//! ```text
//! <line>\tY                       definition accepted
//! <line>\tX\t<reason>             definition rejected
//! <line>\tY\t<command>            command allowed
//! <line>\tN\t<command>\t<reason>  command denied
//! <line>\tX\t<command>\t<reason>  command invalid
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::executor::Outcome;

/// Status column of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    /// Accepted / allowed
    #[serde(rename = "Y")]
    Allowed,
    /// Denied by policy
    #[serde(rename = "N")]
    Denied,
    /// Malformed or invalid
    #[serde(rename = "X")]
    Invalid,
}

impl Status {
    /// The one-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Allowed => "Y",
            Self::Denied => "N",
            Self::Invalid => "X",
        }
    }
}

/// Result of one reported input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// 1-based line number in the whole input
    pub line: usize,
    /// Status column
    pub status: Status,
    /// The command line as read; absent for definition lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Why the line was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Report {
    /// Report for a definition line.
    pub fn definition(line: usize, result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self {
                line,
                status: Status::Allowed,
                text: None,
                reason: None,
            },
            Err(e) => Self {
                line,
                status: Status::Invalid,
                text: None,
                reason: Some(e.to_string()),
            },
        }
    }

    /// Report for a command line.
    pub fn command(line: usize, text: &str, outcome: Outcome) -> Self {
        let (status, reason) = match outcome {
            Outcome::Allowed => (Status::Allowed, None),
            Outcome::Denied(reason) => (Status::Denied, Some(reason)),
            Outcome::Invalid(reason) => (Status::Invalid, Some(reason)),
        };
        Self {
            line,
            status,
            text: Some(text.to_string()),
            reason,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.line, self.status.code())?;
        if let Some(text) = &self.text {
            write!(f, "\t{text}")?;
        }
        if let Some(reason) = &self.reason {
            write!(f, "\t{reason}")?;
        }
        Ok(())
    }
}

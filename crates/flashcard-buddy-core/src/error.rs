// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value}"),
        }
    }
}

impl From<Rejection> for ErrorReport {
    fn from(value: Rejection) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// A user-facing refusal to carry out an operation. Not an error: the
/// collection is left untouched and the UI shows the message as a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The front or the back of a new card is blank.
    EmptySide,
    /// Delete-all was requested on an empty collection.
    NothingToDelete,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Rejection::EmptySide => {
                write!(f, "Please fill in both the front and the back of the card.")
            }
            Rejection::NothingToDelete => write!(f, "There are no cards to delete."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("storage unavailable");
        assert_eq!(err.to_string(), "error: storage unavailable");
    }

    #[test]
    fn test_from_json_error() {
        let result: Result<Vec<String>, _> = serde_json::from_str("[1,");
        let err: ErrorReport = result.unwrap_err().into();
        assert!(err.to_string().starts_with("error: JSON error:"));
    }

    #[test]
    fn test_from_rejection() {
        let err: ErrorReport = Rejection::NothingToDelete.into();
        assert_eq!(err.to_string(), "error: There are no cards to delete.");
    }

    #[test]
    fn test_fail() {
        let result: Fallible<()> = fail("nope");
        assert_eq!(result, Err(ErrorReport::new("nope")));
    }
}

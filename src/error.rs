use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The request could not be completed: network failure, rejected status
    /// or a request that was dropped before answering.
    TransportFailure,
    /// The response body is not valid JSON for the expected payload.
    ParseFailure,
    /// The source could not be turned into a request target.
    InvalidTarget,
    InvalidConfig,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[test]
fn display_includes_kind_and_message() {
    let error = Error::new(ErrorKind::ParseFailure, "expected value".to_string());

    assert_eq!(error.to_string(), "ParseFailure: expected value");
    assert_eq!(error.kind(), ErrorKind::ParseFailure);
}

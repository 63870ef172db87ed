//! The status envelope returned by a job invocation.
//!
//! It has the shape of an API Gateway proxy response: a numeric status code
//! and a `body` holding a JSON document encoded as a string.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Status code of a successful run.
pub const STATUS_OK: u16 = 200;

/// Status code of a failed run.
pub const STATUS_ERROR: u16 = 500;

/// Body of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub message: String,
    pub repository: String,
    pub branch: String,
}

/// Body of a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// A 200 response reporting the new counter value.
    pub fn success(counter: impl Display, repository: &str, branch: &str) -> Self {
        let body = SuccessBody {
            message: format!("Counter updated to {counter}"),
            repository: repository.to_string(),
            branch: branch.to_string(),
        };
        Self {
            status_code: STATUS_OK,
            body: encode(&body),
        }
    }

    /// A 500 response carrying an error description.
    pub fn failure(error: impl Into<String>) -> Self {
        let body = ErrorBody {
            error: error.into(),
        };
        Self {
            status_code: STATUS_ERROR,
            body: encode(&body),
        }
    }

    /// Returns `true` for a 200 response.
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// Serialize the envelope as a single JSON line.
    pub fn to_json(&self) -> String {
        encode(self)
    }
}

fn encode<T: Serialize>(value: &T) -> String {
    // Only string and integer fields, so serialization cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_envelope() {
        let response = Response::success(42, "octo/counter", "main");
        assert!(response.is_success());
        insta::assert_snapshot!(
            response.to_json(),
            @r#"{"statusCode":200,"body":"{\"message\":\"Counter updated to 42\",\"repository\":\"octo/counter\",\"branch\":\"main\"}"}"#
        );
    }

    #[test]
    fn failure_envelope() {
        let response = Response::failure("Missing required environment variables: BRANCH");
        assert!(!response.is_success());
        insta::assert_snapshot!(
            response.to_json(),
            @r#"{"statusCode":500,"body":"{\"error\":\"Missing required environment variables: BRANCH\"}"}"#
        );
    }

    #[test]
    fn body_decodes_back() {
        let response = Response::success(1, "o/r", "dev");
        let body: SuccessBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            SuccessBody {
                message: "Counter updated to 1".to_string(),
                repository: "o/r".to_string(),
                branch: "dev".to_string(),
            }
        );
    }
}

//! Response bodies of the query surface and the single error-to-response
//! mapping shared by every operation.

use serde::{Deserialize, Serialize};

use crate::domain::{Alert, MonthlyVolume, QueryError, StatusCounts};
use crate::obs;

/// The three read operations, used as log context and route names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Analytics,
    Stats,
    Alerts,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Analytics => "analytics",
            Operation::Stats => "stats",
            Operation::Alerts => "alerts",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: Vec<MonthlyVolume>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub success: bool,
    pub alerts: Vec<Alert>,
}

/// `{ success: false, message }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

/// Transport-agnostic reply: an HTTP-equivalent status plus a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    /// 200 with `body` serialized.
    pub fn ok<T: Serialize>(operation: Operation, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Reply { status: 200, body },
            Err(err) => {
                obs::emit_query_failed(operation, &err);
                Self::server_error()
            }
        }
    }

    fn server_error() -> Self {
        Reply {
            status: 500,
            body: serde_json::json!({ "success": false, "message": "Server error" }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Map a query failure onto its client-facing reply and log it with the
/// operation name.
///
/// Validation failures keep their message; store failures are logged with
/// full detail and replaced by a generic message.
pub fn failure_response(operation: Operation, err: &QueryError) -> Reply {
    match err {
        QueryError::Validation(reason) => obs::emit_query_rejected(operation, reason),
        QueryError::Store(cause) => obs::emit_query_failed(operation, cause),
    }

    let body = FailureBody {
        success: false,
        message: err.public_message(),
    };
    match serde_json::to_value(&body) {
        Ok(body) => Reply {
            status: err.status_code(),
            body,
        },
        Err(_) => Reply::server_error(),
    }
}

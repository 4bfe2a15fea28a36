//! JSON bodies returned by the API.

use crate::constants::error_codes;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Body of `GET /check`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResponse {
    #[serde(rename = "Connection")]
    pub connection: bool,
}

impl CheckResponse {
    pub fn reachable() -> Self {
        Self { connection: true }
    }
}

/// Structured failures of the range query, reported with HTTP 200
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailure {
    DateParseError,
    NoDataInRange,
}

impl QueryFailure {
    pub fn code(&self) -> &'static str {
        match self {
            QueryFailure::DateParseError => error_codes::DATE_PARSE_ERROR,
            QueryFailure::NoDataInRange => error_codes::NO_DATA_IN_RANGE,
        }
    }
}

impl Serialize for QueryFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Body of `GET /get`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RangeResponse {
    Found {
        success: bool,
        count: usize,
        data: Vec<Value>,
    },
    Failed {
        success: bool,
        error: QueryFailure,
    },
}

impl RangeResponse {
    pub fn found(data: Vec<Value>) -> Self {
        Self::Found {
            success: true,
            count: data.len(),
            data,
        }
    }

    pub fn failed(failure: QueryFailure) -> Self {
        Self::Failed {
            success: false,
            error: failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Body of `GET /getexample` and `GET /getall`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Value>,
}

impl ListResponse {
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

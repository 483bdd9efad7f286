use serde::{Deserialize, Serialize};

use crate::contract::{CoreRequest, CoreResponse};
use crate::core_service::{CoreService, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    EmptyQuery,
    Config,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(service: &CoreService, request: CoreRequest) -> TransportResponse {
    match service.handle_command(request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

/// Handles one JSON request and returns one JSON response line.
pub fn handle_json(service: &CoreService, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(service, request),
        Err(error) => {
            tracing::warn!(%error, "rejected malformed request");
            TransportResponse::Err {
                error: ErrorResponse {
                    code: ErrorCode::InvalidJson,
                    message: error.to_string(),
                },
            }
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|error| {
        format!(
            r#"{{"status":"err","error":{{"code":"internal","message":{}}}}}"#,
            serde_json::Value::String(error.to_string())
        )
    })
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    let code = match &error {
        ServiceError::EmptyQuery => ErrorCode::EmptyQuery,
        ServiceError::Config(_) => ErrorCode::Config,
    };
    ErrorResponse {
        code,
        message: error.to_string(),
    }
}

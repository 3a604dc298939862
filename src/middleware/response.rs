use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{statusCode, data, message, success}`.
///
/// The HTTP status and the envelope's `statusCode` are tracked separately;
/// creation routes answer HTTP 201 while still reporting 200 in the body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    pub status_code: StatusCode,
    pub envelope_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status_code: StatusCode::OK,
            envelope_code: 200,
        }
    }

    /// HTTP 201 Created, envelope 200
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            ..Self::success(data, message)
        }
    }

    pub fn success_flag(&self) -> bool {
        self.envelope_code < 400
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "statusCode": 500,
                        "message": "Failed to serialize response data",
                        "success": false
                    })),
                )
                    .into_response();
            }
        };

        let envelope = json!({
            "statusCode": self.envelope_code,
            "data": data_value,
            "message": self.message,
            "success": self.success_flag()
        });

        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_keeps_envelope_code_at_200() {
        let res = ApiResponse::created(json!({"a": 1}), "made");
        assert_eq!(res.status_code, StatusCode::CREATED);
        assert_eq!(res.envelope_code, 200);
        assert!(res.success_flag());
    }

    #[test]
    fn into_response_uses_http_status() {
        let res = ApiResponse::created(json!({}), "made").into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        let res = ApiResponse::success(Vec::<String>::new(), "ok").into_response();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

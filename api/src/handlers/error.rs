use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use campus_core::services::FlowError;
use campus_shared::{error_codes, ErrorResponse, OtpResponse};
use validator::ValidationErrors;

const INVALID_REQUEST: &str = "Invalid request data";

/// 400 for a body that deserialized but failed field validation
pub fn validation_failure(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    tracing::debug!(?fields, "Request validation failed");

    HttpResponse::BadRequest().json(OtpResponse::fail(first_message(errors)))
}

/// Status and body for a flow that did not produce a business result
pub fn flow_error_response(error: &FlowError) -> HttpResponse {
    let body = OtpResponse::fail(error.to_string());
    if error.is_client_error() {
        HttpResponse::BadRequest().json(body)
    } else {
        tracing::error!(error = ?error, "Request failed on a backing service");
        HttpResponse::InternalServerError().json(body)
    }
}

/// Handler installed on `web::JsonConfig`
///
/// Covers syntactically broken JSON, missing fields and unknown `purpose`
/// values. The body never reached a handler so the error envelope is used.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = req.path(), error = %err, "Rejected request body");

    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::INVALID_JSON, "Request body is malformed")
            .add_detail("reason", err.to_string()),
    );
    InternalError::from_response(err, response).into()
}

/// First human-readable message, in field-name order for stable output
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(field, _)| **field);

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| INVALID_REQUEST.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};
    use campus_core::errors::ValidationError as DomainValidationError;
    use validator::ValidationError;

    async fn body_of(response: HttpResponse) -> OtpResponse {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_flow_validation_is_bad_request() {
        let response = flow_error_response(&FlowError::Validation(
            DomainValidationError::InvalidCodeFormat,
        ));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "Code must be exactly 6 digits");
    }

    #[actix_web::test]
    async fn test_unavailable_is_server_error() {
        let response = flow_error_response(&FlowError::Unavailable);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = flow_error_response(&FlowError::PasswordUpdateFailed);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(body.message.contains("request a new code"));
    }

    #[actix_web::test]
    async fn test_validation_failure_uses_field_message() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("regex");
        error.message = Some("Code must be exactly 6 digits".into());
        errors.add("otp", error);

        let response = validation_failure(&errors);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.message, "Code must be exactly 6 digits");
    }

    #[actix_web::test]
    async fn test_validation_failure_without_message() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("email"));

        let response = validation_failure(&errors);
        assert_eq!(body_of(response).await.message, INVALID_REQUEST);
    }
}

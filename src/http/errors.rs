use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::domain::order::OrderError;
use crate::metrics::Metrics;

/// JSON error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            OrderError::Dependency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Reason label for bodies that never reached order validation.
pub(super) const MALFORMED: &str = "malformed";

/// Undecodable bodies are client errors, whatever the decoder's reason.
/// With `count_rejections` set, each one is recorded as a refused submission.
pub(super) fn json_config(count_rejections: bool) -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(move |err: JsonPayloadError, req: &HttpRequest| {
            tracing::debug!(path = %req.path(), error = %err, "Rejecting undecodable request body");

            if count_rejections {
                if let Some(metrics) = req.app_data::<web::Data<Metrics>>() {
                    metrics.record_rejection(MALFORMED);
                }
            }

            let response = HttpResponse::BadRequest().json(ErrorBody {
                error: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}

/// A body may omit its content type, but one that declares a type must
/// declare JSON (`application/json` or a `+json` suffix).
pub(super) fn ensure_json_content(req: &HttpRequest) -> Result<(), OrderError> {
    match req.mime_type() {
        Ok(None) => Ok(()),
        Ok(Some(mime))
            if mime.subtype().as_str() == "json"
                || mime.suffix().map(|suffix| suffix.as_str()) == Some("json") =>
        {
            Ok(())
        }
        Ok(Some(mime)) => Err(OrderError::Validation(format!(
            "unsupported content type {}",
            mime
        ))),
        Err(e) => Err(OrderError::Validation(e.to_string())),
    }
}

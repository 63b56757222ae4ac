use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tera::{Context, Tera};

use crate::dto::advocates::AdvocatesQuery;
use crate::dto::api::ErrorResponse;
use crate::services::ServiceError;

pub mod api;
pub mod main;

/// Renders `template` or answers 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// HTTP status reported for a failed service call.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidSortField(_)
        | ServiceError::InvalidSortOrder(_)
        | ServiceError::Form(_) => StatusCode::BAD_REQUEST,
        ServiceError::DataStoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::AlreadySeeded => StatusCode::CONFLICT,
        ServiceError::TypeConstraint(_)
        | ServiceError::Repository(_)
        | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body with the status matching `err`.
///
/// Server-side failures are reported generically; the details are logged.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let status = status_for(err);
    let error = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
        log::error!("Request failed: {err}");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    HttpResponse::build(status).json(ErrorResponse { error })
}

/// Parses the listing parameters from a raw query string.
///
/// Repeated or malformed values (e.g. `page=abc`) are reported as a form
/// error so they map to 400 like every other invalid parameter.
pub fn parse_query(query_string: &str) -> Result<AdvocatesQuery, ServiceError> {
    serde_html_form::from_str(query_string).map_err(|err| {
        log::warn!("Malformed advocates query '{query_string}': {err}");
        ServiceError::Form(err.to_string())
    })
}

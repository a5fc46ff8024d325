use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = match any_err.downcast_ref::<Error>() {
            Some(
                Error::InvalidDomain(_)
                | Error::EmptyLabel
                | Error::LabelTooLong(_)
                | Error::UnsupportedRecordType(_),
            ) => StatusCode::BAD_REQUEST,
            Some(Error::Unauthorized | Error::InvalidCredentials | Error::Token(_)) => {
                StatusCode::UNAUTHORIZED
            }
            Some(Error::UserExists(_)) => StatusCode::CONFLICT,
            Some(Error::AccountNotFound(_)) => StatusCode::NOT_FOUND,
            Some(Error::Provider(_)) => StatusCode::BAD_GATEWAY,
            // WithRejection hands the JsonRejection over as-is, so it has to
            // be downcast directly rather than through Error.
            _ => match any_err.downcast_ref::<JsonRejection>() {
                Some(JsonRejection::JsonDataError(_)) => StatusCode::UNPROCESSABLE_ENTITY,
                Some(JsonRejection::JsonSyntaxError(_)) => StatusCode::BAD_REQUEST,
                Some(JsonRejection::MissingJsonContentType(_)) => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
                Some(_) => StatusCode::BAD_REQUEST,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };
        let body = Json(json!({
            "error": format!("{any_err}"),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

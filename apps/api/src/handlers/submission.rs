use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rolekeeper_application::{FormOutcome, SubmissionError, SubmissionErrorKind};
use serde::Serialize;

use crate::dto::{SubmittedResponse, ValidationErrorResponse};
use crate::error::{ApiResult, ErrorResponse};

/// Maps one form outcome onto an HTTP response.
///
/// Field errors become `422` with every message keyed by field. Backend
/// rejections keep their message verbatim for a single banner.
pub(super) fn submission_response<C, R: Serialize>(
    outcome: FormOutcome<C>,
    present: impl FnOnce(C) -> ApiResult<(StatusCode, R)>,
) -> ApiResult<Response> {
    let response = match outcome {
        FormOutcome::Succeeded {
            created,
            redirect_after,
        } => {
            let (status, data) = present(created)?;
            let redirect_after_ms = redirect_after
                .map(|delay| u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));

            (
                status,
                Json(SubmittedResponse {
                    data,
                    redirect_after_ms,
                }),
            )
                .into_response()
        }
        FormOutcome::Invalid(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse {
                message: error.to_string(),
                field_errors: error.messages(),
                field_codes: error.codes(),
            }),
        )
            .into_response(),
        FormOutcome::Failed(error) => submission_error_response(error),
    };

    Ok(response)
}

fn submission_error_response(error: SubmissionError) -> Response {
    let status = match error.kind() {
        SubmissionErrorKind::Rejected => StatusCode::BAD_REQUEST,
        SubmissionErrorKind::Conflict => StatusCode::CONFLICT,
        SubmissionErrorKind::Unavailable => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            message: error.message().to_owned(),
        }),
    )
        .into_response()
}

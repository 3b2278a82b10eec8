use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;

use crate::error::GatewayError;

impl From<MultipartRejection> for GatewayError {
    fn from(rejection: MultipartRejection) -> Self {
        GatewayError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::MalformedRequest(rejection.body_text())
    }
}

/// Errors from walking the multipart stream: an oversized or badly framed
/// body is the client's fault.
pub(crate) fn form_error(err: MultipartError) -> GatewayError {
    GatewayError::MalformedRequest(err.body_text())
}

/// Errors while buffering the `file` part. Size and framing problems stay
/// client errors; anything the server failed at becomes a read failure.
pub(crate) fn file_read_error(err: MultipartError) -> GatewayError {
    if err.status().is_server_error() {
        GatewayError::FileRead(err.body_text())
    } else {
        form_error(err)
    }
}

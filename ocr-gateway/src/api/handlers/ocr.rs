use std::time::Instant;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use crate::api::extractors::{file_read_error, form_error};
use crate::api::state::AppState;
use crate::error::{GatewayError, Result};
use crate::language::resolve_language;
use crate::ocr::OcrRequest;

#[derive(Debug, Default, Deserialize)]
pub struct OcrQuery {
    pub lang: Option<String>,
}

/// Fields picked out of the upload. Only the first `file` part carrying a
/// filename and the first plain `lang` part are kept; other parts are skipped.
#[derive(Debug, Default)]
struct OcrForm {
    file: Option<Vec<u8>>,
    lang: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<OcrForm> {
    let mut form = OcrForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or("").to_string();
        let is_upload = field.file_name().is_some_and(|f| !f.is_empty());

        match (name.as_str(), is_upload) {
            ("file", true) if form.file.is_none() => {
                let bytes = field.bytes().await.map_err(file_read_error)?;
                form.file = Some(bytes.to_vec());
            }
            ("lang", false) if form.lang.is_none() => {
                form.lang = Some(field.text().await.map_err(form_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// `POST /ocr`
///
/// Accepts a multipart form with a `file` part (image bytes) and an optional
/// `lang` part. `?lang=` in the query string is used only when the form has
/// no `lang` part. Responds with the recognized text as `text/plain`.
pub async fn ocr_image(
    State(state): State<AppState>,
    query: std::result::Result<Query<OcrQuery>, QueryRejection>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let form = read_form(multipart?).await?;

    let image = form.file.ok_or(GatewayError::MissingFile)?;

    // The query string is only consulted when the form has no `lang` part.
    let lang = match form.lang {
        Some(lang) => lang,
        None => {
            let Query(query) = query?;
            query.lang.unwrap_or_default()
        }
    };
    let language = resolve_language(&lang)?;

    info!(
        bytes = image.len(),
        language = %language,
        engine = state.ocr.engine_name(),
        "Processing OCR request"
    );
    let start = Instant::now();

    let text = state.ocr.ocr(OcrRequest { image, language }).await?;

    info!(
        chars = text.chars().count(),
        ocr_ms = start.elapsed().as_secs_f64() * 1000.0,
        "OCR completed"
    );

    Ok(([(header::CONTENT_TYPE, "text/plain")], text).into_response())
}

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use pixel_adjust::Pipeline;

use super::form::{read_upload, ProcessForm};
use crate::error::ApiError;
use crate::server::AppState;
use crate::services::codec;

/// Process a preview
///
/// Decodes the upload, halves its dimensions, applies the requested
/// adjustments and returns the result as JPEG.
#[utoipa::path(
    post,
    path = "/process",
    request_body(content = ProcessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Adjusted preview", content_type = "image/jpeg"),
        (status = 400, description = "Missing image, undecodable upload or invalid parameter"),
        (status = 504, description = "Processing timed out"),
    ),
    tag = "Processing"
)]
pub async fn handle_process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let pipeline = Pipeline::from_params(&upload.params)?;
    let quality = state.jpeg_quality;

    tracing::info!(operations = pipeline.operations().len(), "Processing preview");

    let jpeg = state
        .processor
        .execute(move || {
            let buffer = codec::decode(&upload.image)?;
            let buffer = codec::downscale_half(&buffer)?;
            let adjusted = pipeline.run(buffer)?;
            Ok(codec::encode_jpeg(&adjusted, quality)?)
        })
        .await?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg).into_response())
}

/// Process at full resolution
///
/// Same as `/process` without the downscale; the JPEG is returned as a
/// download named `processed-original.jpg`.
#[utoipa::path(
    post,
    path = "/process-original",
    request_body(content = ProcessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Adjusted full-size image", content_type = "image/jpeg"),
        (status = 400, description = "Missing image, undecodable upload or invalid parameter"),
        (status = 504, description = "Processing timed out"),
    ),
    tag = "Processing"
)]
pub async fn handle_process_original(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let pipeline = Pipeline::from_params(&upload.params)?;
    let quality = state.jpeg_quality;

    tracing::info!(operations = pipeline.operations().len(), "Processing original");

    let jpeg = state
        .processor
        .execute(move || {
            let buffer = codec::decode(&upload.image)?;
            let adjusted = pipeline.run(buffer)?;
            Ok(codec::encode_jpeg(&adjusted, quality)?)
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"processed-original.jpg\"",
            ),
        ],
        jpeg,
    )
        .into_response())
}

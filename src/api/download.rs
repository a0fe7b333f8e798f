use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use pixel_adjust::{convert, Pipeline};

use super::form::{read_upload, ProcessForm};
use crate::error::ApiError;
use crate::server::AppState;
use crate::services::codec;

/// Download the processed samples as text
///
/// Processes the upload at full resolution, converts it to the requested
/// `colorspace` and returns a `# Shape: HxWxC` header followed by one
/// comma-separated line per image row.
#[utoipa::path(
    post,
    path = "/download-array",
    request_body(content = ProcessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Sample array", content_type = "text/plain"),
        (status = 400, description = "Missing image, undecodable upload or invalid parameter"),
        (status = 504, description = "Processing timed out"),
    ),
    tag = "Processing"
)]
pub async fn handle_download_array(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let pipeline = Pipeline::from_params(&upload.params)?;
    let colorspace = pipeline.options().colorspace;

    tracing::info!(%colorspace, "Exporting sample array");

    let text = state
        .processor
        .execute(move || {
            let buffer = codec::decode(&upload.image)?;
            let adjusted = pipeline.run(buffer)?;
            Ok(convert(&adjusted, colorspace)?.to_text())
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"image_array.txt\"",
            ),
        ],
        text,
    )
        .into_response())
}

use crate::Media;
use crate::error::MediaError;
use crate::screening::MediaVerdict;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use tscope_derive::api_handler;
use tscope_domain::constants::MEDIA_TAG;
use tscope_kernel::server::{ApiError, ApiResult, ApiState};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Multipart upload form.
#[derive(ToSchema)]
#[allow(dead_code)]
pub(crate) struct UploadForm {
    /// Image (`jpg`, `jpeg`, `png`) or video (`mp4`, `avi`, `mov`)
    #[schema(format = Binary)]
    file: String,
}

#[api_handler(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = OK, description = "Screening verdict", body = MediaVerdict),
        (status = BAD_REQUEST, description = "No file uploaded or invalid file type"),
        (status = PAYLOAD_TOO_LARGE, description = "Body exceeds the upload limit"),
    ),
    tag = MEDIA_TAG,
)]
pub(crate) async fn upload(
    State(state): State<ApiState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MediaVerdict>> {
    let media = state.try_get_slice::<Media>()?;
    // A non-multipart body carries no file.
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    while let Some(field) =
        multipart.next_field().await.map_err(ApiError::from)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let contents = field.bytes().await.map_err(ApiError::from)?;

        return match media.screener.screen(&file_name, &contents).await {
            Ok(verdict) => Ok(Json(verdict)),
            Err(MediaError::InvalidFileType { .. }) => Err(ApiError::bad_request("Invalid file type")),
            Err(err) => Err(ApiError::from(err.to_string())),
        };
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// `/upload`, accepting bodies up to `max_upload_bytes`.
pub fn router(max_upload_bytes: usize) -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(upload)).layer(DefaultBodyLimit::max(max_upload_bytes))
}

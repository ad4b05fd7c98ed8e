//! Request handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use exifview_core::{UploadRequest, UploadStatus};
use maud::Markup;

use super::{pages, AppContext};

/// Name of the multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// GET / - upload form
pub async fn index() -> Markup {
    pages::index()
}

/// POST /upload - run the upload through the pipeline and render the result
pub async fn upload(State(ctx): State<AppContext>, mut multipart: Multipart) -> Response {
    let mut request = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                return (e.status(), e.body_text()).into_response();
            }
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(body) => {
                request = Some(UploadRequest::new(filename, body.to_vec()));
                break;
            }
            Err(e) => {
                tracing::warn!("Failed to read upload body: {}", e);
                return (e.status(), e.body_text()).into_response();
            }
        }
    }

    let Some(request) = request else {
        return (
            StatusCode::BAD_REQUEST,
            pages::message("No file was uploaded"),
        )
            .into_response();
    };

    tracing::debug!(
        filename = %request.original_filename,
        bytes = request.body.len(),
        "Received upload"
    );

    let pipeline = ctx.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.process(&request)).await;

    match result {
        Ok(Ok(upload)) => {
            tracing::info!(
                name = %upload.stored_name,
                tags = upload.metadata.len(),
                "Upload processed"
            );
            pages::show(&upload).into_response()
        }
        Ok(Err(e)) => {
            match e.orphaned_path() {
                Some(orphan) => tracing::warn!(
                    orphan = %orphan.display(),
                    "Upload failed: {}",
                    e
                ),
                None => tracing::warn!("Upload failed: {}", e),
            }
            (status_code(e.status()), pages::message(e.user_message())).into_response()
        }
        Err(e) => {
            tracing::error!("Upload task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                pages::message("Internal error"),
            )
                .into_response()
        }
    }
}

fn status_code(status: UploadStatus) -> StatusCode {
    match status {
        UploadStatus::Success => StatusCode::OK,
        UploadStatus::Rejected => StatusCode::BAD_REQUEST,
        UploadStatus::DecodeFailed => StatusCode::UNPROCESSABLE_ENTITY,
        UploadStatus::IoFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(UploadStatus::Success), StatusCode::OK);
        assert_eq!(status_code(UploadStatus::Rejected), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_code(UploadStatus::DecodeFailed),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_code(UploadStatus::IoFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

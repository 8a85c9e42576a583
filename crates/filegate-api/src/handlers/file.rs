//! File upload, listing, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use filegate_core::error::AppError;
use filegate_core::types::into_byte_stream;
use filegate_storage::{FolderNode, StorageEngine, UploadContent, UploadRequest};

use crate::dto::request::{DownloadQuery, ListFilesQuery, UploadQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// File part of an upload form.
struct BufferedFile {
    chunks: Vec<Bytes>,
    length: u64,
}

/// POST /api/files/upload
///
/// Form fields: `FileName`, `FolderPath`, `File` (snake_case spellings are
/// accepted too).
pub async fn upload_file(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let mut request = UploadRequest {
        overwrite: query.overwrite,
        ..UploadRequest::default()
    };
    let mut file: Option<BufferedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "FileName" | "fileName" | "file_name" => {
                request.file_name = read_text(field).await?;
            }
            "FolderPath" | "folderPath" | "folder_path" => {
                request.folder_path = read_text(field).await?;
            }
            "File" | "file" => {
                file = Some(read_file(field, &state.engine).await?);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let content = file.map(|f| UploadContent {
        declared_length: f.length,
        stream: into_byte_stream(f.chunks),
    });

    let message = state.engine.upload(request, content).await?;
    Ok(Json(ApiResponse::ok(MessageResponse { message })))
}

/// GET /api/files/list
pub async fn list_files(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<FolderNode>>, ApiError> {
    let node = state
        .engine
        .list_files(&query.folder_path, query.include_subfolders)
        .await?;
    Ok(Json(ApiResponse::ok(node)))
}

/// GET /api/files/download
pub async fn download_file(
    State(state): State<AppState>,
    _principal: AuthPrincipal,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let download = state
        .engine
        .download(&query.folder_path, &query.file_name)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&download.file_name),
        )
        .header(header::CONTENT_LENGTH, download.length)
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

/// Buffer the file part chunk by chunk. The upload is rejected as soon as
/// more than the engine's limit has arrived; the rest of the body is never
/// read.
async fn read_file(mut field: Field<'_>, engine: &StorageEngine) -> Result<BufferedFile, AppError> {
    let limit = engine.max_file_size_bytes();
    let mut chunks = Vec::new();
    let mut length = 0u64;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))?
    {
        length += chunk.len() as u64;
        if length > limit {
            tracing::debug!(bytes = length, limit, "Upload exceeded limit while buffering");
            return Err(engine.too_large().into());
        }
        chunks.push(chunk);
    }

    Ok(BufferedFile { chunks, length })
}

/// `attachment` disposition with a quoted file name. Quotes, backslashes and
/// control characters are replaced so the header value stays well-formed.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

//! API handlers for the redbox server
//!
//! Provides:
//! - `GET /health`
//! - `POST /upload`: multipart PDF + box coordinates, returns the stamped PDF

use axum::{
    body::{Body, Bytes},
    extract::Multipart,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use redbox_core::{stamp_first_page, CallerRect};

use crate::error::ServerError;

/// Name the stamped document is offered under
pub const OUTPUT_FILENAME: &str = "modified_pdf.pdf";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "redbox-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

struct UploadedFile {
    name: Option<String>,
    bytes: Bytes,
}

/// Raw multipart fields, before validation
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    x: Option<String>,
    y: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ServerError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().map(|s| s.to_string());
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile {
                        name: file_name,
                        bytes,
                    });
                }
                "x" => form.x = Some(field.text().await?),
                "y" => form.y = Some(field.text().await?),
                "width" => form.width = Some(field.text().await?),
                "height" => form.height = Some(field.text().await?),
                other => debug!("Ignoring unexpected field '{}'", other),
            }
        }

        Ok(form)
    }
}

/// Parse one coordinate form field as a number a PDF can hold.
///
/// PDF real numbers are single precision, so values beyond `f32` range are
/// rejected along with NaN and infinities.
pub fn parse_coordinate(field: &str, raw: Option<&str>) -> Result<f64, ServerError> {
    let raw = raw.ok_or_else(|| ServerError::MissingField(field.to_string()))?;

    let invalid = || ServerError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || !(value as f32).is_finite() {
        return Err(invalid());
    }

    Ok(value)
}

/// Handler: POST /upload
pub async fn handle_upload(mut multipart: Multipart) -> Result<Response, ServerError> {
    let form = UploadForm::read(&mut multipart).await?;

    let file = form
        .file
        .ok_or_else(|| ServerError::MissingField("file".into()))?;

    let rect = CallerRect::new(
        parse_coordinate("x", form.x.as_deref())?,
        parse_coordinate("y", form.y.as_deref())?,
        parse_coordinate("width", form.width.as_deref())?,
        parse_coordinate("height", form.height.as_deref())?,
    );

    info!(
        "Received file: {}, x: {}, y: {}, width: {}, height: {}",
        file.name.as_deref().unwrap_or("<unnamed>"),
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );

    let bytes = file.bytes;
    let outcome = tokio::task::spawn_blocking(move || stamp_first_page(&bytes, rect))
        .await
        .map_err(|e| ServerError::Internal(format!("Stamp task failed: {}", e)))??;

    debug!(
        "Stamped {} page(s), output {} bytes",
        outcome.page_count,
        outcome.pdf.len()
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, outcome.pdf.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", OUTPUT_FILENAME),
        )
        .body(Body::from(outcome.pdf))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

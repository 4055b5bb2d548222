//! Loads local files picked for the compose dialog and `tgids send --file`.

use std::{fs, io, path::Path};

use thiserror::Error;

use crate::domain::payload::{ensure_attachment_size, Attachment, PayloadError};

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Please enter a file path")]
    MissingPath,
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a regular file")]
    NotAFile { path: String },
    #[error("Unsupported file type: .{extension}")]
    UnsupportedType { extension: String },
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Reads `path` into an [`Attachment`]. The size limit is checked against
/// file metadata before any bytes are read.
pub fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let display = path.display().to_string();
    if display.trim().is_empty() {
        return Err(AttachmentError::MissingPath);
    }

    let metadata = fs::metadata(path).map_err(|source| AttachmentError::Read {
        path: display.clone(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(AttachmentError::NotAFile { path: display });
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let mime_type =
        accepted_mime_type(path).ok_or_else(|| AttachmentError::UnsupportedType {
            extension: extension.clone(),
        })?;

    ensure_attachment_size(metadata.len())?;

    let bytes = fs::read(path).map_err(|source| AttachmentError::Read {
        path: display.clone(),
        source,
    })?;
    // The file may have grown since the metadata call.
    ensure_attachment_size(bytes.len() as u64)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(display);

    tracing::debug!(
        file_name = %file_name,
        mime_type = %mime_type,
        size_bytes = bytes.len(),
        "attachment loaded"
    );

    Ok(Attachment {
        file_name,
        mime_type,
        bytes,
    })
}

/// Non-image types the file picker accepts. Any `image/*` type is accepted too.
const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

/// First guessed MIME essence for `path` that is an image or a listed
/// document type.
pub fn accepted_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .iter()
        .map(|mime| mime.essence_str().to_owned())
        .find(|essence| {
            essence.starts_with("image/") || DOCUMENT_MIME_TYPES.contains(&essence.as_str())
        })
}

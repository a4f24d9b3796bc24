//! Résumé intake: format detection, text extraction and original-file storage.

use std::panic;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Txt,
}

impl ResumeFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(ResumeFormat::Pdf),
            "txt" => Some(ResumeFormat::Txt),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "pdf",
            ResumeFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "application/pdf",
            ResumeFormat::Txt => "text/plain",
        }
    }
}

/// Extracts plain text. A file that cannot be read yields `""`, never an error.
///
/// `pdf_extract` panics on some malformed documents (e.g. a page without
/// `/Resources`), so the call runs under `catch_unwind`.
pub fn extract_text(format: ResumeFormat, bytes: &[u8]) -> String {
    match format {
        ResumeFormat::Pdf => {
            match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("Failed to extract text from PDF resume: {e}");
                    String::new()
                }
                Err(_) => {
                    warn!("PDF text extraction panicked; storing resume without text");
                    String::new()
                }
            }
        }
        ResumeFormat::Txt => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Runs [`extract_text`] on the blocking pool. A failed task also yields `""`.
pub async fn extract_text_blocking(format: ResumeFormat, bytes: Bytes) -> String {
    match tokio::task::spawn_blocking(move || extract_text(format, &bytes)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Resume text extraction task failed: {e}");
            String::new()
        }
    }
}

pub fn resume_key(user_id: Uuid, format: ResumeFormat) -> String {
    format!("resumes/{user_id}/{}.{}", Uuid::new_v4(), format.extension())
}

/// Uploads the original file and returns its object key.
pub async fn store_original(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    user_id: Uuid,
    format: ResumeFormat,
    bytes: Bytes,
) -> Result<String, AppError> {
    let key = resume_key(user_id, format);
    s3.put_object()
        .bucket(s3_bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type(format.content_type())
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded resume to s3://{s3_bucket}/{key}");
    Ok(key)
}

//! Submission input
//!
//! A job is created either from a document or from free-form text, never both.
//! [`SubmissionForm`] mirrors the two-tab form: the mode picks which field is
//! sent and the other one is ignored.

use std::path::Path;
use thiserror::Error;

/// Extensions the service knows how to turn into a lesson
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "txt", "tex"];

/// Input rejected before any request was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A document to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads a document from disk
    ///
    /// Only `.pdf`, `.txt` and `.tex` files are accepted.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();

        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false);
        if !accepted {
            return Err(ValidationError::new(format!(
                "Unsupported file type: {} (expected PDF, TXT, or TEX)",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| ValidationError::new("Please select a file."))?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ValidationError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(Self { file_name, bytes })
    }
}

/// Validated payload of a job creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    File(FileUpload),
    Text(String),
}

/// Which field of the form is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    File,
    Text,
}

/// Raw form state before validation
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub mode: InputMode,
    pub file: Option<FileUpload>,
    pub text: String,
}

impl SubmissionForm {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            mode: InputMode::Text,
            file: None,
            text: text.into(),
        }
    }

    pub fn with_file(file: FileUpload) -> Self {
        Self {
            mode: InputMode::File,
            file: Some(file),
            text: String::new(),
        }
    }

    /// Validates the active field and returns the payload to send
    pub fn into_input(self) -> Result<SubmissionInput, ValidationError> {
        match self.mode {
            InputMode::File => match self.file {
                Some(file) if !file.bytes.is_empty() => Ok(SubmissionInput::File(file)),
                _ => Err(ValidationError::new("Please select a file.")),
            },
            InputMode::Text => {
                if self.text.trim().is_empty() {
                    Err(ValidationError::new("Please enter some text."))
                } else {
                    Ok(SubmissionInput::Text(self.text))
                }
            }
        }
    }
}

//! Buffered multipart form reading for the video endpoints.

use crate::error::{AppError, Result};
use crate::services::UploadFile;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;

/// Text parts are small; anything larger is a client error.
const MAX_TEXT_BYTES: usize = 64 * 1024;

/// A part the endpoint accepts, by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text(&'static str),
    File(&'static str),
}

impl FormField {
    fn name(self) -> &'static str {
        match self {
            FormField::Text(name) | FormField::File(name) => name,
        }
    }
}

/// Text fields and files of one multipart request, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Empty file parts count as absent.
    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name).filter(|f| !f.bytes.is_empty())
    }

    fn contains(&self, name: &str) -> bool {
        self.texts.contains_key(name) || self.files.contains_key(name)
    }
}

/// Drain `payload` into a form holding only the declared `fields`.
///
/// Each field may appear once. Undeclared or repeated names are rejected
/// before their body is read, so a request buffers at most one text part of
/// `MAX_TEXT_BYTES` per text field and one `max_file_bytes` part per file
/// field.
pub async fn read_form(
    mut payload: Multipart,
    fields: &[FormField],
    max_file_bytes: usize,
) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;

        let name = field.name().unwrap_or_default().to_string();
        let declared = fields
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .filter(|_| !form.contains(&name))
            .ok_or_else(|| AppError::BadRequest(format!("Unexpected field '{name}'")))?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|m| m.to_string());
        let limit = match declared {
            FormField::Text(_) => MAX_TEXT_BYTES,
            FormField::File(_) => max_file_bytes,
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data =
                chunk.map_err(|e| AppError::BadRequest(format!("Multipart read error: {e}")))?;
            if bytes.len() + data.len() > limit {
                return Err(AppError::BadRequest(format!(
                    "Field '{name}' exceeds the upload limit"
                )));
            }
            bytes.extend_from_slice(&data);
        }

        match declared {
            FormField::File(_) => {
                let file_name = file_name.ok_or_else(|| {
                    AppError::BadRequest(format!("Field '{name}' must be a file"))
                })?;
                form.files.insert(
                    name,
                    UploadFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            }
            FormField::Text(_) => {
                let text = String::from_utf8(bytes).map_err(|_| {
                    AppError::BadRequest(format!("Field '{name}' is not valid UTF-8"))
                })?;
                form.texts.insert(name, text);
            }
        }
    }

    Ok(form)
}

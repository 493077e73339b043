//! Request body extraction shared by `/upload` and `/task`
//!
//! Both endpoints take either `multipart/form-data` (text parts plus an
//! optional `file` part) or a JSON object of fields.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use tg_core::object::Upload;
use tg_core::task::TaskDraft;

use crate::error::ApiError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Default)]
pub struct FormPayload {
    pub fields: HashMap<String, String>,
    pub file: Option<Upload>,
}

impl FormPayload {
    /// Non-empty text field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn task_draft(&self) -> TaskDraft {
        let text = |name: &str| self.fields.get(name).cloned().unwrap_or_default();
        TaskDraft {
            name: text("name"),
            date: text("date"),
            priority: text("priority"),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut payload = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                payload.file = Some(Upload::new(filename, bytes.to_vec()));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                payload.fields.insert(name, text);
            }
        }

        Ok(payload)
    }

    fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let object: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?;

        let fields = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect();

        Ok(Self { fields, file: None })
    }
}

fn content_type(req: &Request) -> Option<String> {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase())
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(&req).unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        // Bodies in any other format carry no fields
        if content_type.starts_with("application/json") {
            Self::from_json(&body)
        } else {
            Ok(Self::default())
        }
    }
}

//! Request extractors.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Multipart, Request},
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use validator::Validate;

use amaramba_core::submission::ClientInfo;
use amaramba_core::upload::UploadRequest;

use crate::response::ApiError;

const FORWARDED_FOR: &str = "x-forwarded-for";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// JSON body that is deserialized and then validated.
///
/// Both malformed JSON and failed validation become 400 envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct FormFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl FormFile {
    /// Turn the part into an upload stored under `folder`.
    #[must_use]
    pub fn into_upload(self, folder: &str) -> UploadRequest {
        UploadRequest::new(self.bytes, self.file_name, self.content_type).in_folder(folder)
    }
}

/// A fully read multipart form: text fields and file parts.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, FormFile>,
}

impl MultipartForm {
    /// Reads every part of the form into memory.
    ///
    /// # Errors
    ///
    /// Returns a 400 error if the body is not valid multipart.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_CONTENT_TYPE)
                        .to_string();
                    let bytes = field.bytes().await?;
                    form.files.insert(
                        name,
                        FormFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Text field by name, trimmed, `None` when absent or blank.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Removes and returns a file part.
    pub fn take_file(&mut self, name: &str) -> Option<FormFile> {
        self.files.remove(name)
    }
}

/// Client details for submission records.
///
/// Reads `X-Forwarded-For`, the socket peer when the server was started
/// with connect info, and `User-Agent`.
#[derive(Debug, Clone)]
pub struct ClientMeta(pub ClientInfo);

impl ClientMeta {
    fn from_headers(headers: &HeaderMap, remote: Option<IpAddr>) -> Self {
        let forwarded_for = headers.get(FORWARDED_FOR).and_then(|v| v.to_str().ok());
        let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());
        Self(ClientInfo::from_request(forwarded_for, remote, user_agent))
    }
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self::from_headers(&parts.headers, remote))
    }
}

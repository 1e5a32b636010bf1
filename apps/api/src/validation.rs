//! JSON body extraction with field validation.
//!
//! Every way a body can be unacceptable (wrong content type, malformed JSON,
//! wrong shape, failed `validator` rule) ends up as the same 422 payload:
//! `{"detail": [{"loc", "msg", "type"}, ...], "body": <what was sent>}`.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

/// One entry of the `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorDetail {
    fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    fn field(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Rejection produced by `ValidatedJson`. Always rendered as 422.
#[derive(Debug, Clone, Serialize)]
pub struct RequestValidationError {
    pub detail: Vec<ErrorDetail>,
    pub body: Value,
}

impl IntoResponse for RequestValidationError {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

/// Like `axum::Json`, but runs `validator::Validate` and rejects with
/// `RequestValidationError`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = RequestValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(&req);

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            RequestValidationError {
                detail: vec![ErrorDetail::body(rejection.body_text(), "body_read_error")],
                body: Value::Null,
            }
        })?;

        if !is_json {
            return Err(RequestValidationError {
                detail: vec![ErrorDetail::body(
                    "Expected request with `Content-Type: application/json`",
                    "content_type",
                )],
                body: echo_body(&bytes),
            });
        }

        parse_and_validate(&bytes).map(ValidatedJson)
    }
}

/// Parses `bytes` as JSON into `T` and validates it.
pub fn parse_and_validate<T>(bytes: &[u8]) -> Result<T, RequestValidationError>
where
    T: DeserializeOwned + Validate,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestValidationError {
            detail: vec![ErrorDetail::body("Field required", "missing")],
            body: Value::Null,
        });
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| RequestValidationError {
        detail: vec![ErrorDetail::body(
            format!("JSON decode error: {e}"),
            "json_invalid",
        )],
        body: echo_body(bytes),
    })?;

    let parsed: T = serde_json::from_value(value.clone()).map_err(|e| RequestValidationError {
        detail: vec![ErrorDetail::body(e.to_string(), "value_error")],
        body: value.clone(),
    })?;

    parsed.validate().map_err(|errors| RequestValidationError {
        detail: field_details(&errors),
        body: value,
    })?;

    Ok(parsed)
}

/// Flattens validator errors into `detail` entries, sorted by field name.
fn field_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut details: Vec<ErrorDetail> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let msg = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                ErrorDetail::field(&field, msg, &err.code)
            })
        })
        .collect();

    if details.is_empty() {
        details.push(ErrorDetail::body(errors.to_string(), "value_error"));
    }
    details
}

/// The original body as JSON if it parses, otherwise as a string.
fn echo_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json"
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

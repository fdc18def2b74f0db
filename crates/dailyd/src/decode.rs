//! Request body decoding for score submissions
//!
//! A submission body must be a single JSON object of at most
//! [`MAX_BODY_BYTES`] bytes, with `score`, `moves` and `pieces` present,
//! an optional `date`, and nothing else. Every way a body can fail is
//! mapped to a [`DecodeError`] the handler can report as bad input.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use daily_core::Submission;
use serde::Deserialize;
use serde_json::error::Category;
use thiserror::Error;

/// Largest accepted submission body
pub const MAX_BODY_BYTES: usize = 1024;

/// Why a submission body was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("body must not be empty")]
    Empty,

    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    #[error("body contains badly-formed JSON")]
    UnexpectedEof,

    #[error("body contains incorrect JSON type: {0}")]
    WrongType(String),

    #[error("body contains unknown key {0}")]
    UnknownField(String),

    #[error("body is missing key {0}")]
    MissingField(String),

    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("body must only contain a single JSON value")]
    TrailingData,

    #[error("body could not be read: {0}")]
    Unreadable(String),
}

impl DecodeError {
    /// Translate an extractor failure while buffering the body
    pub fn from_rejection(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            DecodeError::TooLarge {
                limit: MAX_BODY_BYTES,
            }
        } else {
            DecodeError::Unreadable(rejection.body_text())
        }
    }
}

/// Decode a submission from a raw request body
pub fn decode_submission(body: &[u8]) -> Result<Submission, DecodeError> {
    if body.len() > MAX_BODY_BYTES {
        return Err(DecodeError::TooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    // serde would happily read a struct out of a positional array
    if body.trim_ascii_start().starts_with(b"[") {
        return Err(DecodeError::WrongType(
            "expected a JSON object, found an array".to_string(),
        ));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let submission =
        Submission::deserialize(&mut deserializer).map_err(|err| classify(body, err))?;

    // Anything but whitespace after the first value is a second value
    deserializer.end().map_err(|_| DecodeError::TrailingData)?;

    Ok(submission)
}

fn classify(body: &[u8], err: serde_json::Error) -> DecodeError {
    match err.classify() {
        Category::Eof => DecodeError::UnexpectedEof,
        Category::Syntax => DecodeError::Syntax {
            offset: byte_offset(body, err.line(), err.column()),
        },
        Category::Io => DecodeError::Unreadable(err.to_string()),
        Category::Data => {
            let message = err.to_string();
            if message.starts_with("unknown field") {
                DecodeError::UnknownField(quoted_name(&message))
            } else if message.starts_with("missing field") {
                DecodeError::MissingField(quoted_name(&message))
            } else {
                DecodeError::WrongType(message)
            }
        }
    }
}

/// Turn serde's 1-based line and in-line column into an offset from the
/// start of the body
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start = match line {
        0 | 1 => 0,
        n => body
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(n - 2)
            .map_or(body.len(), |(i, _)| i + 1),
    };
    line_start + column
}

/// First backtick-quoted name in a serde message, e.g. "unknown field `x`, ..."
fn quoted_name(message: &str) -> String {
    message
        .split('`')
        .nth(1)
        .map(|name| format!("\"{name}\""))
        .unwrap_or_else(|| message.to_string())
}

//! Decode error types.

use thiserror::Error;

/// Failures while decoding an instruction payload.
///
/// All variants are recovered locally by callers: the payload is skipped and
/// the stream continues. No partial record is ever surfaced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload shorter than the discriminator header")]
    Empty,

    #[error("field `{field}` overruns payload: need {needed} bytes, {remaining} remain")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

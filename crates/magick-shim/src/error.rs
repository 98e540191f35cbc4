use std::ffi::NulError;

#[derive(Debug, thiserror::Error)]
pub enum MagickError {
    #[error("string contains interior NUL: {0}")]
    Nul(#[from] NulError),
    #[error("MagickCore error (severity {severity}): {reason}")]
    Native { severity: u32, reason: String },
    #[error("MagickCore returned no {0}")]
    AcquireFailed(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

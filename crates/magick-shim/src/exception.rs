use std::ffi::{CStr, CString};
use std::ptr::NonNull;

use crate::error::MagickError;
use crate::sys;

/// Severity of an exception raised from Rust into MagickCore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// `CoderWarning`: recorded, the operation still succeeds.
    Warning,
    /// `CoderError`: the operation failed.
    Error,
}

impl Severity {
    fn native(self) -> sys::ExceptionType {
        // SAFETY: immutable `const ExceptionType` values defined by the shim.
        unsafe {
            match self {
                Self::Warning => sys::BindingsCoderWarning,
                Self::Error => sys::BindingsCoderError,
            }
        }
    }
}

/// Owned `ExceptionInfo` used to collect failures from one native call.
pub struct ExceptionInfo {
    ptr: NonNull<sys::ExceptionInfo>,
}

impl ExceptionInfo {
    pub fn new() -> Result<Self, MagickError> {
        crate::genesis();
        // SAFETY: FFI constructor returns owned pointer or null on allocation failure.
        let ptr = unsafe { sys::AcquireExceptionInfo() };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or(MagickError::AcquireFailed("exception info"))
    }

    pub(crate) fn as_ptr(&self) -> *mut sys::ExceptionInfo {
        self.ptr.as_ptr()
    }

    pub fn severity(&self) -> u32 {
        // SAFETY: `self.ptr` came from `AcquireExceptionInfo` and is alive.
        unsafe { (*self.ptr.as_ptr()).severity }
    }

    pub fn reason(&self) -> Option<String> {
        // SAFETY: `self.ptr` is alive; `reason` is null or a NUL-terminated string.
        let ptr = unsafe { (*self.ptr.as_ptr()).reason };
        if ptr.is_null() {
            return None;
        }
        // SAFETY: checked non-null above.
        let s = unsafe { CStr::from_ptr(ptr) }.to_string_lossy();
        if s.is_empty() {
            None
        } else {
            Some(s.into_owned())
        }
    }

    /// Record `message` in this exception.
    pub fn throw(&self, severity: Severity, message: &str) -> Result<(), MagickError> {
        // SAFETY: `self.ptr` is alive.
        unsafe { throw_raw(self.ptr.as_ptr(), severity, message) }
    }

    /// Turn a recorded error into `Err`. Warnings are logged and ignored.
    pub fn check(&self, operation: &'static str) -> Result<(), MagickError> {
        let severity = self.severity();
        if severity == 0 {
            return Ok(());
        }
        let reason = self.reason().unwrap_or_else(|| operation.to_string());
        // SAFETY: immutable `const ExceptionType` defined by the shim.
        let error_threshold = unsafe { sys::BindingsErrorException };
        if severity >= error_threshold {
            return Err(MagickError::Native { severity, reason });
        }
        tracing::warn!("{operation}: MagickCore warning {severity}: {reason}");
        Ok(())
    }

    /// Check both the boolean status of a call and the recorded severity.
    pub(crate) fn check_status(
        &self,
        status: sys::MagickBooleanType,
        operation: &'static str,
    ) -> Result<(), MagickError> {
        self.check(operation)?;
        if status == sys::MagickFalse {
            return Err(MagickError::Native {
                severity: self.severity(),
                reason: format!("{operation} failed"),
            });
        }
        Ok(())
    }
}

impl Drop for ExceptionInfo {
    fn drop(&mut self) {
        // SAFETY: pointer came from `AcquireExceptionInfo` and is owned by this wrapper.
        unsafe { sys::DestroyExceptionInfo(self.ptr.as_ptr()) };
    }
}

/// Record `message` in an exception owned by MagickCore.
///
/// # Safety
/// `exception` must be null or point at a live `ExceptionInfo`.
pub(crate) unsafe fn throw_raw(
    exception: *mut sys::ExceptionInfo,
    severity: Severity,
    message: &str,
) -> Result<(), MagickError> {
    if exception.is_null() {
        return Err(MagickError::InvalidArgument("null exception info"));
    }
    let message = CString::new(message)?;
    // SAFETY: all strings are NUL-terminated and outlive the call; `%s`
    // consumes exactly the one variadic argument.
    unsafe {
        sys::ThrowMagickException(
            exception,
            c"magick-shim".as_ptr(),
            c"throw".as_ptr(),
            line!() as usize,
            severity.native(),
            message.as_ptr(),
            c"`%s'".as_ptr(),
            c"magick-shim".as_ptr(),
        );
    }
    Ok(())
}

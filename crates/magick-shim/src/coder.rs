//! Coders implemented in Rust and registered in MagickCore's format table.
//!
//! A loadable coder module exports `Register<NAME>Image`, returning
//! `MagickImageCoderSignature`, and `Unregister<NAME>Image`.
//! [`coder_entry_points!`](crate::coder_entry_points) generates both for a
//! [`CoderSpec`].

use std::ffi::{CStr, CString};
use std::ptr::{self, NonNull};

use crate::canvas;
use crate::constants;
use crate::error::MagickError;
use crate::exception::{ExceptionInfo, Severity, throw_raw};
use crate::image::Image;
use crate::sys;

pub use crate::sys::{
    DecodeImageHandler, EncodeImageHandler, ExceptionInfo as RawExceptionInfo,
    Image as RawImage, ImageInfo as RawImageInfo, MagickBooleanType,
};

/// Everything MagickCore needs to know about one format.
pub struct CoderSpec {
    pub name: &'static CStr,
    pub description: &'static CStr,
    pub decoder: DecodeImageHandler,
    pub encoder: EncodeImageHandler,
    /// Whether several images may be written to one file.
    pub adjoin: bool,
    /// Whether the format is only selected by an explicit `NAME:` prefix.
    pub implicit: bool,
}

/// The NULL format: reads a transparent canvas, writes nothing.
pub static NULL_CODER: CoderSpec = CoderSpec {
    name: c"RUSTNULL",
    description: c"Constant image of uniform color",
    decoder: read_null_image,
    encoder: write_null_image,
    adjoin: false,
    implicit: true,
};

/// Add `spec` to the format table and return the coder signature.
pub fn register_coder(spec: &CoderSpec) -> Result<usize, MagickError> {
    let exception = ExceptionInfo::new()?;
    // SAFETY: an empty name only instantiates the coder table.
    unsafe { sys::GetMagickInfo(c"".as_ptr(), exception.as_ptr()) };

    // SAFETY: all strings are NUL-terminated; MagickCore copies them.
    let entry = unsafe {
        sys::AcquireMagickInfo(
            spec.name.as_ptr(),
            spec.name.as_ptr(),
            spec.description.as_ptr(),
        )
    };
    let entry = NonNull::new(entry).ok_or(MagickError::AcquireFailed("magick info"))?;

    // SAFETY: `entry` is a fresh, unregistered MagickInfo owned here until
    // `RegisterMagickInfo` takes it.
    let status = unsafe {
        sys::rust_SetMagickInfoCoders(entry.as_ptr(), Some(spec.decoder), Some(spec.encoder));
        if !spec.adjoin {
            sys::rust_ClearMagickInfoFlags(entry.as_ptr(), sys::BindingsCoderAdjoinFlag);
        }
        if spec.implicit {
            sys::rust_SetMagickInfoFormatType(entry.as_ptr(), sys::BindingsImplicitFormatType);
        }
        sys::RegisterMagickInfo(entry.as_ptr())
    };
    exception.check_status(status, "RegisterMagickInfo")?;

    tracing::info!("registered coder {}", spec.name.to_string_lossy());
    Ok(constants::coder_signature())
}

/// [`register_coder`] for a module entry point, which must always return the
/// signature. Failures are logged.
pub fn register_entry_point(spec: &CoderSpec) -> usize {
    register_coder(spec).unwrap_or_else(|e| {
        tracing::error!("registering coder {}: {e}", spec.name.to_string_lossy());
        constants::coder_signature()
    })
}

/// Remove a format from the table. Returns whether it was present.
pub fn unregister_coder(name: &CStr) -> bool {
    // SAFETY: `name` is NUL-terminated.
    let removed = unsafe { sys::UnregisterMagickInfo(name.as_ptr()) } != sys::MagickFalse;
    tracing::info!("unregistered coder {} ({removed})", name.to_string_lossy());
    removed
}

/// Whether MagickCore can currently resolve `name` to a format.
pub fn is_registered(name: &str) -> Result<bool, MagickError> {
    let name = CString::new(name)?;
    let exception = ExceptionInfo::new()?;
    // SAFETY: pointers are valid while called.
    let info = unsafe { sys::GetMagickInfo(name.as_ptr(), exception.as_ptr()) };
    Ok(!info.is_null())
}

/// Export `Register<NAME>Image` / `Unregister<NAME>Image` for a [`CoderSpec`].
#[macro_export]
macro_rules! coder_entry_points {
    ($register:ident, $unregister:ident, $spec:path) => {
        #[allow(non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "C" fn $register() -> usize {
            $crate::coder::register_entry_point(&$spec)
        }

        #[allow(non_snake_case)]
        #[unsafe(no_mangle)]
        pub extern "C" fn $unregister() {
            $crate::coder::unregister_coder($spec.name);
        }
    };
}

coder_entry_points!(RegisterRUSTNULLImage, UnregisterRUSTNULLImage, NULL_CODER);

unsafe extern "C" fn read_null_image(
    image_info: *const sys::ImageInfo,
    exception: *mut sys::ExceptionInfo,
) -> *mut sys::Image {
    // SAFETY: MagickCore passes a live ImageInfo (or null from direct callers).
    let image = unsafe { Image::from_image_info(image_info) }.and_then(|mut image| {
        canvas::fill_transparent(&mut image)?;
        Ok(image)
    });
    match image {
        Ok(image) => image.into_raw(),
        Err(e) => {
            tracing::error!("ReadRUSTNULLImage: {e}");
            // SAFETY: MagickCore passes a live ExceptionInfo.
            if let Err(e) = unsafe { throw_raw(exception, Severity::Error, &e.to_string()) }
            {
                tracing::warn!("ReadRUSTNULLImage: could not record error: {e}");
            }
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn write_null_image(
    _image_info: *const sys::ImageInfo,
    _image: *mut sys::Image,
    _exception: *mut sys::ExceptionInfo,
) -> sys::MagickBooleanType {
    sys::MagickTrue
}

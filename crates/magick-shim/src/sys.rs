#![allow(non_snake_case, non_upper_case_globals)]

use std::ffi::{c_char, c_int, c_uint, c_void};

use crate::quantum::{MagickRealType, Quantum};

pub type MagickBooleanType = c_uint;
pub type MagickSizeType = u64;
pub type ClassType = c_uint;
pub type ColorspaceType = c_uint;
pub type ExceptionType = c_uint;
pub type PixelTrait = c_uint;
pub type MagickStatusType = c_uint;
pub type MagickFormatType = c_uint;

pub const MagickFalse: MagickBooleanType = 0;
pub const MagickTrue: MagickBooleanType = 1;

pub const UndefinedPixelTrait: PixelTrait = 0;
pub const BlendPixelTrait: PixelTrait = 0x000004;

#[repr(C)]
pub struct Image {
    _private: [u8; 0],
}

#[repr(C)]
pub struct ImageInfo {
    _private: [u8; 0],
}

#[repr(C)]
pub struct MagickInfo {
    _private: [u8; 0],
}

pub type DecodeImageHandler =
    unsafe extern "C" fn(image_info: *const ImageInfo, exception: *mut ExceptionInfo) -> *mut Image;
pub type EncodeImageHandler = unsafe extern "C" fn(
    image_info: *const ImageInfo,
    image: *mut Image,
    exception: *mut ExceptionInfo,
) -> MagickBooleanType;

/// Only ever allocated by `AcquireExceptionInfo`; the leading fields are read
/// to report failures.
#[repr(C)]
#[allow(dead_code)]
pub struct ExceptionInfo {
    pub severity: ExceptionType,
    pub error_number: c_int,
    pub reason: *mut c_char,
    pub description: *mut c_char,
    pub exceptions: *mut c_void,
    pub relinquish: MagickBooleanType,
    pub semaphore: *mut c_void,
    pub signature: usize,
}

/// Color-model-independent components of one pixel (`MagickCore/pixel.h`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelInfo {
    pub storage_class: ClassType,
    pub colorspace: ColorspaceType,
    pub alpha_trait: PixelTrait,
    pub fuzz: f64,
    pub depth: usize,
    pub count: MagickSizeType,
    pub red: MagickRealType,
    pub green: MagickRealType,
    pub blue: MagickRealType,
    pub black: MagickRealType,
    pub alpha: MagickRealType,
    pub index: f64,
}

// Shim: csrc/magick_shim.c
unsafe extern "C" {
    pub static BindingsMagickImageCoderSignature: usize;
    pub static BindingsQuantumRange: Quantum;
    pub static BindingsOpaqueAlpha: Quantum;
    #[cfg(feature = "extended")]
    pub static BindingsTransparentAlpha: Quantum;

    pub static BindingsQuantumSize: usize;
    pub static BindingsRealTypeSize: usize;
    pub static BindingsPixelInfoSize: usize;

    pub static BindingsGRAYColorspace: ColorspaceType;
    pub static BindingssRGBColorspace: ColorspaceType;
    pub static BindingsErrorException: ExceptionType;
    pub static BindingsCoderWarning: ExceptionType;
    pub static BindingsCoderError: ExceptionType;
    pub static BindingsCoderAdjoinFlag: MagickStatusType;
    pub static BindingsImplicitFormatType: MagickFormatType;

    pub fn rust_SetPixelViaPixelInfo(
        image: *const Image,
        pixel_info: *const PixelInfo,
        pixel: *mut Quantum,
    );
    pub fn rust_GetPixelChannels(image: *const Image) -> usize;

    pub fn rust_GetPixelRed(image: *const Image, pixel: *const Quantum) -> Quantum;
    pub fn rust_GetPixelGreen(image: *const Image, pixel: *const Quantum) -> Quantum;
    pub fn rust_GetPixelBlue(image: *const Image, pixel: *const Quantum) -> Quantum;
    pub fn rust_GetPixelAlpha(image: *const Image, pixel: *const Quantum) -> Quantum;

    pub fn rust_GetImageExtent(image: *const Image, columns: *mut usize, rows: *mut usize);

    pub fn rust_SetMagickInfoCoders(
        entry: *mut MagickInfo,
        decoder: Option<DecodeImageHandler>,
        encoder: Option<EncodeImageHandler>,
    );
    pub fn rust_ClearMagickInfoFlags(entry: *mut MagickInfo, flags: MagickStatusType);
    pub fn rust_SetMagickInfoFormatType(entry: *mut MagickInfo, format_type: MagickFormatType);

    #[cfg(feature = "extended")]
    pub fn rust_SetPixelIndex(image: *const Image, index: Quantum, pixel: *mut Quantum);
    #[cfg(feature = "extended")]
    pub fn rust_GetPixelIndex(image: *const Image, pixel: *const Quantum) -> Quantum;
    #[cfg(feature = "extended")]
    pub fn rust_GetPixelLuma(image: *const Image, pixel: *const Quantum) -> MagickRealType;
}

// MagickCore exports.
unsafe extern "C" {
    pub fn MagickCoreGenesis(path: *const c_char, establish_signal_handlers: MagickBooleanType);

    pub fn AcquireExceptionInfo() -> *mut ExceptionInfo;
    pub fn DestroyExceptionInfo(exception: *mut ExceptionInfo) -> *mut ExceptionInfo;
    pub fn ThrowMagickException(
        exception: *mut ExceptionInfo,
        module: *const c_char,
        function: *const c_char,
        line: usize,
        severity: ExceptionType,
        tag: *const c_char,
        format: *const c_char,
        ...
    ) -> MagickBooleanType;

    pub fn AcquireMagickInfo(
        magick_module: *const c_char,
        name: *const c_char,
        description: *const c_char,
    ) -> *mut MagickInfo;
    pub fn RegisterMagickInfo(magick_info: *mut MagickInfo) -> MagickBooleanType;
    pub fn UnregisterMagickInfo(name: *const c_char) -> MagickBooleanType;
    pub fn GetMagickInfo(name: *const c_char, exception: *mut ExceptionInfo) -> *const MagickInfo;

    pub fn AcquireImage(image_info: *const ImageInfo, exception: *mut ExceptionInfo)
    -> *mut Image;
    pub fn DestroyImage(image: *mut Image) -> *mut Image;
    pub fn SetImageExtent(
        image: *mut Image,
        columns: usize,
        rows: usize,
        exception: *mut ExceptionInfo,
    ) -> MagickBooleanType;
    pub fn SetImageColorspace(
        image: *mut Image,
        colorspace: ColorspaceType,
        exception: *mut ExceptionInfo,
    ) -> MagickBooleanType;
    pub fn SetImageAlpha(
        image: *mut Image,
        alpha: Quantum,
        exception: *mut ExceptionInfo,
    ) -> MagickBooleanType;
    pub fn AcquireImageColormap(
        image: *mut Image,
        colors: usize,
        exception: *mut ExceptionInfo,
    ) -> MagickBooleanType;

    pub fn GetPixelInfo(image: *const Image, pixel: *mut PixelInfo);

    pub fn GetAuthenticPixels(
        image: *mut Image,
        x: isize,
        y: isize,
        columns: usize,
        rows: usize,
        exception: *mut ExceptionInfo,
    ) -> *mut Quantum;
    pub fn SyncAuthenticPixels(image: *mut Image, exception: *mut ExceptionInfo)
    -> MagickBooleanType;
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn test_real_type_is_double() {
        assert_eq!(size_of::<MagickRealType>(), size_of::<f64>());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_pixel_info_matches_magick_core_layout() {
        assert_eq!(offset_of!(PixelInfo, fuzz), 16);
        assert_eq!(offset_of!(PixelInfo, count), 32);
        assert_eq!(offset_of!(PixelInfo, red), 40);
        assert_eq!(offset_of!(PixelInfo, alpha), 72);
        assert_eq!(offset_of!(PixelInfo, index), 80);
        assert_eq!(size_of::<PixelInfo>(), 88);
    }
}

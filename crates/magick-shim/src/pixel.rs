//! Pixel accessors forwarded through the shim.
//!
//! Each function passes its arguments unchanged to the corresponding inline
//! MagickCore accessor and returns its result unchanged. Nothing is validated
//! in release builds; debug builds assert that the buffer holds a full pixel
//! and does not overlap the read-only arguments.

use std::mem::{size_of, size_of_val};

use crate::image::Image;
use crate::quantum::{MagickRealType, Quantum};
use crate::sys::{self, PixelInfo};

impl PixelInfo {
    /// Set a blended alpha component.
    pub fn set_alpha(&mut self, alpha: Quantum) {
        self.alpha_trait = sys::BlendPixelTrait;
        self.alpha = crate::quantum::to_real(alpha);
    }

    pub fn set_rgb(&mut self, red: MagickRealType, green: MagickRealType, blue: MagickRealType) {
        self.red = red;
        self.green = green;
        self.blue = blue;
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha_trait != sys::UndefinedPixelTrait
    }
}

/// Write the components of `pixel_info` into `pixel`, in `image`'s channel order.
pub fn set_pixel_via_pixel_info(image: &Image, pixel_info: &PixelInfo, pixel: &mut [Quantum]) {
    debug_check_pixel(image, pixel);
    debug_assert_disjoint(
        pixel,
        (pixel_info as *const PixelInfo).cast(),
        size_of::<PixelInfo>(),
    );
    // SAFETY: all three references are live; the buffer holds a full pixel.
    unsafe { raw::set_pixel_via_pixel_info(image.as_ptr(), pixel_info, pixel.as_mut_ptr()) }
}

/// Write `index` into the index channel of `pixel`. No-op for images without one.
#[cfg(feature = "extended")]
pub fn set_pixel_index(image: &Image, index: Quantum, pixel: &mut [Quantum]) {
    debug_check_pixel(image, pixel);
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { raw::set_pixel_index(image.as_ptr(), index, pixel.as_mut_ptr()) }
}

/// Perceptual luma of the red, green and blue channels of `pixel`.
#[cfg(feature = "extended")]
pub fn pixel_luma(image: &Image, pixel: &[Quantum]) -> MagickRealType {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { raw::pixel_luma(image.as_ptr(), pixel.as_ptr()) }
}

/// Number of samples per pixel.
pub fn pixel_channels(image: &Image) -> usize {
    // SAFETY: `image` is live.
    unsafe { raw::pixel_channels(image.as_ptr()) }
}

pub fn pixel_red(image: &Image, pixel: &[Quantum]) -> Quantum {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { sys::rust_GetPixelRed(image.as_ptr(), pixel.as_ptr()) }
}

pub fn pixel_green(image: &Image, pixel: &[Quantum]) -> Quantum {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { sys::rust_GetPixelGreen(image.as_ptr(), pixel.as_ptr()) }
}

pub fn pixel_blue(image: &Image, pixel: &[Quantum]) -> Quantum {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { sys::rust_GetPixelBlue(image.as_ptr(), pixel.as_ptr()) }
}

/// Alpha sample, or `OpaqueAlpha` when the image has no alpha channel.
pub fn pixel_alpha(image: &Image, pixel: &[Quantum]) -> Quantum {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { sys::rust_GetPixelAlpha(image.as_ptr(), pixel.as_ptr()) }
}

/// Index sample, or zero when the image has no index channel.
#[cfg(feature = "extended")]
pub fn pixel_index(image: &Image, pixel: &[Quantum]) -> Quantum {
    debug_assert!(pixel.len() >= pixel_channels(image));
    // SAFETY: both references are live; the buffer holds a full pixel.
    unsafe { sys::rust_GetPixelIndex(image.as_ptr(), pixel.as_ptr()) }
}

fn debug_check_pixel(image: &Image, pixel: &[Quantum]) {
    // Skips the `pixel_channels` FFI call in release builds.
    if cfg!(debug_assertions) {
        debug_assert!(
            pixel.len() >= pixel_channels(image),
            "pixel buffer holds {} samples, image has {} channels",
            pixel.len(),
            pixel_channels(image)
        );
        debug_assert_disjoint(pixel, image.as_ptr().cast(), 1);
    }
}

fn debug_assert_disjoint(pixel: &[Quantum], other: *const u8, other_len: usize) {
    debug_assert!(
        !ranges_overlap(
            pixel.as_ptr() as usize,
            size_of_val(pixel),
            other as usize,
            other_len,
        ),
        "pixel buffer overlaps a read-only argument"
    );
}

fn ranges_overlap(a: usize, a_len: usize, b: usize, b_len: usize) -> bool {
    a_len != 0 && b_len != 0 && a < b.saturating_add(b_len) && b < a.saturating_add(a_len)
}

/// Unchecked forwards for callers holding native pointers, such as coder callbacks.
pub mod raw {
    use crate::quantum::{MagickRealType, Quantum};
    use crate::sys::{self, PixelInfo};

    pub use crate::sys::Image as RawImage;

    /// # Safety
    /// `image` and `pixel_info` must be valid; `pixel` must point at a full
    /// pixel that overlaps neither of them.
    pub unsafe fn set_pixel_via_pixel_info(
        image: *const RawImage,
        pixel_info: *const PixelInfo,
        pixel: *mut Quantum,
    ) {
        // SAFETY: forwarded caller contract.
        unsafe { sys::rust_SetPixelViaPixelInfo(image, pixel_info, pixel) }
    }

    /// # Safety
    /// `image` must be valid; `pixel` must point at a full pixel that does not
    /// overlap it.
    #[cfg(feature = "extended")]
    pub unsafe fn set_pixel_index(image: *const RawImage, index: Quantum, pixel: *mut Quantum) {
        // SAFETY: forwarded caller contract.
        unsafe { sys::rust_SetPixelIndex(image, index, pixel) }
    }

    /// # Safety
    /// `image` must be valid and `pixel` must point at a full pixel.
    #[cfg(feature = "extended")]
    pub unsafe fn pixel_luma(image: *const RawImage, pixel: *const Quantum) -> MagickRealType {
        // SAFETY: forwarded caller contract.
        unsafe { sys::rust_GetPixelLuma(image, pixel) }
    }

    /// # Safety
    /// `image` must be valid.
    pub unsafe fn pixel_channels(image: *const RawImage) -> usize {
        // SAFETY: forwarded caller contract.
        unsafe { sys::rust_GetPixelChannels(image) }
    }
}

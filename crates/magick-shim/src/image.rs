use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

use crate::constants;
use crate::error::MagickError;
use crate::exception::ExceptionInfo;
use crate::pixel;
use crate::quantum::Quantum;
use crate::sys::{self, PixelInfo};

/// Colorspaces the crate can assign to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorspace {
    Gray,
    Srgb,
}

impl Colorspace {
    fn native(self) -> sys::ColorspaceType {
        // SAFETY: immutable `const ColorspaceType` values defined by the shim.
        unsafe {
            match self {
                Self::Gray => sys::BindingsGRAYColorspace,
                Self::Srgb => sys::BindingssRGBColorspace,
            }
        }
    }
}

/// An image allocated by MagickCore and destroyed on drop.
pub struct Image {
    ptr: NonNull<sys::Image>,
    columns: usize,
    rows: usize,
}

// SAFETY: MagickCore images carry no thread affinity; `&mut self` is required
// for every mutation through this wrapper.
unsafe impl Send for Image {}

impl Image {
    /// Acquire a `columns` x `rows` sRGB image with no alpha channel.
    pub fn new(columns: usize, rows: usize) -> Result<Self, MagickError> {
        if columns == 0 || rows == 0 {
            return Err(MagickError::InvalidArgument("image extent must be non-zero"));
        }
        // SAFETY: a null ImageInfo selects library defaults.
        unsafe { Self::acquire(ptr::null(), |_, _| (columns, rows)) }
    }

    /// Acquire an image configured by a native `ImageInfo`, as a coder's
    /// decoder does. A zero width or height from the info is treated as 1.
    ///
    /// # Safety
    /// `image_info` must be null or point at a live `ImageInfo`.
    pub(crate) unsafe fn from_image_info(
        image_info: *const sys::ImageInfo,
    ) -> Result<Self, MagickError> {
        // SAFETY: forwarded caller contract.
        unsafe { Self::acquire(image_info, |columns, rows| (columns.max(1), rows.max(1))) }
    }

    /// # Safety
    /// `image_info` must be null or point at a live `ImageInfo`.
    unsafe fn acquire(
        image_info: *const sys::ImageInfo,
        extent: impl FnOnce(usize, usize) -> (usize, usize),
    ) -> Result<Self, MagickError> {
        let exception = ExceptionInfo::new()?;
        // SAFETY: forwarded caller contract.
        let raw = unsafe { sys::AcquireImage(image_info, exception.as_ptr()) };
        let ptr = NonNull::new(raw).ok_or(MagickError::AcquireFailed("image"))?;
        // SAFETY: `ptr` was just acquired and is owned here.
        let mut image = unsafe { Self::from_raw(ptr) };
        exception.check("AcquireImage")?;

        let (columns, rows) = extent(image.columns, image.rows);
        // SAFETY: `image.ptr` is a live image owned by `image`.
        let status =
            unsafe { sys::SetImageExtent(image.ptr.as_ptr(), columns, rows, exception.as_ptr()) };
        exception.check_status(status, "SetImageExtent")?;
        image.columns = columns;
        image.rows = rows;

        tracing::debug!("acquired {columns}x{rows} image");
        Ok(image)
    }

    /// Take ownership of a native image.
    ///
    /// # Safety
    /// `ptr` must be a live image that nothing else will destroy.
    pub(crate) unsafe fn from_raw(ptr: NonNull<sys::Image>) -> Self {
        let (mut columns, mut rows) = (0, 0);
        // SAFETY: caller guarantees `ptr` is live.
        unsafe { sys::rust_GetImageExtent(ptr.as_ptr(), &mut columns, &mut rows) };
        Self { ptr, columns, rows }
    }

    /// Hand ownership back to MagickCore, e.g. as a decoder's result.
    pub(crate) fn into_raw(self) -> *mut sys::Image {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn as_ptr(&self) -> *const sys::Image {
        self.ptr.as_ptr()
    }

    /// Number of samples per pixel in this image's channel map.
    pub fn channels(&self) -> usize {
        pixel::pixel_channels(self)
    }

    pub fn set_colorspace(&mut self, colorspace: Colorspace) -> Result<(), MagickError> {
        let exception = ExceptionInfo::new()?;
        // SAFETY: `self.ptr` is live and exclusively borrowed.
        let status = unsafe {
            sys::SetImageColorspace(self.ptr.as_ptr(), colorspace.native(), exception.as_ptr())
        };
        exception.check_status(status, "SetImageColorspace")
    }

    /// Add a blended alpha channel, initialized to opaque.
    pub fn enable_alpha(&mut self) -> Result<(), MagickError> {
        let exception = ExceptionInfo::new()?;
        // SAFETY: `self.ptr` is live and exclusively borrowed.
        let status = unsafe {
            sys::SetImageAlpha(
                self.ptr.as_ptr(),
                constants::opaque_alpha(),
                exception.as_ptr(),
            )
        };
        exception.check_status(status, "SetImageAlpha")
    }

    /// Give the image a grayscale colormap of `colors` entries, which makes it
    /// PseudoClass and adds an index channel.
    pub fn acquire_colormap(&mut self, colors: usize) -> Result<(), MagickError> {
        if colors == 0 {
            return Err(MagickError::InvalidArgument("colormap needs at least one color"));
        }
        let exception = ExceptionInfo::new()?;
        // SAFETY: `self.ptr` is live and exclusively borrowed.
        let status =
            unsafe { sys::AcquireImageColormap(self.ptr.as_ptr(), colors, exception.as_ptr()) };
        exception.check_status(status, "AcquireImageColormap")
    }

    /// The image's default pixel descriptor, as `GetPixelInfo` fills it.
    pub fn pixel_info(&self) -> PixelInfo {
        let mut info = MaybeUninit::<PixelInfo>::uninit();
        // SAFETY: `GetPixelInfo` initializes every field of the struct.
        unsafe {
            sys::GetPixelInfo(self.as_ptr(), info.as_mut_ptr());
            info.assume_init()
        }
    }

    /// Borrow a rectangle of the pixel cache for writing.
    pub fn authentic_pixels(
        &mut self,
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    ) -> Result<PixelRegion<'_>, MagickError> {
        if columns == 0 || rows == 0 {
            return Err(MagickError::InvalidArgument("region must be non-empty"));
        }
        if !span_fits(x, columns, self.columns) || !span_fits(y, rows, self.rows) {
            return Err(MagickError::InvalidArgument("region exceeds image bounds"));
        }

        let exception = ExceptionInfo::new()?;
        // SAFETY: `self.ptr` is live and exclusively borrowed; bounds checked above.
        let raw = unsafe {
            sys::GetAuthenticPixels(
                self.ptr.as_ptr(),
                x as isize,
                y as isize,
                columns,
                rows,
                exception.as_ptr(),
            )
        };
        exception.check("GetAuthenticPixels")?;
        let raw = NonNull::new(raw).ok_or(MagickError::AcquireFailed("authentic pixels"))?;

        let image: &Image = self;
        let channels = image.channels();
        let len = columns * rows * channels;
        // SAFETY: the cache returned `columns * rows` pixels of `channels`
        // samples each; they stay valid while `self` is exclusively borrowed.
        let pixels = unsafe { std::slice::from_raw_parts_mut(raw.as_ptr(), len) };
        Ok(PixelRegion {
            image,
            pixels,
            channels,
        })
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        // SAFETY: pointer came from `AcquireImage` and is owned by this wrapper.
        unsafe { sys::DestroyImage(self.ptr.as_ptr()) };
        tracing::debug!("destroyed {}x{} image", self.columns, self.rows);
    }
}

/// Writable pixels from the cache of one image.
///
/// Holds the image borrow, so no other cache request can invalidate the buffer.
pub struct PixelRegion<'a> {
    image: &'a Image,
    pixels: &'a mut [Quantum],
    channels: usize,
}

impl PixelRegion<'_> {
    pub fn image(&self) -> &Image {
        self.image
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels in the region.
    pub fn len(&self) -> usize {
        self.pixels.len() / self.channels.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pixels(&self) -> &[Quantum] {
        self.pixels
    }

    /// The channels of pixel `i`.
    pub fn pixel(&self, i: usize) -> Option<&[Quantum]> {
        let start = i.checked_mul(self.channels)?;
        self.pixels.get(start..start.checked_add(self.channels)?)
    }

    /// The image handle and the sample buffer, for use with the accessors.
    pub fn split(&mut self) -> (&Image, &mut [Quantum]) {
        (self.image, &mut *self.pixels)
    }

    /// Push the region back to the pixel cache.
    pub fn sync(self) -> Result<(), MagickError> {
        let exception = ExceptionInfo::new()?;
        // SAFETY: the region still holds the exclusive borrow of the image.
        let status =
            unsafe { sys::SyncAuthenticPixels(self.image.ptr.as_ptr(), exception.as_ptr()) };
        exception.check_status(status, "SyncAuthenticPixels")
    }
}

/// Whether `[start, start + len)` lies within `[0, limit)`.
fn span_fits(start: usize, len: usize, limit: usize) -> bool {
    start.checked_add(len).is_some_and(|end| end <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_within_limit_fits() {
        assert!(span_fits(0, 4, 4));
        assert!(span_fits(3, 1, 4));
    }

    #[test]
    fn test_span_past_limit_does_not_fit() {
        assert!(!span_fits(3, 2, 4));
        assert!(!span_fits(4, 1, 4));
    }

    #[test]
    fn test_overflowing_span_does_not_fit() {
        assert!(!span_fits(usize::MAX, 1, 4));
        assert!(!span_fits(1, usize::MAX, usize::MAX));
    }
}

//! Linkable access to MagickCore's inline pixel accessors.
//!
//! MagickCore defines its pixel accessors (`SetPixelViaPixelInfo`,
//! `GetPixelChannels`, `GetPixelLuma`, ...) as `static inline` functions and
//! several constants as macros, so none of them exist as symbols. A small C
//! shim (`csrc/magick_shim.c`) re-exports them under `rust_*` and
//! `Bindings*` names; this crate declares those symbols and wraps them in
//! borrow-checked forwarding functions.
//!
//! The `extended` feature (default) adds `SetPixelIndex`, `GetPixelLuma` and
//! `TransparentAlpha`, which older shim builds did not carry, and the
//! `RUSTNULL` coder in [`coder`].
#![allow(unsafe_code)]
// FFI wrappers necessarily use unsafe externs and raw pointers.

#[cfg(feature = "extended")]
mod canvas;
#[cfg(feature = "extended")]
pub mod coder;
pub mod constants;
mod error;
mod exception;
mod genesis;
mod image;
pub mod pixel;
pub mod quantum;
mod sys;

#[cfg(feature = "extended")]
pub use canvas::null_image;
pub use error::MagickError;
pub use exception::{ExceptionInfo, Severity};
pub use genesis::genesis;
pub use image::{Colorspace, Image, PixelRegion};
pub use quantum::{MagickRealType, Quantum};
pub use sys::PixelInfo;

//! Compile-time MagickCore values, read from the globals defined by the shim.

use crate::quantum::Quantum;
use crate::sys;

/// `MagickImageCoderSignature`: the value a coder module's register function
/// returns so the library can reject modules built for another ABI.
pub fn coder_signature() -> usize {
    // SAFETY: immutable `const size_t` defined by the shim.
    unsafe { sys::BindingsMagickImageCoderSignature }
}

/// `QuantumRange`: the largest representable sample.
pub fn quantum_range() -> Quantum {
    // SAFETY: immutable `const Quantum` defined by the shim.
    unsafe { sys::BindingsQuantumRange }
}

/// `OpaqueAlpha`.
pub fn opaque_alpha() -> Quantum {
    // SAFETY: immutable `const Quantum` defined by the shim.
    unsafe { sys::BindingsOpaqueAlpha }
}

/// `TransparentAlpha`.
#[cfg(feature = "extended")]
pub fn transparent_alpha() -> Quantum {
    // SAFETY: immutable `const Quantum` defined by the shim.
    unsafe { sys::BindingsTransparentAlpha }
}

/// `sizeof` values as seen by the C compiler that built the shim.
pub mod layout {
    use crate::sys;

    pub fn quantum_size() -> usize {
        // SAFETY: immutable `const size_t` defined by the shim.
        unsafe { sys::BindingsQuantumSize }
    }

    pub fn real_type_size() -> usize {
        // SAFETY: immutable `const size_t` defined by the shim.
        unsafe { sys::BindingsRealTypeSize }
    }

    pub fn pixel_info_size() -> usize {
        // SAFETY: immutable `const size_t` defined by the shim.
        unsafe { sys::BindingsPixelInfoSize }
    }
}

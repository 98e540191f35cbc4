//! Native sample types, selected to match the linked MagickCore build.
//!
//! `build.rs` reads the quantum depth and HDRI flag from the library's cflags
//! and sets `magick_quantum_depth` / `magick_hdri` accordingly.

/// One color-channel sample.
#[cfg(all(magick_hdri, any(magick_quantum_depth = "8", magick_quantum_depth = "16")))]
pub type Quantum = f32;
#[cfg(all(magick_hdri, any(magick_quantum_depth = "32", magick_quantum_depth = "64")))]
pub type Quantum = f64;
#[cfg(all(not(magick_hdri), magick_quantum_depth = "8"))]
pub type Quantum = u8;
#[cfg(all(not(magick_hdri), magick_quantum_depth = "16"))]
pub type Quantum = u16;
#[cfg(all(not(magick_hdri), magick_quantum_depth = "32"))]
pub type Quantum = u32;
#[cfg(all(not(magick_hdri), magick_quantum_depth = "64"))]
pub type Quantum = u64;

/// Floating-point type used for pixel arithmetic (`PixelInfo` components, luma).
///
/// `MagickDoubleType` at every quantum depth.
pub type MagickRealType = f64;

/// Whether the linked library stores samples as floating point.
pub const HDRI: bool = cfg!(magick_hdri);

/// Bits per sample of the linked library.
pub const QUANTUM_DEPTH: u32 = if cfg!(magick_quantum_depth = "8") {
    8
} else if cfg!(magick_quantum_depth = "32") {
    32
} else if cfg!(magick_quantum_depth = "64") {
    64
} else {
    16
};

/// Convert a real value to a sample with a plain numeric cast.
///
/// Integer builds truncate and saturate; this is not `ClampToQuantum`.
#[inline]
pub fn from_real(value: MagickRealType) -> Quantum {
    value as Quantum
}

/// Widen a sample to the real type.
#[inline]
pub fn to_real(value: Quantum) -> MagickRealType {
    value as MagickRealType
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_integers_survive_conversion() {
        for v in [0.0, 1.0, 128.0, 255.0] {
            let v = v as MagickRealType;
            assert_eq!(to_real(from_real(v)), v);
        }
    }

    #[test]
    fn test_quantum_width_matches_depth() {
        let bits = std::mem::size_of::<Quantum>() * 8;
        if HDRI {
            assert!(bits == 32 || bits == 64);
        } else {
            assert_eq!(bits as u32, QUANTUM_DEPTH);
        }
    }
}

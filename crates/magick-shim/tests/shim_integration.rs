use std::mem::size_of;

use magick_shim::constants::{self, layout};
use magick_shim::pixel;
use magick_shim::quantum::{self, HDRI, QUANTUM_DEPTH};
use magick_shim::{Colorspace, Image, MagickError, MagickRealType, PixelInfo, Quantum};

fn q(value: f64) -> Quantum {
    quantum::from_real(value as MagickRealType)
}

fn rgb_image() -> Image {
    Image::new(2, 2).expect("2x2 image should be acquired")
}

fn rgba_image() -> Image {
    let mut image = rgb_image();
    image.enable_alpha().expect("alpha channel should be added");
    image
}

fn descriptor(image: &Image, rgb: [f64; 3]) -> PixelInfo {
    let mut info = image.pixel_info();
    info.set_rgb(
        rgb[0] as MagickRealType,
        rgb[1] as MagickRealType,
        rgb[2] as MagickRealType,
    );
    info
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "got {actual}, expected {expected}, diff {diff} > {tol}"
    );
}

#[test]
fn layout_matches_native_compiler() {
    assert_eq!(size_of::<Quantum>(), layout::quantum_size());
    assert_eq!(size_of::<MagickRealType>(), layout::real_type_size());
    assert_eq!(size_of::<PixelInfo>(), layout::pixel_info_size());
}

#[test]
fn quantum_range_matches_depth() {
    let expected = ((1u128 << QUANTUM_DEPTH) - 1) as f64;
    assert_eq!(constants::quantum_range() as f64, expected);
    if !HDRI {
        assert_eq!(constants::quantum_range(), Quantum::MAX);
    }
}

#[test]
fn opaque_alpha_is_quantum_range() {
    assert_eq!(constants::opaque_alpha(), constants::quantum_range());
}

#[cfg(feature = "extended")]
#[test]
fn transparent_alpha_is_zero() {
    assert_eq!(constants::transparent_alpha(), q(0.0));
}

#[test]
fn coder_signature_encodes_quantum_depth() {
    let signature = constants::coder_signature();
    assert_eq!(signature & 0xff, QUANTUM_DEPTH as usize);
    assert!(signature >> 8 > 0, "library interface version missing");
}

#[test]
fn channel_counts_follow_image_kind() {
    let mut gray = rgb_image();
    gray.set_colorspace(Colorspace::Gray)
        .expect("gray colorspace should apply");
    let rgb = rgb_image();
    let rgba = rgba_image();

    assert_eq!(pixel::pixel_channels(&gray), 1);
    assert_eq!(pixel::pixel_channels(&rgb), 3);
    assert_eq!(pixel::pixel_channels(&rgba), 4);
    assert_eq!(rgba.channels(), pixel::pixel_channels(&rgba));
}

#[test]
fn set_via_descriptor_writes_only_pixel_channels() {
    let image = rgba_image();
    let channels = image.channels();
    let mut info = descriptor(&image, [255.0, 128.0, 0.0]);
    info.set_alpha(q(200.0));

    let sentinel = q(7.0);
    let mut buffer = vec![sentinel; channels + 2];
    pixel::set_pixel_via_pixel_info(&image, &info, &mut buffer);

    assert_eq!(pixel::pixel_red(&image, &buffer), q(255.0));
    assert_eq!(pixel::pixel_green(&image, &buffer), q(128.0));
    assert_eq!(pixel::pixel_blue(&image, &buffer), q(0.0));
    assert_eq!(pixel::pixel_alpha(&image, &buffer), q(200.0));
    assert!(
        buffer[..channels].iter().all(|&s| s != sentinel),
        "every channel should be written: {buffer:?}"
    );
    assert_eq!(&buffer[channels..], &[sentinel, sentinel]);
}

#[test]
fn set_via_descriptor_without_alpha_trait_writes_opaque() {
    let image = rgba_image();
    let mut info = descriptor(&image, [1.0, 2.0, 3.0]);
    info.alpha_trait = 0;

    let mut buffer = vec![q(0.0); image.channels()];
    pixel::set_pixel_via_pixel_info(&image, &info, &mut buffer);

    assert_eq!(pixel::pixel_alpha(&image, &buffer), constants::opaque_alpha());
}

#[test]
fn set_via_descriptor_persists_through_cache() {
    let mut image = rgb_image();
    let info = descriptor(&image, [10.0, 20.0, 30.0]);

    {
        let mut region = image
            .authentic_pixels(1, 1, 1, 1)
            .expect("pixel region should be available");
        let (img, samples) = region.split();
        pixel::set_pixel_via_pixel_info(img, &info, samples);
        region.sync().expect("region should sync");
    }

    let region = image
        .authentic_pixels(0, 1, 2, 1)
        .expect("pixel region should be available");
    let written = region.pixel(1).expect("second pixel of the row");
    assert_eq!(pixel::pixel_red(region.image(), written), q(10.0));
    assert_eq!(pixel::pixel_green(region.image(), written), q(20.0));
    assert_eq!(pixel::pixel_blue(region.image(), written), q(30.0));
}

#[cfg(feature = "extended")]
#[test]
fn luma_uses_library_weights() {
    let image = rgb_image();
    let info = descriptor(&image, [255.0, 128.0, 0.0]);
    let mut buffer = vec![q(0.0); image.channels()];
    pixel::set_pixel_via_pixel_info(&image, &info, &mut buffer);

    let luma = pixel::pixel_luma(&image, &buffer) as f64;
    let expected = 0.212656 * 255.0 + 0.715158 * 128.0 + 0.072186 * 0.0;
    assert_close(luma, expected, 1e-3);
}

#[cfg(feature = "extended")]
#[test]
fn luma_of_gray_pixel_is_its_level() {
    let image = rgb_image();
    let info = descriptor(&image, [100.0, 100.0, 100.0]);
    let mut buffer = vec![q(0.0); image.channels()];
    pixel::set_pixel_via_pixel_info(&image, &info, &mut buffer);

    assert_close(pixel::pixel_luma(&image, &buffer) as f64, 100.0, 1e-2);
}

#[cfg(feature = "extended")]
#[test]
fn index_roundtrips_through_library_accessor() {
    let mut image = rgb_image();
    image.acquire_colormap(8).expect("colormap should be acquired");
    assert_eq!(image.channels(), 4, "PseudoClass image carries an index channel");

    let mut buffer = vec![q(0.0); image.channels()];
    pixel::set_pixel_index(&image, q(5.0), &mut buffer);

    assert_eq!(pixel::pixel_index(&image, &buffer), q(5.0));
    assert_eq!(pixel::pixel_red(&image, &buffer), q(0.0));
    assert_eq!(pixel::pixel_green(&image, &buffer), q(0.0));
    assert_eq!(pixel::pixel_blue(&image, &buffer), q(0.0));
}

#[cfg(feature = "extended")]
#[test]
fn index_on_direct_class_image_is_noop() {
    let image = rgb_image();
    let before = vec![q(3.0); image.channels()];
    let mut buffer = before.clone();
    pixel::set_pixel_index(&image, q(5.0), &mut buffer);

    assert_eq!(buffer, before);
    assert_eq!(pixel::pixel_index(&image, &buffer), q(0.0));
}

#[cfg(feature = "extended")]
#[test]
fn null_image_is_fully_transparent() {
    let mut image = magick_shim::null_image(3, 0).expect("null image should be built");
    assert_eq!((image.columns(), image.rows()), (3, 1));
    assert_eq!(image.channels(), 4);

    let region = image
        .authentic_pixels(0, 0, 3, 1)
        .expect("pixel region should be available");
    for i in 0..region.len() {
        let px = region.pixel(i).expect("pixel within region");
        assert_eq!(
            pixel::pixel_alpha(region.image(), px),
            constants::transparent_alpha(),
            "pixel {i} should be transparent"
        );
    }
}

#[test]
fn zero_extent_is_rejected() {
    assert!(matches!(
        Image::new(0, 4),
        Err(MagickError::InvalidArgument(_))
    ));
}

#[test]
fn region_outside_image_is_rejected() {
    let mut image = rgb_image();
    assert!(matches!(
        image.authentic_pixels(1, 0, 2, 1),
        Err(MagickError::InvalidArgument(_))
    ));
}

#[test]
fn region_origin_near_usize_max_is_rejected() {
    let mut image = rgb_image();
    assert!(matches!(
        image.authentic_pixels(usize::MAX, 0, 1, 1),
        Err(MagickError::InvalidArgument(_))
    ));
    assert!(matches!(
        image.authentic_pixels(0, usize::MAX, 1, 1),
        Err(MagickError::InvalidArgument(_))
    ));
}

#[test]
fn pixel_index_past_region_is_none() {
    let mut image = rgb_image();
    let region = image
        .authentic_pixels(0, 0, 1, 1)
        .expect("pixel region should be available");
    let channels = region.channels();
    assert!(region.pixel(0).is_some());
    assert!(region.pixel(1).is_none());
    assert!(region.pixel(usize::MAX / channels).is_none());
    assert!(region.pixel(usize::MAX).is_none());
}

#[cfg(feature = "extended")]
#[test]
fn null_coder_registers_and_unregisters() {
    use magick_shim::coder;

    let signature = coder::RegisterRUSTNULLImage();
    assert_eq!(signature, constants::coder_signature());
    assert!(coder::is_registered("RUSTNULL").expect("valid coder name"));

    coder::UnregisterRUSTNULLImage();
    assert!(!coder::is_registered("RUSTNULL").expect("valid coder name"));
}

//! Transparent canvases, built the way MagickCore's NULL coder reads an image.

use crate::constants;
use crate::error::MagickError;
use crate::image::Image;
use crate::pixel;

/// Acquire a `columns` x `rows` image whose every pixel is the image's
/// background color with fully transparent alpha.
///
/// A zero dimension is treated as 1.
pub fn null_image(columns: usize, rows: usize) -> Result<Image, MagickError> {
    let mut image = Image::new(columns.max(1), rows.max(1))?;
    fill_transparent(&mut image)?;
    Ok(image)
}

/// Enable blended alpha and overwrite every pixel with the transparent
/// background.
pub(crate) fn fill_transparent(image: &mut Image) -> Result<(), MagickError> {
    image.enable_alpha()?;

    let mut background = image.pixel_info();
    background.set_alpha(constants::transparent_alpha());

    let (columns, rows) = (image.columns(), image.rows());
    for y in 0..rows {
        let mut region = image.authentic_pixels(0, y, columns, 1)?;
        let channels = region.channels();
        let (image, samples) = region.split();
        for px in samples.chunks_exact_mut(channels) {
            pixel::set_pixel_via_pixel_info(image, &background, px);
        }
        region.sync()?;
    }

    tracing::debug!("filled {columns}x{rows} null image");
    Ok(())
}

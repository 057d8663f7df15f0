// NeuroScan 🧠 AGPL-3.0 License - https://neuroscan.dev/license

//! Image preprocessing for classification inference.
//!
//! This module turns an input scan into the fixed-shape tensor the model
//! expects: decode, bilinear resize to 224x224 (no aspect-ratio preservation,
//! no cropping), scale to [0, 1], and add a leading batch dimension. Every
//! failure in this stage is an [`AnalysisError::ImageProcessing`], which the
//! CLI reports through its dedicated image-stage error shape.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbImage};
use ndarray::Array4;

use crate::error::{AnalysisError, Result};

/// Model input height in pixels.
pub const INPUT_HEIGHT: usize = 224;

/// Model input width in pixels.
pub const INPUT_WIDTH: usize = 224;

/// Number of input channels (RGB).
pub const INPUT_CHANNELS: usize = 3;

/// Decode an image file.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// Returns [`AnalysisError::ImageProcessing`] if the file cannot be read or
/// decoded (invalid path, corrupt or unsupported format).
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|e| {
        AnalysisError::ImageProcessing(format!("Failed to load image {}: {e}", path.display()))
    })
}

/// Preprocess a decoded image into the model input tensor.
///
/// Resizes to exactly 224x224, scales every channel value by dividing by
/// 255.0, and adds a leading batch dimension.
///
/// # Arguments
///
/// * `image` - Decoded input image.
///
/// # Returns
///
/// Array4 with shape (1, 224, 224, 3) and values in [0, 1].
///
/// # Errors
///
/// Returns [`AnalysisError::ImageProcessing`] if the resize stage fails.
pub fn preprocess(image: &DynamicImage) -> Result<Array4<f32>> {
    let resized = resize_to_input(image)?;
    Ok(image_to_tensor(&resized))
}

/// Decode and preprocess an image file in one step.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// Returns [`AnalysisError::ImageProcessing`] if decoding or resizing fails.
pub fn preprocess_file<P: AsRef<Path>>(path: P) -> Result<Array4<f32>> {
    let image = load_image(path)?;
    preprocess(&image)
}

/// Stretch-resize an image to the model input dimensions.
///
/// The image is resized to exactly 224x224 with bilinear convolution,
/// matching the preprocessing the model was trained with; aspect ratio is
/// deliberately not preserved.
fn resize_to_input(image: &DynamicImage) -> Result<RgbImage> {
    use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};

    let (src_w, src_h) = image.dimensions();
    #[allow(clippy::cast_possible_truncation)]
    let (target_h, target_w) = (INPUT_HEIGHT as u32, INPUT_WIDTH as u32);

    let src_rgb = image.to_rgb8();
    let src_image =
        Image::from_vec_u8(src_w, src_h, src_rgb.into_raw(), PixelType::U8x3).map_err(|e| {
            AnalysisError::ImageProcessing(format!("Failed to stage image for resize: {e}"))
        })?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x3);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| {
            AnalysisError::ImageProcessing(format!(
                "Failed to resize image to {INPUT_WIDTH}x{INPUT_HEIGHT}: {e}"
            ))
        })?;

    RgbImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        AnalysisError::ImageProcessing("Resized buffer has unexpected length".to_string())
    })
}

/// Convert an RGB image to a normalized NHWC tensor.
///
/// # Arguments
///
/// * `image` - RGB image to convert.
///
/// # Returns
///
/// Array4 with shape (1, H, W, 3) and values in [0, 1].
fn image_to_tensor(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    let pixels = image.as_raw();

    let mut tensor = Array4::zeros((1, h, w, INPUT_CHANNELS));

    // NHWC row-major layout matches the raw HWC byte order, so one flat pass suffices.
    for (dst, &src) in tensor
        .as_slice_mut()
        .unwrap()
        .iter_mut()
        .zip(pixels.iter())
    {
        *dst = f32::from(src) / 255.0;
    }

    tensor
}
